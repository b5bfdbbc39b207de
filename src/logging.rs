//! tracing 구독자 초기화.

use tracing_subscriber::EnvFilter;

/// stderr 로 출력하는 fmt 구독자를 설치한다.
///
/// `RUST_LOG`가 있으면 우선하고, 없으면 `default_level`(설정의 `log_level`)을 쓴다.
/// 이미 설치되어 있으면 아무것도 하지 않는다.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
