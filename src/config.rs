use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::format::MAX_DECIMALS;

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 화면 테마.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    /// 시스템/프레임워크 기본값
    #[default]
    System,
    Light,
    Dark,
}

/// 결과 표시 설정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// 소수 자릿수 (기본 2)
    pub decimals: usize,
    /// 금액 앞에 붙일 통화 기호
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            decimals: 2,
            currency_symbol: None,
        }
    }
}

/// 애플리케이션 설정을 표현한다. 계산 엔진에는 전달되지 않고 표시 계층에서만 쓴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/en/ko/uk)
    pub language: String,
    /// 외부 언어팩 디렉터리
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_pack_dir: Option<String>,
    pub theme: Theme,
    /// GUI 창 투명도 (0.3~1.0)
    pub window_alpha: f32,
    /// GUI 사용자 폰트(.ttf/.otf) 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<String>,
    /// `RUST_LOG`가 없을 때 쓰는 로그 레벨
    pub log_level: String,
    /// 복리 계산기 초기값
    pub default_compoundings_per_year: u32,
    pub display: DisplaySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            theme: Theme::System,
            window_alpha: 1.0,
            font_path: None,
            log_level: "warn".to_string(),
            default_compoundings_per_year: 1,
            display: DisplaySettings::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(CONFIG_FILE))
}

/// 지정한 경로에서 설정을 읽는다. 파일이 없으면 기본값을 저장하고 반환한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg.normalized())
    } else {
        let cfg = Config::default();
        save_to(&cfg, path)?;
        info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

/// 설정을 지정한 경로에 저장한다.
pub fn save_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_to(self, Path::new(CONFIG_FILE))
    }

    /// 범위를 벗어난 값을 허용 범위로 맞춘다.
    pub fn normalized(mut self) -> Self {
        self.display.decimals = self.display.decimals.min(MAX_DECIMALS);
        self.window_alpha = self.window_alpha.clamp(0.3, 1.0);
        if self.default_compoundings_per_year == 0 {
            self.default_compoundings_per_year = 1;
        }
        self
    }
}
