use thiserror::Error;
use tracing::{info, warn};

use crate::calculator::CalcError;
use crate::config::{Config, ConfigError};
use crate::forms::FormSet;
use crate::i18n::{self, Translator};
use crate::report::{Report, ReportError};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 계산 입력 오류
    #[error("계산 오류: {0}")]
    Calc(#[from] CalcError),
    /// 보고서 저장 오류
    #[error("보고서 오류: {0}")]
    Report(#[from] ReportError),
}

impl AppError {
    /// 표준 입력이 닫혀 더 읽을 수 없는 경우.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, AppError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

/// 설정에 맞는 번역기를 만든다.
pub fn translator_for(config: &Config, cli_lang: Option<&str>) -> Translator {
    let lang = i18n::resolve_language(cli_lang.unwrap_or("auto"), Some(config.language.as_str()));
    Translator::new_with_pack(&lang, config.language_pack_dir.as_deref())
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 입력이 닫히면 정상 종료한다.
pub fn run(config: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    let mut forms = FormSet::new(config);
    let mut report = Report::new();
    info!(lang = tr.language_code(), "interactive session started");
    match session(config, tr, &mut forms, &mut report) {
        Err(err) if err.is_end_of_input() => info!("stdin closed, leaving session"),
        other => other?,
    }
    println!("{}", tr.t(i18n::keys::APP_EXIT));
    Ok(())
}

fn session(
    config: &mut Config,
    tr: &mut Translator,
    forms: &mut FormSet,
    report: &mut Report,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Calculator(kind) => {
                ui_cli::handle_calculator(tr, config, forms.get_mut(kind), report)?
            }
            MenuChoice::Export => ui_cli::handle_export(tr, config, report)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    let saved = config.save();
                    *tr = translator_for(config, None);
                    match saved {
                        Ok(()) => println!("{}", tr.t(i18n::keys::SETTINGS_SAVED)),
                        Err(err) => {
                            warn!("settings save failed: {err}");
                            println!(
                                "{}: {}",
                                tr.t(i18n::keys::ERROR_PREFIX),
                                tr.config_error(&err)
                            );
                        }
                    }
                }
            }
            MenuChoice::Exit => return Ok(()),
        }
    }
}
