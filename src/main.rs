use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use finance_calculator_toolbox::{
    app::{self, AppError},
    calculator::{fields, CalculatorKind},
    config,
    format::Formatter,
    forms::CalculatorForm,
    i18n::keys,
    logging,
    report::Report,
};
use tracing::warn;

/// 재무 계산기 CLI. 하위 명령 없이 실행하면 대화형 메뉴를 연다.
#[derive(Debug, Parser)]
#[command(name = "finance_calculator_toolbox_cli", version, about)]
struct Cli {
    /// 언어 (auto/en/ko/uk)
    #[arg(long, short = 'L', global = true)]
    lang: Option<String>,
    /// 설정 파일 경로
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// 결과를 .csv 또는 .toml 보고서로 저장
    #[arg(long, global = true)]
    export: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

/// 숫자 위치 인자는 음수(`-5`)도 값으로 받는다.
#[derive(Debug, Subcommand)]
enum Command {
    /// 단리: 원금, 연이율(%), 기간(년)
    SimpleInterest {
        #[arg(allow_negative_numbers = true)]
        principal: String,
        #[arg(allow_negative_numbers = true)]
        rate: String,
        #[arg(allow_negative_numbers = true)]
        years: String,
    },
    /// 복리: 원금, 연이율(%), 기간(년), 연간 복리 횟수
    CompoundInterest {
        #[arg(allow_negative_numbers = true)]
        principal: String,
        #[arg(allow_negative_numbers = true)]
        rate: String,
        #[arg(allow_negative_numbers = true)]
        years: String,
        #[arg(default_value = "1", allow_negative_numbers = true)]
        compoundings_per_year: String,
    },
    /// 대출 월 납입액: 원금, 연이율(%), 기간(년)
    Loan {
        #[arg(allow_negative_numbers = true)]
        amount: String,
        #[arg(allow_negative_numbers = true)]
        rate: String,
        #[arg(allow_negative_numbers = true)]
        years: String,
    },
    /// 모기지: 주택 가격, 계약금, 연이율(%), 기간(년)
    Mortgage {
        #[arg(allow_negative_numbers = true)]
        home_price: String,
        #[arg(allow_negative_numbers = true)]
        down_payment: String,
        #[arg(allow_negative_numbers = true)]
        rate: String,
        #[arg(allow_negative_numbers = true)]
        years: String,
    },
    /// ROI: 초기 투자액, 최종 가치
    Roi {
        #[arg(allow_negative_numbers = true)]
        initial_value: String,
        #[arg(allow_negative_numbers = true)]
        final_value: String,
    },
    /// 인플레이션: 현재 금액, 연 인플레이션(%), 기간(년)
    Inflation {
        #[arg(allow_negative_numbers = true)]
        present_amount: String,
        #[arg(allow_negative_numbers = true)]
        inflation_rate: String,
        #[arg(allow_negative_numbers = true)]
        years: String,
    },
    /// 환전: 금액, 환율
    Currency {
        #[arg(allow_negative_numbers = true)]
        amount: String,
        #[arg(allow_negative_numbers = true)]
        exchange_rate: String,
    },
}

impl Command {
    /// 계산기 종류와 (필드, 텍스트) 목록으로 바꾼다.
    fn into_form_values(self) -> (CalculatorKind, Vec<(&'static str, String)>) {
        use fields::*;
        match self {
            Command::SimpleInterest {
                principal,
                rate,
                years,
            } => (
                CalculatorKind::SimpleInterest,
                vec![(PRINCIPAL, principal), (RATE, rate), (YEARS, years)],
            ),
            Command::CompoundInterest {
                principal,
                rate,
                years,
                compoundings_per_year,
            } => (
                CalculatorKind::CompoundInterest,
                vec![
                    (PRINCIPAL, principal),
                    (RATE, rate),
                    (YEARS, years),
                    (COMPOUNDINGS_PER_YEAR, compoundings_per_year),
                ],
            ),
            Command::Loan {
                amount,
                rate,
                years,
            } => (
                CalculatorKind::Loan,
                vec![(AMOUNT, amount), (RATE, rate), (YEARS, years)],
            ),
            Command::Mortgage {
                home_price,
                down_payment,
                rate,
                years,
            } => (
                CalculatorKind::Mortgage,
                vec![
                    (HOME_PRICE, home_price),
                    (DOWN_PAYMENT, down_payment),
                    (RATE, rate),
                    (YEARS, years),
                ],
            ),
            Command::Roi {
                initial_value,
                final_value,
            } => (
                CalculatorKind::Roi,
                vec![(INITIAL_VALUE, initial_value), (FINAL_VALUE, final_value)],
            ),
            Command::Inflation {
                present_amount,
                inflation_rate,
                years,
            } => (
                CalculatorKind::Inflation,
                vec![
                    (PRESENT_AMOUNT, present_amount),
                    (INFLATION_RATE, inflation_rate),
                    (YEARS, years),
                ],
            ),
            Command::Currency {
                amount,
                exchange_rate,
            } => (
                CalculatorKind::Currency,
                vec![(AMOUNT, amount), (EXCHANGE_RATE, exchange_rate)],
            ),
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let loaded = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    };
    let mut cfg = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&cfg.log_level);
    if let Err(err) = &loaded {
        warn!("config load failed, using defaults: {err}");
    }
    let mut tr = app::translator_for(&cfg, cli.lang.as_deref());

    let result = match cli.command {
        Some(command) => run_once(command, cli.export, &cfg, &tr),
        None => app::run(&mut cfg, &mut tr),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.app_error(&err));
            ExitCode::FAILURE
        }
    }
}

/// 하위 명령 하나를 계산해 출력하고, 요청되면 보고서로 저장한다.
fn run_once(
    command: Command,
    export: Option<PathBuf>,
    cfg: &config::Config,
    tr: &finance_calculator_toolbox::i18n::Translator,
) -> Result<(), AppError> {
    let (kind, values) = command.into_form_values();
    let mut form = CalculatorForm::new(kind);
    for (field, text) in values {
        form.set(field, text);
    }
    form.submit()?;

    let fmt = Formatter::from_settings(&cfg.display);
    println!("{}", tr.calculator_title(kind));
    for line in form.result_lines(tr, &fmt) {
        println!("{line}");
    }

    if let Some(path) = export {
        let mut report = Report::new();
        report.add_form(&form);
        report.save(&path, &fmt)?;
        println!(
            "{}",
            tr.tf(
                keys::EXPORT_SAVED,
                &[
                    ("count", report.len().to_string()),
                    ("path", path.display().to_string()),
                ],
            )
        );
    }
    Ok(())
}
