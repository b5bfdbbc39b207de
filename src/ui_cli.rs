use std::io::{self, Write};
use std::path::Path;

use crate::app::AppError;
use crate::calculator::CalculatorKind;
use crate::config::Config;
use crate::format::{Formatter, MAX_DECIMALS};
use crate::forms::CalculatorForm;
use crate::i18n::{keys, Translator};
use crate::report::Report;
use tracing::warn;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculator(CalculatorKind),
    Export,
    Settings,
    Exit,
}

const EXPORT_NO: usize = CalculatorKind::ALL.len() + 1;
const SETTINGS_NO: usize = CalculatorKind::ALL.len() + 2;

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for (i, kind) in CalculatorKind::ALL.iter().enumerate() {
        println!("{}) {}", i + 1, tr.calculator_title(*kind));
    }
    println!("{EXPORT_NO}) {}", tr.t(keys::MAIN_MENU_EXPORT));
    println!("{SETTINGS_NO}) {}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("0) {}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = match read_line(tr.t(keys::PROMPT_MENU_SELECT)) {
            Err(e) if e.is_end_of_input() => return Ok(MenuChoice::Exit),
            other => other?,
        };
        if let Some(choice) = map_choice(sel.trim()) {
            return Ok(choice);
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

fn map_choice(sel: &str) -> Option<MenuChoice> {
    let n = sel.parse::<usize>().ok()?;
    match n {
        0 => Some(MenuChoice::Exit),
        EXPORT_NO => Some(MenuChoice::Export),
        SETTINGS_NO => Some(MenuChoice::Settings),
        n => CalculatorKind::ALL
            .get(n - 1)
            .map(|kind| MenuChoice::Calculator(*kind)),
    }
}

/// 계산기 화면. 빈 입력은 이전 값을 유지하고, 실패하면 이전 결과를 다시 보여준다.
pub fn handle_calculator(
    tr: &Translator,
    cfg: &Config,
    form: &mut CalculatorForm,
    report: &mut Report,
) -> Result<(), AppError> {
    let kind = form.kind();
    let fmt = Formatter::from_settings(&cfg.display);
    println!("\n-- {} --", tr.calculator_title(kind));
    println!("{}", tr.t(&keys::formula(kind)));

    let names: Vec<&'static str> = form.fields().iter().map(|f| f.name).collect();
    for name in names {
        let previous = form.text(name).unwrap_or_default().to_string();
        let label = tr.t(&keys::field(name));
        let prompt = if previous.trim().is_empty() {
            format!("{label}: ")
        } else {
            let hint = tr.tf(keys::CALC_KEEP_HINT, &[("value", previous.clone())]);
            format!("{label} ({hint}): ")
        };
        let text = read_line(&prompt)?;
        if !text.trim().is_empty() {
            form.set(name, text.trim());
        }
    }

    match form.submit() {
        Ok(_) => {
            print_result(tr, &fmt, form);
            let answer = read_line(&format!("{} (y/N): ", tr.t(keys::CALC_ADD_TO_REPORT)))?;
            if answer.trim().eq_ignore_ascii_case("y") && report.add_form(form) {
                println!("{}", tr.t(keys::CALC_ADDED_TO_REPORT));
            }
        }
        Err(err) => {
            println!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.calc_error(&err));
            if form.result().is_some() {
                println!("{}", tr.t(keys::CALC_PREVIOUS_KEPT));
                print_result(tr, &fmt, form);
            }
        }
    }
    Ok(())
}

/// 보고서 내보내기 메뉴를 처리한다.
pub fn handle_export(tr: &Translator, cfg: &Config, report: &Report) -> Result<(), AppError> {
    println!("{}", tr.t(keys::EXPORT_HEADING));
    if report.is_empty() {
        println!("{}", tr.t(keys::EXPORT_EMPTY));
        return Ok(());
    }
    println!(
        "{}",
        tr.tf(keys::EXPORT_ENTRIES, &[("count", report.len().to_string())])
    );
    let path = read_line(tr.t(keys::EXPORT_PROMPT_PATH))?;
    let fmt = Formatter::from_settings(&cfg.display);
    println!("{}", export_report(tr, &fmt, report, Path::new(path.trim())));
    Ok(())
}

/// 보고서를 저장하고 결과 메시지를 돌려준다. 실패해도 보고서는 그대로 남는다.
pub fn export_report(tr: &Translator, fmt: &Formatter, report: &Report, path: &Path) -> String {
    match report.save(path, fmt) {
        Ok(_) => tr.tf(
            keys::EXPORT_SAVED,
            &[
                ("count", report.len().to_string()),
                ("path", path.display().to_string()),
            ],
        ),
        Err(err) => {
            warn!(path = %path.display(), "report export failed: {err}");
            format!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.report_error(&err))
        }
    }
}

/// 설정 메뉴를 처리한다. 변경이 있으면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}: {}", tr.t(keys::SETTINGS_LANGUAGE), cfg.language);
    println!("{}: {}", tr.t(keys::SETTINGS_DECIMALS), cfg.display.decimals);
    println!(
        "{}: {}",
        tr.t(keys::SETTINGS_CURRENCY_SYMBOL),
        cfg.display.currency_symbol.as_deref().unwrap_or("-")
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    match sel.trim() {
        "1" => {
            let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let lang = lang.trim();
            if lang.is_empty() {
                return Ok(false);
            }
            cfg.language = lang.to_lowercase();
        }
        "2" => {
            let text = read_line(tr.t(keys::SETTINGS_PROMPT_DECIMALS))?;
            match text.trim().parse::<usize>() {
                Ok(d) if d <= MAX_DECIMALS => cfg.display.decimals = d,
                _ => {
                    println!("{}", tr.t(keys::SETTINGS_INVALID));
                    return Ok(false);
                }
            }
        }
        "3" => {
            let sym = read_line(tr.t(keys::SETTINGS_PROMPT_CURRENCY_SYMBOL))?;
            let sym = sym.trim();
            cfg.display.currency_symbol = (!sym.is_empty()).then(|| sym.to_string());
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    }
    Ok(true)
}

fn print_result(tr: &Translator, fmt: &Formatter, form: &CalculatorForm) {
    for line in form.result_lines(tr, fmt) {
        println!("{line}");
    }
}

/// 한 줄을 읽는다. 입력이 닫혔으면 `UnexpectedEof`.
fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf).map_err(AppError::Io)? == 0 {
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}
