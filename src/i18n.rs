use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::debug;

use crate::app::AppError;
use crate::calculator::{CalcError, CalculatorKind};
use crate::config::ConfigError;
use crate::report::ReportError;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    use crate::calculator::CalculatorKind;

    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_EXPORT: &str = "main_menu.export";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const CALC_RUN: &str = "calc.run";
    pub const CALC_CLEAR: &str = "calc.clear";
    pub const CALC_KEEP_HINT: &str = "calc.keep_hint";
    pub const CALC_NO_RESULT: &str = "calc.no_result";
    pub const CALC_PREVIOUS_KEPT: &str = "calc.previous_kept";
    pub const CALC_ADD_TO_REPORT: &str = "calc.add_to_report";
    pub const CALC_ADDED_TO_REPORT: &str = "calc.added_to_report";

    pub const ERROR_INVALID_INPUT: &str = "error.invalid_input";
    pub const ERROR_IO: &str = "error.io";
    pub const ERROR_FILE: &str = "error.file";
    pub const ERROR_REPORT_FORMAT: &str = "error.report_format";
    pub const ERROR_REPORT_SERIALIZE: &str = "error.report_serialize";
    pub const ERROR_CONFIG_PARSE: &str = "error.config_parse";
    pub const ERROR_CONFIG_SERIALIZE: &str = "error.config_serialize";

    pub const EXPORT_HEADING: &str = "export.heading";
    pub const EXPORT_PROMPT_PATH: &str = "export.prompt_path";
    pub const EXPORT_SAVED: &str = "export.saved";
    pub const EXPORT_EMPTY: &str = "export.empty";
    pub const EXPORT_BUTTON: &str = "export.button";
    pub const EXPORT_ENTRIES: &str = "export.entries";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_DECIMALS: &str = "settings.decimals";
    pub const SETTINGS_PROMPT_DECIMALS: &str = "settings.prompt_decimals";
    pub const SETTINGS_CURRENCY_SYMBOL: &str = "settings.currency_symbol";
    pub const SETTINGS_PROMPT_CURRENCY_SYMBOL: &str = "settings.prompt_currency_symbol";
    pub const SETTINGS_THEME: &str = "settings.theme";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_NAV_HEADING: &str = "gui.nav.heading";
    pub const GUI_ALPHA: &str = "gui.settings.alpha";
    pub const GUI_FONT: &str = "gui.settings.font";
    pub const GUI_THEME_SYSTEM: &str = "gui.theme.system";
    pub const GUI_THEME_LIGHT: &str = "gui.theme.light";
    pub const GUI_THEME_DARK: &str = "gui.theme.dark";
    pub const GUI_LANG_AUTO: &str = "gui.settings.lang_auto";
    pub const GUI_SAVE: &str = "gui.settings.save";

    /// 계산기 입력 필드 라벨 키.
    pub fn field(name: &str) -> String {
        format!("field.{name}")
    }

    /// 계산 결과 라벨 키.
    pub fn output(name: &str) -> String {
        format!("output.{name}")
    }

    /// 계산기 공식 설명 키.
    pub fn formula(kind: CalculatorKind) -> String {
        format!("formula.{}", kind.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Ko,
    Uk,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else if c.starts_with("uk") || c.starts_with("ua") {
            Language::Uk
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
            Language::Uk => "uk",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드에 따라 번역기를 생성한다. 내장 언어팩(uk)이 있으면 함께 적용한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: built_in_pack(lang_code),
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        debug!(
            lang = lang_code,
            overrides = overrides.is_some(),
            "translator created"
        );
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let native = match self.lang {
            Language::Ko => ko(key),
            Language::En | Language::Uk => None,
        };
        native.or_else(|| en(key)).unwrap_or("[missing translation]")
    }

    /// 템플릿 키를 `{name}` 치환과 함께 가져온다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }

    /// 계산 오류를 사용자 메시지로 변환한다.
    pub fn calc_error(&self, err: &CalcError) -> String {
        match err {
            CalcError::InvalidInput { field } => self.tf(
                keys::ERROR_INVALID_INPUT,
                &[("field", self.t(&keys::field(field)).to_string())],
            ),
            CalcError::DomainEdgeCase(case) => self.t(case.message_key()).to_string(),
        }
    }

    /// 보고서 저장 오류를 사용자 메시지로 변환한다.
    pub fn report_error(&self, err: &ReportError) -> String {
        match err {
            ReportError::Empty => self.t(keys::EXPORT_EMPTY).to_string(),
            ReportError::UnsupportedFormat(ext) => {
                self.tf(keys::ERROR_REPORT_FORMAT, &[("ext", ext.clone())])
            }
            ReportError::Io(e) => self.tf(keys::ERROR_FILE, &[("detail", e.to_string())]),
            ReportError::Serialize(e) => {
                self.tf(keys::ERROR_REPORT_SERIALIZE, &[("detail", e.to_string())])
            }
        }
    }

    pub fn config_error(&self, err: &ConfigError) -> String {
        match err {
            ConfigError::Io(e) => self.tf(keys::ERROR_FILE, &[("detail", e.to_string())]),
            ConfigError::Parse(e) => {
                self.tf(keys::ERROR_CONFIG_PARSE, &[("detail", e.to_string())])
            }
            ConfigError::Serialize(e) => {
                self.tf(keys::ERROR_CONFIG_SERIALIZE, &[("detail", e.to_string())])
            }
        }
    }

    /// 애플리케이션 오류를 종류별 번역 메시지로 변환한다.
    pub fn app_error(&self, err: &AppError) -> String {
        match err {
            AppError::Io(e) => self.tf(keys::ERROR_IO, &[("detail", e.to_string())]),
            AppError::Config(e) => self.config_error(e),
            AppError::Calc(e) => self.calc_error(e),
            AppError::Report(e) => self.report_error(e),
        }
    }

    pub fn calculator_title(&self, kind: CalculatorKind) -> &str {
        self.t(kind.title_key())
    }
}

/// `{key}` 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ua" => Some("uk".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("uk") => Some("uk".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "en" | "ko" | "uk" => Some(lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫/중첩 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

/// 중첩 테이블을 점(.)으로 이어 붙인 키의 평면 맵으로 변환한다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match Language::from_code(lang) {
        Language::Uk => parse_toml_to_map(include_str!("../locales/uk.toml")),
        Language::En | Language::Ko => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "재무 계산기",
        MAIN_MENU_TITLE => "\n=== 재무 계산기 ===",
        MAIN_MENU_EXPORT => "보고서 내보내기",
        MAIN_MENU_SETTINGS => "설정",
        MAIN_MENU_EXIT => "종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        CALC_RUN => "계산",
        CALC_CLEAR => "지우기",
        CALC_KEEP_HINT => "엔터 = 이전 값 유지 [{value}]",
        CALC_NO_RESULT => "결과 없음",
        CALC_PREVIOUS_KEPT => "이전 결과를 유지합니다.",
        CALC_ADD_TO_REPORT => "보고서에 추가",
        CALC_ADDED_TO_REPORT => "보고서에 추가했습니다.",
        ERROR_INVALID_INPUT => "숫자가 아닌 입력: {field}",
        ERROR_IO => "입출력 오류: {detail}",
        ERROR_FILE => "파일 입출력 오류: {detail}",
        ERROR_REPORT_FORMAT => "지원하지 않는 보고서 형식: \"{ext}\" (.csv / .toml)",
        ERROR_REPORT_SERIALIZE => "보고서 직렬화 오류: {detail}",
        ERROR_CONFIG_PARSE => "설정 파일을 읽을 수 없습니다: {detail}",
        ERROR_CONFIG_SERIALIZE => "설정을 저장할 수 없습니다: {detail}",
        "error.edge.zero_compounding" => "연간 복리 횟수는 0보다 커야 합니다.",
        "error.edge.non_positive_term" => "기간은 0보다 커야 합니다.",
        "error.edge.zero_initial_value" => "초기 투자액이 0이면 ROI를 계산할 수 없습니다.",
        "error.edge.negative_principal" => "계약금이 주택 가격보다 클 수 없습니다.",
        "error.edge.non_finite_result" => "결과가 너무 크거나 정의되지 않습니다.",
        EXPORT_HEADING => "\n-- 보고서 내보내기 --",
        EXPORT_PROMPT_PATH => "저장 경로(.csv / .toml): ",
        EXPORT_SAVED => "{count}건을 {path}에 저장했습니다.",
        EXPORT_EMPTY => "내보낼 계산 결과가 없습니다.",
        EXPORT_BUTTON => "내보내기",
        EXPORT_ENTRIES => "보고서 항목: {count}",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_OPTIONS => "1) 언어  2) 소수 자릿수  3) 통화 기호",
        SETTINGS_LANGUAGE => "언어",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드(auto/en/ko/uk): ",
        SETTINGS_DECIMALS => "소수 자릿수",
        SETTINGS_PROMPT_DECIMALS => "소수 자릿수(0~8): ",
        SETTINGS_CURRENCY_SYMBOL => "통화 기호",
        SETTINGS_PROMPT_CURRENCY_SYMBOL => "통화 기호(없애려면 엔터): ",
        SETTINGS_THEME => "테마",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        GUI_NAV_HEADING => "계산기",
        GUI_ALPHA => "창 투명도",
        GUI_FONT => "사용자 폰트 경로",
        GUI_THEME_SYSTEM => "시스템",
        GUI_THEME_LIGHT => "밝게",
        GUI_THEME_DARK => "어둡게",
        GUI_LANG_AUTO => "시스템",
        GUI_SAVE => "설정 저장",
        "calc.simple_interest" => "단리 계산기",
        "calc.compound_interest" => "복리 계산기",
        "calc.loan" => "대출 계산기",
        "calc.mortgage" => "모기지 계산기",
        "calc.roi" => "ROI 계산기",
        "calc.inflation" => "인플레이션 계산기",
        "calc.currency" => "환율 계산기",
        "field.principal" => "원금",
        "field.rate" => "연이율 (%)",
        "field.years" => "기간 (년)",
        "field.compoundings_per_year" => "연간 복리 횟수",
        "field.amount" => "금액",
        "field.home_price" => "주택 가격",
        "field.down_payment" => "계약금",
        "field.initial_value" => "초기 투자액",
        "field.final_value" => "최종 가치",
        "field.present_amount" => "현재 금액",
        "field.inflation_rate" => "연 인플레이션 (%)",
        "field.exchange_rate" => "환율",
        "output.interest" => "이자",
        "output.amount" => "원리금 합계",
        "output.monthly_payment" => "월 납입액",
        "output.total_overpay" => "총 이자 부담",
        "output.roi" => "ROI",
        "output.future_value" => "미래 가치",
        "output.converted" => "환전 결과",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Finance Calculator",
        MAIN_MENU_TITLE => "\n=== Finance Calculator ===",
        MAIN_MENU_EXPORT => "Export report",
        MAIN_MENU_SETTINGS => "Settings",
        MAIN_MENU_EXIT => "Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        CALC_RUN => "Calculate",
        CALC_CLEAR => "Clear",
        CALC_KEEP_HINT => "Enter = keep previous [{value}]",
        CALC_NO_RESULT => "No result",
        CALC_PREVIOUS_KEPT => "Previous result kept.",
        CALC_ADD_TO_REPORT => "Add to report",
        CALC_ADDED_TO_REPORT => "Added to report.",
        ERROR_INVALID_INPUT => "Not a number: {field}",
        ERROR_IO => "Input/output error: {detail}",
        ERROR_FILE => "File error: {detail}",
        ERROR_REPORT_FORMAT => "Unsupported report format: \"{ext}\" (.csv / .toml)",
        ERROR_REPORT_SERIALIZE => "Could not serialize the report: {detail}",
        ERROR_CONFIG_PARSE => "Could not read the settings file: {detail}",
        ERROR_CONFIG_SERIALIZE => "Could not write the settings: {detail}",
        "error.edge.zero_compounding" => "Compoundings per year must be greater than 0.",
        "error.edge.non_positive_term" => "The term must be greater than 0.",
        "error.edge.zero_initial_value" => "ROI is undefined for an initial value of 0.",
        "error.edge.negative_principal" => "The down payment cannot exceed the home price.",
        "error.edge.non_finite_result" => "The result is too large or undefined.",
        EXPORT_HEADING => "\n-- Export report --",
        EXPORT_PROMPT_PATH => "Save path (.csv / .toml): ",
        EXPORT_SAVED => "Saved {count} entries to {path}.",
        EXPORT_EMPTY => "There are no calculation results to export.",
        EXPORT_BUTTON => "Export",
        EXPORT_ENTRIES => "Report entries: {count}",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_OPTIONS => "1) Language  2) Decimal places  3) Currency symbol",
        SETTINGS_LANGUAGE => "Language",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/en/ko/uk): ",
        SETTINGS_DECIMALS => "Decimal places",
        SETTINGS_PROMPT_DECIMALS => "Decimal places (0-8): ",
        SETTINGS_CURRENCY_SYMBOL => "Currency symbol",
        SETTINGS_PROMPT_CURRENCY_SYMBOL => "Currency symbol (enter to clear): ",
        SETTINGS_THEME => "Theme",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        GUI_NAV_HEADING => "Calculators",
        GUI_ALPHA => "Window transparency",
        GUI_FONT => "User font path",
        GUI_THEME_SYSTEM => "System",
        GUI_THEME_LIGHT => "Light",
        GUI_THEME_DARK => "Dark",
        GUI_LANG_AUTO => "System",
        GUI_SAVE => "Save settings",
        "calc.simple_interest" => "Simple Interest",
        "calc.compound_interest" => "Compound Interest",
        "calc.loan" => "Loan Calculator",
        "calc.mortgage" => "Mortgage Calculator",
        "calc.roi" => "ROI Calculator",
        "calc.inflation" => "Inflation Calculator",
        "calc.currency" => "Currency Converter",
        "field.principal" => "Principal",
        "field.rate" => "Annual rate (%)",
        "field.years" => "Period (years)",
        "field.compoundings_per_year" => "Compoundings per year",
        "field.amount" => "Amount",
        "field.home_price" => "Home price",
        "field.down_payment" => "Down payment",
        "field.initial_value" => "Initial investment",
        "field.final_value" => "Final value",
        "field.present_amount" => "Amount today",
        "field.inflation_rate" => "Annual inflation (%)",
        "field.exchange_rate" => "Exchange rate",
        "output.interest" => "Interest",
        "output.amount" => "Accumulated amount",
        "output.monthly_payment" => "Monthly payment",
        "output.total_overpay" => "Total overpayment",
        "output.roi" => "ROI",
        "output.future_value" => "Future value",
        "output.converted" => "Converted",
        "formula.simple_interest" => "I = P × r/100 × t",
        "formula.compound_interest" => "A = P × (1 + r/100/n)^(n·t)",
        "formula.loan" => "M = P·i / (1 − (1+i)^−N),  i = r/100/12,  N = 12·t",
        "formula.mortgage" => "M = L·i·(1+i)^N / ((1+i)^N − 1),  L = price − down",
        "formula.roi" => "ROI = (final − initial) / initial × 100",
        "formula.inflation" => "FV = P × (1 + i/100)^t",
        "formula.currency" => "C = A × R",
        _ => return None,
    })
}
