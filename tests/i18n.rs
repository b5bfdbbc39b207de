use std::io;

use finance_calculator_toolbox::{
    app::AppError,
    calculator::{fields, CalcError, CalculatorKind, EdgeCase},
    config::ConfigError,
    i18n::{self, keys, Language, Translator},
    report::ReportError,
};

fn has_hangul(s: &str) -> bool {
    s.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c))
}

#[test]
fn english_titles_and_errors() {
    let tr = Translator::new("en");
    assert_eq!(tr.language(), Language::En);
    assert_eq!(tr.calculator_title(CalculatorKind::Loan), "Loan Calculator");
    assert_eq!(
        tr.calc_error(&CalcError::InvalidInput {
            field: fields::PRINCIPAL
        }),
        "Not a number: Principal"
    );
    assert_eq!(
        tr.calc_error(&CalcError::DomainEdgeCase(EdgeCase::ZeroInitialValue)),
        "ROI is undefined for an initial value of 0."
    );
}

#[test]
fn ukrainian_pack_is_built_in() {
    let tr = Translator::new("uk");
    assert_eq!(tr.language_code(), "uk");
    assert_eq!(
        tr.calculator_title(CalculatorKind::Loan),
        "Кредитний калькулятор"
    );
    assert_eq!(tr.lookup("field.rate").as_deref(), Some("Річна ставка (%)"));
    // 언어팩에 없는 키는 영어로 대체
    assert_eq!(
        tr.t(&keys::formula(CalculatorKind::Currency)),
        "C = A × R"
    );
}

#[test]
fn korean_builtin_strings() {
    let tr = Translator::new("ko");
    assert_eq!(tr.calculator_title(CalculatorKind::Roi), "ROI 계산기");
    assert!(tr.lookup("calc.roi").is_none());
}

#[test]
fn unknown_key_is_marked_missing() {
    let tr = Translator::new("en");
    assert_eq!(tr.t("no.such.key"), "[missing translation]");
}

#[test]
fn every_calculator_has_titles_and_field_labels() {
    for lang in ["en", "ko", "uk"] {
        let tr = Translator::new(lang);
        for kind in CalculatorKind::ALL {
            assert_ne!(tr.calculator_title(kind), "[missing translation]");
            for field in kind.fields() {
                assert_ne!(
                    tr.t(&keys::field(field)),
                    "[missing translation]",
                    "{lang}: {field}"
                );
            }
        }
    }
}

#[test]
fn template_placeholders_are_filled() {
    let out = i18n::fill_template(
        "Saved {count} entries to {path}.",
        &[("count", "2".into()), ("path", "a.csv".into())],
    );
    assert_eq!(out, "Saved 2 entries to a.csv.");
}

#[test]
fn language_resolution_order() {
    assert_eq!(i18n::resolve_language("ua", Some("ko")), "uk");
    assert_eq!(i18n::resolve_language("auto", Some("ko-KR")), "ko");
    assert_eq!(i18n::resolve_language("en-US", None), "en");
}

#[test]
fn nested_pack_is_flattened() {
    let map = i18n::parse_toml_to_map("[calc]\nloan = \"Loan\"\n[error.edge]\nzero_compounding = \"x\"\n")
        .expect("map");
    assert_eq!(map.get("calc.loan").map(String::as_str), Some("Loan"));
    assert_eq!(
        map.get("error.edge.zero_compounding").map(String::as_str),
        Some("x")
    );
    assert!(i18n::parse_toml_to_map("").is_none());
}

#[test]
fn report_and_config_errors_follow_language() {
    let en = Translator::new("en");
    let unsupported = ReportError::UnsupportedFormat("xlsx".into());
    let msg = en.report_error(&unsupported);
    assert_eq!(msg, "Unsupported report format: \"xlsx\" (.csv / .toml)");
    assert_eq!(
        en.report_error(&ReportError::Empty),
        "There are no calculation results to export."
    );
    let missing = ReportError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
    assert_eq!(en.report_error(&missing), "File error: gone");

    let bad_toml = toml::from_str::<toml::Value>("x = ").expect_err("invalid toml");
    let cfg_msg = en.config_error(&ConfigError::Parse(bad_toml));
    assert!(cfg_msg.starts_with("Could not read the settings file: "), "{cfg_msg}");

    let uk = Translator::new("uk");
    let uk_msg = uk.report_error(&unsupported);
    assert!(uk_msg.starts_with("Непідтримуваний формат звіту"), "{uk_msg}");

    let ko = Translator::new("ko");
    assert!(has_hangul(&ko.report_error(&unsupported)));

    for msg in [&msg, &cfg_msg, &uk_msg] {
        assert!(!has_hangul(msg), "{msg}");
    }
}

#[test]
fn app_errors_delegate_to_their_source() {
    let tr = Translator::new("en");
    let calc = AppError::Calc(CalcError::DomainEdgeCase(EdgeCase::NonPositiveTerm));
    assert_eq!(tr.app_error(&calc), "The term must be greater than 0.");
    let report = AppError::Report(ReportError::UnsupportedFormat(String::new()));
    assert_eq!(
        tr.app_error(&report),
        "Unsupported report format: \"\" (.csv / .toml)"
    );
    let io_err = AppError::Io(io::Error::new(io::ErrorKind::Other, "pipe closed"));
    assert_eq!(tr.app_error(&io_err), "Input/output error: pipe closed");
}
