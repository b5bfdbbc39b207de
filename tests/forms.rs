use finance_calculator_toolbox::{
    calculator::{fields, CalcError, CalculationResult, CalculatorKind, EdgeCase},
    config::{Config, DisplaySettings},
    format::Formatter,
    forms::{CalculatorForm, FormSet},
    i18n::Translator,
};

fn roi_form(initial: &str, fin: &str) -> CalculatorForm {
    let mut form = CalculatorForm::new(CalculatorKind::Roi);
    assert!(form.set(fields::INITIAL_VALUE, initial));
    assert!(form.set(fields::FINAL_VALUE, fin));
    form
}

#[test]
fn failed_submit_keeps_previous_result() {
    let mut form = roi_form("100", "150");
    let first = form.submit().expect("first submit");
    assert_eq!(first, CalculationResult::Roi { percent: 50.0 });

    form.set(fields::FINAL_VALUE, "abc");
    let err = form.submit().unwrap_err();
    assert_eq!(
        err,
        CalcError::InvalidInput {
            field: fields::FINAL_VALUE
        }
    );
    assert_eq!(form.result(), Some(&first));
    assert_eq!(form.last_error(), Some(&err));

    form.set(fields::INITIAL_VALUE, "0");
    form.set(fields::FINAL_VALUE, "100");
    assert_eq!(
        form.submit().unwrap_err(),
        CalcError::DomainEdgeCase(EdgeCase::ZeroInitialValue)
    );
    assert_eq!(form.result(), Some(&first));
}

#[test]
fn successful_submit_clears_error() {
    let mut form = roi_form("", "150");
    assert!(form.submit().is_err());
    assert!(form.result().is_none());

    form.set(fields::INITIAL_VALUE, "100");
    form.submit().expect("submit");
    assert!(form.last_error().is_none());
}

#[test]
fn editing_text_does_not_change_result() {
    let mut form = roi_form("100", "150");
    form.submit().expect("submit");
    form.set(fields::FINAL_VALUE, "300");
    assert_eq!(form.result(), Some(&CalculationResult::Roi { percent: 50.0 }));
}

#[test]
fn set_rejects_unknown_field() {
    let mut form = CalculatorForm::new(CalculatorKind::Currency);
    assert!(!form.set(fields::HOME_PRICE, "1"));
    assert_eq!(form.text(fields::HOME_PRICE), None);
    assert_eq!(form.text(fields::AMOUNT), Some(""));
}

#[test]
fn clear_resets_inputs_and_result() {
    let mut form = roi_form("100", "150");
    form.submit().expect("submit");
    form.clear();
    assert!(form.result().is_none());
    assert!(form.fields().iter().all(|f| f.text.is_empty()));
}

#[test]
fn defaults_prefill_compoundings() {
    let cfg = Config {
        default_compoundings_per_year: 4,
        ..Config::default()
    };
    let set = FormSet::new(&cfg);
    assert_eq!(
        set.get(CalculatorKind::CompoundInterest)
            .text(fields::COMPOUNDINGS_PER_YEAR),
        Some("4")
    );
    assert_eq!(set.iter().count(), CalculatorKind::ALL.len());
    for kind in CalculatorKind::ALL {
        assert_eq!(set.get(kind).kind(), kind);
    }
}

#[test]
fn result_lines_use_translator_and_formatter() {
    let tr = Translator::new("en");
    let fmt = Formatter::from_settings(&DisplaySettings {
        decimals: 2,
        currency_symbol: Some("$".into()),
    });

    let mut form = CalculatorForm::new(CalculatorKind::Loan);
    form.set(fields::AMOUNT, "12000");
    form.set(fields::RATE, "0");
    form.set(fields::YEARS, "1");
    assert!(form.result_lines(&tr, &fmt).is_empty());
    form.submit().expect("submit");
    assert_eq!(form.result_lines(&tr, &fmt), ["Monthly payment: $1000.00"]);

    let mut roi = roi_form("100", "150");
    roi.submit().expect("submit");
    assert_eq!(roi.result_lines(&tr, &fmt), ["ROI: 50.00%"]);
}
