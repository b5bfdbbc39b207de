//! 계산기 공식 회귀 테스트. 교재에서 흔히 쓰는 예제 값을 기준으로 한다.
use finance_calculator_toolbox::calculator::{
    compound_interest, compute, convert_currency, fields, inflation_future_value, loan_payment,
    mortgage_payment, return_on_investment, simple_interest, CalcError, CalculationInput,
    CalculationResult, CalculatorKind, CompoundInterestInput, CurrencyInput, EdgeCase,
    InflationInput, LoanInput, MortgageInput, RoiInput, SimpleInterestInput,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

#[test]
fn simple_interest_textbook_example() {
    let interest = simple_interest(SimpleInterestInput {
        principal: 1000.0,
        rate_percent: 5.0,
        years: 2.0,
    })
    .expect("simple interest");
    assert_close("interest", interest, 100.0, 1e-9);
}

#[test]
fn compound_interest_monthly() {
    let amount = compound_interest(CompoundInterestInput {
        principal: 1000.0,
        rate_percent: 10.0,
        years: 1.0,
        compoundings_per_year: 12,
    })
    .expect("compound interest");
    assert_close("amount", amount, 1104.71, 0.005);
}

#[test]
fn compound_interest_refuses_zero_compoundings() {
    let err = compound_interest(CompoundInterestInput {
        principal: 1000.0,
        rate_percent: 10.0,
        years: 1.0,
        compoundings_per_year: 0,
    })
    .unwrap_err();
    assert_eq!(err, CalcError::DomainEdgeCase(EdgeCase::ZeroCompounding));
}

#[test]
fn loan_payment_amortized() {
    // 10,000 / 5% / 3년 => 월 299.71
    let m = loan_payment(LoanInput {
        amount: 10_000.0,
        rate_percent: 5.0,
        years: 3.0,
    })
    .expect("loan");
    assert_close("monthly", m, 299.71, 0.005);
}

#[test]
fn loan_zero_rate_splits_principal() {
    let m = loan_payment(LoanInput {
        amount: 12_000.0,
        rate_percent: 0.0,
        years: 1.0,
    })
    .expect("zero rate loan");
    assert!(m.is_finite());
    assert_close("monthly", m, 1000.0, 1e-9);
}

#[test]
fn loan_refuses_non_positive_term() {
    for years in [0.0, -1.0] {
        let err = loan_payment(LoanInput {
            amount: 12_000.0,
            rate_percent: 5.0,
            years,
        })
        .unwrap_err();
        assert_eq!(err, CalcError::DomainEdgeCase(EdgeCase::NonPositiveTerm));
    }
}

#[test]
fn mortgage_thirty_year_fixed() {
    // 300,000 - 60,000 계약금, 6%, 30년 => 월 1,438.92
    let res = mortgage_payment(MortgageInput {
        home_price: 300_000.0,
        down_payment: 60_000.0,
        rate_percent: 6.0,
        years: 30.0,
    })
    .expect("mortgage");
    assert_close("monthly", res.monthly_payment, 1438.92, 0.005);
    assert_close(
        "overpay",
        res.total_overpay,
        res.monthly_payment * 360.0 - 240_000.0,
        1e-6,
    );
    assert!(res.total_overpay > 0.0);
}

#[test]
fn mortgage_fully_paid_down_is_zero() {
    let res = mortgage_payment(MortgageInput {
        home_price: 250_000.0,
        down_payment: 250_000.0,
        rate_percent: 4.5,
        years: 25.0,
    })
    .expect("mortgage");
    assert_eq!(res.monthly_payment, 0.0);
    assert_eq!(res.total_overpay, 0.0);
}

#[test]
fn mortgage_zero_rate_has_no_overpay() {
    let res = mortgage_payment(MortgageInput {
        home_price: 130_000.0,
        down_payment: 10_000.0,
        rate_percent: 0.0,
        years: 10.0,
    })
    .expect("mortgage");
    assert_close("monthly", res.monthly_payment, 1000.0, 1e-9);
    assert_eq!(res.total_overpay, 0.0);
}

#[test]
fn near_zero_rate_approaches_even_split() {
    let loan = loan_payment(LoanInput {
        amount: 120_000.0,
        rate_percent: 1.2e-12,
        years: 10.0,
    })
    .expect("loan");
    assert_close("loan monthly", loan, 1000.0, 1e-6);

    let res = mortgage_payment(MortgageInput {
        home_price: 130_000.0,
        down_payment: 10_000.0,
        rate_percent: 1.2e-12,
        years: 10.0,
    })
    .expect("mortgage");
    assert_close("mortgage monthly", res.monthly_payment, 1000.0, 1e-6);
    assert_close("overpay", res.total_overpay, 0.0, 1e-4);
}

#[test]
fn mortgage_refuses_down_payment_above_price() {
    let err = mortgage_payment(MortgageInput {
        home_price: 100_000.0,
        down_payment: 120_000.0,
        rate_percent: 5.0,
        years: 20.0,
    })
    .unwrap_err();
    assert_eq!(err, CalcError::DomainEdgeCase(EdgeCase::NegativePrincipal));
}

#[test]
fn roi_gain_loss_and_zero_initial() {
    let gain = return_on_investment(RoiInput {
        initial_value: 100.0,
        final_value: 150.0,
    })
    .expect("roi");
    assert_close("gain", gain, 50.0, 1e-9);

    let loss = return_on_investment(RoiInput {
        initial_value: 200.0,
        final_value: 150.0,
    })
    .expect("roi");
    assert_close("loss", loss, -25.0, 1e-9);

    let err = return_on_investment(RoiInput {
        initial_value: 0.0,
        final_value: 100.0,
    })
    .unwrap_err();
    assert_eq!(err, CalcError::DomainEdgeCase(EdgeCase::ZeroInitialValue));
}

#[test]
fn inflation_zero_rate_is_identity() {
    let fv = inflation_future_value(InflationInput {
        present_amount: 1000.0,
        inflation_percent: 0.0,
        years: 5.0,
    })
    .expect("inflation");
    assert_eq!(fv, 1000.0);

    let fv = inflation_future_value(InflationInput {
        present_amount: 1000.0,
        inflation_percent: 3.0,
        years: 10.0,
    })
    .expect("inflation");
    assert_close("fv", fv, 1343.92, 0.005);
}

#[test]
fn currency_multiplies_by_rate() {
    let c = convert_currency(CurrencyInput {
        amount: 100.0,
        exchange_rate: 1.5,
    })
    .expect("currency");
    assert_close("converted", c, 150.0, 1e-9);
}

#[test]
fn overflow_is_refused_not_infinite() {
    let err = compound_interest(CompoundInterestInput {
        principal: 1e300,
        rate_percent: 1000.0,
        years: 100.0,
        compoundings_per_year: 12,
    })
    .unwrap_err();
    assert_eq!(err, CalcError::DomainEdgeCase(EdgeCase::NonFiniteResult));
}

#[test]
fn typed_inputs_reject_non_finite_values() {
    let err = simple_interest(SimpleInterestInput {
        principal: f64::NAN,
        rate_percent: 5.0,
        years: 2.0,
    })
    .unwrap_err();
    assert_eq!(
        err,
        CalcError::InvalidInput {
            field: fields::PRINCIPAL
        }
    );
}

#[test]
fn compute_parses_text_fields() {
    let input = CalculationInput::new()
        .with(fields::PRINCIPAL, " 1000 ")
        .with(fields::RATE, "10")
        .with(fields::YEARS, "1")
        .with(fields::COMPOUNDINGS_PER_YEAR, "12.0");
    let res = compute(CalculatorKind::CompoundInterest, &input).expect("compute");
    match res {
        CalculationResult::CompoundInterest { amount } => {
            assert_close("amount", amount, 1104.71, 0.005)
        }
        other => panic!("unexpected result {other:?}"),
    }
    assert_eq!(res.kind(), CalculatorKind::CompoundInterest);
}

#[test]
fn compute_reports_first_invalid_field() {
    let input = CalculationInput::new()
        .with(fields::AMOUNT, "12000")
        .with(fields::RATE, "abc")
        .with(fields::YEARS, "");
    let err = compute(CalculatorKind::Loan, &input).unwrap_err();
    assert_eq!(err, CalcError::InvalidInput { field: fields::RATE });

    // 필드가 아예 없어도 같은 오류
    let err = compute(CalculatorKind::Currency, &CalculationInput::new()).unwrap_err();
    assert_eq!(err, CalcError::InvalidInput { field: fields::AMOUNT });
}

#[test]
fn compute_rejects_fractional_compoundings() {
    let input = CalculationInput::new()
        .with(fields::PRINCIPAL, "1000")
        .with(fields::RATE, "5")
        .with(fields::YEARS, "1")
        .with(fields::COMPOUNDINGS_PER_YEAR, "2.5");
    let err = compute(CalculatorKind::CompoundInterest, &input).unwrap_err();
    assert_eq!(
        err,
        CalcError::InvalidInput {
            field: fields::COMPOUNDINGS_PER_YEAR
        }
    );
}

#[test]
fn mortgage_result_lists_two_outputs() {
    let input = CalculationInput::new()
        .with(fields::HOME_PRICE, "300000")
        .with(fields::DOWN_PAYMENT, "60000")
        .with(fields::RATE, "6")
        .with(fields::YEARS, "30");
    let res = compute(CalculatorKind::Mortgage, &input).expect("mortgage");
    let names: Vec<&str> = res.values().iter().map(|v| v.name).collect();
    assert_eq!(names, ["monthly_payment", "total_overpay"]);
}

#[test]
fn calculator_kind_ids_round_trip() {
    for kind in CalculatorKind::ALL {
        assert_eq!(kind.id().parse::<CalculatorKind>(), Ok(kind));
        assert!(!kind.fields().is_empty());
    }
    assert_eq!(
        "compound-interest".parse::<CalculatorKind>(),
        Ok(CalculatorKind::CompoundInterest)
    );
    assert_eq!(
        "Currency_Converter".parse::<CalculatorKind>(),
        Ok(CalculatorKind::Currency)
    );
    assert!("bond".parse::<CalculatorKind>().is_err());
}
