//! 공식 항등식/순수성 속성 테스트.
use finance_calculator_toolbox::{
    calculator::{
        compound_interest, compute, convert_currency, fields, inflation_future_value,
        loan_payment, simple_interest, CalcError, CalculationInput, CalculatorKind,
        CompoundInterestInput, CurrencyInput, InflationInput, LoanInput, SimpleInterestInput,
    },
    format::Formatter,
};
use proptest::prelude::*;

fn rel_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

/// 계산기별로 모두 유효한 텍스트 입력.
fn valid_input(kind: CalculatorKind) -> CalculationInput {
    kind.fields()
        .iter()
        .fold(CalculationInput::new(), |acc, &field| {
            let text = match field {
                fields::COMPOUNDINGS_PER_YEAR => "12",
                fields::DOWN_PAYMENT => "1000",
                _ => "5000",
            };
            acc.with(field, text)
        })
}

fn not_a_number() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("abc".to_string()),
        Just("NaN".to_string()),
        Just("inf".to_string()),
        "[a-zA-Z]{1,8}",
        "[0-9]{1,3}[a-z]{1,3}",
    ]
}

proptest! {
    #[test]
    fn simple_interest_matches_formula(
        p in -1e6f64..1e6,
        r in -100f64..100.0,
        t in 0f64..50.0,
    ) {
        let got = simple_interest(SimpleInterestInput { principal: p, rate_percent: r, years: t })
            .expect("simple interest");
        prop_assert!(rel_close(got, p * (r / 100.0) * t));
    }

    #[test]
    fn compound_interest_matches_formula(
        p in 0f64..1e6,
        r in 0f64..30.0,
        t in 0f64..40.0,
        n in 1u32..366,
    ) {
        let got = compound_interest(CompoundInterestInput {
            principal: p,
            rate_percent: r,
            years: t,
            compoundings_per_year: n,
        })
        .expect("compound interest");
        let nf = f64::from(n);
        prop_assert!(rel_close(got, p * (1.0 + (r / 100.0) / nf).powf(nf * t)));
    }

    #[test]
    fn zero_rate_loan_is_even_split(p in 0f64..1e7, years in 1u32..40) {
        let got = loan_payment(LoanInput { amount: p, rate_percent: 0.0, years: f64::from(years) })
            .expect("loan");
        prop_assert!(got.is_finite());
        prop_assert!(rel_close(got, p / (f64::from(years) * 12.0)));
    }

    #[test]
    fn inflation_zero_rate_is_identity(p in -1e9f64..1e9, t in 0f64..100.0) {
        let got = inflation_future_value(InflationInput {
            present_amount: p,
            inflation_percent: 0.0,
            years: t,
        })
        .expect("inflation");
        prop_assert_eq!(got, p);
    }

    #[test]
    fn currency_is_product(a in -1e9f64..1e9, rate in 0f64..1e3) {
        let got = convert_currency(CurrencyInput { amount: a, exchange_rate: rate })
            .expect("currency");
        prop_assert_eq!(got, a * rate);
    }

    #[test]
    fn repeated_compute_is_bit_identical(
        idx in 0usize..7,
        a in 1f64..1e6,
        b in 0f64..20.0,
    ) {
        let kind = CalculatorKind::ALL[idx];
        let mut input = valid_input(kind);
        for (i, &field) in kind.fields().iter().enumerate() {
            if field == fields::COMPOUNDINGS_PER_YEAR {
                continue;
            }
            let v = if i % 2 == 0 { a } else { b };
            input.set(field, v.to_string());
        }
        let first = compute(kind, &input);
        let second = compute(kind, &input);
        match (first, second) {
            (Ok(x), Ok(y)) => {
                let xs: Vec<u64> = x.values().iter().map(|v| v.value.to_bits()).collect();
                let ys: Vec<u64> = y.values().iter().map(|v| v.value.to_bits()).collect();
                prop_assert_eq!(xs, ys);
            }
            (Err(x), Err(y)) => prop_assert_eq!(x, y),
            (x, y) => prop_assert!(false, "diverged: {:?} vs {:?}", x, y),
        }
    }

    #[test]
    fn non_numeric_field_never_yields_result(
        idx in 0usize..7,
        field_pick in 0usize..4,
        bad in not_a_number(),
    ) {
        let kind = CalculatorKind::ALL[idx];
        let field = kind.fields()[field_pick % kind.fields().len()];
        let mut input = valid_input(kind);
        input.set(field, bad);
        let res = compute(kind, &input);
        prop_assert_eq!(res, Err(CalcError::InvalidInput { field }));
    }

    #[test]
    fn tiny_values_never_format_as_negative_zero(v in -0.0049f64..0.0049, decimals in 0usize..3) {
        let fmt = Formatter::new(decimals, None);
        prop_assert_eq!(fmt.number(v), fmt.number(0.0));
    }
}
