use super::{ensure_finite, fields, finite_result, CalcError};

/// 환전 입력. 환율은 사용자가 직접 입력한 고정 배수다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyInput {
    pub amount: f64,
    pub exchange_rate: f64,
}

/// `A × R`. 소수점 반올림은 표시 단계에서 처리한다.
pub fn convert_currency(input: CurrencyInput) -> Result<f64, CalcError> {
    let a = ensure_finite(fields::AMOUNT, input.amount)?;
    let rate = ensure_finite(fields::EXCHANGE_RATE, input.exchange_rate)?;
    finite_result(a * rate)
}
