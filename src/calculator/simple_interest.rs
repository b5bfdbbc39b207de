use super::{ensure_finite, fields, finite_result, CalcError};

/// 단리 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleInterestInput {
    /// 원금
    pub principal: f64,
    /// 연이율 [%] (5 = 5%)
    pub rate_percent: f64,
    /// 기간 [년]
    pub years: f64,
}

/// 단리 이자 `P × (r/100) × t`를 계산한다.
pub fn simple_interest(input: SimpleInterestInput) -> Result<f64, CalcError> {
    let p = ensure_finite(fields::PRINCIPAL, input.principal)?;
    let r = ensure_finite(fields::RATE, input.rate_percent)?;
    let t = ensure_finite(fields::YEARS, input.years)?;
    finite_result(p * (r / 100.0) * t)
}
