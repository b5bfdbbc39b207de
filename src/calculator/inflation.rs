use super::{ensure_finite, fields, finite_result, CalcError};

/// 인플레이션 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationInput {
    /// 현재 금액
    pub present_amount: f64,
    /// 연 인플레이션율 [%]
    pub inflation_percent: f64,
    /// 기간 [년]
    pub years: f64,
}

/// 같은 구매력을 유지하는 데 필요한 미래 명목 금액 `P × (1 + i/100)^t`.
pub fn inflation_future_value(input: InflationInput) -> Result<f64, CalcError> {
    let p = ensure_finite(fields::PRESENT_AMOUNT, input.present_amount)?;
    let i = ensure_finite(fields::INFLATION_RATE, input.inflation_percent)? / 100.0;
    let t = ensure_finite(fields::YEARS, input.years)?;
    finite_result(p * (1.0 + i).powf(t))
}
