use super::{ensure_finite, fields, finite_result, refuse, CalcError, EdgeCase};

/// 복리 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundInterestInput {
    /// 원금
    pub principal: f64,
    /// 연이율 [%]
    pub rate_percent: f64,
    /// 기간 [년]
    pub years: f64,
    /// 연간 복리 횟수 (12 = 월복리)
    pub compoundings_per_year: u32,
}

/// 복리 적용 후 원리금 `P × (1 + (r/100)/n)^(n×t)`를 계산한다.
///
/// 복리 횟수가 0이면 계산하지 않는다.
pub fn compound_interest(input: CompoundInterestInput) -> Result<f64, CalcError> {
    let p = ensure_finite(fields::PRINCIPAL, input.principal)?;
    let r = ensure_finite(fields::RATE, input.rate_percent)? / 100.0;
    let t = ensure_finite(fields::YEARS, input.years)?;
    if input.compoundings_per_year == 0 {
        return refuse(EdgeCase::ZeroCompounding);
    }
    let n = f64::from(input.compoundings_per_year);
    finite_result(p * (1.0 + r / n).powf(n * t))
}
