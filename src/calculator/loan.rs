use super::{ensure_finite, fields, finite_result, refuse, CalcError, EdgeCase};

/// 대출 상환액 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanInput {
    /// 대출 원금
    pub amount: f64,
    /// 연이율 [%]
    pub rate_percent: f64,
    /// 상환 기간 [년]
    pub years: f64,
}

/// 원리금 균등 상환 월 납입액을 계산한다.
///
/// `r = 연이율/100/12`, `n = 기간×12`, `P×r / (1 − (1+r)^(−n))`.
/// 금리가 0이면(또는 분모가 0으로 수렴하면) `P / n`을 반환한다.
pub fn loan_payment(input: LoanInput) -> Result<f64, CalcError> {
    let p = ensure_finite(fields::AMOUNT, input.amount)?;
    let r = ensure_finite(fields::RATE, input.rate_percent)? / 100.0 / 12.0;
    let n = ensure_finite(fields::YEARS, input.years)? * 12.0;
    if n <= 0.0 {
        return refuse(EdgeCase::NonPositiveTerm);
    }
    // 1 − (1+r)^(−n)
    let denom = -(-n * r.ln_1p()).exp_m1();
    if r == 0.0 || denom == 0.0 {
        return finite_result(p / n);
    }
    finite_result(p * r / denom)
}
