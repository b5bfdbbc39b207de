use super::{ensure_finite, fields, finite_result, refuse, CalcError, EdgeCase};

/// 모기지 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MortgageInput {
    /// 주택 가격
    pub home_price: f64,
    /// 계약금(선납금)
    pub down_payment: f64,
    /// 연이율 [%]
    pub rate_percent: f64,
    /// 상환 기간 [년]
    pub years: f64,
}

/// 모기지 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MortgageResult {
    /// 월 납입액
    pub monthly_payment: f64,
    /// 총 이자 부담(총 납입액 − 대출 원금)
    pub total_overpay: f64,
}

/// 계약금을 뺀 대출 원금에 대해 월 납입액과 총 이자 부담을 계산한다.
///
/// `M = L×r×(1+r)^n / ((1+r)^n − 1)`, `overpay = M×n − L`.
/// 계약금이 가격보다 크면 계산하지 않는다. 금리가 0이면 원금을 균등 분할한다.
pub fn mortgage_payment(input: MortgageInput) -> Result<MortgageResult, CalcError> {
    let price = ensure_finite(fields::HOME_PRICE, input.home_price)?;
    let down = ensure_finite(fields::DOWN_PAYMENT, input.down_payment)?;
    let r = ensure_finite(fields::RATE, input.rate_percent)? / 100.0 / 12.0;
    let n = ensure_finite(fields::YEARS, input.years)? * 12.0;
    if n <= 0.0 {
        return refuse(EdgeCase::NonPositiveTerm);
    }
    let principal = price - down;
    if principal < 0.0 {
        return refuse(EdgeCase::NegativePrincipal);
    }

    // (1+r)^n − 1
    let growth_m1 = (n * r.ln_1p()).exp_m1();
    if r == 0.0 || growth_m1 == 0.0 {
        return Ok(MortgageResult {
            monthly_payment: finite_result(principal / n)?,
            total_overpay: 0.0,
        });
    }
    let monthly_payment = finite_result(principal * r * (growth_m1 + 1.0) / growth_m1)?;
    let total_overpay = finite_result(monthly_payment * n - principal)?;
    Ok(MortgageResult {
        monthly_payment,
        total_overpay,
    })
}
