use super::{ensure_finite, fields, finite_result, refuse, CalcError, EdgeCase};

/// 투자수익률 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiInput {
    pub initial_value: f64,
    pub final_value: f64,
}

/// ROI [%] `((f − i) / i) × 100`. 초기값이 0이면 계산하지 않는다.
pub fn return_on_investment(input: RoiInput) -> Result<f64, CalcError> {
    let i = ensure_finite(fields::INITIAL_VALUE, input.initial_value)?;
    let f = ensure_finite(fields::FINAL_VALUE, input.final_value)?;
    if i == 0.0 {
        return refuse(EdgeCase::ZeroInitialValue);
    }
    finite_result((f - i) / i * 100.0)
}
