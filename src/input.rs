//! 폼 텍스트를 계산기 입력 숫자로 변환한다.
//!
//! 앞뒤 공백은 무시한다. 빈 문자열, 숫자가 아닌 문자열, `NaN`/`inf`처럼
//! 유한하지 않은 값은 모두 해당 필드의 [`CalcError::InvalidInput`]이 된다.

use crate::calculator::CalcError;

/// 유한한 실수로 파싱한다.
pub fn parse_number(field: &'static str, text: &str) -> Result<f64, CalcError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::InvalidInput { field });
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::InvalidInput { field }),
    }
}

/// 음이 아닌 정수 횟수로 파싱한다. `12.0`처럼 소수부가 0인 값은 허용한다.
pub fn parse_count(field: &'static str, text: &str) -> Result<u32, CalcError> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return Ok(n);
    }
    let v = parse_number(field, trimmed)?;
    if v < 0.0 || v.fract() != 0.0 || v > f64::from(u32::MAX) {
        return Err(CalcError::InvalidInput { field });
    }
    Ok(v as u32)
}
