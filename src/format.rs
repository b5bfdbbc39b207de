//! 결과 표시 형식. 계산에는 관여하지 않고 반올림/기호만 처리한다.

use crate::calculator::{OutputValue, ValueKind};
use crate::config::DisplaySettings;

/// 표시 소수 자릿수 상한.
pub const MAX_DECIMALS: usize = 8;

/// 금액/백분율 포매터.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    decimals: usize,
    currency_symbol: Option<String>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            decimals: 2,
            currency_symbol: None,
        }
    }
}

impl Formatter {
    pub fn new(decimals: usize, currency_symbol: Option<String>) -> Self {
        Self {
            decimals: decimals.min(MAX_DECIMALS),
            currency_symbol: currency_symbol.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn from_settings(settings: &DisplaySettings) -> Self {
        Self::new(settings.decimals, settings.currency_symbol.clone())
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// 지정 자릿수로 반올림한 숫자 문자열. `-0.00`은 `0.00`으로 정리한다.
    pub fn number(&self, value: f64) -> String {
        let s = format!("{value:.prec$}", prec = self.decimals);
        match s.strip_prefix('-') {
            Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
            _ => s,
        }
    }

    /// 통화 기호가 설정되어 있으면 앞에 붙인다.
    pub fn amount(&self, value: f64) -> String {
        match &self.currency_symbol {
            Some(sym) => format!("{sym}{}", self.number(value)),
            None => self.number(value),
        }
    }

    pub fn percent(&self, value: f64) -> String {
        format!("{}%", self.number(value))
    }

    pub fn output(&self, out: &OutputValue) -> String {
        match out.kind {
            ValueKind::Amount => self.amount(out.value),
            ValueKind::Percent => self.percent(out.value),
        }
    }
}
