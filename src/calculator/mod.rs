//! 재무 계산기 모음.
//!
//! 각 계산기는 서로 의존하지 않는 순수 함수이며, 입력은 항상 유한한 숫자여야 한다.
//! 텍스트 입력은 [`compute`]가 [`crate::input`]으로 먼저 검증한 뒤 계산기에 전달한다.

pub mod compound_interest;
pub mod currency;
pub mod inflation;
pub mod loan;
pub mod mortgage;
pub mod roi;
pub mod simple_interest;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::input;

pub use compound_interest::{compound_interest, CompoundInterestInput};
pub use currency::{convert_currency, CurrencyInput};
pub use inflation::{inflation_future_value, InflationInput};
pub use loan::{loan_payment, LoanInput};
pub use mortgage::{mortgage_payment, MortgageInput, MortgageResult};
pub use roi::{return_on_investment, RoiInput};
pub use simple_interest::{simple_interest, SimpleInterestInput};

/// 입력 필드 이름. 텍스트 입력 맵의 키이자 번역 키(`field.<name>`)의 접미사로 쓰인다.
pub mod fields {
    pub const PRINCIPAL: &str = "principal";
    pub const RATE: &str = "rate";
    pub const YEARS: &str = "years";
    pub const COMPOUNDINGS_PER_YEAR: &str = "compoundings_per_year";
    pub const AMOUNT: &str = "amount";
    pub const HOME_PRICE: &str = "home_price";
    pub const DOWN_PAYMENT: &str = "down_payment";
    pub const INITIAL_VALUE: &str = "initial_value";
    pub const FINAL_VALUE: &str = "final_value";
    pub const PRESENT_AMOUNT: &str = "present_amount";
    pub const INFLATION_RATE: &str = "inflation_rate";
    pub const EXCHANGE_RATE: &str = "exchange_rate";
}

/// 계산을 거부한 경계 조건.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeCase {
    /// 연간 복리 횟수가 0
    ZeroCompounding,
    /// 대출/모기지 기간이 0 이하
    NonPositiveTerm,
    /// ROI 초기값이 0
    ZeroInitialValue,
    /// 계약금이 주택 가격보다 큼
    NegativePrincipal,
    /// 계산 결과가 유한하지 않음(오버플로 등)
    NonFiniteResult,
}

impl EdgeCase {
    /// 번역 키.
    pub fn message_key(&self) -> &'static str {
        match self {
            EdgeCase::ZeroCompounding => "error.edge.zero_compounding",
            EdgeCase::NonPositiveTerm => "error.edge.non_positive_term",
            EdgeCase::ZeroInitialValue => "error.edge.zero_initial_value",
            EdgeCase::NegativePrincipal => "error.edge.negative_principal",
            EdgeCase::NonFiniteResult => "error.edge.non_finite_result",
        }
    }
}

impl fmt::Display for EdgeCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EdgeCase::ZeroCompounding => "연간 복리 횟수는 0보다 커야 함",
            EdgeCase::NonPositiveTerm => "기간은 0보다 커야 함",
            EdgeCase::ZeroInitialValue => "초기 투자액이 0",
            EdgeCase::NegativePrincipal => "계약금이 주택 가격보다 큼",
            EdgeCase::NonFiniteResult => "결과가 유한한 수가 아님",
        };
        f.write_str(msg)
    }
}

/// 계산기 오류. 두 경우 모두 결과를 만들지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// 필드가 비었거나 숫자가 아니거나 유한하지 않음
    #[error("잘못된 입력: {field}")]
    InvalidInput { field: &'static str },
    /// 공식이 정의되지 않는 입력
    #[error("계산 불가: {0}")]
    DomainEdgeCase(EdgeCase),
}

/// 필드 값이 유한한지 확인한다.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput { field })
    }
}

/// 계산 결과가 유한한지 확인한다.
pub(crate) fn finite_result(value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        refuse(EdgeCase::NonFiniteResult)
    }
}

pub(crate) fn refuse<T>(case: EdgeCase) -> Result<T, CalcError> {
    debug!(?case, "calculation refused");
    Err(CalcError::DomainEdgeCase(case))
}

/// 제공하는 계산기 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    SimpleInterest,
    CompoundInterest,
    Loan,
    Mortgage,
    Roi,
    Inflation,
    Currency,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 7] = [
        CalculatorKind::SimpleInterest,
        CalculatorKind::CompoundInterest,
        CalculatorKind::Loan,
        CalculatorKind::Mortgage,
        CalculatorKind::Roi,
        CalculatorKind::Inflation,
        CalculatorKind::Currency,
    ];

    /// 설정/보고서/CLI에서 쓰는 식별자.
    pub fn id(&self) -> &'static str {
        match self {
            CalculatorKind::SimpleInterest => "simple_interest",
            CalculatorKind::CompoundInterest => "compound_interest",
            CalculatorKind::Loan => "loan",
            CalculatorKind::Mortgage => "mortgage",
            CalculatorKind::Roi => "roi",
            CalculatorKind::Inflation => "inflation",
            CalculatorKind::Currency => "currency",
        }
    }

    /// 화면 제목 번역 키.
    pub fn title_key(&self) -> &'static str {
        match self {
            CalculatorKind::SimpleInterest => "calc.simple_interest",
            CalculatorKind::CompoundInterest => "calc.compound_interest",
            CalculatorKind::Loan => "calc.loan",
            CalculatorKind::Mortgage => "calc.mortgage",
            CalculatorKind::Roi => "calc.roi",
            CalculatorKind::Inflation => "calc.inflation",
            CalculatorKind::Currency => "calc.currency",
        }
    }

    /// 필요한 입력 필드(입력 순서).
    pub fn fields(&self) -> &'static [&'static str] {
        use fields::*;
        match self {
            CalculatorKind::SimpleInterest => &[PRINCIPAL, RATE, YEARS],
            CalculatorKind::CompoundInterest => &[PRINCIPAL, RATE, YEARS, COMPOUNDINGS_PER_YEAR],
            CalculatorKind::Loan => &[AMOUNT, RATE, YEARS],
            CalculatorKind::Mortgage => &[HOME_PRICE, DOWN_PAYMENT, RATE, YEARS],
            CalculatorKind::Roi => &[INITIAL_VALUE, FINAL_VALUE],
            CalculatorKind::Inflation => &[PRESENT_AMOUNT, INFLATION_RATE, YEARS],
            CalculatorKind::Currency => &[AMOUNT, EXCHANGE_RATE],
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// 알 수 없는 계산기 이름.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("알 수 없는 계산기: {0}")]
pub struct UnknownCalculator(pub String);

impl FromStr for CalculatorKind {
    type Err = UnknownCalculator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "simple_interest" | "simple" => Ok(CalculatorKind::SimpleInterest),
            "compound_interest" | "compound" => Ok(CalculatorKind::CompoundInterest),
            "loan" => Ok(CalculatorKind::Loan),
            "mortgage" => Ok(CalculatorKind::Mortgage),
            "roi" => Ok(CalculatorKind::Roi),
            "inflation" => Ok(CalculatorKind::Inflation),
            "currency" | "currency_converter" => Ok(CalculatorKind::Currency),
            _ => Err(UnknownCalculator(s.to_string())),
        }
    }
}

/// 이름 붙은 텍스트 입력 필드 모음. 폼에서 받은 문자열을 그대로 담는다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    values: BTreeMap<String, String>,
}

impl CalculationInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// 빌더 형태로 필드를 추가한다.
    pub fn with(mut self, field: &str, text: impl Into<String>) -> Self {
        self.set(field, text);
        self
    }

    pub fn set(&mut self, field: &str, text: impl Into<String>) {
        self.values.insert(field.to_string(), text.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn number(&self, field: &'static str) -> Result<f64, CalcError> {
        input::parse_number(field, self.get(field).unwrap_or_default())
    }

    fn count(&self, field: &'static str) -> Result<u32, CalcError> {
        input::parse_count(field, self.get(field).unwrap_or_default())
    }
}

/// 결과 값의 표시 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// 금액
    Amount,
    /// 백분율
    Percent,
}

/// 이름 붙은 결과 값 하나.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputValue {
    pub name: &'static str,
    pub value: f64,
    pub kind: ValueKind,
}

/// 계산 결과. 모기지만 두 개의 값을 갖는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationResult {
    SimpleInterest { interest: f64 },
    CompoundInterest { amount: f64 },
    Loan { monthly_payment: f64 },
    Mortgage { monthly_payment: f64, total_overpay: f64 },
    Roi { percent: f64 },
    Inflation { future_value: f64 },
    Currency { converted: f64 },
}

impl CalculationResult {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationResult::SimpleInterest { .. } => CalculatorKind::SimpleInterest,
            CalculationResult::CompoundInterest { .. } => CalculatorKind::CompoundInterest,
            CalculationResult::Loan { .. } => CalculatorKind::Loan,
            CalculationResult::Mortgage { .. } => CalculatorKind::Mortgage,
            CalculationResult::Roi { .. } => CalculatorKind::Roi,
            CalculationResult::Inflation { .. } => CalculatorKind::Inflation,
            CalculationResult::Currency { .. } => CalculatorKind::Currency,
        }
    }

    /// 표시/내보내기용 결과 값 목록. 번역 키는 `output.<name>`.
    pub fn values(&self) -> Vec<OutputValue> {
        let amount = |name, value| OutputValue {
            name,
            value,
            kind: ValueKind::Amount,
        };
        match *self {
            CalculationResult::SimpleInterest { interest } => vec![amount("interest", interest)],
            CalculationResult::CompoundInterest { amount: a } => vec![amount("amount", a)],
            CalculationResult::Loan { monthly_payment } => {
                vec![amount("monthly_payment", monthly_payment)]
            }
            CalculationResult::Mortgage {
                monthly_payment,
                total_overpay,
            } => vec![
                amount("monthly_payment", monthly_payment),
                amount("total_overpay", total_overpay),
            ],
            CalculationResult::Roi { percent } => vec![OutputValue {
                name: "roi",
                value: percent,
                kind: ValueKind::Percent,
            }],
            CalculationResult::Inflation { future_value } => {
                vec![amount("future_value", future_value)]
            }
            CalculationResult::Currency { converted } => vec![amount("converted", converted)],
        }
    }
}

/// 텍스트 입력을 검증한 뒤 지정한 계산기를 실행한다.
///
/// 모든 필수 필드를 먼저 파싱하므로, 하나라도 잘못되면 산술 연산 전에
/// 첫 번째 잘못된 필드 이름과 함께 [`CalcError::InvalidInput`]을 반환한다.
pub fn compute(
    kind: CalculatorKind,
    input: &CalculationInput,
) -> Result<CalculationResult, CalcError> {
    use fields::*;
    let result = match kind {
        CalculatorKind::SimpleInterest => {
            let parsed = SimpleInterestInput {
                principal: input.number(PRINCIPAL)?,
                rate_percent: input.number(RATE)?,
                years: input.number(YEARS)?,
            };
            CalculationResult::SimpleInterest {
                interest: simple_interest(parsed)?,
            }
        }
        CalculatorKind::CompoundInterest => {
            let parsed = CompoundInterestInput {
                principal: input.number(PRINCIPAL)?,
                rate_percent: input.number(RATE)?,
                years: input.number(YEARS)?,
                compoundings_per_year: input.count(COMPOUNDINGS_PER_YEAR)?,
            };
            CalculationResult::CompoundInterest {
                amount: compound_interest(parsed)?,
            }
        }
        CalculatorKind::Loan => {
            let parsed = LoanInput {
                amount: input.number(AMOUNT)?,
                rate_percent: input.number(RATE)?,
                years: input.number(YEARS)?,
            };
            CalculationResult::Loan {
                monthly_payment: loan_payment(parsed)?,
            }
        }
        CalculatorKind::Mortgage => {
            let parsed = MortgageInput {
                home_price: input.number(HOME_PRICE)?,
                down_payment: input.number(DOWN_PAYMENT)?,
                rate_percent: input.number(RATE)?,
                years: input.number(YEARS)?,
            };
            let res = mortgage_payment(parsed)?;
            CalculationResult::Mortgage {
                monthly_payment: res.monthly_payment,
                total_overpay: res.total_overpay,
            }
        }
        CalculatorKind::Roi => {
            let parsed = RoiInput {
                initial_value: input.number(INITIAL_VALUE)?,
                final_value: input.number(FINAL_VALUE)?,
            };
            CalculationResult::Roi {
                percent: return_on_investment(parsed)?,
            }
        }
        CalculatorKind::Inflation => {
            let parsed = InflationInput {
                present_amount: input.number(PRESENT_AMOUNT)?,
                inflation_percent: input.number(INFLATION_RATE)?,
                years: input.number(YEARS)?,
            };
            CalculationResult::Inflation {
                future_value: inflation_future_value(parsed)?,
            }
        }
        CalculatorKind::Currency => {
            let parsed = CurrencyInput {
                amount: input.number(AMOUNT)?,
                exchange_rate: input.number(EXCHANGE_RATE)?,
            };
            CalculationResult::Currency {
                converted: convert_currency(parsed)?,
            }
        }
    };
    debug!(calculator = %kind, ?result, "calculation finished");
    Ok(result)
}
