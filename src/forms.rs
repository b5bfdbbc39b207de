//! 계산기 폼 상태. 화면(CLI/GUI)과 계산 엔진 사이의 얇은 어댑터.
//!
//! 폼은 사용자가 입력한 원문 텍스트와 마지막 성공 결과만 보관한다.
//! 제출에 실패하면 이전 결과를 그대로 유지한다.

use tracing::debug;

use crate::calculator::{
    compute, fields, CalcError, CalculationInput, CalculationResult, CalculatorKind,
};
use crate::config::Config;
use crate::format::Formatter;
use crate::i18n::{keys, Translator};

/// 폼의 입력 칸 하나.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub text: String,
}

/// 계산기 하나의 입력/결과 상태.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorForm {
    kind: CalculatorKind,
    fields: Vec<FormField>,
    result: Option<CalculationResult>,
    last_error: Option<CalcError>,
}

impl CalculatorForm {
    pub fn new(kind: CalculatorKind) -> Self {
        let fields = kind
            .fields()
            .iter()
            .map(|&name| FormField {
                name,
                text: String::new(),
            })
            .collect();
        Self {
            kind,
            fields,
            result: None,
            last_error: None,
        }
    }

    /// 설정의 초기값을 채운 폼을 만든다.
    pub fn with_defaults(kind: CalculatorKind, cfg: &Config) -> Self {
        let mut form = Self::new(kind);
        form.set(
            fields::COMPOUNDINGS_PER_YEAR,
            cfg.default_compoundings_per_year.to_string(),
        );
        form
    }

    pub fn kind(&self) -> CalculatorKind {
        self.kind
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// GUI 텍스트 입력 바인딩용.
    pub fn fields_mut(&mut self) -> &mut [FormField] {
        &mut self.fields
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.text.as_str())
    }

    /// 필드 텍스트를 바꾼다. 이 계산기에 없는 필드면 false.
    pub fn set(&mut self, field: &str, text: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == field) {
            Some(f) => {
                f.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn input(&self) -> CalculationInput {
        self.fields
            .iter()
            .fold(CalculationInput::new(), |acc, f| acc.with(f.name, f.text.clone()))
    }

    /// 현재 입력으로 계산한다. 실패하면 이전 결과를 유지하고 오류만 기록한다.
    pub fn submit(&mut self) -> Result<CalculationResult, CalcError> {
        match compute(self.kind, &self.input()) {
            Ok(res) => {
                self.result = Some(res);
                self.last_error = None;
                Ok(res)
            }
            Err(err) => {
                debug!(calculator = %self.kind, %err, "form submit rejected");
                self.last_error = Some(err);
                Err(err)
            }
        }
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// 입력과 결과를 모두 비운다.
    pub fn clear(&mut self) {
        for f in &mut self.fields {
            f.text.clear();
        }
        self.result = None;
        self.last_error = None;
    }

    /// 결과를 "라벨: 값" 줄로 만든다. 결과가 없으면 빈 목록.
    pub fn result_lines(&self, tr: &Translator, fmt: &Formatter) -> Vec<String> {
        self.result
            .iter()
            .flat_map(|r| r.values())
            .map(|out| format!("{}: {}", tr.t(&keys::output(out.name)), fmt.output(&out)))
            .collect()
    }
}

/// 세션 동안 유지되는 계산기별 폼 묶음.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSet {
    forms: Vec<CalculatorForm>,
}

impl FormSet {
    pub fn new(cfg: &Config) -> Self {
        Self {
            forms: CalculatorKind::ALL
                .iter()
                .map(|&kind| CalculatorForm::with_defaults(kind, cfg))
                .collect(),
        }
    }

    pub fn get(&self, kind: CalculatorKind) -> &CalculatorForm {
        let idx = Self::index(kind);
        &self.forms[idx]
    }

    pub fn get_mut(&mut self, kind: CalculatorKind) -> &mut CalculatorForm {
        let idx = Self::index(kind);
        &mut self.forms[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalculatorForm> {
        self.forms.iter()
    }

    fn index(kind: CalculatorKind) -> usize {
        CalculatorKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default()
    }
}
