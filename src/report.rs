//! 계산 결과 보고서 내보내기 (스프레드시트용 CSV, TOML).
//!
//! 보고서는 세션 메모리에만 존재하며 사용자가 저장할 때만 파일로 기록된다.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::calculator::{CalculationResult, CalculatorKind};
use crate::format::Formatter;
use crate::forms::CalculatorForm;

/// 보고서 저장 오류.
#[derive(Debug, Error)]
pub enum ReportError {
    /// 항목이 없는 보고서
    #[error("내보낼 계산 결과가 없음")]
    Empty,
    /// 확장자로 형식을 알 수 없음
    #[error("지원하지 않는 보고서 형식: {0}")]
    UnsupportedFormat(String),
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("보고서 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 저장 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Toml,
}

impl ReportFormat {
    /// 파일 확장자로 형식을 고른다.
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "toml" => Ok(ReportFormat::Toml),
            _ => Err(ReportError::UnsupportedFormat(ext)),
        }
    }
}

/// 성공한 계산 한 건.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    /// 입력 원문(앞뒤 공백 제거)
    pub inputs: BTreeMap<String, String>,
    pub result: CalculationResult,
}

impl ReportEntry {
    /// 결과가 있는 폼에서 항목을 만든다.
    pub fn from_form(form: &CalculatorForm) -> Option<Self> {
        let result = *form.result()?;
        let inputs = form
            .fields()
            .iter()
            .map(|f| (f.name.to_string(), f.text.trim().to_string()))
            .collect();
        Some(Self { inputs, result })
    }

    pub fn kind(&self) -> CalculatorKind {
        self.result.kind()
    }
}

/// 세션 보고서.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// 폼의 현재 결과를 추가한다. 결과가 없으면 false.
    pub fn add_form(&mut self, form: &CalculatorForm) -> bool {
        match ReportEntry::from_form(form) {
            Some(entry) => {
                self.entries.push(entry);
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// `calculator,section,field,value` 형식의 CSV. 입력은 계산기 필드 순서를 따른다.
    pub fn to_csv(&self, fmt: &Formatter) -> String {
        let mut out = String::from("calculator,section,field,value\n");
        for entry in &self.entries {
            let kind = entry.kind();
            for &field in kind.fields() {
                let value = entry.inputs.get(field).map(String::as_str).unwrap_or_default();
                push_row(&mut out, &[kind.id(), "input", field, value]);
            }
            for output in entry.result.values() {
                let value = fmt.number(output.value);
                push_row(&mut out, &[kind.id(), "output", output.name, value.as_str()]);
            }
        }
        out
    }

    pub fn to_toml(&self) -> Result<String, ReportError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 확장자에 맞는 형식으로 저장한다. 빈 보고서는 저장하지 않는다.
    pub fn save(&self, path: &Path, fmt: &Formatter) -> Result<ReportFormat, ReportError> {
        if self.is_empty() {
            return Err(ReportError::Empty);
        }
        let format = ReportFormat::from_path(path)?;
        let content = match format {
            ReportFormat::Csv => self.to_csv(fmt),
            ReportFormat::Toml => self.to_toml()?,
        };
        fs::write(path, content)?;
        info!(path = %path.display(), entries = self.len(), ?format, "report saved");
        Ok(format)
    }
}

fn push_row(out: &mut String, cells: &[&str]) {
    let row: Vec<String> = cells.iter().map(|c| csv_escape(c)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// RFC 4180 인용 규칙.
fn csv_escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
