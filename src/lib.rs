//! 재무 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 엔진을 사용한다.

pub mod app;
pub mod calculator;
pub mod config;
pub mod format;
pub mod forms;
pub mod i18n;
pub mod input;
pub mod logging;
pub mod report;
pub mod ui_cli;
