//! The module contains the errors the engine can throw.
//!
//! Business edge cases (empty inputs, a malformed row, a degenerate horizon)
//! never error: they degrade to empty or zero outputs so the dashboard always
//! has something consistent to render. `EngineError` is reserved for boundary
//! and programmer errors, such as an amount string that cannot be parsed.

use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}
