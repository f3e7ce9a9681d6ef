//! Error types for Gridcalc core.

use thiserror::Error;

use gridcalc_engine::engine::{CycleError, FormulaFormatError};

/// Errors that can occur when editing or reading a spreadsheet.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("Invalid cell name: {0:?}")]
    InvalidName(String),

    #[error("Invalid formula: {0}")]
    FormulaFormat(#[from] FormulaFormatError),

    #[error("{0}")]
    CircularReference(#[from] CycleError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
