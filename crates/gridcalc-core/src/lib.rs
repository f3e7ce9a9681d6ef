//! gridcalc-core - Spreadsheet model and recalculation engine.

pub mod error;
pub mod sheet;

pub use error::{Result, SheetError};
pub use sheet::{CellContents, CellValue, Spreadsheet};

pub use gridcalc_engine::engine::{EvalError, Formula};
