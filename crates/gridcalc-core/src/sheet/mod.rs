//! Spreadsheet state and recalculation.

mod cell;
mod ops;
mod state;

pub use cell::{CellContents, CellValue};
pub use state::{NameNormalizer, NameValidator, Spreadsheet};
