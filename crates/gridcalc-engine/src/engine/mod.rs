//! Spreadsheet engine API.
//!
//! This module provides the computation core for the spreadsheet:
//!
//! - [`evaluate`] - Evaluate an arithmetic expression against a variable lookup
//! - [`Formula`] - Parsed, normalized, immutable formula
//! - [`DependencyGraph`] - Bidirectional "depends on" multimap of cell names
//! - [`cells_to_recalculate`] - Circular reference detection and evaluation order
//! - [`is_cell_name`], [`is_variable`] - Name syntax checks

mod cell_ref;
mod cycle;
mod error;
mod eval;
mod formula;
mod graph;
mod token;

pub use cell_ref::{is_cell_name, is_variable};
pub use cycle::cells_to_recalculate;
pub use error::{CycleError, EvalError, FormulaFormatError};
pub use eval::evaluate;
pub use formula::Formula;
pub use graph::DependencyGraph;
pub use token::{Operator, Token, parse_number};
