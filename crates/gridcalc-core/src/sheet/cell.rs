//! Cell contents and computed values.
//!
//! - [`CellContents`] - What the user entered: text, a number, or a formula
//! - [`CellValue`] - What the cell evaluates to: text, a number, or an error

use std::fmt;

use gridcalc_engine::engine::{EvalError, Formula, FormulaFormatError, parse_number};

/// The content stored in a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContents {
    Text(String),
    Number(f64),
    Formula(Formula),
}

impl CellContents {
    /// Classify raw input.
    /// - Numeric literal -> Number
    /// - Starts with '=' -> Formula (the rest, parsed by `parse_formula`)
    /// - Otherwise -> Text, verbatim
    pub fn from_input<P>(input: &str, parse_formula: P) -> Result<CellContents, FormulaFormatError>
    where
        P: FnOnce(&str) -> Result<Formula, FormulaFormatError>,
    {
        if let Some(n) = parse_signed_number(input.trim()) {
            return Ok(CellContents::Number(n));
        }
        if let Some(formula) = input.strip_prefix('=') {
            return parse_formula(formula).map(CellContents::Formula);
        }
        Ok(CellContents::Text(input.to_string()))
    }

    /// Empty cells hold empty text.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellContents::Text(s) if s.is_empty())
    }

    /// Get the content as the user would type it back in.
    pub fn to_input_string(&self) -> String {
        match self {
            CellContents::Text(s) => s.clone(),
            CellContents::Number(n) => n.to_string(),
            CellContents::Formula(f) => format!("={}", f),
        }
    }
}

impl Default for CellContents {
    fn default() -> Self {
        CellContents::Text(String::new())
    }
}

fn parse_signed_number(text: &str) -> Option<f64> {
    match text.strip_prefix('-') {
        Some(rest) => parse_number(rest).map(|n| -n),
        None => parse_number(text.strip_prefix('+').unwrap_or(text)),
    }
}

/// The computed value of a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Error(EvalError),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Error(e) => write!(f, "#ERR: {}", e),
        }
    }
}

/// A cell: its contents and the value last computed from them.
#[derive(Clone, Debug, Default)]
pub(crate) struct Cell {
    pub contents: CellContents,
    pub value: CellValue,
}
