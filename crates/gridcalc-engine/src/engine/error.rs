//! Error types for evaluation, formula parsing and recalculation ordering.

use thiserror::Error;

/// Errors raised while evaluating an expression or formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Variable {0} has no numeric value")]
    UnknownVariable(String),
}

/// Errors raised when formula text does not follow the formula grammar.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaFormatError {
    #[error("Formula is empty")]
    Empty,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid variable: {0}")]
    InvalidVariable(String),

    #[error("Unexpected '{token}' at token {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("Formula ends with '{0}'")]
    UnexpectedEnd(String),

    #[error("Unbalanced parentheses")]
    UnbalancedParens,
}

/// A circular reference found while ordering a recalculation.
///
/// `path` starts at the edited cell and ends at the cell that closes the loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Circular reference: {}", path.join(" -> "))]
pub struct CycleError {
    pub path: Vec<String>,
}
