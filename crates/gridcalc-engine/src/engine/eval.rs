//! Two-stack expression evaluation.
//!
//! Tokens are scanned left to right with an operand stack and an operator
//! stack. `*` and `/` are applied as soon as their right operand is known,
//! and at most one `+`/`-` is pending per parenthesis level, which together
//! give left-to-right evaluation within each precedence level.

use super::error::EvalError;
use super::token::{Operator, Token, tokenize};

/// Evaluate an arithmetic expression.
///
/// Variables are resolved through `lookup`; a variable it cannot resolve
/// fails the evaluation with [`EvalError::UnknownVariable`].
pub fn evaluate<F>(expression: &str, mut lookup: F) -> Result<f64, EvalError>
where
    F: FnMut(&str) -> Option<f64>,
{
    let tokens = tokenize(expression)
        .map_err(|fragment| EvalError::Syntax(format!("invalid token '{}'", fragment)))?;
    eval_tokens(&tokens, &mut lookup)
}

/// Evaluate an already tokenized expression.
pub(crate) fn eval_tokens(
    tokens: &[Token],
    lookup: &mut dyn FnMut(&str) -> Option<f64>,
) -> Result<f64, EvalError> {
    let mut stacks = Stacks::default();
    // Product of the unary signs seen since the last operand.
    let mut sign: Option<f64> = None;
    let mut prev: Option<&Token> = None;

    for (i, token) in tokens.iter().enumerate() {
        let follows_operand = prev.is_some_and(Token::ends_operand);

        match token {
            Token::Number(n) => {
                stacks.push_operand(sign.take().unwrap_or(1.0) * n)?;
            }
            Token::Variable(name) => {
                let value = lookup(name.as_str())
                    .ok_or_else(|| EvalError::UnknownVariable(name.clone()))?;
                stacks.push_operand(sign.take().unwrap_or(1.0) * value)?;
            }
            Token::Op(op) if op.is_additive() && !follows_operand => {
                if i + 1 == tokens.len() {
                    return Err(syntax(format!("expression ends with '{}'", op.symbol())));
                }
                let factor = if *op == Operator::Sub { -1.0 } else { 1.0 };
                sign = Some(sign.unwrap_or(1.0) * factor);
            }
            Token::Op(op) => {
                if !follows_operand {
                    return Err(syntax(format!("'{}' is missing its left operand", op.symbol())));
                }
                if op.is_additive() && stacks.top_is(Operator::is_additive) {
                    stacks.reduce()?;
                }
                stacks.ops.push(Pending::Op(*op));
            }
            Token::LParen => {
                // A sign in front of a group becomes a multiplication by +/-1,
                // resolved when the group closes.
                if let Some(factor) = sign.take() {
                    stacks.values.push(factor);
                    stacks.ops.push(Pending::Op(Operator::Mul));
                }
                stacks.ops.push(Pending::Open);
            }
            Token::RParen => {
                if sign.is_some() || !follows_operand {
                    return Err(syntax("')' is missing its operand"));
                }
                if stacks.top_is(Operator::is_additive) {
                    stacks.reduce()?;
                }
                match stacks.ops.pop() {
                    Some(Pending::Open) => {}
                    _ => return Err(syntax("unbalanced ')'")),
                }
                while stacks.top_is(Operator::is_multiplicative) {
                    stacks.reduce()?;
                }
            }
        }
        prev = Some(token);
    }

    match stacks.ops.len() {
        0 => {}
        1 => stacks.reduce()?,
        _ => return Err(syntax("unbalanced expression")),
    }

    match stacks.values.as_slice() {
        [value] => Ok(*value),
        [] => Err(syntax("empty expression")),
        _ => Err(syntax("missing operator between operands")),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Pending {
    Op(Operator),
    Open,
}

#[derive(Default)]
struct Stacks {
    values: Vec<f64>,
    ops: Vec<Pending>,
}

impl Stacks {
    fn top_is(&self, pred: fn(Operator) -> bool) -> bool {
        matches!(self.ops.last(), Some(Pending::Op(op)) if pred(*op))
    }

    /// Push an operand, applying a pending `*` or `/` right away.
    fn push_operand(&mut self, value: f64) -> Result<(), EvalError> {
        self.values.push(value);
        if self.top_is(Operator::is_multiplicative) {
            self.reduce()?;
        }
        Ok(())
    }

    /// Pop the top operator and apply it to the two most recent operands.
    fn reduce(&mut self) -> Result<(), EvalError> {
        let Some(Pending::Op(op)) = self.ops.pop() else {
            return Err(syntax("unbalanced '('"));
        };
        let rhs = self.pop_value(op)?;
        let lhs = self.pop_value(op)?;
        self.values.push(apply(op, lhs, rhs)?);
        Ok(())
    }

    fn pop_value(&mut self, op: Operator) -> Result<f64, EvalError> {
        self.values
            .pop()
            .ok_or_else(|| syntax(format!("'{}' is missing an operand", op.symbol())))
    }
}

fn apply(op: Operator, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    match op {
        Operator::Add => Ok(lhs + rhs),
        Operator::Sub => Ok(lhs - rhs),
        Operator::Mul => Ok(lhs * rhs),
        Operator::Div if rhs == 0.0 => Err(EvalError::DivisionByZero),
        Operator::Div => Ok(lhs / rhs),
    }
}

fn syntax(message: impl Into<String>) -> EvalError {
    EvalError::Syntax(message.into())
}
