//! Tokenization of arithmetic expressions.
//!
//! The input is split on operator and parenthesis boundaries; fragments in
//! between are trimmed and must be either a numeric literal or a variable.
//! A `+`/`-` directly after an exponent marker (`1e-5`) stays part of the
//! literal.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::cell_ref::is_variable;

/// One of the four arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    /// `+` and `-`: low precedence, and usable as a unary sign.
    pub fn is_additive(self) -> bool {
        matches!(self, Operator::Add | Operator::Sub)
    }

    /// `*` and `/`: applied eagerly as soon as their right operand is known.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Mul | Operator::Div)
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

/// A lexical unit of an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Variable(String),
    Op(Operator),
    LParen,
    RParen,
}

impl Token {
    /// Whether this token completes an operand (so a following `+`/`-` is binary).
    pub fn ends_operand(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Variable(_) | Token::RParen)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(name) => f.write_str(name),
            Token::Op(op) => write!(f, "{}", op.symbol()),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

/// Parse a numeric literal (`3`, `2.5`, `.1`, `1e-3`).
///
/// Signs, `inf` and `NaN` are not literals; a sign in front of a number is a
/// separate token.
pub fn parse_number(text: &str) -> Option<f64> {
    let first = text.chars().next()?;
    if !(first.is_ascii_digit() || first == '.') {
        return None;
    }
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}

fn exponent_prefix_re() -> &'static Regex {
    static EXP_RE: OnceLock<Regex> = OnceLock::new();
    EXP_RE.get_or_init(|| {
        Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)[eE]$").expect("exponent regex must compile")
    })
}

/// Split an expression into tokens.
///
/// Returns the offending fragment as the error when a fragment is neither a
/// number nor a variable.
pub(crate) fn tokenize(expression: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut fragment = String::new();

    for ch in expression.chars() {
        let boundary = match ch {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '+' | '-' if exponent_prefix_re().is_match(fragment.trim_start()) => None,
            _ => Operator::from_char(ch).map(Token::Op),
        };

        match boundary {
            Some(token) => {
                push_fragment(&mut tokens, &fragment)?;
                fragment.clear();
                tokens.push(token);
            }
            None => fragment.push(ch),
        }
    }
    push_fragment(&mut tokens, &fragment)?;

    Ok(tokens)
}

fn push_fragment(tokens: &mut Vec<Token>, fragment: &str) -> Result<(), String> {
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if let Some(n) = parse_number(trimmed) {
        tokens.push(Token::Number(n));
    } else if is_variable(trimmed) {
        tokens.push(Token::Variable(trimmed.to_string()));
    } else {
        return Err(trimmed.to_string());
    }
    Ok(())
}
