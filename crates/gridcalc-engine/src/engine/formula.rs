//! Parsed spreadsheet formulas.
//!
//! A [`Formula`] is built once from text. Construction tokenizes, passes every
//! variable through the caller's normalizer and validator, and checks the
//! grammar, so a formula that exists can only fail evaluation on division by
//! zero or an unresolvable variable.

use indexmap::IndexSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::cell_ref::is_variable;
use super::error::{EvalError, FormulaFormatError};
use super::eval::eval_tokens;
use super::token::{Token, tokenize};

/// An immutable arithmetic formula over named variables.
///
/// Equality compares the normalized token sequences, so `1 + 1` equals
/// `1.0000000 + 1.0` but `3 + 5` differs from `5 + 3`.
#[derive(Clone, Debug)]
pub struct Formula {
    tokens: Vec<Token>,
    variables: IndexSet<String>,
}

impl Formula {
    /// Parse a formula with no variable normalization or extra validation.
    pub fn new(text: &str) -> Result<Formula, FormulaFormatError> {
        Self::parse(text, str::to_string, |_| true)
    }

    /// Parse a formula.
    ///
    /// Each variable is replaced by `normalize(variable)`; the normalized name
    /// must still be a valid variable and be accepted by `is_valid`.
    pub fn parse<N, V>(text: &str, normalize: N, is_valid: V) -> Result<Formula, FormulaFormatError>
    where
        N: Fn(&str) -> String,
        V: Fn(&str) -> bool,
    {
        let raw = tokenize(text).map_err(FormulaFormatError::InvalidToken)?;

        let mut tokens = Vec::with_capacity(raw.len());
        let mut variables = IndexSet::new();
        for token in raw {
            match token {
                Token::Variable(name) => {
                    let normalized = normalize(&name);
                    if !is_variable(&normalized) || !is_valid(&normalized) {
                        return Err(FormulaFormatError::InvalidVariable(normalized));
                    }
                    variables.insert(normalized.clone());
                    tokens.push(Token::Variable(normalized));
                }
                other => tokens.push(other),
            }
        }

        check_grammar(&tokens)?;
        Ok(Formula { tokens, variables })
    }

    /// The distinct variables this formula references, in order of first use.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(String::as_str)
    }

    /// The normalized token sequence.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Evaluate the formula, resolving variables through `lookup`.
    pub fn evaluate<F>(&self, mut lookup: F) -> Result<f64, EvalError>
    where
        F: FnMut(&str) -> Option<f64>,
    {
        eval_tokens(&self.tokens, &mut lookup)
    }
}

/// Validate token order and parenthesis balance.
///
/// A `+`/`-` where an operand is expected is a unary sign.
fn check_grammar(tokens: &[Token]) -> Result<(), FormulaFormatError> {
    let Some(last) = tokens.last() else {
        return Err(FormulaFormatError::Empty);
    };

    let mut depth = 0usize;
    let mut expect_operand = true;

    for (position, token) in tokens.iter().enumerate() {
        let ok = match token {
            Token::Number(_) | Token::Variable(_) => {
                let ok = expect_operand;
                expect_operand = false;
                ok
            }
            Token::LParen => {
                depth += 1;
                expect_operand
            }
            Token::RParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(FormulaFormatError::UnbalancedParens)?;
                !expect_operand
            }
            Token::Op(op) => {
                let ok = !expect_operand || op.is_additive();
                expect_operand = true;
                ok
            }
        };
        if !ok {
            return Err(FormulaFormatError::UnexpectedToken {
                token: token.to_string(),
                position,
            });
        }
    }

    if expect_operand {
        return Err(FormulaFormatError::UnexpectedEnd(last.to_string()));
    }
    if depth != 0 {
        return Err(FormulaFormatError::UnbalancedParens);
    }
    Ok(())
}

impl fmt::Display for Formula {
    /// The normalized formula text, without whitespace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

// Literals are never NaN, so token equality is reflexive.
impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl FromStr for Formula {
    type Err = FormulaFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn upper(s: &str) -> String {
        s.to_ascii_uppercase()
    }

    #[test]
    fn test_equality_ignores_whitespace_and_number_format() {
        assert_eq!(Formula::new("1 + 1").unwrap(), Formula::new("1.0000000 + 1.0").unwrap());
        assert_eq!(Formula::new("x1+y2").unwrap(), Formula::new(" x1 + y2 ").unwrap());
        assert_eq!(Formula::new("2e1").unwrap(), Formula::new("20").unwrap());
    }

    #[test]
    fn test_equality_respects_operand_order_and_case() {
        assert_ne!(Formula::new("3 + 5").unwrap(), Formula::new("5 + 3").unwrap());
        assert_ne!(Formula::new("x1+y2").unwrap(), Formula::new("X1+Y2").unwrap());
        let a = Formula::parse("x1+y2", upper, |_| true).unwrap();
        let b = Formula::parse("X1+Y2", upper, |_| true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let mut set = HashSet::new();
        set.insert(Formula::new("1 + 1").unwrap());
        assert!(set.contains(&Formula::new("1.0 +1.000").unwrap()));
        assert!(!set.contains(&Formula::new("1 + 2").unwrap()));
    }

    #[test]
    fn test_display_is_normalized() {
        let f = Formula::parse("x + y * (2.50 - z)", upper, |_| true).unwrap();
        assert_eq!(f.to_string(), "X+Y*(2.5-Z)");
        assert_eq!(Formula::new("-x").unwrap().to_string(), "-x");
    }

    #[test]
    fn test_variables_are_distinct_and_normalized() {
        let f = Formula::parse("b1 + a1 * B1 - c1", upper, |_| true).unwrap();
        let vars: Vec<&str> = f.variables().collect();
        assert_eq!(vars, vec!["B1", "A1", "C1"]);
        assert_eq!(Formula::new("2 * 3").unwrap().variables().count(), 0);
    }

    #[test]
    fn test_validator_rejects_variables() {
        let err = Formula::parse("x + A1", str::to_string, |v| v.starts_with('A')).unwrap_err();
        assert_eq!(err, FormulaFormatError::InvalidVariable("x".to_string()));

        // Normalized names must still be valid variables.
        let err = Formula::parse("x", |_| "1x".to_string(), |_| true).unwrap_err();
        assert_eq!(err, FormulaFormatError::InvalidVariable("1x".to_string()));
    }

    #[test]
    fn test_grammar_errors() {
        assert_eq!(Formula::new(""), Err(FormulaFormatError::Empty));
        assert_eq!(Formula::new("  "), Err(FormulaFormatError::Empty));
        assert_eq!(Formula::new("(1+2"), Err(FormulaFormatError::UnbalancedParens));
        assert_eq!(Formula::new("1+2)"), Err(FormulaFormatError::UnbalancedParens));
        assert!(matches!(Formula::new("1+"), Err(FormulaFormatError::UnexpectedEnd(_))));
        assert!(matches!(Formula::new("*2"), Err(FormulaFormatError::UnexpectedToken { .. })));
        assert!(matches!(Formula::new("()"), Err(FormulaFormatError::UnexpectedToken { .. })));
        assert!(matches!(Formula::new("2(3)"), Err(FormulaFormatError::UnexpectedToken { .. })));
        assert!(matches!(Formula::new("(2)x"), Err(FormulaFormatError::UnexpectedToken { .. })));
        assert!(matches!(Formula::new("2 */ 3"), Err(FormulaFormatError::UnexpectedToken { .. })));
        assert!(matches!(Formula::new("2 # 3"), Err(FormulaFormatError::InvalidToken(_))));
    }

    #[test]
    fn test_unary_signs_are_grammatical() {
        for text in ["-1", "+x", "1 + -1", "3*-x", "-(1+2)", "2--2"] {
            assert!(Formula::new(text).is_ok(), "{text} should parse");
        }
    }

    #[test]
    fn test_evaluate_uses_lookup() {
        let f = Formula::new("(a + b) * 2").unwrap();
        let value = f.evaluate(|v| match v {
            "a" => Some(1.5),
            "b" => Some(2.5),
            _ => None,
        });
        assert_eq!(value, Ok(8.0));
    }

    #[test]
    fn test_evaluate_reports_errors_as_values() {
        assert_eq!(Formula::new("1/0").unwrap().evaluate(|_| None), Err(EvalError::DivisionByZero));
        assert_eq!(
            Formula::new("a + 1").unwrap().evaluate(|_| None),
            Err(EvalError::UnknownVariable("a".to_string()))
        );
    }

    #[test]
    fn test_from_str() {
        let f: Formula = "x * 2".parse().unwrap();
        assert_eq!(f, Formula::new("x*2").unwrap());
    }
}
