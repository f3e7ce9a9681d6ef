//! gridcalc_engine - Expression evaluation, formulas and the dependency graph.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    fn no_vars(_: &str) -> Option<f64> {
        None
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_evaluate_single_number() {
        assert_eq!(evaluate("5", no_vars), Ok(5.0));
        assert_eq!(evaluate("  42  ", no_vars), Ok(42.0));
    }

    #[test]
    fn test_evaluate_basic_operators() {
        assert_eq!(evaluate("5+3", no_vars), Ok(8.0));
        assert_eq!(evaluate("18-10", no_vars), Ok(8.0));
        assert_eq!(evaluate("2*4", no_vars), Ok(8.0));
        assert_eq!(evaluate("16/2", no_vars), Ok(8.0));
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(evaluate("2+6*3", no_vars), Ok(20.0));
        assert_eq!(evaluate("2*6+3", no_vars), Ok(15.0));
        assert_eq!(evaluate("2+6/3", no_vars), Ok(4.0));
        assert_eq!(evaluate("2 + 5 / 2 + 4 - 4 - 3 + 2", no_vars), Ok(3.5));
    }

    #[test]
    fn test_evaluate_same_precedence_is_left_to_right() {
        assert_eq!(evaluate("2 + 5 / 2 + 4 - 4 - 3 - 2", no_vars), Ok(-0.5));
        assert_eq!(evaluate("8/2/2", no_vars), Ok(2.0));
        assert_eq!(evaluate("10-4-3", no_vars), Ok(3.0));
        assert_eq!(evaluate("12/3*2", no_vars), Ok(8.0));
    }

    #[test]
    fn test_evaluate_parentheses() {
        assert_eq!(evaluate("2*(3+4)", no_vars), Ok(14.0));
        assert_eq!(evaluate("(2+6)*3", no_vars), Ok(24.0));
        assert_eq!(evaluate("(1)", no_vars), Ok(1.0));
        assert_eq!(evaluate("((((((1))))))", no_vars), Ok(1.0));
        assert_eq!(evaluate("2+(3+5*9)", no_vars), Ok(50.0));
        assert_eq!(evaluate("(2+3)*(5+2)", no_vars), Ok(35.0));
        assert_eq!(evaluate("10/(2*(1+1))", no_vars), Ok(2.5));
        assert_eq!(evaluate("1-(2-3)", no_vars), Ok(2.0));
    }

    #[test]
    fn test_evaluate_unary_signs() {
        assert_eq!(evaluate("1 + -1", no_vars), Ok(0.0));
        assert_eq!(evaluate("3+-1", no_vars), Ok(2.0));
        assert_eq!(evaluate("-5", no_vars), Ok(-5.0));
        assert_eq!(evaluate("+5", no_vars), Ok(5.0));
        assert_eq!(evaluate("3*-2", no_vars), Ok(-6.0));
        assert_eq!(evaluate("1--1", no_vars), Ok(2.0));
        assert_eq!(evaluate("-(2+3)*2", no_vars), Ok(-10.0));
        assert_eq!(evaluate("8/-(2+2)", no_vars), Ok(-2.0));
        assert_eq!(evaluate("(-3)", no_vars), Ok(-3.0));
    }

    #[test]
    fn test_evaluate_decimal_literals() {
        assert_close(evaluate("2/.1", no_vars).unwrap(), 20.0);
        assert_close(evaluate("1.5e2 + 1", no_vars).unwrap(), 151.0);
        assert_close(evaluate("2e-1*10", no_vars).unwrap(), 2.0);
    }

    #[test]
    fn test_evaluate_variables() {
        let lookup = |name: &str| match name {
            "A1" => Some(4.0),
            "b7" => Some(0.5),
            _ => None,
        };
        assert_eq!(evaluate("A1 * 2", lookup), Ok(8.0));
        assert_eq!(evaluate("A1/b7 - 1", lookup), Ok(7.0));
        assert_eq!(evaluate("-A1", lookup), Ok(-4.0));
        assert_eq!(
            evaluate("A1 + Z9", lookup),
            Err(EvalError::UnknownVariable("Z9".to_string()))
        );
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(evaluate("1/0", no_vars), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("5/(2-2)", no_vars), Err(EvalError::DivisionByZero));
        assert_eq!(
            evaluate("x/y", |v| if v == "y" { Some(0.0) } else { Some(1.0) }),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_evaluate_syntax_errors() {
        for bad in [
            "", "   ", "+", "-", "1+", "*1", "1**2", "(1", "1)", "()", "(1+2", "2(3)", "(2)3",
            "1 2", "1 + ?", "A1 A2", "5-", "(-)",
        ] {
            assert!(
                matches!(evaluate(bad, |_| Some(1.0)), Err(EvalError::Syntax(_))),
                "expected syntax error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_evaluate_only_calls_lookup_for_variables() {
        let mut seen = Vec::new();
        let result = evaluate("x1 + 2 * y_2", |name| {
            seen.push(name.to_string());
            Some(1.0)
        });
        assert_eq!(result, Ok(3.0));
        assert_eq!(seen, vec!["x1".to_string(), "y_2".to_string()]);
    }
}
