//! Formulas over complex numbers.
//!
//! The grammar is deliberately small: unsigned decimal literals, single
//! lowercase letters bound through [`Bindings`], brackets and the five
//! binary operators of [`Operator`]. There are no functions, no implicit
//! multiplication and no general unary minus; a leading `-` or `+` works
//! because a missing left operand of those two operators reads as zero.
//!
//! Splitting does not follow the usual precedence rules. A formula is split
//! at the first occurrence of the highest ranked operator found outside
//! brackets, ranked `+`, `-`, `/`, `*`, `^`. So `8-2-1` is `8-(2-1)` and
//! `6/3*2` is `6/(3*2)`. Bracket tracking at one level is a flag, not a
//! depth counter: a closing bracket always ends the bracketed region.

pub mod bindings;
pub mod error;
pub mod operator;

use std::fmt;

use complex_rs::complex::Complex;

pub use self::{
    bindings::Bindings,
    error::{EvalError, ExpressionError, ParseError},
    operator::Operator,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(f64),
    Variable(char),
    Binary {
        op: Operator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
}

impl Expression {
    pub fn parse(formula: &str) -> Result<Self, ParseError> {
        parse_slice(formula, 0)
    }

    pub fn binary(op: Operator, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluates the tree. As soon as one operand has a `NaN` component the
    /// whole node is `NaN` in both components.
    pub fn evaluate(&self, bindings: &Bindings) -> Result<Complex, EvalError> {
        match self {
            Expression::Literal(value) => Ok(Complex::new(*value, 0.0)),
            Expression::Variable(name) => bindings
                .get(*name)
                .ok_or(EvalError::UnboundVariable(*name)),
            Expression::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(bindings)?;
                let rhs = rhs.evaluate(bindings)?;
                if lhs.is_nan() || rhs.is_nan() {
                    return Ok(Complex::nan());
                }
                Ok(op.apply(lhs, rhs))
            }
        }
    }

    /// The distinct variables referenced, in order of first appearance.
    pub fn variables(&self) -> Vec<char> {
        let mut found = Vec::new();
        self.collect_variables(&mut found);
        found
    }

    fn collect_variables(&self, found: &mut Vec<char>) {
        match self {
            Expression::Literal(_) => {}
            Expression::Variable(name) => {
                if !found.contains(name) {
                    found.push(*name);
                }
            }
            Expression::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(found);
                rhs.collect_variables(found);
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}

/// Parses and evaluates `formula` in one go.
pub fn evaluate(formula: &str, bindings: &Bindings) -> Result<Complex, ExpressionError> {
    let expression = Expression::parse(formula)?;
    Ok(expression.evaluate(bindings)?)
}

// `offset` is the position of `text` inside the whole formula, for error reporting.
fn parse_slice(text: &str, offset: usize) -> Result<Expression, ParseError> {
    check_brackets(text, offset)?;

    let (text, offset) = strip_outer_brackets(text, offset);
    let Some((index, op)) = find_split(text) else {
        return parse_terminal(text);
    };

    let (lhs_text, rhs_text) = (&text[..index], &text[index + 1..]);
    let lhs = if lhs_text.is_empty() && op.allows_empty_lhs() {
        Expression::Literal(0.0)
    } else {
        parse_slice(lhs_text, offset)?
    };
    let rhs = parse_slice(rhs_text, offset + index + 1)?;

    Ok(Expression::binary(op, lhs, rhs))
}

fn check_brackets(text: &str, offset: usize) -> Result<(), ParseError> {
    let mut open = Vec::new();
    for (i, c) in text.char_indices() {
        match c {
            '(' => open.push(i),
            ')' => {
                if open.pop().is_none() {
                    return Err(ParseError::UnbalancedBrackets(offset + i));
                }
            }
            _ => {}
        }
    }
    match open.first() {
        Some(i) => Err(ParseError::UnbalancedBrackets(offset + i)),
        None => Ok(()),
    }
}

/// Removes brackets enclosing the whole text, as often as they occur.
fn strip_outer_brackets(mut text: &str, mut offset: usize) -> (&str, usize) {
    while text.starts_with('(') && text.ends_with(')') && opening_closes_at_end(text) {
        text = &text[1..text.len() - 1];
        offset += 1;
    }
    (text, offset)
}

// whether the bracket at index 0 is closed by the last character
fn opening_closes_at_end(text: &str) -> bool {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == text.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

fn find_split(text: &str) -> Option<(usize, Operator)> {
    let mut bracketed = false;
    let mut split: Option<(usize, Operator)> = None;

    for (i, c) in text.char_indices() {
        if c == '(' || c == ')' {
            bracketed = c == '(';
        }
        if bracketed {
            continue;
        }
        if let Some(op) = Operator::from_symbol(c) {
            if split.map_or(true, |(_, best)| op < best) {
                split = Some((i, op));
            }
        }
    }

    split
}

fn parse_terminal(text: &str) -> Result<Expression, ParseError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(ParseError::EmptyOperand),
        (Some(name), None) if name.is_ascii_lowercase() => Ok(Expression::Variable(name)),
        _ => parse_number(text)
            .map(Expression::Literal)
            .ok_or_else(|| ParseError::InvalidTerminal(text.to_string())),
    }
}

/// Digits with at most one `.`; no sign, no exponent.
fn parse_number(text: &str) -> Option<f64> {
    let mut value = 0.0;
    let mut fraction_scale: Option<f64> = None;
    let mut digits = 0;

    for c in text.chars() {
        match c {
            '0'..='9' => {
                let digit = f64::from(c as u8 - b'0');
                match fraction_scale.as_mut() {
                    Some(scale) => {
                        *scale /= 10.0;
                        value += digit * *scale;
                    }
                    None => value = value * 10.0 + digit,
                }
                digits += 1;
            }
            '.' if fraction_scale.is_none() => fraction_scale = Some(1.0),
            _ => return None,
        }
    }

    (digits > 0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(formula: &str) -> Complex {
        evaluate(formula, &Bindings::new()).unwrap()
    }

    fn eval_at(formula: &str, x: Complex) -> Complex {
        evaluate(formula, &Bindings::new().with('x', x)).unwrap()
    }

    #[test]
    fn adds_literals() {
        assert_eq!(eval("1+1"), Complex::new(2.0, 0.0));
    }

    #[test]
    fn splits_at_plus_before_times() {
        assert_eq!(eval("2*3+1"), Complex::new(7.0, 0.0));
        assert_eq!(eval("1+2*3"), Complex::new(7.0, 0.0));
    }

    #[test]
    fn splits_at_first_occurrence_of_best_operator() {
        // 8-(2-1), 8/(4/2), 6/(3*2)
        assert_eq!(eval("8-2-1"), Complex::new(7.0, 0.0));
        assert_eq!(eval("8/4/2"), Complex::new(4.0, 0.0));
        assert_eq!(eval("6/3*2"), Complex::new(1.0, 0.0));
    }

    #[test]
    fn plus_outranks_an_earlier_minus() {
        let expression = Expression::parse("a-b+c").unwrap();
        match expression {
            Expression::Binary { op, .. } => assert_eq!(op, Operator::Add),
            other => panic!("unexpected tree {:?}", other),
        }
    }

    #[test]
    fn strips_outer_brackets_repeatedly() {
        assert_eq!(eval("(1+1)"), Complex::new(2.0, 0.0));
        assert_eq!(eval("((1+1))"), Complex::new(2.0, 0.0));
        assert_eq!(
            Expression::parse("((1+1))").unwrap(),
            Expression::parse("1+1").unwrap()
        );
    }

    #[test]
    fn keeps_brackets_that_do_not_enclose_everything() {
        assert_eq!(eval("(1+1)*(2+1)"), Complex::new(6.0, 0.0));
        assert_eq!(eval("(1+(2))*(3)"), Complex::new(9.0, 0.0));
    }

    #[test]
    fn evaluates_polynomial_in_x() {
        assert_eq!(eval_at("x^3-1", Complex::new(2.0, 0.0)), Complex::new(7.0, 0.0));
        assert_eq!(eval_at("x^2+1", Complex::new(0.0, 1.0)), Complex::zero());
        assert_eq!(eval_at("3*x^2", Complex::new(1.0, 1.0)), Complex::new(0.0, 6.0));
    }

    #[test]
    fn power_below_two_is_identity() {
        assert_eq!(eval_at("x^0", Complex::new(5.0, 1.0)), Complex::new(5.0, 1.0));
        assert_eq!(eval_at("x^1", Complex::new(5.0, 1.0)), Complex::new(5.0, 1.0));
    }

    #[test]
    fn parses_decimal_literals() {
        assert!((eval("2.25").re - 2.25).abs() < 1e-12);
        assert!((eval(".5").re - 0.5).abs() < 1e-12);
        assert_eq!(eval("12"), Complex::new(12.0, 0.0));
        assert_eq!(eval("3."), Complex::new(3.0, 0.0));
    }

    #[test]
    fn leading_sign_reads_as_zero_operand() {
        assert_eq!(eval("-1"), Complex::new(-1.0, 0.0));
        assert_eq!(eval_at("-x^2+1", Complex::new(2.0, 0.0)), Complex::new(-3.0, 0.0));
    }

    #[test]
    fn nan_operand_contaminates_result() {
        let result = eval("1/0+2");
        assert!(result.re.is_nan() && result.im.is_nan());

        let half_nan = Complex::new(f64::NAN, 1.0);
        let result = eval_at("x*2", half_nan);
        assert!(result.re.is_nan() && result.im.is_nan());
    }

    #[test]
    fn unbound_variable_is_a_binding_error() {
        let err = evaluate("x+y", &Bindings::new().with('x', Complex::zero())).unwrap_err();
        assert_eq!(err, ExpressionError::Eval(EvalError::UnboundVariable('y')));
    }

    #[test]
    fn rejects_malformed_formulas() {
        assert_eq!(Expression::parse("(1+2"), Err(ParseError::UnbalancedBrackets(0)));
        assert_eq!(Expression::parse("1+2)"), Err(ParseError::UnbalancedBrackets(3)));
        assert_eq!(Expression::parse(""), Err(ParseError::EmptyOperand));
        assert_eq!(Expression::parse("()"), Err(ParseError::EmptyOperand));
        assert_eq!(Expression::parse("2*"), Err(ParseError::EmptyOperand));
        assert_eq!(Expression::parse("*2"), Err(ParseError::EmptyOperand));
        assert_eq!(
            Expression::parse("1.2.3"),
            Err(ParseError::InvalidTerminal("1.2.3".to_string()))
        );
        assert_eq!(
            Expression::parse("sin"),
            Err(ParseError::InvalidTerminal("sin".to_string()))
        );
        assert_eq!(
            Expression::parse("."),
            Err(ParseError::InvalidTerminal(".".to_string()))
        );
    }

    #[test]
    fn nested_brackets_after_a_closing_one_are_not_tracked() {
        // the `)` of `(1+1)` ends the bracketed region, exposing `+1)`
        assert!(Expression::parse("2*((1+1)*2+1)").is_err());
    }

    #[test]
    fn lists_variables_in_order() {
        let expression = Expression::parse("y*x+x-z").unwrap();
        assert_eq!(expression.variables(), vec!['y', 'x', 'z']);
    }

    #[test]
    fn displays_fully_bracketed_tree() {
        let expression = Expression::parse("2*3+x").unwrap();
        assert_eq!(expression.to_string(), "((2 * 3) + x)");
    }
}
