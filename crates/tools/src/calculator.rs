//! Calculator tool: evaluates arithmetic expressions.
//!
//! Input is first checked against a character whitelist (digits, whitespace,
//! `+ - * / ( ) . %`). Anything else, names and quotes included, is rejected
//! before parsing. The accepted text is then evaluated by a small
//! recursive-descent parser with no access to any name bindings.
//!
//! Operators: `+`, `-`, `*`, `/`, `//` (floor division), `%` (floored
//! modulo), `**` (right-associative power), parentheses, unary `+`/`-`.

use async_trait::async_trait;
use ressa_core::tool::Tool;
use tracing::{info, warn};

pub const INVALID_EXPRESSION: &str =
    "Error: Invalid expression. Only basic math operations are allowed.";

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Performs basic mathematical calculations. Input should be a mathematical expression like '2 + 2' or '5 * 3'."
    }

    async fn run(&self, input: &str) -> String {
        let expression = input.trim();

        if !is_safe_expression(expression) {
            warn!(expression, "Rejected calculator input");
            return INVALID_EXPRESSION.to_string();
        }

        match evaluate(expression) {
            Ok(value) => {
                let formatted = format_number(value);
                info!(expression, result = %formatted, "Calculated");
                format!("Result: {formatted}")
            }
            Err(e) => {
                warn!(expression, error = %e, "Calculation failed");
                format!("Error calculating '{expression}': {e}")
            }
        }
    }
}

/// Only digits, whitespace, `+ - * / ( ) . %`, and at least one character.
pub fn is_safe_expression(expression: &str) -> bool {
    !expression.is_empty()
        && expression
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || "+-*/().%".contains(c))
}

/// Integers print without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ── Recursive-descent expression evaluator ────────────────────────────────

/// Evaluate a mathematical expression string.
pub fn evaluate(expr: &str) -> Result<f64, String> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser::new(&tokens);
    let result = parser.parse_expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(format!(
            "Unexpected token at position {}: {:?}",
            parser.pos, parser.tokens[parser.pos]
        ));
    }
    if !result.is_finite() {
        return Err("numeric result out of range".into());
    }
    Ok(result)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let next = chars.get(i + 1).copied();
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            '+' => { tokens.push(Token::Plus); i += 1; }
            '-' => { tokens.push(Token::Minus); i += 1; }
            '*' if next == Some('*') => { tokens.push(Token::DoubleStar); i += 2; }
            '*' => { tokens.push(Token::Star); i += 1; }
            '/' if next == Some('/') => { tokens.push(Token::DoubleSlash); i += 2; }
            '/' => { tokens.push(Token::Slash); i += 1; }
            '%' => { tokens.push(Token::Percent); i += 1; }
            '(' => { tokens.push(Token::LParen); i += 1; }
            ')' => { tokens.push(Token::RParen); i += 1; }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let num_str: String = chars[start..i].iter().collect();
                let num: f64 = num_str
                    .parse()
                    .map_err(|_| format!("Invalid number: {num_str}"))?;
                tokens.push(Token::Number(num));
            }
            c => return Err(format!("Unexpected character: '{c}'")),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

/// Nesting limit for parentheses, unary signs and `**` chains.
const MAX_DEPTH: usize = 256;

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0, depth: 0 }
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, String>) -> Result<T, String> {
        if self.depth >= MAX_DEPTH {
            return Err("expression nested too deeply".into());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    // expr = term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<f64, String> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.consume();
                    left += self.parse_term()?;
                }
                Token::Minus => {
                    self.consume();
                    left -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // term = unary (('*' | '/' | '//' | '%') unary)*
    fn parse_term(&mut self) -> Result<f64, String> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek().cloned() {
            match op {
                Token::Star => {
                    self.consume();
                    left *= self.parse_unary()?;
                }
                Token::Slash | Token::DoubleSlash | Token::Percent => {
                    self.consume();
                    let right = self.parse_unary()?;
                    if right == 0.0 {
                        return Err(match op {
                            Token::Percent => "modulo by zero".into(),
                            _ => "division by zero".into(),
                        });
                    }
                    left = match op {
                        Token::Slash => left / right,
                        Token::DoubleSlash => (left / right).floor(),
                        // Floored modulo: the result takes the divisor's sign.
                        _ => left - right * (left / right).floor(),
                    };
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // unary = ('-' | '+') unary | power
    fn parse_unary(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some(Token::Minus) => {
                self.consume();
                Ok(-self.nested(Self::parse_unary)?)
            }
            Some(Token::Plus) => {
                self.consume();
                self.nested(Self::parse_unary)
            }
            _ => self.parse_power(),
        }
    }

    // power = primary ('**' unary)?
    fn parse_power(&mut self) -> Result<f64, String> {
        let base = self.parse_primary()?;
        if let Some(Token::DoubleStar) = self.peek() {
            self.consume();
            let exponent = self.nested(Self::parse_unary)?;
            if base == 0.0 && exponent < 0.0 {
                return Err("0.0 cannot be raised to a negative power".into());
            }
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    // primary = NUMBER | '(' expr ')'
    fn parse_primary(&mut self) -> Result<f64, String> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::LParen) => {
                let val = self.nested(Self::parse_expr)?;
                match self.consume() {
                    Some(Token::RParen) => Ok(val),
                    _ => Err("Expected closing parenthesis".into()),
                }
            }
            Some(tok) => Err(format!("Unexpected token: {tok:?}")),
            None => Err("Unexpected end of expression".into()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_addition() {
        assert_eq!(evaluate("2 + 3").unwrap(), 5.0);
    }

    #[test]
    fn operator_precedence() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
    }

    #[test]
    fn parentheses() {
        assert_eq!(evaluate("((1 + 2) * (3 + 4))").unwrap(), 21.0);
    }

    #[test]
    fn division() {
        assert_eq!(evaluate("10 / 4").unwrap(), 2.5);
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(evaluate("1 / 0").unwrap_err(), "division by zero");
        assert_eq!(evaluate("1 // 0").unwrap_err(), "division by zero");
        assert_eq!(evaluate("1 % 0").unwrap_err(), "modulo by zero");
    }

    #[test]
    fn floor_division_and_modulo() {
        assert_eq!(evaluate("7 // 2").unwrap(), 3.0);
        assert_eq!(evaluate("-7 // 2").unwrap(), -4.0);
        assert_eq!(evaluate("7 % 3").unwrap(), 1.0);
        assert_eq!(evaluate("-7 % 3").unwrap(), 2.0);
        assert_eq!(evaluate("7 % -3").unwrap(), -2.0);
    }

    #[test]
    fn power_binds_tighter_than_unary_minus() {
        assert_eq!(evaluate("2 ** 10").unwrap(), 1024.0);
        assert_eq!(evaluate("-2 ** 2").unwrap(), -4.0);
        assert_eq!(evaluate("2 ** 3 ** 2").unwrap(), 512.0);
        assert_eq!(evaluate("2 ** -1").unwrap(), 0.5);
    }

    #[test]
    fn unary_operators() {
        assert_eq!(evaluate("-5 + 3").unwrap(), -2.0);
        assert_eq!(evaluate("+5 - -3").unwrap(), 8.0);
    }

    #[test]
    fn overflow_is_error() {
        assert!(evaluate("10 ** 400").is_err());
    }

    #[test]
    fn malformed_expressions() {
        assert!(evaluate("2 +").is_err());
        assert!(evaluate("(2 + 3").is_err());
        assert!(evaluate("1.2.3").is_err());
        assert!(evaluate("").is_err());
        assert!(evaluate("2 3").is_err());
    }

    #[test]
    fn whitelist() {
        assert!(is_safe_expression("(1 + 2.5) * 3 % 2"));
        assert!(!is_safe_expression(""));
        assert!(!is_safe_expression("__import__('os')"));
        assert!(!is_safe_expression("2 ^ 3"));
        assert!(!is_safe_expression("abs(-1)"));
    }

    #[tokio::test]
    async fn tool_reports_result() {
        assert_eq!(CalculatorTool.run("2 + 2").await, "Result: 4");
        assert_eq!(CalculatorTool.run("  10 / 4  ").await, "Result: 2.5");
        assert!(CalculatorTool.run("10 / 3").await.starts_with("Result: 3.333"));
    }

    #[tokio::test]
    async fn tool_rejects_code() {
        let out = CalculatorTool.run("__import__('os')").await;
        assert_eq!(out, INVALID_EXPRESSION);

        let out = CalculatorTool.run("").await;
        assert_eq!(out, INVALID_EXPRESSION);
    }

    #[tokio::test]
    async fn tool_reports_evaluation_errors() {
        let out = CalculatorTool.run("1/0").await;
        assert_eq!(out, "Error calculating '1/0': division by zero");

        let out = CalculatorTool.run("(1 +").await;
        assert!(out.starts_with("Error calculating '(1 +':"));
    }

    #[test]
    fn moderate_nesting_evaluates() {
        let expr = format!("{}7{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(evaluate(&expr).unwrap(), 7.0);
        assert_eq!(evaluate(&format!("{}3", "-".repeat(100))).unwrap(), 3.0);
    }

    #[tokio::test]
    async fn deep_nesting_is_an_error_not_a_crash() {
        let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        let out = CalculatorTool.run(&parens).await;
        assert!(out.starts_with("Error calculating '((("));
        assert!(out.ends_with("expression nested too deeply"));

        let signs = format!("{}1", "-".repeat(100_000));
        assert!(CalculatorTool.run(&signs).await.ends_with("expression nested too deeply"));

        let powers = format!("{}1", "1 ** ".repeat(100_000));
        assert!(CalculatorTool.run(&powers).await.ends_with("expression nested too deeply"));
    }

    #[test]
    fn descriptor() {
        let d = CalculatorTool.descriptor();
        assert_eq!(d.name, "calculator");
        assert!(d.description.contains("mathematical"));
    }
}
