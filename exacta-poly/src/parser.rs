//! Expression parser
//!
//! Recursive descent over the raw text: each level scans for its operator
//! outside parentheses and splits there. Additive and multiplicative
//! operators split at the rightmost occurrence so they associate to the
//! left; `^` splits at the leftmost so it associates to the right.

use crate::AlgebraError;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Decimal literal, kept as text until it is read exactly
    Number(String),
    Variable(String),
    BinaryOp(Box<Expr>, BinOp, Box<Expr>),
    Neg(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Default bound on parser recursion depth
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parse an expression; `**` is accepted for `^` and juxtaposition
/// (`2x`, `(x + 1)(x - 1)`) means multiplication.
pub fn parse_expr(input: &str) -> Result<Expr, AlgebraError> {
    parse_expr_with_max_depth(input, DEFAULT_MAX_DEPTH)
}

/// Like `parse_expr`, failing with `LimitExceeded` once parentheses,
/// signs and operator chains nest deeper than `max_depth`.
pub fn parse_expr_with_max_depth(input: &str, max_depth: usize) -> Result<Expr, AlgebraError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AlgebraError::Parse("empty expression".to_string()));
    }
    check_characters(input)?;
    check_balanced(input)?;
    let normalized = insert_implicit_mul(&input.replace("**", "^"));
    Parser { max_depth }.parse_additive(&normalized, 0)
}

fn check_characters(input: &str) -> Result<(), AlgebraError> {
    match input
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || " \t_.+-*/^()".contains(*c)))
    {
        Some(c) => Err(AlgebraError::Parse(format!("unexpected character '{}' in '{}'", c, input))),
        None => Ok(()),
    }
}

fn check_balanced(input: &str) -> Result<(), AlgebraError> {
    let mut depth = 0i32;
    for c in input.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(AlgebraError::Parse(format!("unbalanced ')' in '{}'", input)));
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(AlgebraError::Parse(format!("unclosed '(' in '{}'", input)));
    }
    Ok(())
}

/// Make juxtaposition explicit: `2x` -> `2*x`, `)(` -> `)*(`, `x(` -> `x*(`.
///
/// Tokens are numbers (with an optional `e` exponent), identifiers, and
/// single characters; whitespace separates tokens and is dropped.
fn insert_implicit_mul(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens: Vec<String> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() || c == '.' {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }
        } else if c.is_ascii_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
        } else {
            i += 1;
        }
        tokens.push(chars[start..i].iter().collect());
    }

    let ends_operand = |t: &str| t.ends_with(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == ')');
    let starts_operand = |t: &str| t.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '(');

    let mut out = String::with_capacity(input.len() * 2);
    for (k, token) in tokens.iter().enumerate() {
        if k > 0 && ends_operand(&tokens[k - 1]) && starts_operand(token) {
            out.push('*');
        }
        out.push_str(token);
    }
    out
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^')
}

/// `+`/`-` at `idx` is binary when something other than an operator or
/// `(` precedes it and it is not the sign of a decimal exponent.
fn is_binary_sign(chars: &[(usize, char)], idx: usize) -> bool {
    let mut before = chars[..idx].iter().rev().map(|(_, c)| *c).filter(|c| !c.is_whitespace());
    match before.next() {
        None => false,
        Some(p) if is_operator(p) || p == '(' => false,
        Some('e' | 'E') => !before.next().is_some_and(|p| p.is_ascii_digit() || p == '.'),
        Some(_) => true,
    }
}

struct Parser {
    max_depth: usize,
}

impl Parser {
    fn enter(&self, depth: usize) -> Result<usize, AlgebraError> {
        if depth >= self.max_depth {
            return Err(AlgebraError::LimitExceeded(format!(
                "expression nests deeper than {}",
                self.max_depth
            )));
        }
        Ok(depth + 1)
    }

    fn parse_additive(&self, input: &str, depth: usize) -> Result<Expr, AlgebraError> {
        let depth = self.enter(depth)?;
        let chars: Vec<(usize, char)> = input.char_indices().collect();
        let mut nesting = 0i32;

        for idx in (0..chars.len()).rev() {
            let (byte_pos, c) = chars[idx];
            match c {
                ')' => nesting += 1,
                '(' => nesting -= 1,
                '+' | '-' if nesting == 0 && is_binary_sign(&chars, idx) => {
                    let left = input[..byte_pos].trim();
                    let right = input[byte_pos + 1..].trim();
                    if right.is_empty() {
                        return Err(AlgebraError::Parse(format!("missing operand after '{}'", c)));
                    }
                    let op = if c == '+' { BinOp::Add } else { BinOp::Sub };
                    return Ok(Expr::BinaryOp(
                        Box::new(self.parse_additive(left, depth)?),
                        op,
                        Box::new(self.parse_multiplicative(right, depth)?),
                    ));
                }
                _ => {}
            }
        }

        self.parse_multiplicative(input, depth)
    }

    fn parse_multiplicative(&self, input: &str, depth: usize) -> Result<Expr, AlgebraError> {
        let depth = self.enter(depth)?;
        let chars: Vec<(usize, char)> = input.char_indices().collect();
        let mut nesting = 0i32;

        for idx in (0..chars.len()).rev() {
            let (byte_pos, c) = chars[idx];
            match c {
                ')' => nesting += 1,
                '(' => nesting -= 1,
                '*' | '/' if nesting == 0 => {
                    let left = input[..byte_pos].trim();
                    let right = input[byte_pos + 1..].trim();
                    if left.is_empty() || right.is_empty() {
                        return Err(AlgebraError::Parse(format!("missing operand around '{}'", c)));
                    }
                    let op = if c == '*' { BinOp::Mul } else { BinOp::Div };
                    return Ok(Expr::BinaryOp(
                        Box::new(self.parse_multiplicative(left, depth)?),
                        op,
                        Box::new(self.parse_unary(right, depth)?),
                    ));
                }
                _ => {}
            }
        }

        self.parse_unary(input, depth)
    }

    fn parse_unary(&self, input: &str, depth: usize) -> Result<Expr, AlgebraError> {
        let depth = self.enter(depth)?;
        let input = input.trim();
        if let Some(rest) = input.strip_prefix('-') {
            return Ok(Expr::Neg(Box::new(self.parse_unary(rest, depth)?)));
        }
        if let Some(rest) = input.strip_prefix('+') {
            return self.parse_unary(rest, depth);
        }
        self.parse_power(input, depth)
    }

    fn parse_power(&self, input: &str, depth: usize) -> Result<Expr, AlgebraError> {
        let depth = self.enter(depth)?;
        let mut nesting = 0i32;

        for (byte_pos, c) in input.char_indices() {
            match c {
                '(' => nesting += 1,
                ')' => nesting -= 1,
                '^' if nesting == 0 => {
                    let left = input[..byte_pos].trim();
                    let right = input[byte_pos + 1..].trim();
                    if left.is_empty() || right.is_empty() {
                        return Err(AlgebraError::Parse("missing operand around '^'".to_string()));
                    }
                    return Ok(Expr::BinaryOp(
                        Box::new(self.parse_primary(left, depth)?),
                        BinOp::Pow,
                        Box::new(self.parse_unary(right, depth)?),
                    ));
                }
                _ => {}
            }
        }

        self.parse_primary(input, depth)
    }

    fn parse_primary(&self, input: &str, depth: usize) -> Result<Expr, AlgebraError> {
        let depth = self.enter(depth)?;
        let input = input.trim();
        if input.is_empty() {
            return Err(AlgebraError::Parse("missing operand".to_string()));
        }

        if let Some(inner) = input.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            return self.parse_additive(inner.trim(), depth);
        }

        let first = input.chars().next().unwrap_or(' ');
        if first.is_ascii_digit() || first == '.' {
            return Ok(Expr::Number(input.to_string()));
        }

        if (first.is_ascii_alphabetic() || first == '_')
            && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Ok(Expr::Variable(input.to_string()));
        }

        Err(AlgebraError::Parse(format!("unexpected '{}'", input)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Box<Expr> {
        Box::new(Expr::Number(s.to_string()))
    }

    fn var(s: &str) -> Box<Expr> {
        Box::new(Expr::Variable(s.to_string()))
    }

    #[test]
    fn test_precedence() {
        let e = parse_expr("1 + 2*x^2").unwrap();
        assert_eq!(
            e,
            Expr::BinaryOp(
                num("1"),
                BinOp::Add,
                Box::new(Expr::BinaryOp(
                    num("2"),
                    BinOp::Mul,
                    Box::new(Expr::BinaryOp(var("x"), BinOp::Pow, num("2"))),
                )),
            )
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        // (x - 1) - 2, not x - (1 - 2)
        let e = parse_expr("x - 1 - 2").unwrap();
        assert_eq!(
            e,
            Expr::BinaryOp(
                Box::new(Expr::BinaryOp(var("x"), BinOp::Sub, num("1"))),
                BinOp::Sub,
                num("2"),
            )
        );
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(parse_expr("-x").unwrap(), Expr::Neg(var("x")));
        assert_eq!(
            parse_expr("2*-x").unwrap(),
            Expr::BinaryOp(num("2"), BinOp::Mul, Box::new(Expr::Neg(var("x"))))
        );
    }

    #[test]
    fn test_double_star_power() {
        assert_eq!(parse_expr("x**2").unwrap(), parse_expr("x^2").unwrap());
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(parse_expr("2x").unwrap(), parse_expr("2*x").unwrap());
        assert_eq!(parse_expr("(x+1)(x-1)").unwrap(), parse_expr("(x+1)*(x-1)").unwrap());
        assert_eq!(parse_expr("3(x + 1)").unwrap(), parse_expr("3*(x + 1)").unwrap());
    }

    #[test]
    fn test_decimal_exponent_is_one_number() {
        assert_eq!(
            parse_expr("2.5e-3*x").unwrap(),
            Expr::BinaryOp(num("2.5e-3"), BinOp::Mul, var("x"))
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_expr(""), Err(AlgebraError::Parse(_))));
        assert!(matches!(parse_expr("x +"), Err(AlgebraError::Parse(_))));
        assert!(matches!(parse_expr("(x + 1"), Err(AlgebraError::Parse(_))));
        assert!(matches!(parse_expr("x $ 2"), Err(AlgebraError::Parse(_))));
        assert!(matches!(parse_expr("*x"), Err(AlgebraError::Parse(_))));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let deep = format!("{}x{}", "(".repeat(2000), ")".repeat(2000));
        assert!(matches!(parse_expr(&deep), Err(AlgebraError::LimitExceeded(_))));

        let long_sum = vec!["x"; 2000].join(" + ");
        assert!(matches!(parse_expr(&long_sum), Err(AlgebraError::LimitExceeded(_))));

        let shallow = format!("{}x{}", "(".repeat(20), ")".repeat(20));
        assert_eq!(parse_expr(&shallow).unwrap(), Expr::Variable("x".to_string()));
    }

    #[test]
    fn test_custom_depth() {
        assert!(parse_expr_with_max_depth("((x))", 16).is_ok());
        assert!(matches!(
            parse_expr_with_max_depth("((((x))))", 8),
            Err(AlgebraError::LimitExceeded(_))
        ));
    }
}
