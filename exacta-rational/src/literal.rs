//! Classification of fraction inputs
//!
//! A string is classified once into a `FractionInput`, and everything
//! downstream matches on the variant instead of re-inspecting text.

use dashu_int::IBig;
use exacta_core::{Number, NumberError};
use crate::FractionError;

#[derive(Debug, Clone, PartialEq)]
pub enum FractionInput {
    /// `42`, `-7`
    Integer(IBig),
    /// `0.75`, `1.5e3`
    Decimal(Number),
    /// Numeric ratio such as `6/8` or `1.5/-0.25`
    Ratio { numerator: Number, denominator: Number },
    /// Expression texts for the algebra backend; `**` already rewritten to `^`
    Symbolic { numerator: String, denominator: String },
}

impl FractionInput {
    pub fn classify(text: &str) -> Result<Self, FractionError> {
        let normalized = text.trim().replace("**", "^");
        if normalized.is_empty() {
            return Err(FractionError::Parse(text.to_string()));
        }
        check_balanced(&normalized).ok_or_else(|| FractionError::Parse(text.to_string()))?;

        if has_top_level_sum(&normalized) {
            return Ok(FractionInput::Symbolic {
                numerator: normalized,
                denominator: "1".to_string(),
            });
        }

        let (num_items, den_items) = split_product(&normalized);
        if num_items.iter().chain(den_items.iter()).any(|item| item.is_empty()) {
            return Err(FractionError::Parse(text.to_string()));
        }

        for item in num_items.iter().chain(den_items.iter()) {
            check_number_shaped(item, text)?;
        }

        let numeric_num: Option<Vec<Number>> = num_items.iter().map(|i| parse_numeric(i)).collect();
        let numeric_den: Option<Vec<Number>> = den_items.iter().map(|i| parse_numeric(i)).collect();

        if let (Some(nums), Some(dens)) = (numeric_num, numeric_den) {
            if dens.is_empty() && nums.len() == 1 {
                let item = strip_outer_parens(num_items[0]);
                return Ok(match parse_integer(item) {
                    Some(n) => FractionInput::Integer(n),
                    None => FractionInput::Decimal(nums[0].clone()),
                });
            }
            return Ok(FractionInput::Ratio {
                numerator: product(&nums),
                denominator: product(&dens),
            });
        }

        Ok(FractionInput::Symbolic {
            numerator: join_product(&num_items),
            denominator: if den_items.is_empty() {
                "1".to_string()
            } else {
                join_product(&den_items)
            },
        })
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, FractionInput::Symbolic { .. })
    }
}

/// `Some(())` when parentheses balance
fn check_balanced(s: &str) -> Option<()> {
    let mut depth: usize = 0;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    (depth == 0).then_some(())
}

/// A binary `+` or `-` outside parentheses.
///
/// Signs after an operator, an opening paren, the start of input, or the
/// `e` of a decimal exponent are unary.
fn has_top_level_sum(s: &str) -> bool {
    let mut depth = 0usize;
    let mut prev: Option<char> = None;
    let mut prev2: Option<char> = None;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '+' | '-' if depth == 0 => {
                let unary = match prev {
                    None => true,
                    Some('*' | '/' | '^' | '(' | '+' | '-') => true,
                    Some('e' | 'E') => prev2.is_some_and(|p| p.is_ascii_digit() || p == '.'),
                    Some(_) => false,
                };
                if !unary {
                    return true;
                }
            }
            _ => {}
        }
        if !c.is_whitespace() {
            prev2 = prev;
            prev = Some(c);
        }
    }
    false
}

/// Split a product chain on top-level `*` and `/`
fn split_product(s: &str) -> (Vec<&str>, Vec<&str>) {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut into_denominator = false;

    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '*' | '/' if depth == 0 => {
                let item = s[start..i].trim();
                if into_denominator {
                    denominator.push(item);
                } else {
                    numerator.push(item);
                }
                into_denominator = c == '/';
                start = i + 1;
            }
            _ => {}
        }
    }
    let item = s[start..].trim();
    if into_denominator {
        denominator.push(item);
    } else {
        numerator.push(item);
    }
    (numerator, denominator)
}

/// Remove parentheses wrapping the whole text, repeatedly
fn strip_outer_parens(mut s: &str) -> &str {
    loop {
        s = s.trim();
        let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) else {
            return s;
        };
        // "(a)*(b)" starts and ends with parens but is not wrapped
        let mut depth = 0i32;
        for c in inner.chars() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth < 0 {
                        return s;
                    }
                }
                _ => {}
            }
        }
        s = inner;
    }
}

/// An item spelled only with digits, signs, points and exponent markers
/// must be a valid number; it is never handed on as an expression.
fn check_number_shaped(item: &str, text: &str) -> Result<(), FractionError> {
    let inner = strip_outer_parens(item);
    let shaped = inner.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
        && inner.chars().any(|c| c.is_ascii_digit())
        && inner.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if !shaped {
        return Ok(());
    }
    match Number::from_str(inner) {
        Ok(_) => Ok(()),
        Err(NumberError::ParseError(_)) => Err(FractionError::Parse(text.to_string())),
        Err(e) => Err(FractionError::Number(e)),
    }
}

fn parse_numeric(item: &str) -> Option<Number> {
    let inner = strip_outer_parens(item);
    if inner.contains('/') {
        return None;
    }
    Number::from_str(inner).ok()
}

fn parse_integer(item: &str) -> Option<IBig> {
    let digits = item.strip_prefix(['+', '-']).unwrap_or(item);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    item.strip_prefix('+').unwrap_or(item).parse().ok()
}

fn product(items: &[Number]) -> Number {
    items.iter().fold(Number::from_i64(1), |acc, n| acc.mul(n))
}

fn join_product(items: &[&str]) -> String {
    if items.len() == 1 {
        return items[0].to_string();
    }
    items
        .iter()
        .map(|item| format!("({})", item))
        .collect::<Vec<_>>()
        .join("*")
}
