//! Unit string parsing with normalization.
//!
//! Parses unit strings into a [`Unit`], handling the syntactic variations
//! emissions data comes with:
//!
//! - Exponents: `t^2`, `t**2`, `t2`
//! - Multiplication: `kg CH4`, `kg*CH4`, `kg·CH4`
//! - Division: `kg/yr`, `kg yr^-1`, `kg per yr`
//! - Whitespace: `kg CH4/yr` == `kg CH4 / yr`
//!
//! # Grammar
//!
//! ```text
//! unit_expr  = term (('/' | 'per') term)*
//! term       = factor (('*' | '·' | ' ') factor)*
//! factor     = symbol ('^' | '**')? exponent? | '(' unit_expr ')'
//! symbol     = [a-zA-Z0-9_]+
//! exponent   = '-'? [0-9]+
//! ```
//!
//! Symbols with trailing digits are ambiguous (`m2` is a square metre but
//! `CO2` and `CFC400` are gases), so disambiguation consults the registry:
//! a known full symbol wins over a symbol-plus-exponent reading.

use crate::errors::{UnitsError, UnitsResult};
use crate::quantity::Unit;
use crate::registry::UnitRegistry;
use std::collections::BTreeMap;

/// Parses a unit string, resolving symbol ambiguities against `registry`.
pub(crate) fn parse_unit(input: &str, registry: &UnitRegistry) -> UnitsResult<Unit> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UnitsError::EmptyUnit);
    }

    // Special case: "1" or "dimensionless"
    if trimmed == "1" || trimmed.eq_ignore_ascii_case("dimensionless") {
        return Ok(Unit::dimensionless());
    }

    let mut parser = UnitParser::new(trimmed, registry);
    let unit = parser.parse_expression().map_err(|reason| match reason {
        Reason::InvalidExponent(e) => UnitsError::InvalidExponent(e),
        Reason::Other(reason) => UnitsError::ParseFailed {
            input: input.to_string(),
            reason,
        },
    })?;
    parser.skip_whitespace();
    if parser.pos < parser.input.len() {
        return Err(UnitsError::ParseFailed {
            input: input.to_string(),
            reason: format!("unexpected trailing input at position {}", parser.pos),
        });
    }
    Ok(unit)
}

enum Reason {
    InvalidExponent(String),
    Other(String),
}

type ParseResult<T> = Result<T, Reason>;

/// Internal recursive-descent parser.
struct UnitParser<'a> {
    input: &'a str,
    pos: usize,
    registry: &'a UnitRegistry,
}

impl<'a> UnitParser<'a> {
    fn new(input: &'a str, registry: &'a UnitRegistry) -> Self {
        Self {
            input,
            pos: 0,
            registry,
        }
    }

    fn parse_expression(&mut self) -> ParseResult<Unit> {
        self.skip_whitespace();
        let mut result = self.parse_term()?;

        loop {
            self.skip_whitespace();
            if self.peek() == Some('/') || self.check_keyword("per") {
                if self.peek() == Some('/') {
                    self.advance();
                } else {
                    self.skip_keyword("per");
                }
                self.skip_whitespace();
                let divisor = self.parse_term()?;
                result = result.divide(&divisor);
            } else {
                break;
            }
        }

        Ok(result)
    }

    fn parse_term(&mut self) -> ParseResult<Unit> {
        let mut result = self.parse_factor()?;

        loop {
            self.skip_whitespace();
            let next = self.peek();
            if next == Some('*') || next == Some('\u{00B7}') {
                // explicit multiplication, '·' included
                self.advance();
                self.skip_whitespace();
                let factor = self.parse_factor()?;
                result = result.multiply(&factor);
            } else if next.is_some()
                && next != Some('/')
                && !self.check_keyword("per")
                && self.is_unit_start(next.unwrap())
            {
                // implicit multiplication (space-separated)
                let factor = self.parse_factor()?;
                result = result.multiply(&factor);
            } else {
                break;
            }
        }

        Ok(result)
    }

    fn parse_factor(&mut self) -> ParseResult<Unit> {
        self.skip_whitespace();

        if self.peek() == Some('(') {
            self.advance();
            let inner = self.parse_expression()?;
            self.skip_whitespace();
            if self.peek() != Some(')') {
                return Err(Reason::Other("missing closing parenthesis".into()));
            }
            self.advance();
            let exp = self.parse_optional_exponent()?;
            return Ok(inner.pow(exp));
        }

        let symbol = self.parse_symbol()?;
        let exp = self.parse_optional_exponent()?;

        let mut components = BTreeMap::new();
        components.insert(symbol, exp);
        Ok(Unit::from_components(components))
    }

    fn parse_symbol(&mut self) -> ParseResult<String> {
        self.skip_whitespace();
        let start = self.pos;

        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(Reason::Other("expected unit symbol".into()));
        }

        let full_symbol = &self.input[start..self.pos];

        // Disambiguate trailing digits: "t2" is an exponent, "CO2" is a gas.
        // A known full symbol always wins over a symbol-plus-exponent
        // reading.
        if let Some(last_letter_idx) = full_symbol.rfind(|c: char| c.is_ascii_alphabetic()) {
            let base = &full_symbol[..=last_letter_idx];
            let trailing = &full_symbol[last_letter_idx + 1..];

            if !trailing.is_empty() && trailing.chars().all(|c| c.is_ascii_digit()) {
                if self.registry.knows_symbol(full_symbol) {
                    return Ok(full_symbol.to_string());
                }
                // Trailing digits are an exponent: rewind past the base
                self.pos = start + last_letter_idx + 1;
                return Ok(base.to_string());
            }
        }

        Ok(full_symbol.to_string())
    }

    fn parse_optional_exponent(&mut self) -> ParseResult<i32> {
        self.skip_whitespace();

        let has_marker = if self.peek() == Some('^') {
            self.advance();
            true
        } else if self.input[self.pos..].starts_with("**") {
            self.pos += 2;
            true
        } else {
            false
        };

        self.skip_whitespace();

        if let Some(c) = self.peek() {
            if c == '-' || c.is_ascii_digit() {
                return self.parse_exponent();
            }
        }

        if has_marker {
            return Err(Reason::Other("expected exponent after ^".into()));
        }

        Ok(1)
    }

    fn parse_exponent(&mut self) -> ParseResult<i32> {
        let start = self.pos;
        let negative = if self.peek() == Some('-') {
            self.advance();
            true
        } else {
            false
        };

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start || (negative && self.pos == start + 1) {
            return Err(Reason::InvalidExponent(
                self.input[start..self.pos].to_string(),
            ));
        }

        let exp_str = &self.input[start..self.pos];
        exp_str
            .parse()
            .map_err(|_| Reason::InvalidExponent(exp_str.to_string()))
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn is_unit_start(&self, c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '('
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        self.input[self.pos..].to_lowercase().starts_with(keyword)
            && self.input[self.pos + keyword.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_ascii_alphanumeric())
    }

    fn skip_keyword(&mut self, keyword: &str) {
        if self.check_keyword(keyword) {
            self.pos += keyword.len();
        }
    }
}
