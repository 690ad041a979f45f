//! Single line addresses
//!
//! An address is a base position (line number, forward search, last line or
//! the current line) followed by an optional signed offset:
//!
//! - `10`, `$`, `.`, `/pattern/` or `/pattern` (closing slash optional)
//! - offsets `+3`, `- 2`, `5`, or a run of signs where `++` means `+2`
//!
//! Parsing never fails on unrecognized text; it stops and hands the
//! remainder back so the caller can continue with a separator.

use crate::error::{EdError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base position of an address, before the offset is applied
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    /// Absolute one-based line number (e.g., 10)
    LineNumber(usize),

    /// First line at or after the search start matching the regex (e.g., /foo/)
    Pattern(String),

    /// Last line of the document (`$`)
    LastLine,

    /// Wherever the cursor is (`.` or nothing at all)
    #[default]
    Current,
}

/// A position plus a signed line offset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub position: Position,
    pub offset: isize,
}

impl Address {
    pub fn new(position: Position, offset: isize) -> Self {
        Self { position, offset }
    }

    pub fn line(number: usize) -> Self {
        Self::new(Position::LineNumber(number), 0)
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::new(Position::Pattern(pattern.into()), 0)
    }

    pub fn last() -> Self {
        Self::new(Position::LastLine, 0)
    }

    pub fn current() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: isize) -> Self {
        self.offset = offset;
        self
    }

    /// True when the address only moves relative to the cursor
    pub fn is_relative(&self) -> bool {
        matches!(self.position, Position::Current)
    }

    /// Parse one address from the front of `expr`
    ///
    /// Returns the address and the text that was not consumed. The only
    /// failures are a sign run mixing `+` and `-`, and numbers that do not
    /// fit in a machine word.
    pub fn parse(expr: &str) -> Result<(Address, &str)> {
        let (position, rest) = parse_position(expr.trim_start())?;
        let (offset, rest) = parse_offset(expr, rest.trim_start())?;
        let address = Address { position, offset };

        tracing::trace!(expr, ?address, rest, "parsed address");
        Ok((address, rest))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Position::LineNumber(n) => write!(f, "{}", n)?,
            Position::Pattern(p) => write!(f, "/{}/", p)?,
            Position::LastLine => f.write_str("$")?,
            Position::Current => f.write_str(".")?,
        }
        if self.offset != 0 {
            write!(f, "{:+}", self.offset)?;
        }
        Ok(())
    }
}

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

fn parse_position(text: &str) -> Result<(Position, &str)> {
    let digits = leading_digits(text);
    if digits > 0 {
        let number = text[..digits]
            .parse::<usize>()
            .map_err(|_| EdError::InvalidLineNumber(text[..digits].to_string()))?;
        return Ok((Position::LineNumber(number), &text[digits..]));
    }

    // An empty `//` is not a search; it is left for the caller to reject
    if let Some(body) = text.strip_prefix('/') {
        match body.find('/') {
            Some(0) => {}
            Some(end) => {
                return Ok((Position::Pattern(body[..end].to_string()), &body[end + 1..]));
            }
            None if !body.is_empty() => {
                return Ok((Position::Pattern(body.to_string()), ""));
            }
            None => {}
        }
    }

    if let Some(rest) = text.strip_prefix('$') {
        return Ok((Position::LastLine, rest));
    }
    if let Some(rest) = text.strip_prefix('.') {
        return Ok((Position::Current, rest));
    }
    Ok((Position::Current, text))
}

/// Offset after the base: a signed number wins over a run of bare signs
fn parse_offset<'a>(expr: &str, text: &'a str) -> Result<(isize, &'a str)> {
    if let Some(parsed) = parse_numeric_offset(expr, text)? {
        return Ok(parsed);
    }

    let run = text
        .bytes()
        .take_while(|&b| matches!(b, b' ' | b'+' | b'-'))
        .count();
    if run == 0 {
        return Ok((0, text));
    }

    let signs: Vec<u8> = text[..run].bytes().filter(|&b| b != b' ').collect();
    let Some(&first) = signs.first() else {
        return Ok((0, &text[run..]));
    };
    if signs.iter().any(|&b| b != first) {
        return Err(EdError::InvalidDelta(expr.to_string()));
    }

    let count = signs.len() as isize;
    let offset = if first == b'+' { count } else { -count };
    Ok((offset, &text[run..]))
}

fn parse_numeric_offset<'a>(expr: &str, text: &'a str) -> Result<Option<(isize, &'a str)>> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'+') => (false, &text[1..]),
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    };
    let unsigned = unsigned.trim_start();

    let digits = leading_digits(unsigned);
    if digits == 0 {
        return Ok(None);
    }

    let magnitude = unsigned[..digits]
        .parse::<isize>()
        .map_err(|_| EdError::InvalidDelta(expr.to_string()))?;
    let offset = if negative { -magnitude } else { magnitude };
    Ok(Some((offset, &unsigned[digits..])))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(expr: &str) -> Address {
        Address::parse(expr).unwrap().0
    }

    #[test]
    fn test_parse_line_number() {
        assert_eq!(parsed("10"), Address::line(10));
        assert_eq!(parsed("  10"), Address::line(10));
    }

    #[test]
    fn test_parse_pattern() {
        assert_eq!(parsed("/pattern/"), Address::pattern("pattern"));
        assert_eq!(parsed("/pattern"), Address::pattern("pattern"));
        assert_eq!(parsed("/line [456]/"), Address::pattern("line [456]"));
    }

    #[test]
    fn test_parse_pattern_offsets() {
        assert_eq!(parsed("/pattern/+12"), Address::pattern("pattern").with_offset(12));
        assert_eq!(parsed("/pattern/+"), Address::pattern("pattern").with_offset(1));
        assert_eq!(parsed("/pattern/++++"), Address::pattern("pattern").with_offset(4));
        assert_eq!(parsed("/pattern/---"), Address::pattern("pattern").with_offset(-3));
        assert_eq!(parsed("/pattern/3"), Address::pattern("pattern").with_offset(3));
    }

    #[test]
    fn test_numeric_offset_wins_over_sign_run() {
        let (address, rest) = Address::parse("/pattern/+12--").unwrap();
        assert_eq!(address, Address::pattern("pattern").with_offset(12));
        assert_eq!(rest, "--");
    }

    #[test]
    fn test_offset_whitespace_is_ignored() {
        assert_eq!(parsed("$ - 5"), Address::last().with_offset(-5));
        assert_eq!(parsed("5 + + "), Address::line(5).with_offset(2));
    }

    #[test]
    fn test_mixed_signs_fail() {
        let err = Address::parse("/pattern/-+-").unwrap_err();
        assert!(matches!(err, EdError::InvalidDelta(ref e) if e == "/pattern/-+-"));
        assert_eq!(err.to_string(), r#"Invalid address delta: "/pattern/-+-""#);
    }

    #[test]
    fn test_parse_returns_remainder() {
        let (address, rest) = Address::parse("123more here").unwrap();
        assert_eq!(address, Address::line(123));
        assert_eq!(rest, "more here");

        let (address, rest) = Address::parse("$-5,hello").unwrap();
        assert_eq!(address, Address::last().with_offset(-5));
        assert_eq!(rest, ",hello");
    }

    #[test]
    fn test_unmatched_input_is_current_line() {
        let (address, rest) = Address::parse("no good").unwrap();
        assert_eq!(address, Address::current());
        assert_eq!(rest, "no good");

        assert_eq!(parsed(""), Address::current());
        assert_eq!(parsed("+++"), Address::current().with_offset(3));
        assert_eq!(parsed(".+2"), Address::current().with_offset(2));
    }

    #[test]
    fn test_empty_pattern_is_not_a_search() {
        let (address, rest) = Address::parse("//").unwrap();
        assert!(address.is_relative());
        assert_eq!(rest, "//");
    }

    #[test]
    fn test_is_relative() {
        assert!(Address::current().with_offset(-2).is_relative());
        assert!(!Address::line(1).is_relative());
        assert!(!Address::pattern("x").is_relative());
        assert!(!Address::last().is_relative());
    }

    #[test]
    fn test_oversized_line_number() {
        let err = Address::parse("99999999999999999999999999").unwrap_err();
        assert!(matches!(err, EdError::InvalidLineNumber(_)));
    }

    #[test]
    fn test_display_round_trips() {
        for expr in ["10", "/foo/+2", "$-5", ".", ".-3"] {
            let address = parsed(expr);
            assert_eq!(address.to_string(), expr);
            assert_eq!(parsed(&address.to_string()), address);
        }
    }
}
