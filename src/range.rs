//! Range expressions: one address, or two joined by `,` or `;`

use crate::address::Address;
use crate::error::{EdError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the end address of a two-address range is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Separator {
    /// `,` - the end address is resolved from line 1
    Comma,
    /// `;` - the end address is resolved from the start address's line
    Semicolon,
}

impl Separator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Separator::Comma),
            ';' => Some(Separator::Semicolon),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Separator::Comma => ',',
            Separator::Semicolon => ';',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Address,
    pub end: Option<(Separator, Address)>,
}

impl Range {
    pub fn single(start: Address) -> Self {
        Self { start, end: None }
    }

    pub fn span(start: Address, separator: Separator, end: Address) -> Self {
        Self {
            start,
            end: Some((separator, end)),
        }
    }

    /// True unless the range is `start;end`
    pub fn from_beginning(&self) -> bool {
        !matches!(self.end, Some((Separator::Semicolon, _)))
    }

    /// Parse a complete range expression; leftover text is an error
    pub fn parse(expr: &str) -> Result<Range> {
        let (start, rest) = Address::parse(expr)?;

        let mut chars = rest.chars();
        let Some(first) = chars.next() else {
            return Ok(Range::single(start));
        };
        let separator =
            Separator::from_char(first).ok_or_else(|| EdError::InvalidRange(expr.to_string()))?;

        let (end, tail) = Address::parse(chars.as_str())?;
        if !tail.is_empty() {
            return Err(EdError::InvalidRangeTail(tail.to_string()));
        }

        let range = Range::span(start, separator, end);
        tracing::debug!(expr, %range, "parsed range");
        Ok(range)
    }
}

impl FromStr for Range {
    type Err = EdError;

    fn from_str(s: &str) -> Result<Self> {
        Range::parse(s)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        if let Some((separator, end)) = &self.end {
            write!(f, "{}{}", separator.as_char(), end)?;
        }
        Ok(())
    }
}
