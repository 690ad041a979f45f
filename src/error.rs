//! Error taxonomy for address parsing and resolution
//!
//! Every failure aborts the whole `select`/`substitute` call. Regex syntax
//! errors are not domain errors and pass through unchanged.

use thiserror::Error;

/// Errors produced while parsing or resolving line addresses
#[derive(Debug, Error)]
pub enum EdError {
    /// A run of signs mixing `+` and `-` (e.g. `/x/-+-`)
    #[error("Invalid address delta: {0:?}")]
    InvalidDelta(String),

    /// A run of digits too large to be a line number
    #[error("Invalid line number: {0:?}")]
    InvalidLineNumber(String),

    /// Bad separator, or a relative end address after `,`
    #[error("Invalid range: {0:?}")]
    InvalidRange(String),

    /// Text left over after the end address
    #[error("Invalid range tail: {0:?}")]
    InvalidRangeTail(String),

    #[error("Pattern not found: /{0}/")]
    PatternNotFound(String),

    #[error("Invalid range: start {start} > end {end}")]
    StartAfterEnd { start: isize, end: isize },

    #[error("Line {line} is out of range 1-{total}")]
    OutOfBounds { line: isize, total: usize },

    /// Malformed pattern or replacement, straight from the regex engine
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, EdError>;
