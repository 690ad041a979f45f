//! Address resolution against a list of lines
//!
//! Line numbers are one-based and signed while being computed, since an
//! offset can push them below 1. The cursor is threaded explicitly through
//! each call: 0 means "nothing selected yet", otherwise it is the one-based
//! line where the previous range ended.

use crate::address::{Address, Position};
use crate::document::strip_line_ending;
use crate::error::{EdError, Result};
use crate::range::{Range, Separator};
use regex::Regex;

/// Resolve one address to a one-based line number
///
/// The result is not bounds-checked; that is left to [`resolve_range`].
/// Pattern searches start at the line after `cursor` (or line 1 when the
/// cursor is 0) and never wrap.
pub fn resolve_address(address: &Address, lines: &[String], cursor: isize) -> Result<isize> {
    let base = match &address.position {
        Position::LineNumber(n) => isize::try_from(*n).unwrap_or(isize::MAX),
        Position::Pattern(pattern) => search_forward(pattern, lines, cursor)?,
        Position::LastLine => lines.len() as isize,
        Position::Current => {
            if cursor > 0 {
                cursor
            } else {
                1
            }
        }
    };
    Ok(base.saturating_add(address.offset))
}

fn search_forward(pattern: &str, lines: &[String], cursor: isize) -> Result<isize> {
    let re = Regex::new(pattern)?;
    let skip = usize::try_from(cursor).unwrap_or(0);

    lines
        .iter()
        .enumerate()
        .skip(skip)
        .find(|(_, line)| re.is_match(strip_line_ending(line)))
        .map(|(idx, _)| idx as isize + 1)
        .ok_or_else(|| EdError::PatternNotFound(pattern.to_string()))
}

/// Resolve a range to zero-based line indices plus the new cursor
///
/// A relative end after `,` fails with [`EdError::InvalidRange`] citing the
/// range's canonical form (`5,.+2` for `5,++`). [`resolve_all`] replaces it
/// with the expression as written.
pub fn resolve_range(range: &Range, lines: &[String], cursor: isize) -> Result<(Vec<usize>, isize)> {
    let start = resolve_address(&range.start, lines, cursor)?;

    let end = match &range.end {
        None => start,
        Some((Separator::Comma, end)) => {
            // `,` drops the anchor, so a bare offset has nothing to count from
            if end.is_relative() {
                return Err(EdError::InvalidRange(range.to_string()));
            }
            resolve_address(end, lines, 1)?
        }
        Some((Separator::Semicolon, end)) => resolve_address(end, lines, start)?,
    };

    if start > end {
        return Err(EdError::StartAfterEnd { start, end });
    }
    check_bounds(start, lines.len())?;
    check_bounds(end, lines.len())?;

    tracing::trace!(%range, start, end, "resolved range");
    // Both ends are within 1..=len here
    let indices = (start as usize - 1..end as usize).collect();
    Ok((indices, end))
}

fn check_bounds(line: isize, total: usize) -> Result<()> {
    if line < 1 || line as usize > total {
        return Err(EdError::OutOfBounds { line, total });
    }
    Ok(())
}

/// Resolve a sequence of range expressions left to right
///
/// Each expression starts from the cursor the previous one left behind.
/// Indices are concatenated in expression order; overlaps are kept.
pub fn resolve_all<I, S>(exprs: I, lines: &[String]) -> Result<Vec<usize>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut indices = Vec::new();
    let mut cursor = 0;

    for expr in exprs {
        let expr = expr.as_ref();
        let range = Range::parse(expr)?;
        // A relative end after `,` is reported against what the user typed
        let (selected, next) = resolve_range(&range, lines, cursor).map_err(|e| match e {
            EdError::InvalidRange(_) => EdError::InvalidRange(expr.to_string()),
            other => other,
        })?;
        tracing::debug!(expr, cursor, next, count = selected.len(), "selected lines");

        indices.extend(selected);
        cursor = next;
    }

    Ok(indices)
}
