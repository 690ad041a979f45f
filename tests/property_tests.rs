//! Property-based tests for edtext
//!
//! These use proptest to check invariants of selection over randomly
//! generated documents and range expressions.

use edtext::{Address, Document, EdError, Range};

use proptest::prelude::*;

fn numbered_lines(count: usize) -> Document {
    (1..=count).map(|i| format!("line {}\n", i)).collect()
}

// ============================================================================
// Property 1: Round-trip
// ============================================================================

proptest! {
    /// Lines always concatenate back to the text they came from
    #[test]
    fn prop_lines_round_trip(text in "[a-z \\n\\r]{0,200}") {
        let doc = Document::from_text(text.clone());
        prop_assert_eq!(doc.text(), text.as_str());
        let rebuilt = Document::from_lines(doc.lines().to_vec());
        prop_assert_eq!(rebuilt.text(), doc.text());
    }

    /// A range prints in a form that parses back to the same range
    #[test]
    fn prop_range_display_round_trip(
        start in 1usize..1000,
        end in 1usize..1000,
        offset in -50isize..50,
        semicolon in any::<bool>(),
    ) {
        let sep = if semicolon { ';' } else { ',' };
        let expr = format!("{}{:+};/x/", start, offset).replace(';', &sep.to_string());
        let range = Range::parse(&expr).unwrap();
        prop_assert_eq!(Range::parse(&range.to_string()).unwrap(), range);

        let single = Range::parse(&end.to_string()).unwrap();
        prop_assert_eq!(single.start, Address::line(end));
    }
}

// ============================================================================
// Property 2: Span length or failure, never truncation
// ============================================================================

proptest! {
    /// `a,b` on an n-line document selects exactly b-a+1 lines or fails
    #[test]
    fn prop_span_length_or_error(count in 0usize..40, a in 0usize..50, b in 0usize..50) {
        let doc = numbered_lines(count);
        let expr = format!("{},{}", a, b);

        match doc.range(&expr) {
            Ok(selected) => {
                prop_assert!(a >= 1 && a <= b && b <= count);
                prop_assert_eq!(selected.len(), b - a + 1);
                prop_assert_eq!(selected.lines()[0].clone(), format!("line {}\n", a));
            }
            Err(EdError::StartAfterEnd { start, end }) => {
                prop_assert!(a > b);
                prop_assert_eq!((start, end), (a as isize, b as isize));
            }
            Err(EdError::OutOfBounds { line, total }) => {
                prop_assert_eq!(total, count);
                prop_assert!(line < 1 || line as usize > count);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// `$-k,$` always selects the last k+1 lines when they exist
    #[test]
    fn prop_tail_selection(count in 1usize..40, k in 0usize..40) {
        let doc = numbered_lines(count);
        let result = doc.range(&format!("$-{},$", k));
        if k < count {
            let selected = result.unwrap();
            prop_assert_eq!(selected.len(), k + 1);
            prop_assert_eq!(selected.lines().last().cloned(), Some(format!("line {}\n", count)));
        } else {
            let is_out_of_bounds = matches!(result, Err(EdError::OutOfBounds { .. }));
            prop_assert!(is_out_of_bounds);
        }
    }
}

// ============================================================================
// Property 3: Purity and cursor threading
// ============================================================================

proptest! {
    /// Selecting twice with the same expressions gives the same document
    #[test]
    fn prop_select_is_pure(count in 1usize..30, a in 1usize..30, extra in 0usize..5) {
        let doc = numbered_lines(count);
        let exprs = [format!("{};+{}", a, extra), ".".to_string()];
        let first = doc.select(&exprs);
        let second = doc.select(&exprs);
        match (first, second) {
            (Ok(x), Ok(y)) => prop_assert_eq!(x, y),
            (Err(x), Err(y)) => prop_assert_eq!(x.to_string(), y.to_string()),
            _ => prop_assert!(false, "select gave different outcomes"),
        }
        prop_assert_eq!(doc.len(), count);
    }

    /// A bare `.` repeats the line where the previous range ended
    #[test]
    fn prop_cursor_follows_previous_end(a in 1usize..20, extra in 0usize..10, spare in 0usize..5) {
        let doc = numbered_lines(a + extra + spare);

        let indices = doc.line_numbers([format!("{};+{}", a, extra), ".".to_string()]).unwrap();
        prop_assert_eq!(indices.len(), extra + 2);
        prop_assert_eq!(indices[indices.len() - 1], a + extra - 1);
        prop_assert_eq!(indices[indices.len() - 2], a + extra - 1);
    }

    /// Pattern searches in a later expression start after the previous end
    #[test]
    fn prop_search_starts_after_cursor(a in 1usize..30, spare in 1usize..5) {
        let doc = numbered_lines(a + spare);

        let selected = doc.select([a.to_string(), "/line/".to_string()]).unwrap();
        prop_assert_eq!(selected.lines()[1].clone(), format!("line {}\n", a + 1));
    }
}

// ============================================================================
// Property 4: Substitution
// ============================================================================

proptest! {
    /// Substitution never changes the number of lines
    #[test]
    fn prop_substitute_keeps_line_count(lines in prop::collection::vec("[a-c]{0,10}", 0..20)) {
        let doc = Document::from_lines(lines.iter().map(|l| format!("{}\n", l)));
        let replaced = doc.substitute_all("a", "xy").unwrap();
        prop_assert_eq!(replaced.len(), doc.len());
        prop_assert!(!replaced.text().contains('a'));
    }

    /// First-match substitution removes at most one match per line
    #[test]
    fn prop_substitute_first_match_only(count in 0usize..10) {
        let doc = Document::from_text(format!("{}\n", "a".repeat(count)));
        let replaced = doc.substitute("a", "b").unwrap();
        prop_assert_eq!(replaced.text().matches('a').count(), count.saturating_sub(1));
    }
}
