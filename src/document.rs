//! Immutable text with ed-style line selection
//!
//! A `Document` keeps both the full text and its lines (each with its line
//! ending still attached), so concatenating the lines always gives back the
//! text. Every operation returns a new document.

use crate::error::Result;
use crate::replacement::expand_references;
use crate::resolver::resolve_all;
use regex::Regex;
use std::fmt;

const PREVIEW_CHARS: usize = 50;

#[derive(Clone, Default)]
pub struct Document {
    text: String,
    lines: Vec<String>,
}

/// Split off a trailing `\n` or `\r\n`
pub(crate) fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

pub(crate) fn strip_line_ending(line: &str) -> &str {
    split_line_ending(line).0
}

impl Document {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text.split_inclusive('\n').map(str::to_string).collect();
        Self { text, lines }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let text = lines.concat();
        Self { text, lines }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Zero-based indices selected by the range expressions, in order
    pub fn line_numbers<I, S>(&self, exprs: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        resolve_all(exprs, &self.lines)
    }

    /// New document holding the lines selected by each expression in turn
    ///
    /// ```
    /// use edtext::Document;
    ///
    /// let doc = Document::from_text("a\nb\nc\nd\n");
    /// assert_eq!(doc.select(["2,3", "1"]).unwrap(), "b\nc\na\n");
    /// assert_eq!(doc.select(["/c/;+"]).unwrap(), "c\nd\n");
    /// ```
    pub fn select<I, S>(&self, exprs: I) -> Result<Document>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let indices = self.line_numbers(exprs)?;
        Ok(Document::from_lines(
            indices.into_iter().map(|i| self.lines[i].as_str()),
        ))
    }

    /// Shorthand for selecting a single range expression
    pub fn range(&self, expr: &str) -> Result<Document> {
        self.select([expr])
    }

    /// Replace the first match of `pattern` on every line
    ///
    /// `replacement` may refer to groups as `\1` or `\g<name>`. Line endings
    /// are not part of what the pattern sees.
    pub fn substitute(&self, pattern: &str, replacement: &str) -> Result<Document> {
        self.substitute_n(pattern, replacement, 1)
    }

    /// Replace every match of `pattern` on every line
    pub fn substitute_all(&self, pattern: &str, replacement: &str) -> Result<Document> {
        self.substitute_n(pattern, replacement, 0)
    }

    fn substitute_n(&self, pattern: &str, replacement: &str, limit: usize) -> Result<Document> {
        let re = Regex::new(pattern)?;
        let replacement = expand_references(&re, replacement)?;
        tracing::debug!(pattern, %replacement, limit, "substituting");

        Ok(Document::from_lines(self.lines.iter().map(|line| {
            let (content, ending) = split_line_ending(line);
            let mut replaced = re.replacen(content, limit, replacement.as_str()).into_owned();
            replaced.push_str(ending);
            replaced
        })))
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::from_text(text)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::from_text(text)
    }
}

impl FromIterator<String> for Document {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Document::from_lines(iter)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Document {}

impl PartialEq<str> for Document {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Document {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl PartialEq<String> for Document {
    fn eq(&self, other: &String) -> bool {
        &self.text == other
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut preview: String = self.text.chars().take(PREVIEW_CHARS).collect();
        if self.text.chars().nth(PREVIEW_CHARS).is_some() {
            preview.push_str("...");
        }
        f.debug_struct("Document")
            .field("text", &preview)
            .field("lines", &self.lines.len())
            .finish()
    }
}
