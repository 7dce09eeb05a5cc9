//! # Source Range
//!
//! Position of a construct in the original source file, parsed from the
//! dump's `range=[path:line:column - line:line:column]` attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A range in the original source (1-based lines and columns).
///
/// Ranges are metadata: every two ranges compare equal, so nodes that differ
/// only by position are equal. Use [`SourceRange::same_position`] to compare
/// the positions themselves.
///
/// ## Example
///
/// ```rust
/// use intermediate_ast::SourceRange;
///
/// let range = SourceRange::parse("[/tmp/main.swift:1:5 - line:2:9]").unwrap();
/// assert_eq!((range.line_start, range.column_start), (1, 5));
/// assert_eq!((range.line_end, range.column_end), (2, 9));
/// assert_eq!(range, SourceRange::new(7, 7, 7, 7));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SourceRange {
    pub line_start: usize,
    pub column_start: usize,
    pub line_end: usize,
    pub column_end: usize,
}

impl SourceRange {
    pub const fn new(line_start: usize, column_start: usize, line_end: usize, column_end: usize) -> Self {
        Self {
            line_start,
            column_start,
            line_end,
            column_end,
        }
    }

    /// Parse a dump range attribute. Returns `None` for malformed text.
    pub fn parse(text: &str) -> Option<Self> {
        let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
        let (start, end) = inner.split_once(" - ")?;
        let (line_start, column_start) = trailing_line_column(start)?;
        let (line_end, column_end) = trailing_line_column(end)?;
        Some(Self::new(line_start, column_start, line_end, column_end))
    }

    /// Compare the positions, unlike `==`.
    pub fn same_position(&self, other: &SourceRange) -> bool {
        self.line_start == other.line_start
            && self.column_start == other.column_start
            && self.line_end == other.line_end
            && self.column_end == other.column_end
    }
}

/// Read `...:<line>:<column>` from the end of a location.
fn trailing_line_column(location: &str) -> Option<(usize, usize)> {
    let (rest, column) = location.rsplit_once(':')?;
    let (_, line) = rest.rsplit_once(':')?;
    Some((line.parse().ok()?, column.parse().ok()?))
}

impl PartialEq for SourceRange {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} - {}:{}",
            self.line_start, self.column_start, self.line_end, self.column_end
        )
    }
}
