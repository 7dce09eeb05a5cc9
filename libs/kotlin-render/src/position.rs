//! # Output Positions
//!
//! Line/column tracking over emitted text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the generated text (1-based line and column).
///
/// Positions order by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutputPosition {
    pub line: usize,
    pub column: usize,
}

impl OutputPosition {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for OutputPosition {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for OutputPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Advances an [`OutputPosition`] past emitted fragments.
///
/// ## Example
///
/// ```rust
/// use kotlin_render::position::{OutputPosition, PositionTracker};
///
/// let mut tracker = PositionTracker::default();
/// tracker.advance("val x = 1\nval y");
/// assert_eq!(tracker.position(), OutputPosition::new(2, 6));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionTracker {
    position: OutputPosition,
}

impl PositionTracker {
    pub fn position(&self) -> OutputPosition {
        self.position
    }

    /// Move past `fragment`; every `'\n'` starts a new line at column 1.
    pub fn advance(&mut self, fragment: &str) {
        for c in fragment.chars() {
            if c == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
    }
}
