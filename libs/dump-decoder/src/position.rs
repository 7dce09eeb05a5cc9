//! # Buffer Position
//!
//! Location of the decoder's cursor inside a dump buffer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the dump buffer.
///
/// `line` and `column` are 1-based; `byte` is the 0-based offset.
///
/// ## Example
///
/// ```rust
/// use dump_decoder::Position;
///
/// let start = Position::start();
/// assert_eq!((start.byte, start.line, start.column), (0, 1, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the buffer.
    pub byte: usize,
    /// Line number (1-based).
    pub line: usize,
    /// Column number in characters (1-based).
    pub column: usize,
}

impl Position {
    /// Create a position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }

    /// Position of the first character of a buffer.
    pub const fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
