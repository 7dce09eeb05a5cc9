//! # Character Cursor
//!
//! Peekable character cursor over an immutable dump buffer.
//! Tracks position (byte, line, column) as it advances.
//!
//! ## Example
//!
//! ```rust
//! use dump_decoder::cursor::Cursor;
//!
//! let mut cursor = Cursor::new("(call_expr)");
//! assert_eq!(cursor.peek(), Some('('));
//! cursor.advance();
//! assert!(cursor.starts_with("call_expr"));
//! ```

use crate::position::Position;

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with position tracking.
///
/// Every read operation of the decoder goes through this type; the buffer is
/// never indexed directly, so the cursor is the only place where the read
/// position can change.
///
/// ## Example
///
/// ```rust
/// use dump_decoder::cursor::Cursor;
///
/// let mut cursor = Cursor::new("decl");
/// assert_eq!(cursor.advance(), Some('d'));
/// assert_eq!(cursor.position().byte, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// Source buffer.
    source: &'a str,
    /// Current byte offset.
    byte: usize,
    /// Current line (1-based).
    line: usize,
    /// Current column (1-based).
    column: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            byte: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get current position.
    pub fn position(&self) -> Position {
        Position::new(self.byte, self.line, self.column)
    }

    /// Check if at end of buffer.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    /// Unread part of the buffer.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use dump_decoder::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("ab");
    /// cursor.advance();
    /// assert_eq!(cursor.remaining(), "b");
    /// ```
    pub fn remaining(&self) -> &'a str {
        &self.source[self.byte..]
    }

    /// Check whether the unread buffer starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Peek at current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Peek `n` characters ahead (`peek_nth(0)` is [`Cursor::peek`]).
    ///
    /// ## Example
    ///
    /// ```rust
    /// use dump_decoder::cursor::Cursor;
    ///
    /// let cursor = Cursor::new("abc");
    /// assert_eq!(cursor.peek_nth(2), Some('c'));
    /// assert_eq!(cursor.peek_nth(3), None);
    /// ```
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Advance to next character.
    ///
    /// ## Returns
    ///
    /// Character that was consumed, or None if at end of buffer
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;

        self.byte += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    /// Advance past `bytes` bytes of the unread buffer.
    ///
    /// Stops early at the end of the buffer. `bytes` must fall on a character
    /// boundary, which holds for lengths measured on [`Cursor::remaining`].
    pub fn advance_bytes(&mut self, bytes: usize) {
        let target = (self.byte + bytes).min(self.source.len());
        while self.byte < target {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Advance while predicate is true.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }

    /// Skip spaces and newlines.
    pub fn skip_whitespace(&mut self) {
        self.advance_while(|c| c == ' ' || c == '\n' || c == '\r' || c == '\t');
    }
}

// =============================================================================
// TESTS
// =============================================================================
