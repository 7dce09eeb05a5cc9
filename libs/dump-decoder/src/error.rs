//! # Decode Errors
//!
//! Error types for the dump decoder. Every error carries the cursor position
//! and a truncated copy of the unread buffer so that malformed dumps can be
//! diagnosed without the original file at hand.
//!
//! ## Example
//!
//! ```rust
//! use dump_decoder::decode;
//!
//! let error = decode("call_expr)").unwrap_err();
//! assert!(error.to_string().contains("expected '('"));
//! ```

use crate::position::Position;
use config::constants::DECODE_ERROR_CONTEXT_CHARS;
use thiserror::Error;

// =============================================================================
// DECODE ERROR
// =============================================================================

/// A decode failure with location information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {position}; remaining input: {remaining}")]
pub struct DecodeError {
    /// Error kind with details.
    pub kind: DecodeErrorKind,
    /// Cursor position when decoding failed.
    pub position: Position,
    /// Unread buffer, truncated to `DECODE_ERROR_CONTEXT_CHARS` characters.
    pub remaining: String,
}

impl DecodeError {
    /// Create an error, truncating the remaining buffer.
    pub fn new(kind: DecodeErrorKind, position: Position, remaining: &str) -> Self {
        let mut truncated: String = remaining.chars().take(DECODE_ERROR_CONTEXT_CHARS).collect();
        if truncated.len() < remaining.len() {
            truncated.push('…');
        }
        Self {
            kind,
            position,
            remaining: truncated,
        }
    }
}

// =============================================================================
// DECODE ERROR KIND
// =============================================================================

/// Kinds of decode errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeErrorKind {
    /// A specific token was required but another character was found.
    #[error("expected {expected}, found '{found}'")]
    UnexpectedCharacter {
        /// Description of the required token.
        expected: String,
        /// Character that was found instead.
        found: char,
    },

    /// The buffer ended while a token was still open.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        /// Description of the required token.
        expected: String,
    },

    /// No reader could consume the character under the cursor.
    #[error("no attribute can start with '{found}'")]
    Stalled {
        /// Character under the cursor.
        found: char,
    },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_is_truncated() {
        let remaining = "x".repeat(DECODE_ERROR_CONTEXT_CHARS + 10);
        let error = DecodeError::new(
            DecodeErrorKind::UnexpectedEnd {
                expected: "')'".to_string(),
            },
            Position::start(),
            &remaining,
        );
        assert_eq!(error.remaining.chars().count(), DECODE_ERROR_CONTEXT_CHARS + 1);
        assert!(error.remaining.ends_with('…'));
    }

    #[test]
    fn test_display_contains_position_and_context() {
        let error = DecodeError::new(
            DecodeErrorKind::UnexpectedCharacter {
                expected: "'('".to_string(),
                found: 'x',
            },
            Position::new(4, 2, 3),
            "xyz",
        );
        let message = error.to_string();
        assert!(message.contains("expected '(', found 'x'"));
        assert!(message.contains("2:3"));
        assert!(message.contains("xyz"));
    }
}
