//! Errors raised while recording templates.

use thiserror::Error;

/// A malformed templates declaration.
///
/// Failing to match an expression is not an error; the expression is simply
/// left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The body ended after a pattern, without its replacement string.
    #[error("template {index} has a pattern but no replacement string")]
    MissingReplacement { index: usize },

    /// The statement after a pattern is not a string literal or a
    /// concatenation of string literals.
    #[error("replacement of template {index} is a {found}, expected a string literal")]
    ReplacementNotString { index: usize, found: &'static str },

    /// The body holds a statement that is neither an expression nor a
    /// wildcard declaration.
    #[error("templates body holds a {found} at position {position}, expected an expression")]
    NotAnExpression { position: usize, found: &'static str },
}
