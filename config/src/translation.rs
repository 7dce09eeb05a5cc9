//! # Translation Settings
//!
//! Run-wide settings shared by every stage of the pipeline.

use crate::constants::{DEFAULT_HORIZONTAL_LIMIT, DEFAULT_INDENTATION};

// =============================================================================
// DUMP DIALECT
// =============================================================================

/// Compiler version family that produced a dump.
///
/// The two families agree on most node shapes but differ in how negative
/// numeric literals, interpolated strings and array literals are dumped.
///
/// ## Example
///
/// ```rust
/// use config::DumpDialect;
/// assert_eq!(DumpDialect::default(), DumpDialect::Modern);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DumpDialect {
    /// Negative literals arrive wrapped in an explicit prefix-unary node,
    /// interpolated strings list their segments as direct children.
    Legacy,
    /// Negative literals carry a `negative` flag, interpolated strings wrap
    /// their segments in a synthetic closure, array literals may end with a
    /// semantic node.
    #[default]
    Modern,
}

// =============================================================================
// TRANSLATION CONFIG
// =============================================================================

/// Settings for one translation run.
///
/// ## Example
///
/// ```rust
/// use config::{DumpDialect, TranslationConfig};
///
/// let config = TranslationConfig::default()
///     .with_stop_at_first_error(true)
///     .with_dialect(DumpDialect::Legacy);
/// assert!(config.stop_at_first_error);
/// assert_eq!(config.indentation, "    ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationConfig {
    /// Abort the whole run on the first decode or structural error.
    pub stop_at_first_error: bool,
    /// Dump family the translator should expect.
    pub dialect: DumpDialect,
    /// Indentation unit of the generated code.
    pub indentation: String,
    /// Line width limit for pretty-printed trees in diagnostics.
    pub horizontal_limit: Option<usize>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            stop_at_first_error: false,
            dialect: DumpDialect::default(),
            indentation: DEFAULT_INDENTATION.to_string(),
            horizontal_limit: Some(DEFAULT_HORIZONTAL_LIMIT),
        }
    }
}

impl TranslationConfig {
    /// Set the error policy.
    pub fn with_stop_at_first_error(mut self, stop: bool) -> Self {
        self.stop_at_first_error = stop;
        self
    }

    /// Set the dump dialect.
    pub fn with_dialect(mut self, dialect: DumpDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the indentation unit.
    pub fn with_indentation(mut self, indentation: impl Into<String>) -> Self {
        self.indentation = indentation.into();
        self
    }

    /// Set (or clear) the pretty-print width limit.
    pub fn with_horizontal_limit(mut self, limit: Option<usize>) -> Self {
        self.horizontal_limit = limit;
        self
    }
}
