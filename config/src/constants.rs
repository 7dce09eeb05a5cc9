//! # Configuration Constants
//!
//! Centralized constants for the translation pipeline. Grammar tokens of the
//! compiler dump, template-library conventions, rendering defaults and
//! recursion limits are defined here.
//!
//! ## Categories
//!
//! - **Recursion**: Stack growth parameters for deeply nested trees
//! - **Decoding**: Dump grammar tokens and diagnostic limits
//! - **Templates**: Marker names understood by the template engine
//! - **Rendering**: Kotlin output defaults and error-map format

// =============================================================================
// RECURSION CONSTANTS
// =============================================================================

/// Bytes of stack space reserved when growing the stack with `stacker`.
///
/// Decoding and translating deeply nested dumps recurses once per tree level,
/// so every recursive entry point runs under `stacker::maybe_grow`.
///
/// # Example
///
/// ```rust
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024 * 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack (in bytes) below which `stacker` allocates a new segment.
///
/// # Example
///
/// ```rust
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 256 * 1024;

// =============================================================================
// DECODING CONSTANTS
// =============================================================================

/// Number of characters of the remaining buffer kept in a decode error.
///
/// # Example
///
/// ```rust
/// use config::constants::DECODE_ERROR_CONTEXT_CHARS;
///
/// let remaining = "x".repeat(5000);
/// let kept: String = remaining.chars().take(DECODE_ERROR_CONTEXT_CHARS).collect();
/// assert_eq!(kept.len(), DECODE_ERROR_CONTEXT_CHARS);
/// ```
pub const DECODE_ERROR_CONTEXT_CHARS: usize = 1000;

/// Token standing in for the absolute source directory inside stored dumps.
///
/// Dumps written to fixtures carry this token instead of machine-specific
/// paths; it is replaced with the real path before decoding.
pub const SOURCE_PATH_PLACEHOLDER: &str = "<<SOURCE_PATH>>";

/// Composed key that contains a space and must be recognized as a whole.
pub const INTERFACE_TYPE_KEY: &str = "interface type";

/// Continuation that lets a declaration span a space, as in
/// `Swift.(file).Int extension.+`.
pub const EXTENSION_CONTINUATION: &str = " extension.";

// =============================================================================
// TEMPLATE CONSTANTS
// =============================================================================

/// Name of the zero-argument function whose body declares templates.
///
/// # Example
///
/// ```rust
/// use config::constants::TEMPLATES_FUNCTION_NAME;
/// assert!(!TEMPLATES_FUNCTION_NAME.contains('('));
/// ```
pub const TEMPLATES_FUNCTION_NAME: &str = "transpilationTemplates";

/// Prefix marking a declaration reference in a pattern as a capture.
pub const TEMPLATE_WILDCARD_PREFIX: char = '_';

/// Type names that every type is a subtype of during template matching.
///
/// Template libraries declare their wildcard captures with these types.
///
/// # Example
///
/// ```rust
/// use config::constants::WILDCARD_TYPE_NAMES;
/// assert!(WILDCARD_TYPE_NAMES.contains(&"Any"));
/// ```
pub const WILDCARD_TYPE_NAMES: [&str; 5] = ["Any", "AnyType", "Hash", "Compare", "MyOptional"];

/// Wildcard type name that only matches optional types.
pub const OPTIONAL_WILDCARD_TYPE_NAME: &str = "MyOptional?";

// =============================================================================
// RENDERING CONSTANTS
// =============================================================================

/// Default indentation unit for generated Kotlin code.
pub const DEFAULT_INDENTATION: &str = "    ";

/// Default maximum line width used when pretty-printing trees.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_HORIZONTAL_LIMIT;
/// assert!(DEFAULT_HORIZONTAL_LIMIT > 40);
/// ```
pub const DEFAULT_HORIZONTAL_LIMIT: usize = 100;

/// Separator between the integers of an error-map line.
pub const ERROR_MAP_SEPARATOR: char = ':';

/// Text emitted in place of a declaration or expression that failed to translate.
pub const ERROR_PLACEHOLDER: &str = "<<Error>>";

/// Signature of the function that wraps top-level statements.
pub const KOTLIN_MAIN_SIGNATURE: &str = "fun main(args: Array<String>)";
