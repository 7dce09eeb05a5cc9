//! # Dump Decoder
//!
//! Decodes the textual AST dump printed by the host compiler into a generic
//! [`RawNode`] tree.
//!
//! ## Architecture
//!
//! ```text
//! Dump Text → Cursor → Decoder → RawNode
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dump_decoder::decode;
//!
//! let node = decode("(source_file (top_level_code_decl (brace_stmt)))").unwrap();
//! assert_eq!(node.name, "Source File");
//! assert_eq!(node.subtrees[0].name, "Top Level Code Declaration");
//! ```
//!
//! ## Pipeline Integration
//!
//! ```text
//! dump-decoder → intermediate-ast → template-engine → kotlin-render
//! ```

pub mod cursor;
pub mod decoder;
pub mod error;
pub mod names;
pub mod placeholder;
pub mod position;
pub mod raw_node;

pub use error::{DecodeError, DecodeErrorKind};
pub use placeholder::{restore_placeholder, substitute_placeholder};
pub use position::Position;
pub use raw_node::RawNode;

use tracing::debug;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Decode one top-level node from a dump.
///
/// ## Parameters
///
/// - `dump`: Dump text holding one balanced top-level form
///
/// ## Returns
///
/// The decoded tree, or the first syntax error with the unread input.
///
/// ## Example
///
/// ```rust
/// use dump_decoder::decode;
///
/// let node = decode("(declref_expr type='Int' decl=main.(file).x@/a.swift:1:5)").unwrap();
/// assert_eq!(node.name, "Declaration Reference Expression");
/// assert_eq!(node.attribute("decl"), Some("main.(file).x@/a.swift:1:5"));
/// ```
pub fn decode(dump: &str) -> Result<RawNode, DecodeError> {
    let result = decoder::Decoder::new(dump).decode();
    match &result {
        Ok(node) => debug!(name = %node.name, children = node.subtrees.len(), "decoded dump"),
        Err(error) => debug!(%error, "failed to decode dump"),
    }
    result
}
