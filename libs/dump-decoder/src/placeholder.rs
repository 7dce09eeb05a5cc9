//! # Source Path Placeholder
//!
//! Stored dump fixtures replace the absolute path of the translated file with
//! a placeholder token so they stay valid on every machine. The path is put
//! back before decoding and taken out again before a dump is stored.

use config::constants::SOURCE_PATH_PLACEHOLDER;

/// Replace the placeholder token with the real source path.
///
/// ## Example
///
/// ```rust
/// use dump_decoder::substitute_placeholder;
///
/// let dump = "(source_file \"<<SOURCE_PATH>>\")";
/// assert_eq!(
///     substitute_placeholder(dump, "/tmp/main.swift"),
///     "(source_file \"/tmp/main.swift\")"
/// );
/// ```
pub fn substitute_placeholder(dump: &str, source_path: &str) -> String {
    dump.replace(SOURCE_PATH_PLACEHOLDER, source_path)
}

/// Replace every occurrence of the source path with the placeholder token.
pub fn restore_placeholder(dump: &str, source_path: &str) -> String {
    if source_path.is_empty() {
        return dump.to_string();
    }
    dump.replace(source_path, SOURCE_PATH_PLACEHOLDER)
}
