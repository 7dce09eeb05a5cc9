//! # Node Name Expansion
//!
//! The compiler abbreviates node kinds (`pattern_binding_decl`,
//! `declref_expr`). Names are expanded word by word into the spelled-out
//! form the translator dispatches on (`Pattern Binding Declaration`,
//! `Declaration Reference Expression`).

/// Abbreviations expanded during decoding, matched against lowercase words.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("decl", "Declaration"),
    ("declref", "Declaration Reference"),
    ("expr", "Expression"),
    ("stmt", "Statement"),
    ("var", "Variable"),
    ("func", "Function"),
    ("ref", "Reference"),
    ("paren", "Parentheses"),
];

/// Expand an abbreviated node name.
///
/// Words are split on `_`; known abbreviations are replaced and every other
/// word gets its first letter capitalized. Expanding an already expanded
/// name (words joined by `_` or spaces) returns it unchanged.
///
/// ## Example
///
/// ```rust
/// use dump_decoder::names::expand_node_name;
///
/// assert_eq!(expand_node_name("declref_expr"), "Declaration Reference Expression");
/// assert_eq!(expand_node_name("brace_stmt"), "Brace Statement");
/// ```
pub fn expand_node_name(name: &str) -> String {
    name.split(|c| c == '_' || c == ' ')
        .filter(|word| !word.is_empty())
        .map(expand_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn expand_word(word: &str) -> String {
    ABBREVIATIONS
        .iter()
        .find(|(abbreviation, _)| *abbreviation == word)
        .map(|(_, expansion)| expansion.to_string())
        .unwrap_or_else(|| capitalize(word))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
