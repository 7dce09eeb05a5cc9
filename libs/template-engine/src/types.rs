//! # Type Compatibility
//!
//! The loose subtype relation used when matching templates. Types are the
//! compiler's printed type strings; nothing here is a real type checker.
//! Templates rely on its permissiveness (every function type matches every
//! other), so it must not be tightened.

use config::constants::{OPTIONAL_WILDCARD_TYPE_NAME, WILDCARD_TYPE_NAMES};
use intermediate_ast::translator::dump_text::{parse_tuple_components, split_top_level, strip_wrapping_parentheses};

/// Library types that stand for another type during matching.
const TYPE_ALIASES: &[(&str, &str)] = &[
    ("Substring", "String"),
    ("String.SubSequence", "String"),
    ("Substring.SubSequence", "String"),
    ("Substring.Index", "String.Index"),
    ("Array<Element>.Index", "Int"),
    ("Array<Element>.ArrayLiteralElement", "Element"),
    ("Float64", "Double"),
    ("Float32", "Float"),
];

/// Generic wrappers that behave like a plain array.
const ARRAY_LIKE: &[&str] = &["Array", "ArraySlice", "MutableList", "List"];

/// Generic wrappers that behave like a plain dictionary.
const DICTIONARY_LIKE: &[&str] = &["Dictionary", "MutableMap", "Map"];

/// Ownership qualifiers that do not change the matched type.
const QUALIFIERS: &[&str] = &["inout ", "__owned ", "__shared ", "@escaping "];

/// Whether `type_name` can stand where `super_type` is expected.
///
/// ## Example
///
/// ```rust
/// use template_engine::is_subtype;
///
/// assert!(is_subtype("Int", "Int"));
/// assert!(is_subtype("[Int]", "[Any]"));
/// assert!(is_subtype("Int?", "MyOptional?"));
/// assert!(!is_subtype("Int?", "Int"));
/// assert!(!is_subtype("Int", "Int?"));
/// ```
pub fn is_subtype(type_name: &str, super_type: &str) -> bool {
    let type_name = type_name.trim();
    let super_type = super_type.trim();

    if type_name == super_type || WILDCARD_TYPE_NAMES.contains(&super_type) {
        return true;
    }
    if super_type == OPTIONAL_WILDCARD_TYPE_NAME && type_name.ends_with('?') {
        return true;
    }

    if is_tuple(type_name) && is_tuple(super_type) {
        let components = parse_tuple_components(type_name);
        let super_components = parse_tuple_components(super_type);
        if components.len() == super_components.len() && components.len() != 1 {
            return components
                .iter()
                .zip(&super_components)
                .all(|(component, super_component)| is_subtype(&component.type_name, &super_component.type_name));
        }
    }

    let simple_type = simplify_type(type_name);
    let simple_super_type = simplify_type(super_type);
    if simple_type != type_name || simple_super_type != super_type {
        return is_subtype(&simple_type, &simple_super_type);
    }

    if let (Some(wrapped), Some(super_wrapped)) = (type_name.strip_suffix('?'), super_type.strip_suffix('?')) {
        return is_subtype(wrapped, super_wrapped);
    }

    if is_function(type_name) && is_function(super_type) {
        return true;
    }

    if let (Some(inner), Some(super_inner)) = (bracketed(type_name), bracketed(super_type)) {
        let entries = split_top_level(inner, ":");
        let super_entries = split_top_level(super_inner, ":");
        return entries.len() == super_entries.len()
            && entries
                .iter()
                .zip(&super_entries)
                .all(|(entry, super_entry)| is_subtype(entry, super_entry));
    }

    if let (Some((base, arguments)), Some((super_base, super_arguments))) =
        (generic_parts(type_name), generic_parts(super_type))
    {
        return is_subtype(base, super_base)
            && arguments.len() == super_arguments.len()
            && arguments
                .iter()
                .zip(&super_arguments)
                .all(|(argument, super_argument)| is_subtype(argument, super_argument));
    }

    false
}

/// Rewrite a type into the canonical spelling used for matching.
///
/// Applies one step: an alias, a wrapper collapsed into `[T]` or `[K : V]`,
/// a dropped qualifier or single-element parentheses. Returns the input
/// when nothing applies.
///
/// ```rust
/// use template_engine::simplify_type;
///
/// assert_eq!(simplify_type("Array<Int>"), "[Int]");
/// assert_eq!(simplify_type("MutableMap<String, Int>"), "[String : Int]");
/// assert_eq!(simplify_type("inout Int"), "Int");
/// assert_eq!(simplify_type("(Int)"), "Int");
/// assert_eq!(simplify_type("(Int, Int)"), "(Int, Int)");
/// ```
pub fn simplify_type(type_name: &str) -> String {
    let type_name = type_name.trim();

    if let Some((_, alias)) = TYPE_ALIASES.iter().find(|(name, _)| *name == type_name) {
        return alias.to_string();
    }

    if let Some((base, arguments)) = generic_parts(type_name) {
        if ARRAY_LIKE.contains(&base) && arguments.len() == 1 {
            return format!("[{}]", arguments[0]);
        }
        if DICTIONARY_LIKE.contains(&base) && arguments.len() == 2 {
            return format!("[{} : {}]", arguments[0], arguments[1]);
        }
    }

    if let Some(rest) = QUALIFIERS.iter().find_map(|qualifier| type_name.strip_prefix(qualifier)) {
        return rest.to_string();
    }

    if is_tuple(type_name) {
        let inner = type_name[1..type_name.len() - 1].trim();
        if !inner.is_empty() && split_top_level(inner, ",").len() == 1 && !inner.contains(':') {
            return inner.to_string();
        }
    }

    type_name.to_string()
}

fn is_function(type_name: &str) -> bool {
    split_top_level(type_name, "->").len() > 1
}

/// `(…)` wrapping the whole type, and not a function type.
fn is_tuple(type_name: &str) -> bool {
    type_name.starts_with('(')
        && type_name.ends_with(')')
        && !is_function(type_name)
        && strip_wrapping_parentheses(type_name).len() + 2 == type_name.len()
}

/// Content of `[…]` wrapping the whole type.
fn bracketed(type_name: &str) -> Option<&str> {
    let inner = type_name.strip_prefix('[')?.strip_suffix(']')?;
    let mut depth = 0;
    for (index, c) in type_name.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 && index + 1 != type_name.len() {
                    return None;
                }
            }
            _ => {}
        }
    }
    Some(inner)
}

/// `Base<A, B>` split into `Base` and its arguments.
fn generic_parts(type_name: &str) -> Option<(&str, Vec<&str>)> {
    let open = type_name.find('<')?;
    let inner = type_name.strip_suffix('>')?.get(open + 1..)?;
    let base = &type_name[..open];
    if base.is_empty() || base.contains(|c: char| c == '(' || c == '[' || c == ' ') {
        return None;
    }
    Some((base, split_top_level(inner, ",").into_iter().map(str::trim).collect()))
}
