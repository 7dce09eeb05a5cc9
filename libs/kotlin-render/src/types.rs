//! # Kotlin Types
//!
//! Maps the compiler's printed type strings to Kotlin type syntax.

use intermediate_ast::translator::dump_text::{parse_tuple_components, split_top_level, strip_wrapping_parentheses};

/// Types with a different Kotlin name.
const RENAMED_TYPES: &[(&str, &str)] = &[
    ("Bool", "Boolean"),
    ("Character", "Char"),
    ("Void", "Unit"),
    ("()", "Unit"),
    ("Int8", "Byte"),
    ("Int16", "Short"),
    ("Int32", "Int"),
    ("Int64", "Long"),
    ("UInt8", "UByte"),
    ("UInt16", "UShort"),
    ("UInt32", "UInt"),
    ("UInt64", "ULong"),
    ("Float32", "Float"),
    ("Float64", "Double"),
    ("Substring", "String"),
    ("String.SubSequence", "String"),
    ("Error", "Exception"),
    ("AnyObject", "Any"),
];

/// Generic types with a different Kotlin name.
const RENAMED_GENERICS: &[(&str, &str)] = &[
    ("Array", "MutableList"),
    ("ArraySlice", "MutableList"),
    ("Dictionary", "MutableMap"),
    ("Set", "MutableSet"),
];

/// Markers that only matter to the source compiler.
const QUALIFIERS: &[&str] = &["inout ", "__owned ", "__shared ", "@escaping ", "@lvalue ", "@autoclosure "];

/// Kotlin spelling of `type_name`.
///
/// ## Example
///
/// ```rust
/// use kotlin_render::kotlin_type;
///
/// assert_eq!(kotlin_type("[Int]"), "MutableList<Int>");
/// assert_eq!(kotlin_type("[String : Bool]"), "MutableMap<String, Boolean>");
/// assert_eq!(kotlin_type("(Int, String)"), "Pair<Int, String>");
/// assert_eq!(kotlin_type("(Int) -> ()"), "(Int) -> Unit");
/// assert_eq!(kotlin_type("Character?"), "Char?");
/// ```
pub fn kotlin_type(type_name: &str) -> String {
    let mut type_name = type_name.trim();
    while let Some(rest) = QUALIFIERS.iter().find_map(|qualifier| type_name.strip_prefix(qualifier)) {
        type_name = rest.trim_start();
    }

    if let Some(base) = type_name.strip_suffix('?').or_else(|| type_name.strip_suffix('!')) {
        let base = kotlin_type(base);
        return if is_function(&base) {
            format!("({})?", base)
        } else {
            format!("{}?", base)
        };
    }

    if is_function(type_name) {
        return function_type(type_name);
    }

    if let Some(inner) = bracketed(type_name) {
        return match split_top_level(inner, ":").as_slice() {
            [key, value] => format!("MutableMap<{}, {}>", kotlin_type(key), kotlin_type(value)),
            _ => format!("MutableList<{}>", kotlin_type(inner)),
        };
    }

    if type_name.starts_with('(') {
        let components = parse_tuple_components(type_name);
        let types: Vec<String> = components
            .iter()
            .map(|component| kotlin_type(&component.type_name))
            .collect();
        return match types.as_slice() {
            [] => "Unit".to_string(),
            [single] => single.clone(),
            [_, _] => format!("Pair<{}>", types.join(", ")),
            [_, _, _] => format!("Triple<{}>", types.join(", ")),
            _ => "List<Any>".to_string(),
        };
    }

    if let Some((base, arguments)) = generic_parts(type_name) {
        let arguments: Vec<String> = split_top_level(arguments, ",")
            .into_iter()
            .map(kotlin_type)
            .collect();
        if base == "Optional" && arguments.len() == 1 {
            return format!("{}?", arguments[0]);
        }
        let base = RENAMED_GENERICS
            .iter()
            .find(|(from, _)| *from == base)
            .map_or(base, |(_, to)| to);
        return format!("{}<{}>", base, arguments.join(", "));
    }

    RENAMED_TYPES
        .iter()
        .find(|(from, _)| *from == type_name)
        .map_or_else(|| type_name.to_string(), |(_, to)| to.to_string())
}

fn is_function(type_name: &str) -> bool {
    split_top_level(type_name, "->").len() > 1
}

/// `(A, B) throws -> R` as `(A, B) -> R`, curried results included.
fn function_type(type_name: &str) -> String {
    let parts = split_top_level(type_name, "->");
    let parameters = parts[0].trim().trim_end_matches("rethrows").trim_end_matches("throws").trim();
    let result = parts[1..].join("->");

    let inner = strip_wrapping_parentheses(parameters);
    let parameters: Vec<String> = if inner.trim().is_empty() || inner.trim() == "Void" {
        Vec::new()
    } else {
        split_top_level(inner, ",").into_iter().map(kotlin_type).collect()
    };

    format!("({}) -> {}", parameters.join(", "), kotlin_type(&result))
}

/// Contents of `[...]` when the brackets wrap the whole type.
fn bracketed(type_name: &str) -> Option<&str> {
    let inner = type_name.strip_prefix('[')?.strip_suffix(']')?;
    let mut depth = 0;
    for c in inner.chars() {
        match c {
            '[' => depth += 1,
            ']' if depth == 0 => return None,
            ']' => depth -= 1,
            _ => {}
        }
    }
    Some(inner)
}

/// `Base<Arguments>` split into its base and argument text.
fn generic_parts(type_name: &str) -> Option<(&str, &str)> {
    let open = type_name.find('<')?;
    let arguments = type_name[open + 1..].strip_suffix('>')?;
    Some((&type_name[..open], arguments))
}
