//! # Dump Text Helpers
//!
//! Small parsers for the text found inside dump attributes: declaration
//! paths, function types, tuple types and generic parameter lists.

use crate::ast::LabeledType;
use crate::source_range::SourceRange;
use dump_decoder::RawNode;

/// Strip the `@lvalue` marker from a type.
///
/// ```rust
/// use intermediate_ast::translator::dump_text::clean_type;
///
/// assert_eq!(clean_type("@lvalue Int"), "Int");
/// assert_eq!(clean_type("[String]"), "[String]");
/// ```
pub fn clean_type(type_name: &str) -> String {
    type_name
        .trim()
        .strip_prefix("@lvalue ")
        .unwrap_or(type_name.trim())
        .to_string()
}

/// Name of the declared entity in a declaration path.
///
/// The location suffix and the trailing argument-label list are removed, then
/// the last path component is taken. Operator names made of dots (`...`,
/// `..<`) keep their dots.
///
/// ```rust
/// use intermediate_ast::translator::dump_text::declaration_identifier;
///
/// assert_eq!(declaration_identifier("main.(file).x@/tmp/a.swift:1:5"), "x");
/// assert_eq!(declaration_identifier("Swift.(file).print(_:separator:terminator:)"), "print");
/// assert_eq!(declaration_identifier("Swift.(file).Int extension.+"), "+");
/// assert_eq!(declaration_identifier("Swift.(file).Comparable extension...<"), "..<");
/// ```
pub fn declaration_identifier(declaration: &str) -> String {
    let without_location = declaration
        .split_once('@')
        .map_or(declaration, |(path, _)| path);

    let without_labels = if without_location.ends_with(')') {
        without_location
            .rfind('(')
            .map_or(without_location, |index| &without_location[..index])
    } else {
        without_location
    };

    let name_start = without_labels
        .rfind('.')
        .map_or(0, |index| index + 1);
    let name = &without_labels[name_start..];

    let dots = without_labels[..name_start]
        .chars()
        .rev()
        .take_while(|c| *c == '.')
        .count();

    if dots > 1 {
        format!("{}{}", ".".repeat(dots - 1), name)
    } else {
        name.to_string()
    }
}

/// Whether a declaration path belongs to the standard library.
pub fn is_standard_library(declaration: &str) -> bool {
    declaration.starts_with("Swift.")
}

/// Function name without its argument labels (`foo` for `foo(x:)`).
pub fn function_prefix(name: &str) -> String {
    name.split('(').next().unwrap_or(name).to_string()
}

/// Split on `separator` outside of brackets, parentheses and angle brackets.
///
/// ```rust
/// use intermediate_ast::translator::dump_text::split_top_level;
///
/// assert_eq!(split_top_level("(Int) -> (Int) -> Bool", "->"), vec!["(Int) ", " (Int) ", " Bool"]);
/// assert_eq!(split_top_level("x: [Int], y: (Int, Int)", ","), vec!["x: [Int]", " y: (Int, Int)"]);
/// ```
pub fn split_top_level<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    let mut skip_until = 0;
    let mut previous = None;

    for (index, c) in text.char_indices() {
        if index < skip_until {
            previous = Some(c);
            continue;
        }
        if depth == 0 && text[index..].starts_with(separator) {
            parts.push(&text[start..index]);
            start = index + separator.len();
            skip_until = start;
            previous = Some(c);
            continue;
        }
        match c {
            '(' | '[' | '<' => depth += 1,
            ')' | ']' => depth -= 1,
            '>' if previous != Some('-') => depth -= 1,
            _ => {}
        }
        previous = Some(c);
    }

    parts.push(&text[start..]);
    parts
}

/// Result type of a (possibly curried) function type.
pub fn return_type_of(function_type: &str) -> String {
    let parts = split_top_level(function_type, "->");
    if parts.len() < 2 {
        return "()".to_string();
    }
    parts
        .last()
        .map_or_else(|| "()".to_string(), |part| part.trim().to_string())
}

/// Remove one pair of parentheses that wraps the whole text.
pub fn strip_wrapping_parentheses(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        Some(inner) if closes_at_end(trimmed) => inner,
        _ => trimmed,
    }
}

/// Whether the parenthesis opening `text` is closed by its last character.
fn closes_at_end(text: &str) -> bool {
    let mut depth = 0;
    for (index, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 && index + c.len_utf8() != text.len() {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

/// Components of a tuple type such as `(x: Int, String)`.
///
/// Unlabeled components get an empty label.
pub fn parse_tuple_components(tuple_type: &str) -> Vec<LabeledType> {
    let inner = strip_wrapping_parentheses(tuple_type);
    if inner.trim().is_empty() {
        return Vec::new();
    }

    split_top_level(inner, ",")
        .into_iter()
        .map(str::trim)
        .filter(|component| !component.is_empty())
        .map(|component| match split_top_level(component, ":").as_slice() {
            [label, type_name]
                if !label.trim().is_empty()
                    && label.trim().chars().all(|c| c.is_alphanumeric() || c == '_') =>
            {
                LabeledType {
                    label: label.trim().to_string(),
                    type_name: type_name.trim().to_string(),
                }
            }
            _ => LabeledType {
                label: String::new(),
                type_name: component.to_string(),
            },
        })
        .collect()
}

/// Names of the generic parameters in `<T, U: Equatable where ...>`.
pub fn parse_generic_types(text: &str) -> Vec<String> {
    let Some(inner) = text.trim().strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) else {
        return Vec::new();
    };
    let parameters = inner.split(" where ").next().unwrap_or(inner);
    split_top_level(parameters, ",")
        .into_iter()
        .filter_map(|parameter| {
            let name = parameter.split(':').next().unwrap_or(parameter).trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Parse the `inherits` attribute (`A, B`).
pub fn split_inherits(inherits: Option<&str>) -> Vec<String> {
    inherits
        .map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Source range of a node, from its `range` attribute.
pub fn node_range(node: &RawNode) -> Option<SourceRange> {
    node.attribute("range").and_then(SourceRange::parse)
}

/// Static type of a node, from `interface type` or `type`.
pub fn node_type(node: &RawNode) -> Option<String> {
    node.attribute("interface type")
        .or_else(|| node.attribute("type"))
        .map(clean_type)
}

/// Depth-first search for a descendant (or the node itself) with `name`.
pub fn find_descendant<'a>(node: &'a RawNode, name: &str) -> Option<&'a RawNode> {
    if node.name == name {
        return Some(node);
    }
    node.subtrees
        .iter()
        .find_map(|subtree| find_descendant(subtree, name))
}

/// Parse an integer literal with optional sign, radix prefix and `_`
/// separators.
pub fn parse_integer(text: &str) -> Option<i128> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let (radix, digits) = if let Some(rest) = digits.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = digits.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = digits.strip_prefix("0b") {
        (2, rest)
    } else {
        (10, digits)
    };
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_identifier_variants() {
        assert_eq!(declaration_identifier("main.(file).Foo.bar()@/a.swift:3:7"), "bar");
        assert_eq!(declaration_identifier("Swift.(file).Comparable extension...."), "...");
        assert_eq!(declaration_identifier("Swift.(file).Int.init(_builtinIntegerLiteral:)"), "init");
        assert_eq!(declaration_identifier("x"), "x");
    }

    #[test]
    fn test_return_type_of_curried_method() {
        assert_eq!(return_type_of("(Foo) -> (Int) -> String"), "String");
        assert_eq!(return_type_of("() -> ()"), "()");
        assert_eq!(return_type_of("Int"), "()");
        assert_eq!(return_type_of("((Int) -> Int) -> Int"), "Int");
    }

    #[test]
    fn test_parse_tuple_components() {
        let components = parse_tuple_components("(x: Int, [String : Int], f: (Int) -> Int)");
        assert_eq!(components.len(), 3);
        assert_eq!(components[0].label, "x");
        assert_eq!(components[1].label, "");
        assert_eq!(components[1].type_name, "[String : Int]");
        assert_eq!(components[2].type_name, "(Int) -> Int");
        assert!(parse_tuple_components("()").is_empty());
    }

    #[test]
    fn test_strip_wrapping_parentheses_keeps_separate_groups() {
        assert_eq!(strip_wrapping_parentheses("(Int)"), "Int");
        assert_eq!(strip_wrapping_parentheses("(Int) -> (Int)"), "(Int) -> (Int)");
    }

    #[test]
    fn test_parse_generic_types() {
        assert_eq!(parse_generic_types("<T, U: Equatable>"), vec!["T", "U"]);
        assert_eq!(parse_generic_types("<Element where Element: Hashable>"), vec!["Element"]);
        assert!(parse_generic_types("T").is_empty());
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("1_000"), Some(1000));
        assert_eq!(parse_integer("0xff"), Some(255));
        assert_eq!(parse_integer("-0b101"), Some(-5));
        assert_eq!(parse_integer("abc"), None);
    }
}
