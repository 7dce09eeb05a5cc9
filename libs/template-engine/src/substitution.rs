//! Filling a template's replacement text with rendered captures.

use std::collections::BTreeMap;

/// Replace capture names in `pattern` with their rendered text.
///
/// The pattern is scanned once, left to right. At each position the longest
/// capture name found there is replaced, so `_xs` is not read as `_x`
/// followed by `s`, and text that was substituted is never scanned again.
///
/// ## Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use template_engine::substitute;
///
/// let rendered = BTreeMap::from([
///     ("_x".to_string(), "a".to_string()),
///     ("_xs".to_string(), "list".to_string()),
/// ]);
/// assert_eq!(substitute("_xs.add(_x)", &rendered), "list.add(a)");
/// ```
pub fn substitute(pattern: &str, rendered: &BTreeMap<String, String>) -> String {
    let mut names: Vec<&String> = rendered.keys().filter(|name| !name.is_empty()).collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut output = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        match names.iter().find(|name| rest.starts_with(name.as_str())) {
            Some(name) => {
                output.push_str(&rendered[name.as_str()]);
                rest = &rest[name.len()..];
            }
            None => {
                output.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    output
}
