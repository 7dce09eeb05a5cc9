//! Identifier and literal spelling helpers.

/// `camelCase` as `CAMEL_CASE`, the spelling of enum class entries.
///
/// ```rust
/// use kotlin_render::names::upper_snake_case;
///
/// assert_eq!(upper_snake_case("northWest"), "NORTH_WEST");
/// assert_eq!(upper_snake_case("httpURL"), "HTTP_URL");
/// assert_eq!(upper_snake_case("a"), "A");
/// ```
pub fn upper_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);
    for (index, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && index > 0 {
            let previous = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(|next| next.is_lowercase());
            if previous.is_lowercase() || previous.is_ascii_digit() || (previous.is_uppercase() && next_is_lower) {
                result.push('_');
            }
        }
        result.extend(c.to_uppercase());
    }
    result
}

/// First letter in upper case, the spelling of sealed class members.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Escape `$`, which starts a template in Kotlin string literals.
///
/// The compiler dumps literals with their source escapes intact, so only
/// the template marker needs care.
pub fn escape_string(value: &str) -> String {
    value.replace('$', "\\$")
}
