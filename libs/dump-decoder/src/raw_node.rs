//! # Raw Node
//!
//! Generic labeled tree produced by the decoder. One node per balanced
//! parenthesized region of the dump.
//!
//! ## Example
//!
//! ```rust
//! use dump_decoder::decode;
//!
//! let node = decode("(var_decl \"x\" type='Int' (accessor_decl))").unwrap();
//! assert_eq!(node.name, "Variable Declaration");
//! assert_eq!(node.standalone_attributes, vec!["x".to_string()]);
//! assert_eq!(node.attribute("type"), Some("Int"));
//! assert!(node.subtree("Accessor Declaration").is_some());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tree_printer::{PrintableAsTree, PrintableTree};

/// Keys whose values are written back without quotes.
const UNQUOTED_KEYS: &[&str] = &["location", "decl", "bind", "inherits", "captures"];

// =============================================================================
// RAW NODE
// =============================================================================

/// A node of the raw dump tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawNode {
    /// Expanded node-kind name, e.g. `Call Expression`.
    pub name: String,
    /// Positional, unlabeled attributes in dump order.
    pub standalone_attributes: Vec<String>,
    /// Labeled attributes (`type`, `decl`, `location`, ...).
    pub key_value_attributes: BTreeMap<String, String>,
    /// Child nodes in dump order.
    pub subtrees: Vec<RawNode>,
}

impl RawNode {
    /// Create a node with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: append a standalone attribute.
    pub fn with_standalone(mut self, attribute: impl Into<String>) -> Self {
        self.standalone_attributes.push(attribute.into());
        self
    }

    /// Builder: set a key/value attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_value_attributes.insert(key.into(), value.into());
        self
    }

    /// Builder: append a child.
    pub fn with_subtree(mut self, subtree: RawNode) -> Self {
        self.subtrees.push(subtree);
        self
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// First child with the given name.
    pub fn subtree(&self, name: &str) -> Option<&RawNode> {
        self.subtrees.iter().find(|subtree| subtree.name == name)
    }

    /// Child at `index`.
    pub fn subtree_at(&self, index: usize) -> Option<&RawNode> {
        self.subtrees.get(index)
    }

    /// Child at `index`, only if it has the given name.
    pub fn subtree_at_named(&self, index: usize, name: &str) -> Option<&RawNode> {
        self.subtree_at(index).filter(|subtree| subtree.name == name)
    }

    /// Last child.
    pub fn last_subtree(&self) -> Option<&RawNode> {
        self.subtrees.last()
    }

    /// All children with the given name.
    pub fn subtrees_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RawNode> + 'a {
        self.subtrees.iter().filter(move |subtree| subtree.name == name)
    }

    /// Value of a key/value attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.key_value_attributes.get(key).map(String::as_str)
    }

    /// Standalone attribute at `index`.
    pub fn standalone_at(&self, index: usize) -> Option<&str> {
        self.standalone_attributes.get(index).map(String::as_str)
    }

    /// Whether a standalone attribute equals `flag` (e.g. `implicit`).
    pub fn has_flag(&self, flag: &str) -> bool {
        self.standalone_attributes.iter().any(|attribute| attribute == flag)
    }

    // =========================================================================
    // SERIALIZATION
    // =========================================================================

    /// Write the tree back in dump syntax.
    ///
    /// Names are written with `_` between words, standalone attributes and
    /// most values are quoted. Decoding the result yields an equal tree.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use dump_decoder::{decode, RawNode};
    ///
    /// let node = RawNode::new("Brace Statement").with_standalone("implicit");
    /// assert_eq!(node.to_dump_string(), "(Brace_Statement \"implicit\")");
    /// assert_eq!(decode(&node.to_dump_string()).unwrap(), node);
    /// ```
    pub fn to_dump_string(&self) -> String {
        let mut output = String::new();
        self.write_dump(&mut output, 0);
        output
    }

    fn write_dump(&self, output: &mut String, depth: usize) {
        output.push('(');
        output.push_str(&self.name.replace(' ', "_"));

        for attribute in &self.standalone_attributes {
            output.push(' ');
            output.push_str(&quote(attribute));
        }

        for (key, value) in &self.key_value_attributes {
            output.push(' ');
            if key == "inherits" {
                output.push_str("inherits: ");
                output.push_str(value);
                continue;
            }
            output.push_str(key);
            output.push('=');
            if UNQUOTED_KEYS.contains(&key.as_str())
                || value.starts_with('[')
                || value.starts_with('<')
            {
                output.push_str(value);
            } else {
                output.push_str(&quote(value));
            }
        }

        for subtree in &self.subtrees {
            output.push('\n');
            output.push_str(&"  ".repeat(depth + 1));
            subtree.write_dump(output, depth + 1);
        }

        output.push(')');
    }
}

/// Quote with `"` unless the text itself holds one.
fn quote(text: &str) -> String {
    if text.contains('"') {
        format!("'{}'", text)
    } else {
        format!("\"{}\"", text)
    }
}

impl PrintableAsTree for RawNode {
    fn tree_label(&self) -> String {
        self.name.clone()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        let mut children: Vec<PrintableTree> = self
            .standalone_attributes
            .iter()
            .map(|attribute| PrintableTree::leaf(attribute.as_str()))
            .collect();
        children.extend(
            self.key_value_attributes
                .iter()
                .map(|(key, value)| PrintableTree::field(key, value)),
        );
        children.extend(self.subtrees.iter().map(PrintableAsTree::to_printable_tree));
        children
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> RawNode {
        RawNode::new("Call Expression")
            .with_attribute("type", "Int")
            .with_subtree(RawNode::new("Declaration Reference Expression").with_attribute("decl", "main.(file).f@/a.swift:1:6"))
            .with_subtree(RawNode::new("Parentheses Expression"))
    }

    #[test]
    fn test_queries() {
        let node = sample();
        assert!(node.subtree("Parentheses Expression").is_some());
        assert!(node.subtree_at_named(0, "Parentheses Expression").is_none());
        assert!(node.subtree_at_named(1, "Parentheses Expression").is_some());
        assert_eq!(node.last_subtree().map(|n| n.name.as_str()), Some("Parentheses Expression"));
        assert_eq!(node.attribute("type"), Some("Int"));
        assert_eq!(node.attribute("access"), None);
        assert!(!node.has_flag("implicit"));
    }

    #[test]
    fn test_dump_string_layout() {
        let dump = sample().to_dump_string();
        assert_eq!(
            dump,
            "(Call_Expression type=\"Int\"\n  (Declaration_Reference_Expression decl=main.(file).f@/a.swift:1:6)\n  (Parentheses_Expression))"
        );
    }

    #[test]
    fn test_quote_prefers_single_when_text_has_double() {
        assert_eq!(quote("a\"b"), "'a\"b'");
        assert_eq!(quote("ab"), "\"ab\"");
    }

    #[test]
    fn test_printable_tree() {
        let tree = RawNode::new("Brace Statement")
            .with_standalone("implicit")
            .with_attribute("range", "[a]")
            .to_printable_tree();
        assert_eq!(
            tree.pretty_print(None),
            "Brace Statement\n├─ implicit\n└─ range: [a]\n"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let node = sample();
        let json = serde_json::to_string(&node).expect("serialize");
        let back: RawNode = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, node);
    }
}
