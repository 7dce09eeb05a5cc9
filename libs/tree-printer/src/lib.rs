//! # Tree Printer
//!
//! Generic indented pretty-printer used for diagnostics and debugging of
//! every tree type in the pipeline (raw dump nodes, intermediate statements
//! and expressions).
//!
//! ## Example
//!
//! ```rust
//! use tree_printer::PrintableTree;
//!
//! let tree = PrintableTree::new("Call Expression")
//!     .with_child(PrintableTree::leaf("print"))
//!     .with_child(PrintableTree::new("Tuple").with_child(PrintableTree::leaf("x")));
//!
//! assert_eq!(
//!     tree.pretty_print(None),
//!     "Call Expression\n├─ print\n└─ Tuple\n   └─ x\n"
//! );
//! ```

use config::constants::DEFAULT_HORIZONTAL_LIMIT;
use std::fmt;

// =============================================================================
// PRINTABLE TREE
// =============================================================================

/// A labeled tree ready to be printed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrintableTree {
    /// Text shown on this node's line.
    pub label: String,
    /// Child subtrees, printed below the label in order.
    pub children: Vec<PrintableTree>,
}

impl PrintableTree {
    /// Create a node with no children.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Alias of [`PrintableTree::new`] that reads better for terminal values.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self::new(label)
    }

    /// Create a node with children.
    pub fn with_children(label: impl Into<String>, children: Vec<PrintableTree>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Builder form of [`PrintableTree::push`].
    pub fn with_child(mut self, child: PrintableTree) -> Self {
        self.children.push(child);
        self
    }

    /// Builder that appends a child only when it is present.
    pub fn with_optional_child(mut self, child: Option<PrintableTree>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    /// Append a child.
    pub fn push(&mut self, child: PrintableTree) {
        self.children.push(child);
    }

    /// Create a `"key: value"` leaf.
    pub fn field(key: &str, value: impl fmt::Display) -> Self {
        Self::new(format!("{}: {}", key, value))
    }

    /// Create a `"key: value"` leaf when the value is present.
    pub fn optional_field(key: &str, value: Option<impl fmt::Display>) -> Option<Self> {
        value.map(|value| Self::field(key, value))
    }

    /// Create a labeled group holding the trees of `items`, or `None` when
    /// there are no items.
    pub fn group<T: PrintableAsTree>(label: &str, items: &[T]) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self::with_children(
                label,
                items.iter().map(PrintableAsTree::to_printable_tree).collect(),
            ))
        }
    }

    /// Render the tree with box-drawing connectors.
    ///
    /// ## Parameters
    ///
    /// - `horizontal_limit`: Lines longer than this many characters are cut
    ///   and end with `…`. `None` disables truncation.
    ///
    /// ## Returns
    ///
    /// The rendered tree; every line, including the last, ends in `\n`.
    pub fn pretty_print(&self, horizontal_limit: Option<usize>) -> String {
        let mut output = String::new();
        push_line(&mut output, &self.label, horizontal_limit);
        self.print_children(&mut output, "", horizontal_limit);
        output
    }

    fn print_children(&self, output: &mut String, prefix: &str, horizontal_limit: Option<usize>) {
        let count = self.children.len();
        for (index, child) in self.children.iter().enumerate() {
            let is_last = index + 1 == count;
            let connector = if is_last { "└─ " } else { "├─ " };
            let line = format!("{}{}{}", prefix, connector, child.label);
            push_line(output, &line, horizontal_limit);

            let continuation = if is_last { "   " } else { "│  " };
            let child_prefix = format!("{}{}", prefix, continuation);
            child.print_children(output, &child_prefix, horizontal_limit);
        }
    }
}

impl fmt::Display for PrintableTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_print(Some(DEFAULT_HORIZONTAL_LIMIT)))
    }
}

/// Append one line, truncated to the horizontal limit.
fn push_line(output: &mut String, line: &str, horizontal_limit: Option<usize>) {
    match horizontal_limit {
        Some(limit) if line.chars().count() > limit => {
            let kept = limit.saturating_sub(1);
            output.extend(line.chars().take(kept));
            output.push('…');
        }
        _ => output.push_str(line),
    }
    output.push('\n');
}

// =============================================================================
// PRINTABLE AS TREE
// =============================================================================

/// Types that can be shown as a [`PrintableTree`].
///
/// ## Example
///
/// ```rust
/// use tree_printer::{PrintableAsTree, PrintableTree};
///
/// struct Pair(&'static str, &'static str);
///
/// impl PrintableAsTree for Pair {
///     fn tree_label(&self) -> String {
///         "Pair".to_string()
///     }
///
///     fn tree_children(&self) -> Vec<PrintableTree> {
///         vec![PrintableTree::leaf(self.0), PrintableTree::leaf(self.1)]
///     }
/// }
///
/// assert_eq!(Pair("a", "b").to_printable_tree().children.len(), 2);
/// ```
pub trait PrintableAsTree {
    /// Label of the root line.
    fn tree_label(&self) -> String;

    /// Children of the root.
    fn tree_children(&self) -> Vec<PrintableTree>;

    /// Build the full tree.
    fn to_printable_tree(&self) -> PrintableTree {
        PrintableTree::with_children(self.tree_label(), self.tree_children())
    }

    /// Render the full tree.
    fn pretty_print(&self, horizontal_limit: Option<usize>) -> String {
        self.to_printable_tree().pretty_print(horizontal_limit)
    }
}

impl PrintableAsTree for PrintableTree {
    fn tree_label(&self) -> String {
        self.label.clone()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        self.children.clone()
    }

    fn to_printable_tree(&self) -> PrintableTree {
        self.clone()
    }
}

impl PrintableAsTree for String {
    fn tree_label(&self) -> String {
        self.clone()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        Vec::new()
    }
}

impl<T: PrintableAsTree> PrintableAsTree for Box<T> {
    fn tree_label(&self) -> String {
        self.as_ref().tree_label()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        self.as_ref().tree_children()
    }
}

// =============================================================================
// TESTS
// =============================================================================
