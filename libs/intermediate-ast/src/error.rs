//! # Translation Errors
//!
//! Structural errors raised when a raw node does not have the shape a
//! translation rule expects. Each error carries the offending node, printed
//! as a tree within a horizontal limit, and the location of the rule that
//! rejected it.

use crate::source_range::SourceRange;
use config::constants::DEFAULT_HORIZONTAL_LIMIT;
use dump_decoder::RawNode;
use thiserror::Error;
use tree_printer::PrintableAsTree;

/// Error raised by the raw-to-intermediate translator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslationError {
    /// A raw node did not match the expected shape.
    #[error(
        "unexpected AST structure: {message} (in {node_name}, raised by {function} at {file}:{line})\n{}",
        print_tree(.node, .horizontal_limit)
    )]
    UnexpectedAstStructure {
        message: String,
        node_name: String,
        /// Source range of the offending node, when the dump records one.
        range: Option<SourceRange>,
        /// The offending node.
        node: Box<RawNode>,
        /// Line width used when the node is printed.
        horizontal_limit: Option<usize>,
        file: &'static str,
        line: u32,
        function: &'static str,
    },
}

impl TranslationError {
    /// Build an error for `node`. Prefer the [`unexpected_structure!`] macro,
    /// which fills in the provenance.
    pub fn unexpected_structure(
        node: &RawNode,
        message: String,
        file: &'static str,
        line: u32,
        function: &'static str,
    ) -> Self {
        TranslationError::UnexpectedAstStructure {
            message,
            node_name: node.name.clone(),
            range: node.attribute("range").and_then(SourceRange::parse),
            node: Box::new(node.clone()),
            horizontal_limit: Some(DEFAULT_HORIZONTAL_LIMIT),
            file,
            line,
            function,
        }
    }

    /// Name of the node that failed to translate.
    pub fn node_name(&self) -> &str {
        match self {
            TranslationError::UnexpectedAstStructure { node_name, .. } => node_name,
        }
    }

    pub fn range(&self) -> Option<SourceRange> {
        match self {
            TranslationError::UnexpectedAstStructure { range, .. } => *range,
        }
    }

    /// The offending node printed as a tree.
    pub fn tree(&self) -> String {
        match self {
            TranslationError::UnexpectedAstStructure {
                node, horizontal_limit, ..
            } => print_tree(node, horizontal_limit),
        }
    }

    /// Print the tree with `limit` instead of the default width.
    pub fn with_horizontal_limit(mut self, limit: Option<usize>) -> Self {
        match &mut self {
            TranslationError::UnexpectedAstStructure { horizontal_limit, .. } => *horizontal_limit = limit,
        }
        self
    }

    /// Message without the tree.
    pub fn message(&self) -> &str {
        match self {
            TranslationError::UnexpectedAstStructure { message, .. } => message,
        }
    }
}

fn print_tree(node: &RawNode, horizontal_limit: &Option<usize>) -> String {
    node.pretty_print(*horizontal_limit)
}

/// Create an [`TranslationError::UnexpectedAstStructure`] for a node,
/// recording the file, line and function of the call site.
///
/// ## Example
///
/// ```rust
/// use dump_decoder::RawNode;
/// use intermediate_ast::unexpected_structure;
///
/// let node = RawNode::new("Call Expression");
/// let error = unexpected_structure!(&node, "expected {} children", 2);
/// assert_eq!(error.node_name(), "Call Expression");
/// assert_eq!(error.message(), "expected 2 children");
/// ```
#[macro_export]
macro_rules! unexpected_structure {
    ($node:expr, $($message:tt)+) => {
        $crate::error::TranslationError::unexpected_structure(
            $node,
            format!($($message)+),
            file!(),
            line!(),
            {
                fn here() {}
                fn name_of<T>(_: T) -> &'static str {
                    std::any::type_name::<T>()
                }
                let name = name_of(here);
                name.strip_suffix("::here").unwrap_or(name)
            },
        )
    };
}
