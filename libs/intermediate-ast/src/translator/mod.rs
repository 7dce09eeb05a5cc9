//! # Raw-to-Intermediate Translator
//!
//! Turns a decoded dump tree into the intermediate AST.
//!
//! ## Architecture
//!
//! ```text
//! RawNode ("Source File")
//!   ├─ declarations.rs  → classes, structs, enums, functions, variables
//!   ├─ statements.rs    → control flow, assignments
//!   ├─ expressions.rs   → calls, references, operators, casts
//!   ├─ arguments.rs     → call arguments, tuples, tuple shuffles
//!   └─ literals.rs      → literals and interpolated strings
//! ```
//!
//! Children of "Top Level Code Declaration" nodes become the file's
//! statements, everything else becomes a declaration.
//!
//! ## Example
//!
//! ```rust
//! use config::DumpDialect;
//! use dump_decoder::decode;
//! use intermediate_ast::{Statement, Translator};
//!
//! let dump = "(source_file (top_level_code_decl (brace_stmt (return_stmt))))";
//! let raw = decode(dump).unwrap();
//! let file = Translator::new(DumpDialect::Modern).translate_file(&raw).unwrap();
//! assert_eq!(file.statements, vec![Statement::Return { expression: None }]);
//! ```

mod arguments;
mod declarations;
pub mod dump_text;
mod expressions;
mod literals;
mod pending;
mod statements;

pub use pending::PendingBindings;

use crate::ast::{Statement, TranslatedFile};
use crate::error::TranslationError;
use crate::unexpected_structure;
use config::constants::{DEFAULT_HORIZONTAL_LIMIT, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use config::DumpDialect;
use dump_decoder::RawNode;
use tracing::{debug, warn};

/// Name of the root node of every dump.
const SOURCE_FILE: &str = "Source File";
const TOP_LEVEL_CODE: &str = "Top Level Code Declaration";

// =============================================================================
// TRANSLATOR
// =============================================================================

/// Raw-to-intermediate translator for one dump dialect.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    dialect: DumpDialect,
    /// Line width of the trees printed in errors.
    horizontal_limit: Option<usize>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DumpDialect::default())
    }
}

impl Translator {
    /// Create a translator for dumps in `dialect`.
    pub fn new(dialect: DumpDialect) -> Self {
        Self {
            dialect,
            horizontal_limit: Some(DEFAULT_HORIZONTAL_LIMIT),
        }
    }

    /// Set the line width of the trees printed in errors (`None` for no
    /// limit).
    pub fn with_horizontal_limit(mut self, limit: Option<usize>) -> Self {
        self.horizontal_limit = limit;
        self
    }

    pub fn dialect(&self) -> DumpDialect {
        self.dialect
    }

    pub fn horizontal_limit(&self) -> Option<usize> {
        self.horizontal_limit
    }

    /// Give `error` this translator's tree width.
    pub(crate) fn limit_tree(&self, error: TranslationError) -> TranslationError {
        error.with_horizontal_limit(self.horizontal_limit)
    }

    /// Translate a whole file, failing on the first structural error.
    ///
    /// ## Parameters
    ///
    /// - `root`: Decoded "Source File" node
    ///
    /// ## Returns
    ///
    /// The file's declarations and top-level statements.
    pub fn translate_file(&self, root: &RawNode) -> Result<TranslatedFile, TranslationError> {
        self.translate_file_with_policy(root, true)
            .map(|(file, _)| file)
    }

    /// Translate a whole file, replacing every failing top-level node with
    /// [`Statement::Error`] and collecting the errors.
    ///
    /// Only a root that is not a "Source File" node fails the whole call.
    pub fn translate_file_collecting_errors(
        &self,
        root: &RawNode,
    ) -> Result<(TranslatedFile, Vec<TranslationError>), TranslationError> {
        self.translate_file_with_policy(root, false)
    }

    fn translate_file_with_policy(
        &self,
        root: &RawNode,
        stop_at_first_error: bool,
    ) -> Result<(TranslatedFile, Vec<TranslationError>), TranslationError> {
        if root.name != SOURCE_FILE {
            return Err(self.limit_tree(unexpected_structure!(root, "expected a {} node", SOURCE_FILE)));
        }

        let mut file = TranslatedFile::default();
        let mut errors = Vec::new();
        let mut pending = PendingBindings::default();

        for node in &root.subtrees {
            let is_top_level_code = node.name == TOP_LEVEL_CODE;
            let translated = if is_top_level_code {
                node.subtree("Brace Statement")
                    .ok_or_else(|| unexpected_structure!(node, "top-level code without a body"))
                    .and_then(|brace| self.translate_statements(&brace.subtrees, &mut pending))
            } else {
                self.translate_statement(node, &mut pending)
            }
            .map_err(|error| self.limit_tree(error));

            let target = if is_top_level_code {
                &mut file.statements
            } else {
                &mut file.declarations
            };

            match translated {
                Ok(statements) => target.extend(statements),
                Err(error) if stop_at_first_error => return Err(error),
                Err(error) => {
                    warn!(node = %node.name, message = error.message(), "replacing untranslatable node");
                    target.push(Statement::Error);
                    errors.push(error);
                }
            }
        }

        if !pending.is_empty() {
            debug!(count = pending.len(), "pattern bindings without a declaration");
        }

        Ok((file, errors))
    }

    // =========================================================================
    // STATEMENT LISTS
    // =========================================================================

    /// Translate a sequence of sibling nodes sharing one set of pending
    /// bindings.
    pub fn translate_statements(
        &self,
        nodes: &[RawNode],
        pending: &mut PendingBindings,
    ) -> Result<Vec<Statement>, TranslationError> {
        let mut statements = Vec::new();
        for node in nodes {
            statements.extend(self.translate_statement(node, pending)?);
        }
        Ok(statements)
    }

    /// Translate the children of a body or member list in a fresh scope.
    pub(crate) fn translate_scope(&self, nodes: &[RawNode]) -> Result<Vec<Statement>, TranslationError> {
        let mut pending = PendingBindings::default();
        self.translate_statements(nodes, &mut pending)
    }

    /// Translate the statements of a "Brace Statement" child of `node`.
    pub(crate) fn translate_body(&self, node: &RawNode) -> Result<Vec<Statement>, TranslationError> {
        let brace = node
            .subtree("Brace Statement")
            .ok_or_else(|| unexpected_structure!(node, "expected a body"))?;
        self.translate_scope(&brace.subtrees)
    }

    /// Translate one node into zero or more statements.
    ///
    /// Pattern bindings produce nothing (their initializer is stored in
    /// `pending`), extensions produce their members and unknown declarations
    /// are skipped.
    pub fn translate_statement(
        &self,
        node: &RawNode,
        pending: &mut PendingBindings,
    ) -> Result<Vec<Statement>, TranslationError> {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.translate_statement_inner(node, pending)
        })
        .map_err(|error| self.limit_tree(error))
    }

    fn translate_statement_inner(
        &self,
        node: &RawNode,
        pending: &mut PendingBindings,
    ) -> Result<Vec<Statement>, TranslationError> {
        let single = |statement: Statement| vec![statement];

        match node.name.as_str() {
            "Import Declaration" => self.translate_import(node).map(single),
            "Typealias" => self.translate_typealias(node).map(single),
            "Class Declaration" => self.translate_class(node).map(single),
            "Struct Declaration" => self.translate_struct(node).map(single),
            "Enum Declaration" => self.translate_enum(node).map(single),
            "Protocol Declaration" => self.translate_protocol(node).map(single),
            "Extension Declaration" => self.translate_extension(node),
            "Function Declaration" | "Constructor Declaration" => Ok(self
                .translate_function(node)?
                .map(Statement::FunctionDeclaration)
                .into_iter()
                .collect()),
            "Variable Declaration" => Ok(self
                .translate_variable(node, pending)?
                .map(Statement::VariableDeclaration)
                .into_iter()
                .collect()),
            "Pattern Binding Declaration" => self.translate_pattern_binding(node, pending),
            TOP_LEVEL_CODE | "Brace Statement" => {
                let body = if node.name == TOP_LEVEL_CODE {
                    node.subtree("Brace Statement")
                        .ok_or_else(|| unexpected_structure!(node, "top-level code without a body"))?
                } else {
                    node
                };
                self.translate_statements(&body.subtrees, pending)
            }

            "For Each Statement" => self.translate_for_each(node).map(single),
            "While Statement" => self.translate_while(node).map(single),
            "If Statement" => self.translate_if(node, false).map(|data| single(Statement::If(data))),
            "Guard Statement" => self.translate_if(node, true).map(|data| single(Statement::If(data))),
            "Switch Statement" => self.translate_switch(node).map(single),
            "Do Statement" => self.translate_do(node).map(single),
            "Do Catch Statement" => self.translate_do_catch(node),
            "Defer Statement" => self.translate_defer(node).map(single),
            "Throw Statement" => self.translate_throw(node).map(single),
            "Return Statement" => self.translate_return(node).map(single),
            "Break Statement" => Ok(single(Statement::Break)),
            "Continue Statement" => Ok(single(Statement::Continue)),
            "Assign Expression" => self.translate_assignment(node).map(single),

            name if name.ends_with("Expression") => self
                .translate_expression(node)
                .map(|expression| single(Statement::Expression(expression))),

            name => {
                debug!(node = name, "skipping node without a translation");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests;
