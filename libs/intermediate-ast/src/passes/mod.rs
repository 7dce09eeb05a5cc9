//! # Normalization Passes
//!
//! Rewrites applied to a translated file after template replacement and
//! before rendering. Each pass is an [`AstFold`](crate::fold::AstFold).
//!
//! ## Example
//!
//! ```rust
//! use intermediate_ast::passes::normalize;
//! use intermediate_ast::{Expression, Statement, TranslatedFile};
//!
//! let file = TranslatedFile {
//!     declarations: Vec::new(),
//!     statements: vec![Statement::Expression(Expression::Parentheses {
//!         expression: Box::new(Expression::LiteralInt { value: 1 }),
//!     })],
//! };
//! let normalized = normalize(file);
//! assert_eq!(
//!     normalized.statements,
//!     vec![Statement::Expression(Expression::LiteralInt { value: 1 })]
//! );
//! ```

mod companion_object;
mod description;
mod guards;
mod implicit_declarations;
mod operators;
mod parentheses;

pub use companion_object::StaticMembersToCompanionObject;
pub use description::DescriptionAsToString;
pub use guards::DoubleNegativesInGuards;
pub use implicit_declarations::RemoveImplicitDeclarations;
pub use operators::RenameOperators;
pub use parentheses::RemoveRedundantParentheses;

use crate::ast::TranslatedFile;
use crate::fold::AstFold;
use tracing::trace;

/// Run every normalization pass, in order.
pub fn normalize(file: TranslatedFile) -> TranslatedFile {
    let file = run("remove implicit declarations", &mut RemoveImplicitDeclarations, file);
    let file = run("remove redundant parentheses", &mut RemoveRedundantParentheses, file);
    let file = run("rename operators", &mut RenameOperators, file);
    let file = run("double negatives in guards", &mut DoubleNegativesInGuards, file);
    let file = run("static members to companion object", &mut StaticMembersToCompanionObject, file);
    run("description as toString", &mut DescriptionAsToString, file)
}

fn run(name: &str, pass: &mut dyn AstFold, file: TranslatedFile) -> TranslatedFile {
    trace!(pass = name, "running normalization pass");
    pass.fold_file(file)
}
