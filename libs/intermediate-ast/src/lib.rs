//! # Intermediate AST
//!
//! Target-agnostic representation of a translated source file, the
//! translator that builds it from decoded dump trees, and the passes that
//! normalize it before rendering.
//!
//! ## Architecture
//!
//! ```text
//! RawNode → Translator → TranslatedFile → passes → (renderer)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use config::DumpDialect;
//! use dump_decoder::decode;
//! use intermediate_ast::{Expression, Statement, Translator};
//!
//! let dump = "(source_file (top_level_code_decl (brace_stmt \
//!     (call_expr type='()' \
//!       (declref_expr type='(Int) -> ()' decl=main.(file).show@/a.swift:1:6) \
//!       (paren_expr type='(Int)' (integer_literal_expr type='Int' value=3))))))";
//! let file = Translator::new(DumpDialect::Modern)
//!     .translate_file(&decode(dump).unwrap())
//!     .unwrap();
//!
//! let Statement::Expression(Expression::Call(call)) = &file.statements[0] else {
//!     panic!("expected a call");
//! };
//! assert_eq!(call.type_name.as_deref(), Some("()"));
//! ```

pub mod ast;
pub mod error;
pub mod fold;
pub mod passes;
mod printer;
pub mod source_range;
pub mod translator;

pub use ast::{
    CallExpressionData, DeclarationReferenceData, EnumElement, Expression, FunctionDeclarationData,
    FunctionParameter, IfCondition, IfStatementData, LabeledExpression, LabeledType, Statement,
    SwitchCase, TranslatedFile, TupleShuffleIndex, VariableDeclarationData,
};
pub use error::TranslationError;
pub use source_range::SourceRange;
pub use translator::Translator;
