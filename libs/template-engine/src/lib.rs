//! # Template Engine
//!
//! Rewrites standard-library expressions into Kotlin text using templates
//! declared in a marked function of a translated file.
//!
//! ## Architecture
//!
//! ```text
//! TranslatedFile ─ record_templates ─→ Vec<Template> ─→ TemplateRegistry
//! TranslatedFile ─ replace_templates(registry.snapshot()) ─→ TranslatedFile
//! ```
//!
//! Matching is structural: a declaration reference named `_something` in a
//! pattern captures any expression whose type fits, per [`is_subtype`].
//! The renderer later fills the replacement text with [`substitute`].
//!
//! ## Example
//!
//! ```rust
//! use intermediate_ast::{DeclarationReferenceData, Expression, Statement, TranslatedFile};
//! use template_engine::{replace_templates, Template};
//!
//! let template = Template {
//!     pattern: Expression::PrefixUnary {
//!         expression: Box::new(Expression::DeclarationReference(DeclarationReferenceData::new("_b", "Bool"))),
//!         operator_symbol: "!".to_string(),
//!         type_name: "Bool".to_string(),
//!     },
//!     replacement: "_b.not()".to_string(),
//! };
//! let file = TranslatedFile {
//!     declarations: Vec::new(),
//!     statements: vec![Statement::Expression(Expression::PrefixUnary {
//!         expression: Box::new(Expression::LiteralBool { value: true }),
//!         operator_symbol: "!".to_string(),
//!         type_name: "Bool".to_string(),
//!     })],
//! };
//!
//! let file = replace_templates(file, &[template]);
//! assert!(matches!(&file.statements[0], Statement::Expression(Expression::Template { .. })));
//! ```

pub mod error;
pub mod matching;
pub mod recording;
pub mod registry;
pub mod replacement;
pub mod substitution;
pub mod types;

pub use error::TemplateError;
pub use matching::{match_template, Captures};
pub use recording::record_templates;
pub use registry::{Template, TemplateRegistry};
pub use replacement::{replace_templates, ReplaceTemplates};
pub use substitution::substitute;
pub use types::{is_subtype, simplify_type};
