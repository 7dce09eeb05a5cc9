//! # Kotlin Render
//!
//! Final stage of the pipeline: turns a normalized intermediate AST into
//! Kotlin source text plus an error map relating generated positions to
//! source positions.
//!
//! ## Architecture
//!
//! ```text
//! TranslatedFile → KotlinRenderer → TranslationUnit tree → resolve → (text, ErrorMap)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use config::TranslationConfig;
//! use intermediate_ast::{Expression, Statement, TranslatedFile, VariableDeclarationData};
//! use kotlin_render::render_file;
//!
//! let file = TranslatedFile {
//!     declarations: vec![Statement::VariableDeclaration(VariableDeclarationData {
//!         identifier: "x".to_string(),
//!         type_name: "Int".to_string(),
//!         expression: Some(Expression::LiteralInt { value: 5 }),
//!         is_let: true,
//!         ..VariableDeclarationData::default()
//!     })],
//!     statements: Vec::new(),
//! };
//!
//! let rendered = render_file(&file, &TranslationConfig::default());
//! assert_eq!(rendered.kotlin, "val x: Int = 5\n");
//! ```

pub mod error;
pub mod error_map;
pub mod names;
pub mod position;
mod renderer;
mod types;
pub mod unit;

pub use error::ErrorMapError;
pub use error_map::{ErrorMap, ErrorMapEntry};
pub use renderer::KotlinRenderer;
pub use types::kotlin_type;
pub use unit::{TranslationUnit, UnitPart};

use config::TranslationConfig;
use intermediate_ast::TranslatedFile;
use tracing::debug;

/// Kotlin text of one file and its error map.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub kotlin: String,
    pub error_map: ErrorMap,
}

/// Render `file` with the settings of `config`.
pub fn render_file(file: &TranslatedFile, config: &TranslationConfig) -> RenderedFile {
    let unit = KotlinRenderer::new(config, file).render_file(file);
    let (kotlin, error_map) = unit.resolve();
    debug!(
        bytes = kotlin.len(),
        entries = error_map.len(),
        "rendered file"
    );
    RenderedFile { kotlin, error_map }
}
