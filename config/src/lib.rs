//! # Config Crate
//!
//! Centralized configuration for the dump-to-Kotlin translation pipeline.
//! Grammar tokens, template-library conventions and rendering defaults are
//! defined once here so that every crate of the pipeline agrees on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_INDENTATION, TEMPLATES_FUNCTION_NAME};
//! use config::TranslationConfig;
//!
//! let config = TranslationConfig::default();
//! assert_eq!(config.indentation, DEFAULT_INDENTATION);
//! assert!(!config.stop_at_first_error);
//! assert_eq!(TEMPLATES_FUNCTION_NAME, "transpilationTemplates");
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure configuration, usable from every layer

pub mod constants;
mod translation;

pub use translation::{DumpDialect, TranslationConfig};
