//! # Transpiler Pipeline
//!
//! Drives whole files through the translator: each dump is decoded,
//! translated to the intermediate AST, rewritten by templates, normalized and
//! rendered to Kotlin with its error map.
//!
//! ## Architecture
//!
//! ```text
//! TranslationContext (config, template registry, issue log)
//!     ├── load_templates(templates dump)
//!     └── translate_files([dump, ...])  ── rayon ──▶ translate_dump per file
//! ```
//!
//! Decode and structural errors either end the run at the first failure or
//! are collected as issues while translation continues, depending on
//! [`config::TranslationConfig::stop_at_first_error`].
//!
//! ## Example
//!
//! ```rust
//! use config::TranslationConfig;
//! use transpiler_pipeline::{DumpInput, TranslationContext};
//!
//! let context = TranslationContext::new(TranslationConfig::default());
//! let outputs = context
//!     .translate_files(&[DumpInput::new("/tmp/broken.swift", "(source_file")])
//!     .unwrap();
//! assert!(outputs[0].is_none());
//! assert!(context.issues().has_errors());
//! ```

pub mod context;
pub mod error;
pub mod filesystem;
pub mod issues;

pub use context::{DumpFile, DumpInput, FileOutput, TranslationContext};
pub use error::PipelineError;
pub use filesystem::{DiskFilesystem, FileSystem, FileSystemError, InMemoryFilesystem};
pub use issues::{CompilerIssue, IssueLog, Severity};
