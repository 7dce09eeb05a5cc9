//! Errors that end the translation of a file or of a whole run.

use crate::filesystem::FileSystemError;
use dump_decoder::DecodeError;
use intermediate_ast::TranslationError;
use template_engine::TemplateError;
use thiserror::Error;

/// Failure of one pipeline stage for one file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("{source_path}: cannot decode dump: {error}")]
    Decode {
        source_path: String,
        #[source]
        error: DecodeError,
    },

    #[error("{source_path}: {error}")]
    Translation {
        source_path: String,
        #[source]
        error: TranslationError,
    },

    #[error("{source_path}: malformed templates: {error}")]
    Template {
        source_path: String,
        #[source]
        error: TemplateError,
    },

    #[error(transparent)]
    FileSystem(#[from] FileSystemError),
}

impl PipelineError {
    /// Path of the file whose translation failed.
    pub fn source_path(&self) -> Option<&str> {
        match self {
            PipelineError::Decode { source_path, .. }
            | PipelineError::Translation { source_path, .. }
            | PipelineError::Template { source_path, .. } => Some(source_path),
            PipelineError::FileSystem(_) => None,
        }
    }
}
