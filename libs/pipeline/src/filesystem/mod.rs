//! Filesystem abstractions used to read dumps.
//!
//! Tests and embedders use the in-memory implementation; command-line
//! drivers read from disk through [`DiskFilesystem`].

use std::collections::HashMap;
use std::io::ErrorKind;
use thiserror::Error;

/// Minimal filesystem trait supporting dump retrieval.
///
/// # Examples
/// ```
/// use transpiler_pipeline::filesystem::{FileSystem, InMemoryFilesystem};
/// let fs = InMemoryFilesystem::default();
/// assert!(fs.read_to_string("main.swift.ast").is_err());
/// ```
pub trait FileSystem {
    /// Reads an entire file into memory.
    fn read_to_string(&self, path: &str) -> Result<String, FileSystemError>;
}

/// Error raised when filesystem operations fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileSystemError {
    /// The requested path could not be found.
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// The file exists but could not be read as UTF-8 text.
    #[error("cannot read {path}: {message}")]
    Unreadable { path: String, message: String },
}

/// In-memory filesystem intended for tests and embedding.
///
/// # Examples
/// ```
/// use transpiler_pipeline::filesystem::{FileSystem, InMemoryFilesystem};
/// let mut fs = InMemoryFilesystem::default();
/// fs.insert("main.swift.ast", "(source_file \"main.swift\")");
/// assert!(fs.read_to_string("main.swift.ast").unwrap().starts_with("(source_file"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryFilesystem {
    files: HashMap<String, String>,
}

impl InMemoryFilesystem {
    /// Inserts or replaces a file entry.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl FileSystem for InMemoryFilesystem {
    fn read_to_string(&self, path: &str) -> Result<String, FileSystemError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FileSystemError::NotFound { path: path.into() })
    }
}

/// Reads files from the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFilesystem;

impl FileSystem for DiskFilesystem {
    fn read_to_string(&self, path: &str) -> Result<String, FileSystemError> {
        std::fs::read_to_string(path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => FileSystemError::NotFound { path: path.into() },
            _ => FileSystemError::Unreadable {
                path: path.into(),
                message: error.to_string(),
            },
        })
    }
}
