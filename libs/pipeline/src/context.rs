//! # Translation Context
//!
//! State shared by every file of a run: the configuration, the template
//! registry and the issue log. One context is built per run and borrowed by
//! each file task, so files can be translated in parallel.
//!
//! ## Per-file stages
//!
//! ```text
//! dump → substitute path → decode → translate → record own templates
//!      → replace templates → normalize → render → (kotlin, error map)
//! ```

use crate::error::PipelineError;
use crate::filesystem::FileSystem;
use crate::issues::{CompilerIssue, IssueLog};
use config::TranslationConfig;
use dump_decoder::{decode, substitute_placeholder, DecodeError};
use intermediate_ast::passes::normalize;
use intermediate_ast::{TranslatedFile, TranslationError, Translator};
use kotlin_render::{render_file, ErrorMap};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use template_engine::{record_templates, replace_templates, Template, TemplateError, TemplateRegistry};
use tracing::{debug, info};

// =============================================================================
// INPUTS AND OUTPUTS
// =============================================================================

/// A dump already produced by the compiler, with the path of its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpInput {
    pub source_path: String,
    pub dump: String,
}

impl DumpInput {
    pub fn new(source_path: impl Into<String>, dump: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            dump: dump.into(),
        }
    }
}

/// A dump stored on a [`FileSystem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpFile {
    pub source_path: String,
    pub dump_path: String,
}

impl DumpFile {
    pub fn new(source_path: impl Into<String>, dump_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            dump_path: dump_path.into(),
        }
    }
}

/// Kotlin output of one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutput {
    pub source_path: String,
    pub kotlin: String,
    pub error_map: ErrorMap,
}

impl FileOutput {
    /// Error map in its sidecar file format.
    pub fn error_map_sidecar(&self) -> String {
        self.error_map.to_sidecar(&self.source_path)
    }
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Configuration, templates and issues of one translation run.
///
/// ## Example
///
/// ```rust
/// use config::{DumpDialect, TranslationConfig};
/// use transpiler_pipeline::TranslationContext;
///
/// let dump = r#"(source_file "<<SOURCE_PATH>>"
///   (top_level_code_decl range=[<<SOURCE_PATH>>:1:1 - line:1:6]
///     (brace_stmt implicit range=[<<SOURCE_PATH>>:1:1 - line:1:6]
///       (return_stmt range=[<<SOURCE_PATH>>:1:1 - line:1:1]))))"#;
///
/// let context = TranslationContext::new(TranslationConfig::default().with_dialect(DumpDialect::Legacy));
/// let output = context.translate_dump("/tmp/main.swift", dump).unwrap();
/// assert_eq!(output.kotlin, "fun main(args: Array<String>) {\n    return\n}\n");
/// assert!(context.issues().is_empty());
/// ```
#[derive(Debug)]
pub struct TranslationContext {
    config: TranslationConfig,
    translator: Translator,
    registry: TemplateRegistry,
    issues: IssueLog,
}

impl TranslationContext {
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            translator: Translator::new(config.dialect).with_horizontal_limit(config.horizontal_limit),
            config,
            registry: TemplateRegistry::new(),
            issues: IssueLog::new(),
        }
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn issues(&self) -> &IssueLog {
        &self.issues
    }

    /// Record the templates declared in a templates file, unless templates
    /// were already loaded.
    ///
    /// ## Returns
    ///
    /// `Ok(true)` when the file was read, `Ok(false)` when the registry was
    /// already populated.
    pub fn load_templates(&self, source_path: &str, dump: &str) -> Result<bool, PipelineError> {
        self.registry.load_if_empty(|| {
            let file = self.decode_and_translate(source_path, dump)?;
            let (_, templates) = record_templates(file).map_err(|error| self.template_error(source_path, error))?;
            Ok(templates)
        })
    }

    /// Translate one dump to Kotlin.
    ///
    /// Templates declared in the file itself take priority over the loaded
    /// ones. Structural errors end the file under the stop-at-first-error
    /// policy; otherwise they are recorded as issues and the failing
    /// top-level nodes render as error placeholders. Every failure is also
    /// recorded in the issue log.
    pub fn translate_dump(&self, source_path: &str, dump: &str) -> Result<FileOutput, PipelineError> {
        let file = self.decode_and_translate(source_path, dump)?;
        let (file, local) = record_templates(file).map_err(|error| self.template_error(source_path, error))?;

        let mut templates: Vec<Template> = local.into_iter().rev().collect();
        templates.extend(self.registry.snapshot().iter().cloned());
        let file = normalize(replace_templates(file, &templates));
        debug!(source_path, templates = templates.len(), "applied templates");

        let rendered = render_file(&file, &self.config);
        Ok(FileOutput {
            source_path: source_path.to_string(),
            kotlin: rendered.kotlin,
            error_map: rendered.error_map,
        })
    }

    /// Translate many dumps in parallel.
    ///
    /// ## Returns
    ///
    /// One entry per input, in input order. Under the stop-at-first-error
    /// policy the first failure is returned instead; otherwise failed files
    /// are `None` and their errors are in the issue log.
    pub fn translate_files(&self, inputs: &[DumpInput]) -> Result<Vec<Option<FileOutput>>, PipelineError> {
        self.run_all(inputs, |input| self.translate_dump(&input.source_path, &input.dump))
    }

    /// Read dumps from `filesystem` and translate them in parallel, like
    /// [`TranslationContext::translate_files`].
    pub fn translate_from_filesystem<F>(
        &self,
        filesystem: &F,
        files: &[DumpFile],
    ) -> Result<Vec<Option<FileOutput>>, PipelineError>
    where
        F: FileSystem + Sync,
    {
        self.run_all(files, |file| {
            let dump = filesystem.read_to_string(&file.dump_path).map_err(|error| {
                self.issues
                    .record(CompilerIssue::error(error.to_string()).with_source_path(&file.source_path));
                PipelineError::from(error)
            })?;
            self.translate_dump(&file.source_path, &dump)
        })
    }

    // =========================================================================
    // STAGES
    // =========================================================================

    fn decode_and_translate(&self, source_path: &str, dump: &str) -> Result<TranslatedFile, PipelineError> {
        let dump = substitute_placeholder(dump, source_path);
        let raw = decode(&dump).map_err(|error| self.decode_error(source_path, error))?;
        debug!(source_path, "decoded dump");

        if self.config.stop_at_first_error {
            return self
                .translator
                .translate_file(&raw)
                .map_err(|error| self.translation_error(source_path, error));
        }

        let (file, errors) = self
            .translator
            .translate_file_collecting_errors(&raw)
            .map_err(|error| self.translation_error(source_path, error))?;
        for error in &errors {
            self.issues.record(translation_issue(source_path, error));
        }
        debug!(source_path, errors = errors.len(), "translated dump");
        Ok(file)
    }

    fn run_all<T, F>(&self, items: &[T], translate: F) -> Result<Vec<Option<FileOutput>>, PipelineError>
    where
        T: Sync,
        F: Fn(&T) -> Result<FileOutput, PipelineError> + Sync,
    {
        let outputs: Vec<Option<FileOutput>> = if self.config.stop_at_first_error {
            let results: Vec<Result<FileOutput, PipelineError>> = items.par_iter().map(&translate).collect();
            // The first failure in input order wins, whichever task finished first.
            results
                .into_iter()
                .map(|result| result.map(Some))
                .collect::<Result<_, _>>()?
        } else {
            items.par_iter().map(|item| translate(item).ok()).collect()
        };

        info!(
            files = outputs.len(),
            failed = outputs.iter().filter(|output| output.is_none()).count(),
            issues = self.issues.len(),
            "translation finished"
        );
        Ok(outputs)
    }

    // =========================================================================
    // ERROR RECORDING
    // =========================================================================

    fn decode_error(&self, source_path: &str, error: DecodeError) -> PipelineError {
        self.issues.record(
            CompilerIssue::error(format!("cannot decode dump: {}", error)).with_source_path(source_path),
        );
        PipelineError::Decode {
            source_path: source_path.to_string(),
            error,
        }
    }

    fn translation_error(&self, source_path: &str, error: TranslationError) -> PipelineError {
        self.issues.record(translation_issue(source_path, &error));
        PipelineError::Translation {
            source_path: source_path.to_string(),
            error,
        }
    }

    fn template_error(&self, source_path: &str, error: TemplateError) -> PipelineError {
        self.issues
            .record(CompilerIssue::error(error.to_string()).with_source_path(source_path));
        PipelineError::Template {
            source_path: source_path.to_string(),
            error,
        }
    }
}

fn translation_issue(source_path: &str, error: &TranslationError) -> CompilerIssue {
    let issue = CompilerIssue::error(format!("{} (in {})", error.message(), error.node_name()))
        .with_source_path(source_path)
        .with_tree(error.tree());
    match error.range() {
        Some(range) => issue.with_range(range),
        None => issue,
    }
}

#[cfg(test)]
mod tests;
