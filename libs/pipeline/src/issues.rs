//! # Compiler Issues
//!
//! Errors and warnings collected while translating a run of files. Issues are
//! appended from parallel file tasks in any order and sorted by source path
//! and line before they are shown.
//!
//! ## Example
//!
//! ```rust
//! use intermediate_ast::SourceRange;
//! use std::collections::HashMap;
//! use transpiler_pipeline::issues::{CompilerIssue, IssueLog};
//!
//! let log = IssueLog::new();
//! log.record(
//!     CompilerIssue::error("unsupported statement")
//!         .with_source_path("/tmp/main.swift")
//!         .with_range(SourceRange::new(1, 5, 1, 7)),
//! );
//!
//! let sources = HashMap::from([("/tmp/main.swift".to_string(), "let abc = 1".to_string())]);
//! assert_eq!(
//!     log.render_issues(&sources),
//!     "/tmp/main.swift:1:5: error: unsupported statement\nlet abc = 1\n    ^~~\n"
//! );
//! ```

use intermediate_ast::SourceRange;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

// =============================================================================
// ISSUE
// =============================================================================

/// Severity of a compiler issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// An error or warning, optionally located in a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerIssue {
    pub severity: Severity,
    pub message: String,
    pub source_path: Option<String>,
    pub range: Option<SourceRange>,
    /// Pretty-printed raw node for context.
    pub tree: Option<String>,
}

impl CompilerIssue {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            source_path: None,
            range: None,
            tree: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    pub fn with_range(mut self, range: SourceRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_tree(mut self, tree: impl Into<String>) -> Self {
        self.tree = Some(tree.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Print the issue, followed by an underlined excerpt when `source` holds
    /// the line it points at.
    ///
    /// ## Parameters
    ///
    /// - `source`: Full text of the issue's source file, if available
    ///
    /// ## Returns
    ///
    /// One or more lines, each terminated by `\n`.
    pub fn render(&self, source: Option<&str>) -> String {
        let mut output = match (&self.source_path, &self.range) {
            (Some(path), Some(range)) => format!("{}:{}:{}: ", path, range.line_start, range.column_start),
            (Some(path), None) => format!("{}: ", path),
            (None, _) => String::new(),
        };
        output.push_str(&format!("{}: {}\n", self.severity, self.message));

        let excerpt = self.range.as_ref().zip(source).and_then(|(range, source)| {
            let line = source.lines().nth(range.line_start.checked_sub(1)?)?;
            Some(underline(line, range))
        });
        if let Some(excerpt) = excerpt {
            output.push_str(&excerpt);
        }

        if let Some(tree) = &self.tree {
            output.push_str(tree);
            if !tree.ends_with('\n') {
                output.push('\n');
            }
        }
        output
    }

    /// Sort key: issues with a path and a range come first, by path then
    /// line then column.
    fn order(&self, other: &Self) -> Ordering {
        let key = |issue: &Self| match (&issue.source_path, &issue.range) {
            (Some(path), Some(range)) => Some((path.clone(), range.line_start, range.column_start)),
            _ => None,
        };
        match (key(self), key(other)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// `line`, then a caret under the range start and tildes up to its end (or
/// to the end of the line for multi-line ranges).
fn underline(line: &str, range: &SourceRange) -> String {
    let start = range.column_start.max(1);
    let line_length = line.chars().count();
    let end = if range.line_end == range.line_start {
        range.column_end.max(start)
    } else {
        line_length.max(start)
    };

    let padding: String = line
        .chars()
        .chain(std::iter::repeat(' '))
        .take(start - 1)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    format!("{}\n{}^{}\n", line, padding, "~".repeat(end - start))
}

// =============================================================================
// ISSUE LOG
// =============================================================================

/// Append-only, thread-safe issue list.
#[derive(Debug, Default)]
pub struct IssueLog {
    issues: Mutex<Vec<CompilerIssue>>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an issue. Warnings are also logged at `warn` level.
    pub fn record(&self, issue: CompilerIssue) {
        match issue.severity {
            Severity::Warning => warn!(
                source_path = issue.source_path.as_deref(),
                message = %issue.message,
                "translation warning"
            ),
            Severity::Error => debug!(
                source_path = issue.source_path.as_deref(),
                message = %issue.message,
                "translation error recorded"
            ),
        }
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(issue);
    }

    pub fn len(&self) -> usize {
        self.issues.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(CompilerIssue::is_error)
    }

    /// Issues ordered by source path and line; unlocated issues last, in
    /// insertion order.
    pub fn sorted(&self) -> Vec<CompilerIssue> {
        let mut issues = self.issues.lock().unwrap_or_else(PoisonError::into_inner).clone();
        issues.sort_by(CompilerIssue::order);
        issues
    }

    /// Print every issue in sorted order.
    ///
    /// ## Parameters
    ///
    /// - `sources`: Source text keyed by path, used for excerpts
    pub fn render_issues(&self, sources: &HashMap<String, String>) -> String {
        self.sorted()
            .iter()
            .map(|issue| {
                let source = issue
                    .source_path
                    .as_ref()
                    .and_then(|path| sources.get(path))
                    .map(String::as_str);
                issue.render(source)
            })
            .collect()
    }
}
