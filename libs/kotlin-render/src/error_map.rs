//! # Error Map
//!
//! Associates ranges of generated Kotlin with the source ranges they were
//! rendered from, so diagnostics of the Kotlin compiler can be reported at
//! source positions.
//!
//! ## Sidecar Format
//!
//! ```text
//! /path/to/main.swift
//! 1:1:1:16:1:1:1:14
//! ```
//!
//! The first line is the source path; each further line holds
//! `outLineStart:outColStart:outLineEnd:outColEnd:srcLineStart:srcColStart:srcLineEnd:srcColEnd`.

use crate::error::ErrorMapError;
use crate::position::OutputPosition;
use config::constants::ERROR_MAP_SEPARATOR;
use intermediate_ast::SourceRange;
use serde::{Deserialize, Serialize};

/// One mapping. `output_end` is the position just past the last character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMapEntry {
    pub output_start: OutputPosition,
    pub output_end: OutputPosition,
    pub source: SourceRange,
}

impl ErrorMapEntry {
    fn contains(&self, position: OutputPosition) -> bool {
        self.output_start <= position && position < self.output_end
    }

    fn extent(&self) -> (usize, usize) {
        (
            self.output_end.line - self.output_start.line,
            self.output_end.column.abs_diff(self.output_start.column),
        )
    }
}

/// Ordered list of mappings, in the order their nodes finished rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorMap {
    entries: Vec<ErrorMapEntry>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ErrorMapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry. An entry with the same source position as the
    /// previous one widens that entry instead of adding a duplicate.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use intermediate_ast::SourceRange;
    /// use kotlin_render::error_map::{ErrorMap, ErrorMapEntry};
    /// use kotlin_render::position::OutputPosition;
    ///
    /// let source = SourceRange::new(3, 1, 3, 9);
    /// let mut map = ErrorMap::new();
    /// map.push(ErrorMapEntry {
    ///     output_start: OutputPosition::new(1, 1),
    ///     output_end: OutputPosition::new(1, 4),
    ///     source,
    /// });
    /// map.push(ErrorMapEntry {
    ///     output_start: OutputPosition::new(1, 4),
    ///     output_end: OutputPosition::new(1, 9),
    ///     source,
    /// });
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.entries()[0].output_end, OutputPosition::new(1, 9));
    /// ```
    pub fn push(&mut self, entry: ErrorMapEntry) {
        if let Some(previous) = self.entries.last_mut() {
            if previous.source.same_position(&entry.source) {
                previous.output_start = previous.output_start.min(entry.output_start);
                previous.output_end = previous.output_end.max(entry.output_end);
                return;
            }
        }
        self.entries.push(entry);
    }

    /// Source range of the innermost entry containing `line:column` of the
    /// generated text.
    pub fn source_range_at(&self, line: usize, column: usize) -> Option<SourceRange> {
        let position = OutputPosition::new(line, column);
        self.entries
            .iter()
            .filter(|entry| entry.contains(position))
            .min_by_key(|entry| entry.extent())
            .map(|entry| entry.source)
    }

    /// Serialize to the sidecar format.
    pub fn to_sidecar(&self, source_path: &str) -> String {
        let mut text = String::from(source_path);
        text.push('\n');
        for entry in &self.entries {
            let fields = [
                entry.output_start.line,
                entry.output_start.column,
                entry.output_end.line,
                entry.output_end.column,
                entry.source.line_start,
                entry.source.column_start,
                entry.source.line_end,
                entry.source.column_end,
            ];
            let line: Vec<String> = fields.iter().map(usize::to_string).collect();
            text.push_str(&line.join(&ERROR_MAP_SEPARATOR.to_string()));
            text.push('\n');
        }
        text
    }

    /// Read a sidecar back into its source path and map.
    ///
    /// Entries are taken as written; no coalescing is applied.
    pub fn parse_sidecar(text: &str) -> Result<(String, ErrorMap), ErrorMapError> {
        let mut lines = text.lines();
        let source_path = lines
            .next()
            .filter(|path| !path.is_empty())
            .ok_or(ErrorMapError::MissingSourcePath)?
            .to_string();

        let mut entries = Vec::new();
        for (index, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_number = index + 2;
            let fields = line
                .split(ERROR_MAP_SEPARATOR)
                .map(|field| {
                    field.trim().parse::<usize>().map_err(|_| ErrorMapError::InvalidNumber {
                        line: line_number,
                        field: field.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let [out_line_start, out_column_start, out_line_end, out_column_end, line_start, column_start, line_end, column_end] =
                fields[..]
            else {
                return Err(ErrorMapError::WrongFieldCount {
                    line: line_number,
                    found: fields.len(),
                });
            };

            entries.push(ErrorMapEntry {
                output_start: OutputPosition::new(out_line_start, out_column_start),
                output_end: OutputPosition::new(out_line_end, out_column_end),
                source: SourceRange::new(line_start, column_start, line_end, column_end),
            });
        }

        Ok((source_path, ErrorMap { entries }))
    }
}
