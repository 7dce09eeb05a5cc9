//! # Translation Units
//!
//! Rendered output is built as a tree of text fragments and nested units
//! before it is flattened. A unit tagged with a source range produces one
//! error-map entry covering everything its children emitted, computed
//! bottom-up in a single pass by [`TranslationUnit::resolve`].

use crate::error_map::{ErrorMap, ErrorMapEntry};
use crate::position::PositionTracker;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use intermediate_ast::SourceRange;

/// A child of a [`TranslationUnit`].
#[derive(Debug, Clone, PartialEq)]
pub enum UnitPart {
    Text(String),
    Node(TranslationUnit),
}

/// A node of the output tree, optionally tagged with the source range it
/// was rendered from.
///
/// ## Example
///
/// ```rust
/// use intermediate_ast::SourceRange;
/// use kotlin_render::TranslationUnit;
///
/// let mut call = TranslationUnit::with_range(Some(SourceRange::new(2, 1, 2, 9)));
/// call.push_str("print(1)");
///
/// let mut line = TranslationUnit::new();
/// line.push_str("    ");
/// line.push_unit(call);
/// line.push_str("\n");
///
/// let (text, map) = line.resolve();
/// assert_eq!(text, "    print(1)\n");
/// assert_eq!(map.entries()[0].output_start.column, 5);
/// assert_eq!(map.entries()[0].output_end.column, 13);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationUnit {
    range: Option<SourceRange>,
    parts: Vec<UnitPart>,
}

impl TranslationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(range: Option<SourceRange>) -> Self {
        Self {
            range,
            parts: Vec::new(),
        }
    }

    /// A unit holding a single fragment.
    pub fn text(text: impl Into<String>) -> Self {
        let mut unit = Self::new();
        unit.push_str(text);
        unit
    }

    pub fn range(&self) -> Option<SourceRange> {
        self.range
    }

    pub fn parts(&self) -> &[UnitPart] {
        &self.parts
    }

    pub fn push_str(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.parts.push(UnitPart::Text(text));
        }
    }

    pub fn push_unit(&mut self, unit: TranslationUnit) {
        if !unit.parts.is_empty() {
            self.parts.push(UnitPart::Node(unit));
        }
    }

    /// Remove `suffix` from the end of the last part, if that part is a
    /// fragment ending with it. Nested units are never searched.
    ///
    /// ```rust
    /// use kotlin_render::TranslationUnit;
    ///
    /// let mut unit = TranslationUnit::new();
    /// unit.push_str("A,\n");
    /// unit.push_str("B,\n");
    /// assert!(unit.drop_last(",\n"));
    /// assert!(!unit.drop_last(";"));
    /// assert_eq!(unit.to_text(), "A,\nB");
    /// ```
    pub fn drop_last(&mut self, suffix: &str) -> bool {
        let Some(UnitPart::Text(text)) = self.parts.last_mut() else {
            return false;
        };
        if !text.ends_with(suffix) {
            return false;
        }
        text.truncate(text.len() - suffix.len());
        if text.is_empty() {
            self.parts.pop();
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The emitted text, without computing an error map.
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        self.write_text(&mut output);
        output
    }

    fn write_text(&self, output: &mut String) {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            for part in &self.parts {
                match part {
                    UnitPart::Text(text) => output.push_str(text),
                    UnitPart::Node(unit) => unit.write_text(output),
                }
            }
        })
    }

    /// Flatten the tree into its text and error map.
    pub fn resolve(&self) -> (String, ErrorMap) {
        let mut output = String::new();
        let mut tracker = PositionTracker::default();
        let mut map = ErrorMap::new();
        self.resolve_into(&mut output, &mut tracker, &mut map);
        (output, map)
    }

    fn resolve_into(&self, output: &mut String, tracker: &mut PositionTracker, map: &mut ErrorMap) {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            let start = tracker.position();
            for part in &self.parts {
                match part {
                    UnitPart::Text(text) => {
                        tracker.advance(text);
                        output.push_str(text);
                    }
                    UnitPart::Node(unit) => unit.resolve_into(output, tracker, map),
                }
            }
            let end = tracker.position();

            if let Some(source) = self.range {
                if start != end {
                    map.push(ErrorMapEntry {
                        output_start: start,
                        output_end: end,
                        source,
                    });
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::OutputPosition;
    use pretty_assertions::assert_eq;

    fn ranged(text: &str, range: SourceRange) -> TranslationUnit {
        let mut unit = TranslationUnit::with_range(Some(range));
        unit.push_str(text);
        unit
    }

    #[test]
    fn test_adjacent_nodes_with_the_same_range_coalesce() {
        let range = SourceRange::new(4, 2, 4, 10);
        let mut root = TranslationUnit::new();
        root.push_unit(ranged("first", range));
        root.push_unit(ranged("second", range));

        let (text, map) = root.resolve();
        assert_eq!(text, "firstsecond");
        assert_eq!(map.len(), 1);
        assert_eq!(map.entries()[0].output_start, OutputPosition::new(1, 1));
        assert_eq!(map.entries()[0].output_end, OutputPosition::new(1, 12));
    }

    #[test]
    fn test_children_are_recorded_before_parents() {
        let mut call = TranslationUnit::with_range(Some(SourceRange::new(1, 1, 1, 20)));
        call.push_str("f(\n");
        call.push_unit(ranged("x", SourceRange::new(1, 3, 1, 4)));
        call.push_str(")");

        let (text, map) = call.resolve();
        assert_eq!(text, "f(\nx)");
        assert_eq!(map.len(), 2);
        assert!(map.entries()[0].source.same_position(&SourceRange::new(1, 3, 1, 4)));
        assert_eq!(map.entries()[0].output_start, OutputPosition::new(2, 1));
        assert_eq!(map.entries()[1].output_start, OutputPosition::new(1, 1));
        assert_eq!(map.entries()[1].output_end, OutputPosition::new(2, 3));
    }

    #[test]
    fn test_drop_last_does_not_cross_fragments() {
        let mut unit = TranslationUnit::new();
        unit.push_str("a, ");
        unit.push_unit(TranslationUnit::text("b, "));
        assert!(!unit.drop_last(", "));

        unit.push_str(",");
        assert!(unit.drop_last(","));
        assert!(!unit.drop_last(","));
        assert_eq!(unit.to_text(), "a, b, ");
    }

    #[test]
    fn test_empty_ranged_nodes_are_not_recorded() {
        let mut root = TranslationUnit::new();
        root.push_str("x");
        root.push_unit(TranslationUnit::with_range(Some(SourceRange::new(1, 1, 1, 1))));
        let (_, map) = root.resolve();
        assert!(map.is_empty());
    }
}
