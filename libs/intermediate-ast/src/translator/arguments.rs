//! Call arguments: parenthesized values, labeled tuples and tuple shuffles.

use super::dump_text::{parse_integer, parse_tuple_components};
use super::Translator;
use crate::ast::{Expression, LabeledExpression, TupleShuffleIndex};
use crate::error::TranslationError;
use crate::unexpected_structure;
use dump_decoder::RawNode;

/// Shuffle source index of a defaulted parameter.
const ABSENT_INDEX: i128 = -1;
/// Shuffle source index of a variadic parameter.
const VARIADIC_INDEX: i128 = -2;

/// `None` for the spellings of a missing label.
fn normalize_label(label: &str) -> Option<String> {
    match label.trim() {
        "" | "_" | "''" => None,
        label => Some(label.to_string()),
    }
}

/// Parse a bracketed integer list such as `[0, -1, -2]`.
fn parse_index_list(text: &str) -> Option<Vec<i128>> {
    let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
    inner
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_integer)
        .collect()
}

impl Translator {
    /// Translate the argument node of a call into a `Tuple` or
    /// `TupleShuffle` expression.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use config::DumpDialect;
    /// use dump_decoder::decode;
    /// use intermediate_ast::{Expression, Translator};
    ///
    /// let raw = decode("(tuple_expr type='(x: Int)' names=x (integer_literal_expr type='Int' value=1))").unwrap();
    /// let arguments = Translator::new(DumpDialect::Modern).translate_arguments(&raw).unwrap();
    /// let Expression::Tuple { pairs } = arguments else { panic!() };
    /// assert_eq!(pairs[0].label.as_deref(), Some("x"));
    /// ```
    pub fn translate_arguments(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        self.translate_arguments_inner(node)
            .map_err(|error| self.limit_tree(error))
    }

    pub(crate) fn translate_arguments_inner(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        match node.name.as_str() {
            "Parentheses Expression" => {
                let inner = node
                    .subtree_at(0)
                    .ok_or_else(|| unexpected_structure!(node, "empty parentheses"))?;
                Ok(Expression::Tuple {
                    pairs: vec![LabeledExpression {
                        label: None,
                        expression: self.translate_expression(inner)?,
                    }],
                })
            }
            "Tuple Expression" => self.translate_tuple(node),
            "Tuple Shuffle Expression" if node.attribute("elements").is_some() => self.translate_tuple_shuffle(node),
            "Tuple Shuffle Expression" => {
                let inner = node
                    .subtree_at(0)
                    .ok_or_else(|| unexpected_structure!(node, "tuple shuffle without a tuple"))?;
                self.translate_arguments_inner(inner)
            }
            _ => Err(unexpected_structure!(node, "expected call arguments")),
        }
    }

    /// A tuple whose labels come from the comma-separated `names` attribute.
    pub(super) fn translate_tuple(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let names: Vec<Option<String>> = node
            .attribute("names")
            .map(|names| names.split(',').map(normalize_label).collect())
            .unwrap_or_default();

        let pairs = node
            .subtrees
            .iter()
            .enumerate()
            .map(|(index, element)| {
                Ok(LabeledExpression {
                    label: names.get(index).cloned().flatten(),
                    expression: self.translate_expression(element)?,
                })
            })
            .collect::<Result<Vec<_>, TranslationError>>()?;

        Ok(Expression::Tuple { pairs })
    }

    /// Arguments the compiler reordered, defaulted or packed into a
    /// variadic. Labels come from the shuffled tuple type.
    fn translate_tuple_shuffle(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let elements = node
            .attribute("elements")
            .and_then(parse_index_list)
            .ok_or_else(|| unexpected_structure!(node, "malformed shuffle elements"))?;
        let variadic_count = node
            .attribute("variadic_sources")
            .and_then(parse_index_list)
            .map_or(0, |sources| sources.len());

        let indices = elements
            .iter()
            .map(|index| match *index {
                ABSENT_INDEX => TupleShuffleIndex::Absent,
                VARIADIC_INDEX => TupleShuffleIndex::Variadic { count: variadic_count },
                _ => TupleShuffleIndex::Present,
            })
            .collect();

        let labels = node
            .attribute("type")
            .map(parse_tuple_components)
            .unwrap_or_default()
            .into_iter()
            .map(|component| component.label)
            .collect();

        let source = node
            .subtree_at(0)
            .ok_or_else(|| unexpected_structure!(node, "tuple shuffle without a tuple"))?;
        let expressions = match source.name.as_str() {
            "Tuple Expression" => source
                .subtrees
                .iter()
                .map(|element| self.translate_expression(element))
                .collect::<Result<Vec<_>, _>>()?,
            "Parentheses Expression" => {
                let inner = source
                    .subtree_at(0)
                    .ok_or_else(|| unexpected_structure!(source, "empty parentheses"))?;
                vec![self.translate_expression(inner)?]
            }
            _ => vec![self.translate_expression(source)?],
        };

        Ok(Expression::TupleShuffle {
            labels,
            indices,
            expressions,
        })
    }
}
