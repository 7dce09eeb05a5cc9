//! # Template Matching
//!
//! Structural comparison of an expression against a template pattern. A
//! declaration reference in the pattern whose identifier starts with `_`
//! captures any expression of a compatible type; every other node must
//! match its counterpart variant by variant.

use crate::types::is_subtype;
use config::constants::{OPTIONAL_WILDCARD_TYPE_NAME, TEMPLATE_WILDCARD_PREFIX, WILDCARD_TYPE_NAMES};
use intermediate_ast::{DeclarationReferenceData, Expression, LabeledExpression, TupleShuffleIndex};
use std::collections::BTreeMap;

/// Captured sub-expressions, by wildcard name.
pub type Captures = BTreeMap<String, Expression>;

/// Match `expression` against `pattern`.
///
/// ## Returns
///
/// The captures on success, `None` when the shapes or types differ.
///
/// ## Example
///
/// ```rust
/// use intermediate_ast::{DeclarationReferenceData, Expression};
/// use template_engine::match_template;
///
/// let pattern = Expression::DeclarationReference(DeclarationReferenceData::new("_x", "Any"));
/// let captures = match_template(&pattern, &Expression::LiteralInt { value: 3 }).unwrap();
/// assert_eq!(captures["_x"], Expression::LiteralInt { value: 3 });
/// ```
pub fn match_template(pattern: &Expression, expression: &Expression) -> Option<Captures> {
    let mut captures = Captures::new();
    matches_pattern(pattern, expression, &mut captures).then_some(captures)
}

pub(crate) fn is_wildcard(pattern: &Expression) -> bool {
    matches!(pattern, Expression::DeclarationReference(data) if data.identifier.starts_with(TEMPLATE_WILDCARD_PREFIX))
}

fn matches_pattern(pattern: &Expression, expression: &Expression, captures: &mut Captures) -> bool {
    if let Expression::DeclarationReference(wildcard) = pattern {
        if wildcard.identifier.starts_with(TEMPLATE_WILDCARD_PREFIX) {
            return capture(wildcard, expression, captures);
        }
    }

    match (pattern, expression) {
        (Expression::DeclarationReference(pattern), Expression::DeclarationReference(expression)) => {
            pattern.identifier == expression.identifier && is_subtype(&expression.type_name, &pattern.type_name)
        }
        (Expression::TypeExpression { type_name: pattern }, Expression::TypeExpression { type_name }) => {
            is_subtype(type_name, pattern)
        }
        (Expression::TypeExpression { type_name }, Expression::DeclarationReference(reference))
            if reference.is_implicit =>
        {
            implicit_reference_matches_type(reference, type_name)
        }
        (Expression::Call(pattern), Expression::Call(expression)) => {
            matches_pattern(&pattern.function, &expression.function, captures)
                && matches_pattern(&pattern.parameters, &expression.parameters, captures)
                && optional_types_match(pattern.type_name.as_deref(), expression.type_name.as_deref())
        }
        (
            Expression::Dot {
                left_expression: pattern_left,
                right_expression: pattern_right,
            },
            Expression::Dot {
                left_expression,
                right_expression,
            },
        ) => {
            matches_pattern(pattern_left, left_expression, captures)
                && matches_pattern(pattern_right, right_expression, captures)
        }
        (
            Expression::BinaryOperator {
                left_expression: pattern_left,
                right_expression: pattern_right,
                operator_symbol: pattern_operator,
                type_name: pattern_type,
            },
            Expression::BinaryOperator {
                left_expression,
                right_expression,
                operator_symbol,
                type_name,
            },
        ) => {
            pattern_operator == operator_symbol
                && is_subtype(type_name, pattern_type)
                && matches_pattern(pattern_left, left_expression, captures)
                && matches_pattern(pattern_right, right_expression, captures)
        }
        (
            Expression::PrefixUnary {
                expression: pattern_inner,
                operator_symbol: pattern_operator,
                type_name: pattern_type,
            },
            Expression::PrefixUnary {
                expression: inner,
                operator_symbol,
                type_name,
            },
        )
        | (
            Expression::PostfixUnary {
                expression: pattern_inner,
                operator_symbol: pattern_operator,
                type_name: pattern_type,
            },
            Expression::PostfixUnary {
                expression: inner,
                operator_symbol,
                type_name,
            },
        ) => {
            pattern_operator == operator_symbol
                && is_subtype(type_name, pattern_type)
                && matches_pattern(pattern_inner, inner, captures)
        }
        (
            Expression::Subscript {
                subscripted_expression: pattern_subscripted,
                index_expression: pattern_index,
                type_name: pattern_type,
            },
            Expression::Subscript {
                subscripted_expression,
                index_expression,
                type_name,
            },
        ) => {
            is_subtype(type_name, pattern_type)
                && matches_pattern(pattern_subscripted, subscripted_expression, captures)
                && matches_pattern(pattern_index, index_expression, captures)
        }
        (Expression::Parentheses { expression: pattern_inner }, Expression::Parentheses { expression: inner })
        | (Expression::ForceValue { expression: pattern_inner }, Expression::ForceValue { expression: inner })
        | (Expression::Optional { expression: pattern_inner }, Expression::Optional { expression: inner }) => {
            matches_pattern(pattern_inner, inner, captures)
        }
        (
            Expression::Array {
                elements: pattern_elements,
                type_name: pattern_type,
            },
            Expression::Array { elements, type_name },
        ) => is_subtype(type_name, pattern_type) && all_match(pattern_elements, elements, captures),
        (
            Expression::Dictionary {
                keys: pattern_keys,
                values: pattern_values,
                type_name: pattern_type,
            },
            Expression::Dictionary { keys, values, type_name },
        ) => {
            is_subtype(type_name, pattern_type)
                && all_match(pattern_keys, keys, captures)
                && all_match(pattern_values, values, captures)
        }
        (Expression::Tuple { pairs: pattern_pairs }, Expression::Tuple { pairs }) => {
            pattern_pairs.len() == pairs.len()
                && pattern_pairs
                    .iter()
                    .zip(pairs)
                    .all(|(pattern_pair, pair)| pair_matches(pattern_pair, pair, captures))
        }
        (
            Expression::TupleShuffle {
                labels: pattern_labels,
                indices: pattern_indices,
                expressions: pattern_expressions,
            },
            Expression::TupleShuffle {
                labels,
                indices,
                expressions,
            },
        ) => {
            pattern_labels == labels
                && pattern_indices == indices
                && all_match(pattern_expressions, expressions, captures)
        }
        (Expression::Tuple { pairs }, Expression::TupleShuffle {
            labels,
            indices,
            expressions,
        }) => shuffle_matches_tuple(pairs, labels, indices, expressions, captures),
        (
            Expression::InterpolatedString {
                expressions: pattern_expressions,
            },
            Expression::InterpolatedString { expressions },
        ) => all_match(pattern_expressions, expressions, captures),
        (
            Expression::If {
                condition: pattern_condition,
                true_expression: pattern_true,
                false_expression: pattern_false,
            },
            Expression::If {
                condition,
                true_expression,
                false_expression,
            },
        ) => {
            matches_pattern(pattern_condition, condition, captures)
                && matches_pattern(pattern_true, true_expression, captures)
                && matches_pattern(pattern_false, false_expression, captures)
        }
        (Expression::LiteralInt { value: pattern }, Expression::LiteralInt { value }) => pattern == value,
        (Expression::LiteralUInt { value: pattern }, Expression::LiteralUInt { value }) => pattern == value,
        (Expression::LiteralDouble { value: pattern }, Expression::LiteralDouble { value }) => pattern == value,
        (Expression::LiteralFloat { value: pattern }, Expression::LiteralFloat { value }) => pattern == value,
        (Expression::LiteralBool { value: pattern }, Expression::LiteralBool { value }) => pattern == value,
        (Expression::LiteralString { value: pattern }, Expression::LiteralString { value })
        | (Expression::LiteralCharacter { value: pattern }, Expression::LiteralCharacter { value }) => {
            pattern == value
        }
        (Expression::Nil, Expression::Nil) => true,
        _ => false,
    }
}

/// Bind `expression` to the wildcard when its type fits. A repeated
/// wildcard must capture equal expressions.
fn capture(wildcard: &DeclarationReferenceData, expression: &Expression, captures: &mut Captures) -> bool {
    let fits = match expression.type_name() {
        Some(type_name) => is_subtype(&type_name, &wildcard.type_name),
        None => {
            WILDCARD_TYPE_NAMES.contains(&wildcard.type_name.as_str())
                || wildcard.type_name == OPTIONAL_WILDCARD_TYPE_NAME
                || wildcard.type_name.ends_with('?')
        }
    };
    if !fits {
        return false;
    }

    match captures.get(&wildcard.identifier) {
        Some(previous) => previous == expression,
        None => {
            captures.insert(wildcard.identifier.clone(), expression.clone());
            true
        }
    }
}

/// An implicit `self` of metatype `T.Type` matches a type expression for
/// `T`. Any other implicit reference is accepted as is.
fn implicit_reference_matches_type(reference: &DeclarationReferenceData, type_name: &str) -> bool {
    match reference.type_name.strip_suffix(".Type") {
        Some(instance_type) if reference.identifier == "self" => is_subtype(instance_type, type_name),
        _ => true,
    }
}

fn optional_types_match(pattern: Option<&str>, expression: Option<&str>) -> bool {
    match (pattern, expression) {
        (Some(pattern), Some(expression)) => is_subtype(expression, pattern),
        _ => true,
    }
}

fn all_match(patterns: &[Expression], expressions: &[Expression], captures: &mut Captures) -> bool {
    patterns.len() == expressions.len()
        && patterns
            .iter()
            .zip(expressions)
            .all(|(pattern, expression)| matches_pattern(pattern, expression, captures))
}

fn pair_matches(pattern: &LabeledExpression, pair: &LabeledExpression, captures: &mut Captures) -> bool {
    pattern.label == pair.label && matches_pattern(&pattern.expression, &pair.expression, captures)
}

/// A shuffle where every parameter is present in order is the same call as
/// a plain tuple with its labels.
fn shuffle_matches_tuple(
    pairs: &[LabeledExpression],
    labels: &[String],
    indices: &[TupleShuffleIndex],
    expressions: &[Expression],
    captures: &mut Captures,
) -> bool {
    let in_order = indices.iter().all(|index| *index == TupleShuffleIndex::Present);
    in_order
        && pairs.len() == labels.len()
        && pairs.len() == expressions.len()
        && pairs
            .iter()
            .zip(labels)
            .zip(expressions)
            .all(|((pair, label), expression)| {
                pair.label.as_deref().unwrap_or("") == label && matches_pattern(&pair.expression, expression, captures)
            })
}

#[cfg(test)]
mod tests {
    use super::*;
    use intermediate_ast::CallExpressionData;
    use pretty_assertions::assert_eq;

    fn reference(identifier: &str, type_name: &str) -> Expression {
        Expression::DeclarationReference(DeclarationReferenceData::new(identifier, type_name))
    }

    fn call(function: Expression, arguments: Vec<Expression>, type_name: &str) -> Expression {
        Expression::Call(CallExpressionData {
            function: Box::new(function),
            parameters: Box::new(Expression::Tuple {
                pairs: arguments
                    .into_iter()
                    .map(|expression| LabeledExpression { label: None, expression })
                    .collect(),
            }),
            type_name: Some(type_name.to_string()),
            range: None,
        })
    }

    fn method(receiver: Expression, name: &str, type_name: &str) -> Expression {
        Expression::Dot {
            left_expression: Box::new(receiver),
            right_expression: Box::new(reference(name, type_name)),
        }
    }

    #[test]
    fn test_append_pattern_captures_receiver_and_argument() {
        let pattern = call(
            method(reference("_array", "[Any]"), "append", "(Any) -> ()"),
            vec![reference("_x", "Any")],
            "()",
        );
        let expression = call(
            method(reference("numbers", "[Int]"), "append", "(Int) -> ()"),
            vec![Expression::LiteralInt { value: 4 }],
            "()",
        );

        let captures = match_template(&pattern, &expression).expect("should match");
        assert_eq!(captures.len(), 2);
        assert_eq!(captures["_array"], reference("numbers", "[Int]"));
        assert_eq!(captures["_x"], Expression::LiteralInt { value: 4 });
    }

    #[test]
    fn test_wildcard_type_must_fit() {
        let pattern = reference("_s", "String");
        assert!(match_template(&pattern, &Expression::LiteralInt { value: 1 }).is_none());
        assert!(match_template(&pattern, &Expression::LiteralString { value: "a".to_string() }).is_some());
        assert!(match_template(&pattern, &Expression::Nil).is_none());
        assert!(match_template(&reference("_o", "Int?"), &Expression::Nil).is_some());
    }

    #[test]
    fn test_repeated_wildcard_needs_equal_captures() {
        let pattern = Expression::BinaryOperator {
            left_expression: Box::new(reference("_a", "Int")),
            right_expression: Box::new(reference("_a", "Int")),
            operator_symbol: "+".to_string(),
            type_name: "Int".to_string(),
        };
        let same = Expression::BinaryOperator {
            left_expression: Box::new(reference("x", "Int")),
            right_expression: Box::new(reference("x", "Int")),
            operator_symbol: "+".to_string(),
            type_name: "Int".to_string(),
        };
        let different = Expression::BinaryOperator {
            left_expression: Box::new(reference("x", "Int")),
            right_expression: Box::new(reference("y", "Int")),
            operator_symbol: "+".to_string(),
            type_name: "Int".to_string(),
        };
        assert!(match_template(&pattern, &same).is_some());
        assert!(match_template(&pattern, &different).is_none());
    }

    #[test]
    fn test_non_wildcards_compare_exactly() {
        assert!(match_template(&reference("count", "Int"), &reference("count", "Int")).is_some());
        assert!(match_template(&reference("count", "Int"), &reference("size", "Int")).is_none());
        assert!(match_template(&reference("count", "Int"), &reference("count", "String")).is_none());
        assert!(match_template(&Expression::LiteralInt { value: 1 }, &Expression::LiteralInt { value: 2 }).is_none());
        assert!(match_template(&Expression::LiteralInt { value: 1 }, &Expression::LiteralUInt { value: 1 }).is_none());
    }

    #[test]
    fn test_implicit_self_matches_type_expression() {
        let pattern = Expression::TypeExpression {
            type_name: "Math".to_string(),
        };
        let implicit_self = Expression::DeclarationReference(DeclarationReferenceData {
            is_implicit: true,
            ..DeclarationReferenceData::new("self", "Math.Type")
        });
        let other_self = Expression::DeclarationReference(DeclarationReferenceData {
            is_implicit: true,
            ..DeclarationReferenceData::new("self", "Physics.Type")
        });
        assert!(match_template(&pattern, &implicit_self).is_some());
        assert!(match_template(&pattern, &other_self).is_none());
    }

    #[test]
    fn test_in_order_shuffle_matches_labeled_tuple() {
        let pattern = Expression::Tuple {
            pairs: vec![LabeledExpression {
                label: Some("separator".to_string()),
                expression: reference("_s", "String"),
            }],
        };
        let shuffle = Expression::TupleShuffle {
            labels: vec!["separator".to_string()],
            indices: vec![TupleShuffleIndex::Present],
            expressions: vec![Expression::LiteralString { value: ",".to_string() }],
        };
        assert!(match_template(&pattern, &shuffle).is_some());
    }
}
