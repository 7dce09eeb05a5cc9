//! # Template Replacement
//!
//! Rewrites every expression matching a template into a
//! [`Expression::Template`]. Templates are tried front to back and the
//! first match wins; captured sub-expressions are rewritten in turn, so
//! templates nest.

use crate::matching::match_template;
use crate::registry::Template;
use intermediate_ast::fold::{walk_expression, AstFold};
use intermediate_ast::{Expression, TranslatedFile};

/// Fold that applies a prioritized template list.
///
/// ## Example
///
/// ```rust
/// use intermediate_ast::fold::AstFold;
/// use intermediate_ast::Expression;
/// use template_engine::{ReplaceTemplates, Template};
///
/// let templates = vec![Template {
///     pattern: Expression::LiteralInt { value: 1 },
///     replacement: "ONE".to_string(),
/// }];
/// let replaced = ReplaceTemplates::new(&templates).fold_expression(Expression::LiteralInt { value: 1 });
/// assert!(matches!(replaced, Expression::Template { pattern, .. } if pattern == "ONE"));
/// ```
#[derive(Debug)]
pub struct ReplaceTemplates<'a> {
    templates: &'a [Template],
}

impl<'a> ReplaceTemplates<'a> {
    pub fn new(templates: &'a [Template]) -> Self {
        Self { templates }
    }
}

impl AstFold for ReplaceTemplates<'_> {
    fn fold_expression(&mut self, expression: Expression) -> Expression {
        if let Expression::Template { .. } = expression {
            return expression;
        }

        let templates = self.templates;
        let found = templates.iter().find_map(|template| {
            match_template(&template.pattern, &expression).map(|captures| (template, captures))
        });

        match found {
            Some((template, captures)) => Expression::Template {
                pattern: template.replacement.clone(),
                matches: captures
                    .into_iter()
                    .map(|(name, captured)| (name, self.fold_expression(captured)))
                    .collect(),
            },
            None => walk_expression(self, expression),
        }
    }
}

/// Apply `templates` to every expression of `file`.
pub fn replace_templates(file: TranslatedFile, templates: &[Template]) -> TranslatedFile {
    if templates.is_empty() {
        return file;
    }
    ReplaceTemplates::new(templates).fold_file(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use intermediate_ast::{CallExpressionData, DeclarationReferenceData, LabeledExpression, Statement};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn reference(identifier: &str, type_name: &str) -> Expression {
        Expression::DeclarationReference(DeclarationReferenceData::new(identifier, type_name))
    }

    fn count_of(receiver: Expression) -> Expression {
        Expression::Dot {
            left_expression: Box::new(receiver),
            right_expression: Box::new(reference("count", "Int")),
        }
    }

    fn print_call(argument: Expression) -> Expression {
        Expression::Call(CallExpressionData {
            function: Box::new(reference("print", "(Any) -> ()")),
            parameters: Box::new(Expression::Tuple {
                pairs: vec![LabeledExpression {
                    label: None,
                    expression: argument,
                }],
            }),
            type_name: Some("()".to_string()),
            range: None,
        })
    }

    fn templates() -> Vec<Template> {
        vec![
            Template {
                pattern: count_of(reference("_array", "[Any]")),
                replacement: "_array.size".to_string(),
            },
            Template {
                pattern: print_call(reference("_x", "Any")),
                replacement: "println(_x)".to_string(),
            },
        ]
    }

    #[test]
    fn test_captures_are_replaced_recursively() {
        let expression = print_call(count_of(reference("numbers", "[Int]")));
        let replaced = ReplaceTemplates::new(&templates()).fold_expression(expression);

        let inner = Expression::Template {
            pattern: "_array.size".to_string(),
            matches: BTreeMap::from([("_array".to_string(), reference("numbers", "[Int]"))]),
        };
        assert_eq!(
            replaced,
            Expression::Template {
                pattern: "println(_x)".to_string(),
                matches: BTreeMap::from([("_x".to_string(), inner)]),
            }
        );
    }

    #[test]
    fn test_unmatched_expressions_are_walked() {
        let file = TranslatedFile {
            declarations: Vec::new(),
            statements: vec![Statement::Return {
                expression: Some(Expression::Parentheses {
                    expression: Box::new(count_of(reference("names", "[String]"))),
                }),
            }],
        };

        let replaced = replace_templates(file, &templates());
        let Statement::Return {
            expression: Some(Expression::Parentheses { expression }),
        } = &replaced.statements[0]
        else {
            panic!("expected a parenthesized return");
        };
        assert!(matches!(expression.as_ref(), Expression::Template { pattern, .. } if pattern == "_array.size"));
    }

    #[test]
    fn test_first_template_wins() {
        let mut list = templates();
        list.insert(
            0,
            Template {
                pattern: count_of(reference("_array", "[Any]")),
                replacement: "_array.count()".to_string(),
            },
        );
        let replaced = ReplaceTemplates::new(&list).fold_expression(count_of(reference("xs", "[Int]")));
        assert!(matches!(replaced, Expression::Template { pattern, .. } if pattern == "_array.count()"));
    }
}
