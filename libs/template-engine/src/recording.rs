//! # Template Recording
//!
//! Reads templates out of the marker function of a translated file:
//!
//! ```swift
//! func transpilationTemplates() {
//!     var _array: [Any] = []
//!     var _x: Any = 0
//!
//!     _array.append(_x)
//!     "_array.add(_x)"
//! }
//! ```
//!
//! Variable declarations only introduce the wildcards and are skipped; the
//! remaining statements alternate between a pattern expression and its
//! replacement, a string literal or a `+` concatenation of string literals.
//! The marker function is removed from the file.

use crate::error::TemplateError;
use crate::matching::is_wildcard;
use crate::registry::Template;
use config::constants::TEMPLATES_FUNCTION_NAME;
use intermediate_ast::{Expression, FunctionDeclarationData, Statement, TranslatedFile};
use tracing::{debug, warn};

/// Extract the templates of `file`, in declaration order, and return the
/// file without its marker function.
///
/// ## Example
///
/// ```rust
/// use intermediate_ast::{Expression, FunctionDeclarationData, Statement, TranslatedFile};
/// use template_engine::record_templates;
///
/// let marker = FunctionDeclarationData {
///     prefix: "transpilationTemplates".to_string(),
///     statements: Some(vec![
///         Statement::Expression(Expression::LiteralInt { value: 1 }),
///         Statement::Expression(Expression::LiteralString { value: "one".to_string() }),
///     ]),
///     ..FunctionDeclarationData::default()
/// };
/// let file = TranslatedFile {
///     declarations: vec![Statement::FunctionDeclaration(marker)],
///     statements: Vec::new(),
/// };
///
/// let (file, templates) = record_templates(file).unwrap();
/// assert!(file.declarations.is_empty());
/// assert_eq!(templates[0].replacement, "one");
/// ```
pub fn record_templates(file: TranslatedFile) -> Result<(TranslatedFile, Vec<Template>), TemplateError> {
    let mut templates = Vec::new();
    let mut declarations = Vec::with_capacity(file.declarations.len());

    for declaration in file.declarations {
        match declaration {
            Statement::FunctionDeclaration(data) if is_marker(&data) => {
                templates.extend(templates_from_body(data.statements.unwrap_or_default())?);
            }
            other => declarations.push(other),
        }
    }

    if !templates.is_empty() {
        debug!(count = templates.len(), "recorded templates");
    }

    Ok((
        TranslatedFile {
            declarations,
            statements: file.statements,
        },
        templates,
    ))
}

fn is_marker(data: &FunctionDeclarationData) -> bool {
    data.prefix == TEMPLATES_FUNCTION_NAME && data.parameters.is_empty()
}

fn templates_from_body(statements: Vec<Statement>) -> Result<Vec<Template>, TemplateError> {
    let mut expressions = Vec::new();
    for (position, statement) in statements.into_iter().enumerate() {
        match statement {
            Statement::VariableDeclaration(_) => {}
            Statement::Expression(expression) => expressions.push(expression),
            other => {
                return Err(TemplateError::NotAnExpression {
                    position,
                    found: other.name(),
                })
            }
        }
    }

    let mut templates = Vec::with_capacity(expressions.len() / 2);
    let mut expressions = expressions.into_iter();
    let mut index = 0;
    while let Some(pattern) = expressions.next() {
        let replacement = expressions
            .next()
            .ok_or(TemplateError::MissingReplacement { index })?;
        let replacement = string_value(&replacement).ok_or(TemplateError::ReplacementNotString {
            index,
            found: replacement.name(),
        })?;

        if is_wildcard(&pattern) {
            warn!(index, "skipping template whose pattern is a bare wildcard");
        } else {
            templates.push(Template { pattern, replacement });
        }
        index += 1;
    }

    Ok(templates)
}

/// Value of a string literal, folding `+` concatenations and parentheses.
fn string_value(expression: &Expression) -> Option<String> {
    match expression {
        Expression::LiteralString { value } => Some(value.clone()),
        Expression::Parentheses { expression } => string_value(expression),
        Expression::BinaryOperator {
            left_expression,
            right_expression,
            operator_symbol,
            ..
        } if operator_symbol == "+" => {
            let mut value = string_value(left_expression)?;
            value.push_str(&string_value(right_expression)?);
            Some(value)
        }
        _ => None,
    }
}
