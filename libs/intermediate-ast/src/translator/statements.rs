//! Control-flow statement rules.

use super::declarations::named_pattern;
use super::dump_text::{node_type, parse_integer};
use super::Translator;
use crate::ast::{
    DeclarationReferenceData, Expression, IfCondition, IfStatementData, LabeledExpression, Statement,
    SwitchCase, VariableDeclarationData,
};
use crate::error::TranslationError;
use crate::unexpected_structure;
use dump_decoder::RawNode;

fn first_expression_child(node: &RawNode) -> Option<&RawNode> {
    node.subtrees
        .iter()
        .find(|child| child.name.ends_with("Expression") || child.name == "Inject Into Optional")
}

impl Translator {
    // =========================================================================
    // LOOPS
    // =========================================================================

    pub(super) fn translate_for_each(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        let pattern = node
            .subtrees
            .iter()
            .find(|child| child.name.starts_with("Pattern"))
            .ok_or_else(|| unexpected_structure!(node, "for-each without a loop pattern"))?;
        let variable = pattern_expression(pattern)
            .ok_or_else(|| unexpected_structure!(pattern, "unsupported loop pattern"))?;

        let collection_node = first_expression_child(node)
            .ok_or_else(|| unexpected_structure!(node, "for-each without a collection"))?;

        Ok(Statement::ForEach {
            collection: self.translate_expression(collection_node)?,
            variable,
            statements: self.translate_body(node)?,
        })
    }

    pub(super) fn translate_while(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        let condition = first_expression_child(node)
            .ok_or_else(|| unexpected_structure!(node, "while without a condition"))?;

        Ok(Statement::While {
            expression: self.translate_expression(condition)?,
            statements: self.translate_body(node)?,
        })
    }

    // =========================================================================
    // CONDITIONALS
    // =========================================================================

    /// Conditions come before the first body; an "If Statement" or a second
    /// body after it is the `else` branch.
    pub(super) fn translate_if(&self, node: &RawNode, is_guard: bool) -> Result<IfStatementData, TranslationError> {
        let body_index = node
            .subtrees
            .iter()
            .position(|child| child.name == "Brace Statement")
            .ok_or_else(|| unexpected_structure!(node, "conditional without a body"))?;

        let conditions = self.translate_conditions(&node.subtrees[..body_index])?;
        let statements = self.translate_scope(&node.subtrees[body_index].subtrees)?;

        let else_statement = match node.subtrees.get(body_index + 1) {
            None => None,
            Some(child) if child.name == "If Statement" => Some(Box::new(self.translate_if(child, false)?)),
            Some(child) if child.name == "Brace Statement" => Some(Box::new(IfStatementData {
                conditions: Vec::new(),
                statements: self.translate_scope(&child.subtrees)?,
                else_statement: None,
                is_guard: false,
            })),
            Some(child) => {
                return Err(unexpected_structure!(child, "unexpected else branch"));
            }
        };

        Ok(IfStatementData {
            conditions,
            statements,
            else_statement,
            is_guard,
        })
    }

    fn translate_conditions(&self, nodes: &[RawNode]) -> Result<Vec<IfCondition>, TranslationError> {
        let mut conditions = Vec::new();
        let mut index = 0;

        while index < nodes.len() {
            let node = &nodes[index];
            if let Some((identifier, type_name, is_let)) = binding_pattern(node) {
                let value = nodes
                    .get(index + 1)
                    .ok_or_else(|| unexpected_structure!(node, "optional binding without a value"))?;
                conditions.push(IfCondition::Declaration(VariableDeclarationData {
                    identifier,
                    type_name,
                    expression: Some(self.translate_expression(value)?),
                    is_let,
                    ..VariableDeclarationData::default()
                }));
                index += 2;
            } else {
                conditions.push(IfCondition::Condition(self.translate_expression(node)?));
                index += 1;
            }
        }

        Ok(conditions)
    }

    pub(super) fn translate_switch(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        let subject = node
            .subtree_at(0)
            .filter(|child| child.name != "Case Statement")
            .ok_or_else(|| unexpected_structure!(node, "switch without a subject"))?;

        let cases = node
            .subtrees_named("Case Statement")
            .map(|case| self.translate_case(case))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Statement::Switch {
            expression: self.translate_expression(subject)?,
            cases,
        })
    }

    /// A `default` case (flagged, or labeled with `_`) has no expressions.
    fn translate_case(&self, node: &RawNode) -> Result<SwitchCase, TranslationError> {
        let statements = self.translate_body(node)?;

        let is_default = node.has_flag("default")
            || node.subtrees_named("Case Label Item").any(|item| {
                item.has_flag("default")
                    || item
                        .subtree_at(0)
                        .map_or(false, |pattern| pattern.name == "Pattern Any")
            });
        if is_default {
            return Ok(SwitchCase {
                expressions: Vec::new(),
                statements,
            });
        }

        let expressions = node
            .subtrees_named("Case Label Item")
            .map(|item| self.translate_case_label(item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SwitchCase { expressions, statements })
    }

    fn translate_case_label(&self, item: &RawNode) -> Result<Expression, TranslationError> {
        let pattern = item
            .subtree_at(0)
            .ok_or_else(|| unexpected_structure!(item, "case label without a pattern"))?;

        match pattern.name.as_str() {
            "Pattern Expression" => {
                let matched = pattern
                    .subtree_at(0)
                    .ok_or_else(|| unexpected_structure!(pattern, "expression pattern without an expression"))?;
                // `case 1:` is checked as `1 ~= subject`; keep the pattern side.
                let translated = self.translate_expression(matched)?;
                Ok(match translated {
                    Expression::BinaryOperator {
                        left_expression,
                        operator_symbol,
                        ..
                    } if operator_symbol == "~=" => *left_expression,
                    other => other,
                })
            }
            "Pattern Enum Element" => {
                let element = pattern
                    .standalone_at(0)
                    .ok_or_else(|| unexpected_structure!(pattern, "enum pattern without an element"))?;
                let type_name = node_type(pattern)
                    .ok_or_else(|| unexpected_structure!(pattern, "enum pattern without a type"))?;
                let member = element.rsplit('.').next().unwrap_or(element);
                Ok(Expression::Dot {
                    left_expression: Box::new(Expression::TypeExpression {
                        type_name: type_name.clone(),
                    }),
                    right_expression: Box::new(Expression::DeclarationReference(
                        DeclarationReferenceData::new(member, type_name),
                    )),
                })
            }
            _ => Err(unexpected_structure!(pattern, "unsupported case pattern")),
        }
    }

    // =========================================================================
    // ERROR HANDLING
    // =========================================================================

    pub(super) fn translate_do(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        Ok(Statement::Do {
            statements: self.translate_body(node)?,
        })
    }

    /// A do-catch becomes a `Do` followed by one `Catch` per clause.
    pub(super) fn translate_do_catch(&self, node: &RawNode) -> Result<Vec<Statement>, TranslationError> {
        let mut result = vec![self.translate_do(node)?];

        for clause in node.subtrees_named("Catch") {
            let variable_declaration = clause
                .subtrees
                .iter()
                .filter(|child| child.name.starts_with("Pattern"))
                .find_map(find_named_pattern)
                .and_then(named_pattern)
                .map(|(identifier, type_name)| VariableDeclarationData {
                    identifier,
                    type_name,
                    is_let: true,
                    ..VariableDeclarationData::default()
                });

            result.push(Statement::Catch {
                variable_declaration,
                statements: self.translate_body(clause)?,
            });
        }

        Ok(result)
    }

    pub(super) fn translate_defer(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        let body_owner = node.subtree("Function Declaration").unwrap_or(node);
        Ok(Statement::Defer {
            statements: self.translate_body(body_owner)?,
        })
    }

    pub(super) fn translate_throw(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        let thrown = node
            .subtree_at(0)
            .ok_or_else(|| unexpected_structure!(node, "throw without an expression"))?;
        Ok(Statement::Throw {
            expression: self.translate_expression(thrown)?,
        })
    }

    pub(super) fn translate_return(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        Ok(Statement::Return {
            expression: node
                .subtree_at(0)
                .map(|child| self.translate_expression(child))
                .transpose()?,
        })
    }

    /// `_ = value` is kept as an expression statement.
    pub(super) fn translate_assignment(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        let (Some(left), Some(right)) = (node.subtree_at(0), node.subtree_at(1)) else {
            return Err(unexpected_structure!(node, "assignment needs two operands"));
        };

        let right_hand_side = self.translate_expression(right)?;
        if left.name == "Discard Assignment Expression" {
            return Ok(Statement::Expression(right_hand_side));
        }

        Ok(Statement::Assignment {
            left_hand_side: self.translate_expression(left)?,
            right_hand_side,
        })
    }
}

/// Identifier, type and `let`-ness of an optional-binding pattern.
fn binding_pattern(node: &RawNode) -> Option<(String, String, bool)> {
    match node.name.as_str() {
        "Pattern Optional Some" => binding_pattern(node.subtree_at(0)?),
        "Pattern Let" => named_pattern(node.subtree_at(0)?).map(|(name, type_name)| (name, type_name, true)),
        "Pattern Variable" => named_pattern(node.subtree_at(0)?).map(|(name, type_name)| (name, type_name, false)),
        _ => None,
    }
}

fn find_named_pattern(node: &RawNode) -> Option<&RawNode> {
    if node.name == "Pattern Named" {
        return Some(node);
    }
    node.subtrees.iter().find_map(find_named_pattern)
}

/// Loop variable of a for-each pattern as an expression.
fn pattern_expression(pattern: &RawNode) -> Option<Expression> {
    match pattern.name.as_str() {
        "Pattern Named" => {
            let identifier = pattern.standalone_at(0)?;
            let type_name = node_type(pattern).unwrap_or_default();
            Some(Expression::DeclarationReference(DeclarationReferenceData::new(
                identifier, type_name,
            )))
        }
        "Pattern Any" => Some(Expression::DeclarationReference(DeclarationReferenceData::new(
            "_",
            node_type(pattern).unwrap_or_default(),
        ))),
        "Pattern Typed" | "Pattern Let" | "Pattern Variable" | "Pattern Parentheses" => {
            pattern_expression(pattern.subtree_at(0)?)
        }
        "Pattern Tuple" => {
            let pairs = pattern
                .subtrees
                .iter()
                .map(|element| {
                    pattern_expression(element).map(|expression| LabeledExpression {
                        label: None,
                        expression,
                    })
                })
                .collect::<Option<Vec<_>>>()?;
            Some(Expression::Tuple { pairs })
        }
        _ => None,
    }
}

/// Index of a tuple field named `#n` in a standalone attribute.
pub(super) fn tuple_field_index(node: &RawNode) -> Option<usize> {
    node.standalone_attributes
        .iter()
        .find_map(|attribute| attribute.strip_prefix('#'))
        .and_then(parse_integer)
        .and_then(|index| usize::try_from(index).ok())
}
