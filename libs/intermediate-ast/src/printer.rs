//! # AST Tree Printing
//!
//! [`PrintableAsTree`] implementations for statements and expressions, used
//! by diagnostics and by test failure output.

use crate::ast::*;
use tree_printer::{PrintableAsTree, PrintableTree};

fn statements_group(label: &str, statements: &[Statement]) -> Option<PrintableTree> {
    PrintableTree::group(label, statements)
}

fn expression_child(label: &str, expression: &Expression) -> PrintableTree {
    PrintableTree::new(label).with_child(expression.to_printable_tree())
}

fn flag(label: &str, value: bool) -> Option<PrintableTree> {
    value.then(|| PrintableTree::leaf(label))
}

impl PrintableAsTree for Statement {
    fn tree_label(&self) -> String {
        self.name().to_string()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        let children: Vec<Option<PrintableTree>> = match self {
            Statement::Expression(expression) => vec![Some(expression.to_printable_tree())],
            Statement::ImportDeclaration { module_name } => {
                vec![Some(PrintableTree::leaf(module_name.as_str()))]
            }
            Statement::TypealiasDeclaration {
                identifier,
                type_name,
                is_implicit,
            } => vec![
                flag("implicit", *is_implicit),
                Some(PrintableTree::field("identifier", identifier)),
                Some(PrintableTree::field("type", type_name)),
            ],
            Statement::ClassDeclaration {
                class_name,
                inherits,
                members,
            }
            | Statement::StructDeclaration {
                struct_name: class_name,
                inherits,
                members,
            } => vec![
                Some(PrintableTree::leaf(class_name.as_str())),
                PrintableTree::group("inherits", inherits),
                statements_group("members", members),
            ],
            Statement::CompanionObject { members } => {
                members.iter().map(|member| Some(member.to_printable_tree())).collect()
            }
            Statement::EnumDeclaration {
                access,
                enum_name,
                inherits,
                elements,
                members,
                is_implicit,
            } => vec![
                flag("implicit", *is_implicit),
                PrintableTree::optional_field("access", access.as_deref()),
                Some(PrintableTree::leaf(enum_name.as_str())),
                PrintableTree::group("inherits", inherits),
                PrintableTree::group("elements", elements),
                statements_group("members", members),
            ],
            Statement::ProtocolDeclaration {
                protocol_name,
                members,
            } => vec![
                Some(PrintableTree::leaf(protocol_name.as_str())),
                statements_group("members", members),
            ],
            Statement::FunctionDeclaration(data) => data.tree_children().into_iter().map(Some).collect(),
            Statement::VariableDeclaration(data) => data.tree_children().into_iter().map(Some).collect(),
            Statement::Do { statements } | Statement::Defer { statements } => {
                vec![statements_group("statements", statements)]
            }
            Statement::Catch {
                variable_declaration,
                statements,
            } => vec![
                variable_declaration
                    .as_ref()
                    .map(|declaration| PrintableTree::with_children("variableDeclaration", declaration.tree_children())),
                statements_group("statements", statements),
            ],
            Statement::ForEach {
                collection,
                variable,
                statements,
            } => vec![
                Some(expression_child("variable", variable)),
                Some(expression_child("collection", collection)),
                statements_group("statements", statements),
            ],
            Statement::While {
                expression,
                statements,
            } => vec![
                Some(expression_child("condition", expression)),
                statements_group("statements", statements),
            ],
            Statement::If(data) => data.tree_children().into_iter().map(Some).collect(),
            Statement::Switch { expression, cases } => vec![
                Some(expression_child("expression", expression)),
                PrintableTree::group("cases", cases),
            ],
            Statement::Throw { expression } => vec![Some(expression.to_printable_tree())],
            Statement::Return { expression } => {
                vec![expression.as_ref().map(PrintableAsTree::to_printable_tree)]
            }
            Statement::Assignment {
                left_hand_side,
                right_hand_side,
            } => vec![
                Some(left_hand_side.to_printable_tree()),
                Some(right_hand_side.to_printable_tree()),
            ],
            Statement::Break | Statement::Continue | Statement::Error => Vec::new(),
        };
        children.into_iter().flatten().collect()
    }
}

impl PrintableAsTree for FunctionDeclarationData {
    fn tree_label(&self) -> String {
        "functionDeclaration".to_string()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        let parameters: Vec<PrintableTree> = self
            .parameters
            .iter()
            .map(|parameter| {
                PrintableTree::new(format!("{}: {}", parameter.label, parameter.type_name))
                    .with_optional_child(PrintableTree::optional_field("api label", parameter.api_label.as_deref()))
                    .with_optional_child(
                        parameter
                            .value
                            .as_ref()
                            .map(|value| expression_child("default value", value)),
                    )
            })
            .collect();

        [
            PrintableTree::optional_field("extends", self.extends_type.as_deref()),
            flag("implicit", self.is_implicit),
            flag("static", self.is_static),
            flag("mutating", self.is_mutating),
            PrintableTree::optional_field("access", self.access.as_deref()),
            Some(PrintableTree::field("prefix", &self.prefix)),
            (!parameters.is_empty()).then(|| PrintableTree::with_children("parameters", parameters)),
            Some(PrintableTree::field("return type", &self.return_type)),
            Some(PrintableTree::field("type", &self.function_type)),
            PrintableTree::group("generic types", &self.generic_types),
            self.statements
                .as_ref()
                .and_then(|statements| statements_group("statements", statements)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl PrintableAsTree for VariableDeclarationData {
    fn tree_label(&self) -> String {
        "variableDeclaration".to_string()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        [
            PrintableTree::optional_field("extends", self.extends_type.as_deref()),
            flag("implicit", self.is_implicit),
            flag("static", self.is_static),
            Some(PrintableTree::leaf(if self.is_let { "let" } else { "var" })),
            PrintableTree::optional_field("access", self.access.as_deref()),
            Some(PrintableTree::leaf(self.identifier.as_str())),
            Some(PrintableTree::leaf(self.type_name.as_str())),
            self.expression
                .as_ref()
                .map(|expression| expression_child("expression", expression)),
            self.getter
                .as_ref()
                .map(|getter| PrintableTree::with_children("getter", getter.tree_children())),
            self.setter
                .as_ref()
                .map(|setter| PrintableTree::with_children("setter", setter.tree_children())),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl PrintableAsTree for IfStatementData {
    fn tree_label(&self) -> String {
        if self.is_guard { "guardStatement" } else { "ifStatement" }.to_string()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        let conditions: Vec<PrintableTree> = self
            .conditions
            .iter()
            .map(|condition| match condition {
                IfCondition::Condition(expression) => expression.to_printable_tree(),
                IfCondition::Declaration(declaration) => declaration.to_printable_tree(),
            })
            .collect();

        [
            (!conditions.is_empty()).then(|| PrintableTree::with_children("conditions", conditions)),
            statements_group("statements", &self.statements),
            self.else_statement
                .as_ref()
                .map(|else_statement| PrintableTree::new("else").with_child(else_statement.to_printable_tree())),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl PrintableAsTree for EnumElement {
    fn tree_label(&self) -> String {
        self.name.clone()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        let mut children: Vec<PrintableTree> = self
            .associated_values
            .iter()
            .map(|value| PrintableTree::field(&value.label, &value.type_name))
            .collect();
        if let Some(raw_value) = &self.raw_value {
            children.push(expression_child("raw value", raw_value));
        }
        children
    }
}

impl PrintableAsTree for SwitchCase {
    fn tree_label(&self) -> String {
        if self.expressions.is_empty() { "default" } else { "case" }.to_string()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        [
            PrintableTree::group("expressions", &self.expressions),
            statements_group("statements", &self.statements),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl PrintableAsTree for Expression {
    fn tree_label(&self) -> String {
        self.name().to_string()
    }

    fn tree_children(&self) -> Vec<PrintableTree> {
        let children: Vec<Option<PrintableTree>> = match self {
            Expression::Template { pattern, matches } => {
                let mut children = vec![Some(PrintableTree::field("pattern", format!("\"{}\"", pattern)))];
                children.extend(
                    matches
                        .iter()
                        .map(|(name, expression)| Some(expression_child(name, expression))),
                );
                children
            }
            Expression::Parentheses { expression }
            | Expression::ForceValue { expression }
            | Expression::Optional { expression } => vec![Some(expression.to_printable_tree())],
            Expression::DeclarationReference(data) => vec![
                Some(PrintableTree::leaf(data.identifier.as_str())),
                Some(PrintableTree::leaf(data.type_name.as_str())),
                flag("isStandardLibrary", data.is_standard_library),
                flag("implicit", data.is_implicit),
            ],
            Expression::TypeExpression { type_name } => vec![Some(PrintableTree::leaf(type_name.as_str()))],
            Expression::Subscript {
                subscripted_expression,
                index_expression,
                type_name,
            } => vec![
                Some(PrintableTree::field("type", type_name)),
                Some(expression_child("subscriptedExpression", subscripted_expression)),
                Some(expression_child("indexExpression", index_expression)),
            ],
            Expression::Array { elements, type_name } => vec![
                Some(PrintableTree::field("type", type_name)),
                PrintableTree::group("elements", elements),
            ],
            Expression::Dictionary {
                keys,
                values,
                type_name,
            } => vec![
                Some(PrintableTree::field("type", type_name)),
                PrintableTree::group("keys", keys),
                PrintableTree::group("values", values),
            ],
            Expression::Dot {
                left_expression,
                right_expression,
            } => vec![
                Some(expression_child("left", left_expression)),
                Some(expression_child("right", right_expression)),
            ],
            Expression::BinaryOperator {
                left_expression,
                right_expression,
                operator_symbol,
                type_name,
            } => vec![
                Some(PrintableTree::field("type", type_name)),
                Some(expression_child("left", left_expression)),
                Some(PrintableTree::field("operator", operator_symbol)),
                Some(expression_child("right", right_expression)),
            ],
            Expression::PrefixUnary {
                expression,
                operator_symbol,
                type_name,
            }
            | Expression::PostfixUnary {
                expression,
                operator_symbol,
                type_name,
            } => vec![
                Some(PrintableTree::field("type", type_name)),
                Some(PrintableTree::field("operator", operator_symbol)),
                Some(expression_child("expression", expression)),
            ],
            Expression::If {
                condition,
                true_expression,
                false_expression,
            } => vec![
                Some(expression_child("condition", condition)),
                Some(expression_child("trueExpression", true_expression)),
                Some(expression_child("falseExpression", false_expression)),
            ],
            Expression::Call(data) => vec![
                PrintableTree::optional_field("type", data.type_name.as_deref()),
                Some(expression_child("function", &data.function)),
                Some(expression_child("parameters", &data.parameters)),
            ],
            Expression::Closure {
                parameters,
                statements,
                type_name,
            } => vec![
                Some(PrintableTree::field("type", type_name)),
                (!parameters.is_empty()).then(|| {
                    PrintableTree::with_children(
                        "parameters",
                        parameters
                            .iter()
                            .map(|parameter| PrintableTree::field(&parameter.label, &parameter.type_name))
                            .collect(),
                    )
                }),
                statements_group("statements", statements),
            ],
            Expression::LiteralInt { value } => vec![Some(PrintableTree::leaf(value.to_string()))],
            Expression::LiteralUInt { value } => vec![Some(PrintableTree::leaf(value.to_string()))],
            Expression::LiteralDouble { value } => vec![Some(PrintableTree::leaf(value.to_string()))],
            Expression::LiteralFloat { value } => vec![Some(PrintableTree::leaf(value.to_string()))],
            Expression::LiteralBool { value } => vec![Some(PrintableTree::leaf(value.to_string()))],
            Expression::LiteralString { value } | Expression::LiteralCharacter { value } => {
                vec![Some(PrintableTree::leaf(format!("\"{}\"", value)))]
            }
            Expression::InterpolatedString { expressions } => {
                expressions.iter().map(|expression| Some(expression.to_printable_tree())).collect()
            }
            Expression::Tuple { pairs } => pairs
                .iter()
                .map(|pair| {
                    Some(expression_child(
                        pair.label.as_deref().unwrap_or("_"),
                        &pair.expression,
                    ))
                })
                .collect(),
            Expression::TupleShuffle {
                labels,
                indices,
                expressions,
            } => vec![
                PrintableTree::group("labels", labels),
                Some(PrintableTree::with_children(
                    "indices",
                    indices
                        .iter()
                        .map(|index| PrintableTree::leaf(format!("{:?}", index)))
                        .collect(),
                )),
                PrintableTree::group("expressions", expressions),
            ],
            Expression::Nil | Expression::Error => Vec::new(),
        };
        children.into_iter().flatten().collect()
    }
}
