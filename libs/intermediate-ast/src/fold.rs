//! # AST Fold
//!
//! Owning tree rewriter. A pass implements [`AstFold`] and overrides the
//! hooks it cares about; the default hooks rebuild every node through the
//! `walk_*` functions, visiting children first to last.
//!
//! A statement hook returns a list, so a pass can drop a statement (empty
//! list) or split it into several.
//!
//! ## Example
//!
//! ```rust
//! use intermediate_ast::fold::{walk_expression, AstFold};
//! use intermediate_ast::Expression;
//!
//! struct NegateBools;
//!
//! impl AstFold for NegateBools {
//!     fn fold_expression(&mut self, expression: Expression) -> Expression {
//!         match walk_expression(self, expression) {
//!             Expression::LiteralBool { value } => Expression::LiteralBool { value: !value },
//!             other => other,
//!         }
//!     }
//! }
//!
//! let folded = NegateBools.fold_expression(Expression::LiteralBool { value: true });
//! assert_eq!(folded, Expression::LiteralBool { value: false });
//! ```

use crate::ast::*;

/// Tree rewriter over owned AST nodes.
pub trait AstFold {
    fn fold_file(&mut self, file: TranslatedFile) -> TranslatedFile {
        TranslatedFile {
            declarations: self.fold_statements(file.declarations),
            statements: self.fold_statements(file.statements),
        }
    }

    fn fold_statements(&mut self, statements: Vec<Statement>) -> Vec<Statement> {
        walk_statements(self, statements)
    }

    fn fold_statement(&mut self, statement: Statement) -> Vec<Statement> {
        vec![walk_statement(self, statement)]
    }

    fn fold_expression(&mut self, expression: Expression) -> Expression {
        walk_expression(self, expression)
    }

    fn fold_function_declaration(&mut self, data: FunctionDeclarationData) -> FunctionDeclarationData {
        walk_function_declaration(self, data)
    }

    fn fold_variable_declaration(&mut self, data: VariableDeclarationData) -> VariableDeclarationData {
        walk_variable_declaration(self, data)
    }

    fn fold_if_statement(&mut self, data: IfStatementData) -> IfStatementData {
        walk_if_statement(self, data)
    }
}

// =============================================================================
// STATEMENT WALKERS
// =============================================================================

pub fn walk_statements<F: AstFold + ?Sized>(fold: &mut F, statements: Vec<Statement>) -> Vec<Statement> {
    statements
        .into_iter()
        .flat_map(|statement| fold.fold_statement(statement))
        .collect()
}

pub fn walk_statement<F: AstFold + ?Sized>(fold: &mut F, statement: Statement) -> Statement {
    match statement {
        Statement::Expression(expression) => Statement::Expression(fold.fold_expression(expression)),
        Statement::ClassDeclaration {
            class_name,
            inherits,
            members,
        } => Statement::ClassDeclaration {
            class_name,
            inherits,
            members: fold.fold_statements(members),
        },
        Statement::CompanionObject { members } => Statement::CompanionObject {
            members: fold.fold_statements(members),
        },
        Statement::EnumDeclaration {
            access,
            enum_name,
            inherits,
            elements,
            members,
            is_implicit,
        } => Statement::EnumDeclaration {
            access,
            enum_name,
            inherits,
            elements: elements
                .into_iter()
                .map(|element| EnumElement {
                    raw_value: element.raw_value.map(|value| fold.fold_expression(value)),
                    ..element
                })
                .collect(),
            members: fold.fold_statements(members),
            is_implicit,
        },
        Statement::ProtocolDeclaration {
            protocol_name,
            members,
        } => Statement::ProtocolDeclaration {
            protocol_name,
            members: fold.fold_statements(members),
        },
        Statement::StructDeclaration {
            struct_name,
            inherits,
            members,
        } => Statement::StructDeclaration {
            struct_name,
            inherits,
            members: fold.fold_statements(members),
        },
        Statement::FunctionDeclaration(data) => {
            Statement::FunctionDeclaration(fold.fold_function_declaration(data))
        }
        Statement::VariableDeclaration(data) => {
            Statement::VariableDeclaration(fold.fold_variable_declaration(data))
        }
        Statement::Do { statements } => Statement::Do {
            statements: fold.fold_statements(statements),
        },
        Statement::Catch {
            variable_declaration,
            statements,
        } => Statement::Catch {
            variable_declaration: variable_declaration.map(|data| fold.fold_variable_declaration(data)),
            statements: fold.fold_statements(statements),
        },
        Statement::ForEach {
            collection,
            variable,
            statements,
        } => Statement::ForEach {
            collection: fold.fold_expression(collection),
            variable: fold.fold_expression(variable),
            statements: fold.fold_statements(statements),
        },
        Statement::While {
            expression,
            statements,
        } => Statement::While {
            expression: fold.fold_expression(expression),
            statements: fold.fold_statements(statements),
        },
        Statement::If(data) => Statement::If(fold.fold_if_statement(data)),
        Statement::Switch { expression, cases } => Statement::Switch {
            expression: fold.fold_expression(expression),
            cases: cases
                .into_iter()
                .map(|case| SwitchCase {
                    expressions: fold_expressions(fold, case.expressions),
                    statements: fold.fold_statements(case.statements),
                })
                .collect(),
        },
        Statement::Defer { statements } => Statement::Defer {
            statements: fold.fold_statements(statements),
        },
        Statement::Throw { expression } => Statement::Throw {
            expression: fold.fold_expression(expression),
        },
        Statement::Return { expression } => Statement::Return {
            expression: expression.map(|expression| fold.fold_expression(expression)),
        },
        Statement::Assignment {
            left_hand_side,
            right_hand_side,
        } => Statement::Assignment {
            left_hand_side: fold.fold_expression(left_hand_side),
            right_hand_side: fold.fold_expression(right_hand_side),
        },
        statement @ (Statement::ImportDeclaration { .. }
        | Statement::TypealiasDeclaration { .. }
        | Statement::Break
        | Statement::Continue
        | Statement::Error) => statement,
    }
}

pub fn walk_function_declaration<F: AstFold + ?Sized>(
    fold: &mut F,
    data: FunctionDeclarationData,
) -> FunctionDeclarationData {
    FunctionDeclarationData {
        parameters: data
            .parameters
            .into_iter()
            .map(|parameter| FunctionParameter {
                value: parameter.value.map(|value| fold.fold_expression(value)),
                ..parameter
            })
            .collect(),
        statements: data.statements.map(|statements| fold.fold_statements(statements)),
        ..data
    }
}

pub fn walk_variable_declaration<F: AstFold + ?Sized>(
    fold: &mut F,
    data: VariableDeclarationData,
) -> VariableDeclarationData {
    VariableDeclarationData {
        expression: data.expression.map(|expression| fold.fold_expression(expression)),
        getter: data.getter.map(|getter| fold.fold_function_declaration(getter)),
        setter: data.setter.map(|setter| fold.fold_function_declaration(setter)),
        ..data
    }
}

pub fn walk_if_statement<F: AstFold + ?Sized>(fold: &mut F, data: IfStatementData) -> IfStatementData {
    IfStatementData {
        conditions: data
            .conditions
            .into_iter()
            .map(|condition| match condition {
                IfCondition::Condition(expression) => IfCondition::Condition(fold.fold_expression(expression)),
                IfCondition::Declaration(declaration) => {
                    IfCondition::Declaration(fold.fold_variable_declaration(declaration))
                }
            })
            .collect(),
        statements: fold.fold_statements(data.statements),
        else_statement: data
            .else_statement
            .map(|else_statement| Box::new(fold.fold_if_statement(*else_statement))),
        is_guard: data.is_guard,
    }
}

// =============================================================================
// EXPRESSION WALKERS
// =============================================================================

fn fold_expressions<F: AstFold + ?Sized>(fold: &mut F, expressions: Vec<Expression>) -> Vec<Expression> {
    expressions
        .into_iter()
        .map(|expression| fold.fold_expression(expression))
        .collect()
}

fn fold_boxed<F: AstFold + ?Sized>(fold: &mut F, expression: Box<Expression>) -> Box<Expression> {
    Box::new(fold.fold_expression(*expression))
}

pub fn walk_expression<F: AstFold + ?Sized>(fold: &mut F, expression: Expression) -> Expression {
    match expression {
        Expression::Template { pattern, matches } => Expression::Template {
            pattern,
            matches: matches
                .into_iter()
                .map(|(name, expression)| (name, fold.fold_expression(expression)))
                .collect(),
        },
        Expression::Parentheses { expression } => Expression::Parentheses {
            expression: fold_boxed(fold, expression),
        },
        Expression::ForceValue { expression } => Expression::ForceValue {
            expression: fold_boxed(fold, expression),
        },
        Expression::Optional { expression } => Expression::Optional {
            expression: fold_boxed(fold, expression),
        },
        Expression::Subscript {
            subscripted_expression,
            index_expression,
            type_name,
        } => Expression::Subscript {
            subscripted_expression: fold_boxed(fold, subscripted_expression),
            index_expression: fold_boxed(fold, index_expression),
            type_name,
        },
        Expression::Array { elements, type_name } => Expression::Array {
            elements: fold_expressions(fold, elements),
            type_name,
        },
        Expression::Dictionary {
            keys,
            values,
            type_name,
        } => Expression::Dictionary {
            keys: fold_expressions(fold, keys),
            values: fold_expressions(fold, values),
            type_name,
        },
        Expression::Dot {
            left_expression,
            right_expression,
        } => Expression::Dot {
            left_expression: fold_boxed(fold, left_expression),
            right_expression: fold_boxed(fold, right_expression),
        },
        Expression::BinaryOperator {
            left_expression,
            right_expression,
            operator_symbol,
            type_name,
        } => Expression::BinaryOperator {
            left_expression: fold_boxed(fold, left_expression),
            right_expression: fold_boxed(fold, right_expression),
            operator_symbol,
            type_name,
        },
        Expression::PrefixUnary {
            expression,
            operator_symbol,
            type_name,
        } => Expression::PrefixUnary {
            expression: fold_boxed(fold, expression),
            operator_symbol,
            type_name,
        },
        Expression::PostfixUnary {
            expression,
            operator_symbol,
            type_name,
        } => Expression::PostfixUnary {
            expression: fold_boxed(fold, expression),
            operator_symbol,
            type_name,
        },
        Expression::If {
            condition,
            true_expression,
            false_expression,
        } => Expression::If {
            condition: fold_boxed(fold, condition),
            true_expression: fold_boxed(fold, true_expression),
            false_expression: fold_boxed(fold, false_expression),
        },
        Expression::Call(data) => Expression::Call(CallExpressionData {
            function: fold_boxed(fold, data.function),
            parameters: fold_boxed(fold, data.parameters),
            ..data
        }),
        Expression::Closure {
            parameters,
            statements,
            type_name,
        } => Expression::Closure {
            parameters,
            statements: fold.fold_statements(statements),
            type_name,
        },
        Expression::InterpolatedString { expressions } => Expression::InterpolatedString {
            expressions: fold_expressions(fold, expressions),
        },
        Expression::Tuple { pairs } => Expression::Tuple {
            pairs: pairs
                .into_iter()
                .map(|pair| LabeledExpression {
                    label: pair.label,
                    expression: fold.fold_expression(pair.expression),
                })
                .collect(),
        },
        Expression::TupleShuffle {
            labels,
            indices,
            expressions,
        } => Expression::TupleShuffle {
            labels,
            indices,
            expressions: fold_expressions(fold, expressions),
        },
        leaf @ (Expression::DeclarationReference(_)
        | Expression::TypeExpression { .. }
        | Expression::LiteralInt { .. }
        | Expression::LiteralUInt { .. }
        | Expression::LiteralDouble { .. }
        | Expression::LiteralFloat { .. }
        | Expression::LiteralBool { .. }
        | Expression::LiteralString { .. }
        | Expression::LiteralCharacter { .. }
        | Expression::Nil
        | Expression::Error) => leaf,
    }
}
