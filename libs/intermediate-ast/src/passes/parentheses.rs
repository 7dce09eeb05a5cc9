use crate::ast::{CallExpressionData, Expression, IfCondition, IfStatementData, Statement};
use crate::fold::{walk_expression, walk_if_statement, walk_statement, AstFold};

/// Unwraps parentheses that cannot change how an expression parses.
#[derive(Debug, Default)]
pub struct RemoveRedundantParentheses;

fn is_atomic(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::Parentheses { .. }
            | Expression::DeclarationReference(_)
            | Expression::TypeExpression { .. }
            | Expression::Call(_)
            | Expression::Template { .. }
            | Expression::Subscript { .. }
            | Expression::Array { .. }
            | Expression::Dictionary { .. }
            | Expression::Dot { .. }
            | Expression::LiteralInt { .. }
            | Expression::LiteralUInt { .. }
            | Expression::LiteralDouble { .. }
            | Expression::LiteralFloat { .. }
            | Expression::LiteralBool { .. }
            | Expression::LiteralString { .. }
            | Expression::LiteralCharacter { .. }
            | Expression::Nil
            | Expression::InterpolatedString { .. }
    )
}

/// Remove every layer of parentheses around `expression`.
fn unwrap_all(expression: Expression) -> Expression {
    match expression {
        Expression::Parentheses { expression } => unwrap_all(*expression),
        other => other,
    }
}

impl AstFold for RemoveRedundantParentheses {
    fn fold_expression(&mut self, expression: Expression) -> Expression {
        match walk_expression(self, expression) {
            Expression::Parentheses { expression } if is_atomic(&expression) => unwrap_all(*expression),
            Expression::Call(data) => {
                let parameters = match *data.parameters {
                    Expression::Tuple { mut pairs } => {
                        for pair in &mut pairs {
                            pair.expression = unwrap_all(std::mem::replace(&mut pair.expression, Expression::Nil));
                        }
                        Expression::Tuple { pairs }
                    }
                    other => other,
                };
                Expression::Call(CallExpressionData {
                    parameters: Box::new(parameters),
                    ..data
                })
            }
            other => other,
        }
    }

    fn fold_statement(&mut self, statement: Statement) -> Vec<Statement> {
        let statement = match walk_statement(self, statement) {
            Statement::While { expression, statements } => Statement::While {
                expression: unwrap_all(expression),
                statements,
            },
            Statement::Switch { expression, cases } => Statement::Switch {
                expression: unwrap_all(expression),
                cases,
            },
            Statement::Return {
                expression: Some(expression),
            } => Statement::Return {
                expression: Some(unwrap_all(expression)),
            },
            other => other,
        };
        vec![statement]
    }

    fn fold_if_statement(&mut self, data: IfStatementData) -> IfStatementData {
        let data = walk_if_statement(self, data);
        IfStatementData {
            conditions: data
                .conditions
                .into_iter()
                .map(|condition| match condition {
                    IfCondition::Condition(expression) => IfCondition::Condition(unwrap_all(expression)),
                    declaration => declaration,
                })
                .collect(),
            ..data
        }
    }
}
