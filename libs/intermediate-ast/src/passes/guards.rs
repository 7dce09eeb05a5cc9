use crate::ast::{Expression, IfCondition, IfStatementData};
use crate::fold::{walk_if_statement, AstFold};

/// Turns `guard !x else { ... }` into `if x { ... }`.
#[derive(Debug, Default)]
pub struct DoubleNegativesInGuards;

impl AstFold for DoubleNegativesInGuards {
    fn fold_if_statement(&mut self, data: IfStatementData) -> IfStatementData {
        let mut data = walk_if_statement(self, data);
        if !data.is_guard {
            return data;
        }

        let negated = match data.conditions.as_slice() {
            [IfCondition::Condition(Expression::PrefixUnary {
                expression,
                operator_symbol,
                ..
            })] if operator_symbol == "!" => Some((**expression).clone()),
            _ => None,
        };
        if let Some(condition) = negated {
            data.conditions = vec![IfCondition::Condition(condition)];
            data.is_guard = false;
        }
        data
    }
}
