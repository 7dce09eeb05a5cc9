use crate::ast::Expression;
use crate::fold::{walk_expression, AstFold};

/// Operators spelled differently in Kotlin.
const RENAMED_OPERATORS: &[(&str, &str)] = &[("??", "?:"), ("...", ".."), ("..<", "until")];

/// Replaces operator symbols that have a different Kotlin spelling.
#[derive(Debug, Default)]
pub struct RenameOperators;

impl AstFold for RenameOperators {
    fn fold_expression(&mut self, expression: Expression) -> Expression {
        match walk_expression(self, expression) {
            Expression::BinaryOperator {
                left_expression,
                right_expression,
                operator_symbol,
                type_name,
            } => {
                let operator_symbol = RENAMED_OPERATORS
                    .iter()
                    .find(|(from, _)| *from == operator_symbol)
                    .map_or(operator_symbol, |(_, to)| to.to_string());
                Expression::BinaryOperator {
                    left_expression,
                    right_expression,
                    operator_symbol,
                    type_name,
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(operator_symbol: &str) -> Expression {
        Expression::BinaryOperator {
            left_expression: Box::new(Expression::LiteralInt { value: 0 }),
            right_expression: Box::new(Expression::LiteralInt { value: 3 }),
            operator_symbol: operator_symbol.to_string(),
            type_name: "Range<Int>".to_string(),
        }
    }

    #[test]
    fn test_range_operators_are_renamed() {
        assert_eq!(RenameOperators.fold_expression(binary("..<")), binary("until"));
        assert_eq!(RenameOperators.fold_expression(binary("...")), binary(".."));
        assert_eq!(RenameOperators.fold_expression(binary("+")), binary("+"));
    }
}
