use crate::ast::{FunctionDeclarationData, Statement, VariableDeclarationData};
use crate::fold::{walk_statement, AstFold};

/// Replaces a `description: String` property of a type with a `toString()`
/// function returning the same value.
#[derive(Debug, Default)]
pub struct DescriptionAsToString;

fn as_to_string(data: VariableDeclarationData) -> Statement {
    if data.identifier != "description" || data.type_name != "String" || data.setter.is_some() {
        return Statement::VariableDeclaration(data);
    }

    let statements = match (data.getter, data.expression) {
        (Some(getter), _) => getter.statements.unwrap_or_default(),
        (None, Some(expression)) => vec![Statement::Return {
            expression: Some(expression),
        }],
        (None, None) => return Statement::VariableDeclaration(VariableDeclarationData {
            getter: None,
            expression: None,
            ..data
        }),
    };

    Statement::FunctionDeclaration(FunctionDeclarationData {
        prefix: "toString".to_string(),
        return_type: "String".to_string(),
        function_type: "() -> String".to_string(),
        access: data.access,
        statements: Some(statements),
        range: data.range,
        ..FunctionDeclarationData::default()
    })
}

fn rewrite_members(members: Vec<Statement>) -> Vec<Statement> {
    members
        .into_iter()
        .map(|member| match member {
            Statement::VariableDeclaration(data) => as_to_string(data),
            other => other,
        })
        .collect()
}

impl AstFold for DescriptionAsToString {
    fn fold_statement(&mut self, statement: Statement) -> Vec<Statement> {
        let statement = match walk_statement(self, statement) {
            Statement::ClassDeclaration {
                class_name,
                inherits,
                members,
            } => Statement::ClassDeclaration {
                class_name,
                inherits,
                members: rewrite_members(members),
            },
            Statement::StructDeclaration {
                struct_name,
                inherits,
                members,
            } => Statement::StructDeclaration {
                struct_name,
                inherits,
                members: rewrite_members(members),
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
                elements,
                members: rewrite_members(members),
                is_implicit,
            },
            other => other,
        };
        vec![statement]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression;

    #[test]
    fn test_computed_description_becomes_to_string() {
        let getter = FunctionDeclarationData {
            prefix: "get".to_string(),
            statements: Some(vec![Statement::Return {
                expression: Some(Expression::LiteralString {
                    value: "A".to_string(),
                }),
            }]),
            ..FunctionDeclarationData::default()
        };
        let class = Statement::ClassDeclaration {
            class_name: "A".to_string(),
            inherits: vec!["CustomStringConvertible".to_string()],
            members: vec![Statement::VariableDeclaration(VariableDeclarationData {
                identifier: "description".to_string(),
                type_name: "String".to_string(),
                getter: Some(getter),
                ..VariableDeclarationData::default()
            })],
        };

        let folded = DescriptionAsToString.fold_statement(class);
        let [Statement::ClassDeclaration { members, .. }] = folded.as_slice() else {
            panic!("expected a class");
        };
        let Statement::FunctionDeclaration(function) = &members[0] else {
            panic!("expected a function");
        };
        assert_eq!(function.prefix, "toString");
        assert_eq!(function.return_type, "String");
        assert_eq!(function.statements.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_top_level_description_is_kept() {
        let variable = Statement::VariableDeclaration(VariableDeclarationData {
            identifier: "description".to_string(),
            type_name: "String".to_string(),
            expression: Some(Expression::LiteralString { value: "x".to_string() }),
            ..VariableDeclarationData::default()
        });
        assert_eq!(DescriptionAsToString.fold_statement(variable.clone()), vec![variable]);
    }
}
