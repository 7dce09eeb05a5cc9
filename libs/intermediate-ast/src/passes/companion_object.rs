use crate::ast::Statement;
use crate::fold::{walk_statement, AstFold};

/// Moves static members of classes, structs and enums into a companion
/// object placed after the instance members.
#[derive(Debug, Default)]
pub struct StaticMembersToCompanionObject;

/// Split `members` into instance members and (un-flagged) static members.
fn extract_static_members(members: Vec<Statement>) -> Vec<Statement> {
    let mut instance_members = Vec::new();
    let mut static_members = Vec::new();

    for member in members {
        match member {
            Statement::FunctionDeclaration(mut data) if data.is_static => {
                data.is_static = false;
                static_members.push(Statement::FunctionDeclaration(data));
            }
            Statement::VariableDeclaration(mut data) if data.is_static => {
                data.is_static = false;
                static_members.push(Statement::VariableDeclaration(data));
            }
            other => instance_members.push(other),
        }
    }

    if !static_members.is_empty() {
        instance_members.push(Statement::CompanionObject {
            members: static_members,
        });
    }
    instance_members
}

impl AstFold for StaticMembersToCompanionObject {
    fn fold_statement(&mut self, statement: Statement) -> Vec<Statement> {
        let statement = match walk_statement(self, statement) {
            Statement::ClassDeclaration {
                class_name,
                inherits,
                members,
            } => Statement::ClassDeclaration {
                class_name,
                inherits,
                members: extract_static_members(members),
            },
            Statement::StructDeclaration {
                struct_name,
                inherits,
                members,
            } => Statement::StructDeclaration {
                struct_name,
                inherits,
                members: extract_static_members(members),
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
                members: extract_static_members(members),
                is_implicit,
            },
            other => other,
        };
        vec![statement]
    }
}
