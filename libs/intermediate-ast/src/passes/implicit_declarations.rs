use crate::ast::Statement;
use crate::fold::{walk_statement, AstFold};

/// Drops declarations the compiler synthesized.
#[derive(Debug, Default)]
pub struct RemoveImplicitDeclarations;

fn is_implicit(statement: &Statement) -> bool {
    match statement {
        Statement::FunctionDeclaration(data) => data.is_implicit,
        Statement::VariableDeclaration(data) => data.is_implicit,
        Statement::TypealiasDeclaration { is_implicit, .. } | Statement::EnumDeclaration { is_implicit, .. } => {
            *is_implicit
        }
        _ => false,
    }
}

impl AstFold for RemoveImplicitDeclarations {
    fn fold_statement(&mut self, statement: Statement) -> Vec<Statement> {
        if is_implicit(&statement) {
            return Vec::new();
        }
        vec![walk_statement(self, statement)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FunctionDeclarationData, TranslatedFile};

    #[test]
    fn test_implicit_members_are_dropped() {
        let implicit = Statement::FunctionDeclaration(FunctionDeclarationData {
            prefix: "init".to_string(),
            is_implicit: true,
            ..FunctionDeclarationData::default()
        });
        let explicit = Statement::FunctionDeclaration(FunctionDeclarationData {
            prefix: "run".to_string(),
            ..FunctionDeclarationData::default()
        });
        let file = TranslatedFile {
            declarations: vec![Statement::StructDeclaration {
                struct_name: "A".to_string(),
                inherits: Vec::new(),
                members: vec![implicit, explicit.clone()],
            }],
            statements: Vec::new(),
        };

        let folded = RemoveImplicitDeclarations.fold_file(file);
        let Statement::StructDeclaration { members, .. } = &folded.declarations[0] else {
            panic!("expected a struct");
        };
        assert_eq!(members, &vec![explicit]);
    }
}
