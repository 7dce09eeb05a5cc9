use super::{EnumKind, KotlinRenderer};
use crate::types::kotlin_type;
use crate::unit::TranslationUnit;
use config::constants::{ERROR_PLACEHOLDER, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use intermediate_ast::{Expression, IfCondition, IfStatementData, Statement, SwitchCase, VariableDeclarationData};

impl KotlinRenderer {
    // =========================================================================
    // STATEMENT LISTS
    // =========================================================================

    /// Render a statement list at `level`.
    ///
    /// A `Do` absorbs the `Catch` clauses following it, and a `Defer` wraps
    /// the rest of the list in `try`/`finally`.
    pub(super) fn statements(&self, statements: &[Statement], level: usize) -> TranslationUnit {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.statements_inner(statements, level)
        })
    }

    fn statements_inner(&self, statements: &[Statement], level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::new();
        let mut index = 0;

        while let Some(statement) = statements.get(index) {
            match statement {
                Statement::Defer { statements: deferred } => {
                    unit.push_unit(self.defer(deferred, &statements[index + 1..], level));
                    break;
                }
                Statement::Do { statements: body } => {
                    let catches = statements[index + 1..]
                        .iter()
                        .take_while(|next| matches!(next, Statement::Catch { .. }))
                        .count();
                    unit.push_unit(self.do_catch(body, &statements[index + 1..index + 1 + catches], level));
                    index += 1 + catches;
                }
                statement => {
                    unit.push_unit(self.statement(statement, level));
                    index += 1;
                }
            }
        }

        unit
    }

    /// Render one statement, indented, with its trailing newline.
    pub(super) fn statement(&self, statement: &Statement, level: usize) -> TranslationUnit {
        let indentation = self.indent(level);
        let mut unit = TranslationUnit::new();

        match statement {
            Statement::ImportDeclaration { .. } => return unit,
            Statement::TypealiasDeclaration {
                identifier,
                type_name,
                ..
            } => {
                unit.push_str(format!(
                    "{}typealias {} = {}\n",
                    indentation,
                    identifier,
                    kotlin_type(type_name)
                ));
            }
            Statement::ClassDeclaration {
                class_name,
                inherits,
                members,
            } => unit.push_unit(self.class_declaration(class_name, inherits, members, level)),
            Statement::StructDeclaration {
                struct_name,
                inherits,
                members,
            } => unit.push_unit(self.struct_declaration(struct_name, inherits, members, level)),
            Statement::EnumDeclaration {
                access,
                enum_name,
                inherits,
                elements,
                members,
                ..
            } => unit.push_unit(self.enum_declaration(access.as_deref(), enum_name, inherits, elements, members, level)),
            Statement::ProtocolDeclaration {
                protocol_name,
                members,
            } => unit.push_unit(self.protocol_declaration(protocol_name, members, level)),
            Statement::CompanionObject { members } => {
                unit.push_str(format!("{}companion object ", indentation));
                unit.push_unit(self.block(members, level));
                unit.push_str("\n");
            }
            Statement::FunctionDeclaration(data) => unit.push_unit(self.function_declaration(data, level)),
            Statement::VariableDeclaration(data) => unit.push_unit(self.variable_declaration(data, level)),
            Statement::Do { statements } => unit.push_unit(self.do_catch(statements, &[], level)),
            Statement::Catch { .. } => unit.push_unit(self.do_catch(&[], std::slice::from_ref(statement), level)),
            Statement::ForEach {
                collection,
                variable,
                statements,
            } => {
                unit.push_str(format!("{}for (", indentation));
                unit.push_unit(self.loop_variable(variable, level));
                unit.push_str(" in ");
                unit.push_unit(self.expression(collection, level));
                unit.push_str(") ");
                unit.push_unit(self.block(statements, level));
                unit.push_str("\n");
            }
            Statement::While {
                expression,
                statements,
            } => {
                unit.push_str(format!("{}while (", indentation));
                unit.push_unit(self.expression(expression, level));
                unit.push_str(") ");
                unit.push_unit(self.block(statements, level));
                unit.push_str("\n");
            }
            Statement::If(data) => unit.push_unit(self.if_statement(data, level)),
            Statement::Switch { expression, cases } => unit.push_unit(self.switch(expression, cases, level)),
            Statement::Defer { statements } => unit.push_unit(self.defer(statements, &[], level)),
            Statement::Throw { expression } => {
                unit.push_str(format!("{}throw ", indentation));
                unit.push_unit(self.expression(expression, level));
                unit.push_str("\n");
            }
            Statement::Return { expression } => {
                unit.push_str(format!("{}return", indentation));
                if let Some(expression) = expression {
                    unit.push_str(" ");
                    unit.push_unit(self.expression(expression, level));
                }
                unit.push_str("\n");
            }
            Statement::Break => unit.push_str(format!("{}break\n", indentation)),
            Statement::Continue => unit.push_str(format!("{}continue\n", indentation)),
            Statement::Assignment {
                left_hand_side,
                right_hand_side,
            } => {
                unit.push_str(indentation);
                unit.push_unit(self.expression(left_hand_side, level));
                unit.push_str(" = ");
                unit.push_unit(self.expression(right_hand_side, level));
                unit.push_str("\n");
            }
            Statement::Expression(expression) => {
                unit.push_str(indentation);
                unit.push_unit(self.expression(expression, level));
                unit.push_str("\n");
            }
            Statement::Error => unit.push_str(format!("{}{}\n", indentation, ERROR_PLACEHOLDER)),
        }

        unit
    }

    // =========================================================================
    // ERROR HANDLING
    // =========================================================================

    /// `try { ... } catch (e: T) { ... }`, or `run { ... }` without catches.
    fn do_catch(&self, body: &[Statement], catches: &[Statement], level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::text(self.indent(level));
        unit.push_str(if catches.is_empty() { "run " } else { "try " });
        unit.push_unit(self.block(body, level));

        for catch in catches {
            let Statement::Catch {
                variable_declaration,
                statements,
            } = catch
            else {
                continue;
            };
            let (identifier, type_name) = match variable_declaration {
                Some(data) if !data.type_name.is_empty() => (data.identifier.as_str(), kotlin_type(&data.type_name)),
                Some(data) => (data.identifier.as_str(), "Exception".to_string()),
                None => ("error", "Exception".to_string()),
            };
            unit.push_str(format!(" catch ({}: {}) ", identifier, type_name));
            unit.push_unit(self.block(statements, level));
        }

        unit.push_str("\n");
        unit
    }

    /// Run `rest` and then, however it exits, the deferred statements.
    fn defer(&self, deferred: &[Statement], rest: &[Statement], level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::text(format!("{}try ", self.indent(level)));
        unit.push_unit(self.block(rest, level));
        unit.push_str(" finally ");
        unit.push_unit(self.block(deferred, level));
        unit.push_str("\n");
        unit
    }

    // =========================================================================
    // LOOPS
    // =========================================================================

    /// The loop variable; tuples destructure as `(a, b)`.
    fn loop_variable(&self, variable: &Expression, level: usize) -> TranslationUnit {
        let Expression::Tuple { pairs } = variable else {
            return self.expression(variable, level);
        };
        let mut unit = TranslationUnit::text("(");
        for (index, pair) in pairs.iter().enumerate() {
            if index > 0 {
                unit.push_str(", ");
            }
            unit.push_unit(self.expression(&pair.expression, level));
        }
        unit.push_str(")");
        unit
    }

    // =========================================================================
    // CONDITIONALS
    // =========================================================================

    /// An `if`/`else` chain or a guard.
    ///
    /// Optional bindings are declared before the `if` as `val x = e` and
    /// tested with `x != null`; Kotlin smart casts `x` inside the branch.
    fn if_statement(&self, data: &IfStatementData, level: usize) -> TranslationUnit {
        let indentation = self.indent(level);
        let mut unit = TranslationUnit::new();

        for binding in bindings(data) {
            unit.push_unit(self.binding_declaration(binding, level));
        }
        unit.push_str(indentation);
        unit.push_unit(self.if_chain(data, level));
        unit.push_str("\n");
        unit
    }

    /// `if (...) { ... }` and its else branches, without indentation.
    fn if_chain(&self, data: &IfStatementData, level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::text("if (");
        unit.push_unit(self.conditions(data, level));
        unit.push_str(") ");
        unit.push_unit(self.block(&data.statements, level));

        let Some(else_statement) = &data.else_statement else {
            return unit;
        };

        unit.push_str(" else ");
        if else_statement.conditions.is_empty() {
            unit.push_unit(self.block(&else_statement.statements, level));
        } else if bindings(else_statement).next().is_none() {
            unit.push_unit(self.if_chain(else_statement, level));
        } else {
            unit.push_str("{\n");
            unit.push_unit(self.if_statement(else_statement, level + 1));
            unit.push_str(format!("{}}}", self.indent(level)));
        }
        unit
    }

    /// Conditions joined with `&&`, or the negated test of a guard.
    fn conditions(&self, data: &IfStatementData, level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::new();
        let separator = if data.is_guard { " || " } else { " && " };

        for (index, condition) in data.conditions.iter().enumerate() {
            if index > 0 {
                unit.push_str(separator);
            }
            match (condition, data.is_guard) {
                (IfCondition::Declaration(binding), false) => {
                    unit.push_str(format!("{} != null", binding.identifier));
                }
                (IfCondition::Declaration(binding), true) => {
                    unit.push_str(format!("{} == null", binding.identifier));
                }
                (IfCondition::Condition(expression), false) => unit.push_unit(self.expression(expression, level)),
                (IfCondition::Condition(expression), true) => {
                    unit.push_str("!(");
                    unit.push_unit(self.expression(expression, level));
                    unit.push_str(")");
                }
            }
        }
        unit
    }

    /// `val x = e` for an optional binding.
    fn binding_declaration(&self, binding: &VariableDeclarationData, level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::with_range(binding.range);
        unit.push_str(format!("{}val {}", self.indent(level), binding.identifier));
        if let Some(expression) = &binding.expression {
            unit.push_str(" = ");
            unit.push_unit(self.expression(expression, level));
        }
        unit.push_str("\n");
        unit
    }

    // =========================================================================
    // SWITCH
    // =========================================================================

    /// `when (subject) { a, b -> { ... } else -> { ... } }`.
    fn switch(&self, subject: &Expression, cases: &[SwitchCase], level: usize) -> TranslationUnit {
        let case_indentation = self.indent(level + 1);
        let mut unit = TranslationUnit::text(format!("{}when (", self.indent(level)));
        unit.push_unit(self.expression(subject, level));
        unit.push_str(") {\n");

        for case in cases {
            unit.push_str(case_indentation.clone());
            if case.expressions.is_empty() {
                unit.push_str("else");
            } else {
                for (index, expression) in case.expressions.iter().enumerate() {
                    if index > 0 {
                        unit.push_str(", ");
                    }
                    unit.push_unit(self.case_pattern(expression, level + 1));
                }
            }
            unit.push_str(" -> ");

            let statements = match case.statements.split_last() {
                Some((Statement::Break, rest)) => rest,
                _ => &case.statements[..],
            };
            unit.push_unit(self.block(statements, level + 1));
            unit.push_str("\n");
        }

        unit.push_str(format!("{}}}\n", self.indent(level)));
        unit
    }

    /// A case label: sealed members test with `is`, ranges with `in`.
    fn case_pattern(&self, pattern: &Expression, level: usize) -> TranslationUnit {
        match pattern {
            Expression::Dot { left_expression, .. } => {
                if let Expression::TypeExpression { type_name } = left_expression.as_ref() {
                    if self.enum_kind(type_name) == Some(EnumKind::SealedClass) {
                        let mut unit = TranslationUnit::text("is ");
                        unit.push_unit(self.expression(pattern, level));
                        return unit;
                    }
                }
                self.expression(pattern, level)
            }
            Expression::BinaryOperator { operator_symbol, .. }
                if operator_symbol == ".." || operator_symbol == "until" =>
            {
                let mut unit = TranslationUnit::text("in ");
                unit.push_unit(self.expression(pattern, level));
                unit
            }
            _ => self.expression(pattern, level),
        }
    }
}

/// The optional bindings among the conditions of `data`.
fn bindings(data: &IfStatementData) -> impl Iterator<Item = &VariableDeclarationData> {
    data.conditions.iter().filter_map(|condition| match condition {
        IfCondition::Declaration(binding) => Some(binding),
        IfCondition::Condition(_) => None,
    })
}
