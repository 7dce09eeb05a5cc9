use super::{EnumKind, KotlinRenderer};
use crate::names::{capitalize, escape_string, upper_snake_case};
use crate::types::kotlin_type;
use crate::unit::TranslationUnit;
use config::constants::{ERROR_PLACEHOLDER, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use intermediate_ast::{
    CallExpressionData, DeclarationReferenceData, Expression, LabeledExpression, LabeledType, Statement,
    TupleShuffleIndex,
};
use std::collections::BTreeMap;
use template_engine::substitute;

impl KotlinRenderer {
    /// Render an expression. `level` is the indentation of the line the
    /// expression starts on, used by multi-line closures.
    pub(super) fn expression(&self, expression: &Expression, level: usize) -> TranslationUnit {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.expression_inner(expression, level)
        })
    }

    fn expression_inner(&self, expression: &Expression, level: usize) -> TranslationUnit {
        match expression {
            Expression::Template { pattern, matches } => {
                let rendered: BTreeMap<String, String> = matches
                    .iter()
                    .map(|(name, captured)| (name.clone(), self.expression(captured, level).to_text()))
                    .collect();
                TranslationUnit::text(substitute(pattern, &rendered))
            }
            Expression::Parentheses { expression } => self.wrapped("(", expression, ")", level),
            Expression::ForceValue { expression } => self.wrapped("", expression, "!!", level),
            Expression::Optional { expression } => self.wrapped("", expression, "?", level),
            Expression::DeclarationReference(data) => declaration_reference(data),
            Expression::TypeExpression { type_name } => TranslationUnit::text(kotlin_type(type_name)),
            Expression::Subscript {
                subscripted_expression,
                index_expression,
                ..
            } => {
                let mut unit = self.expression(subscripted_expression, level);
                unit.push_str("[");
                unit.push_unit(self.expression(index_expression, level));
                unit.push_str("]");
                unit
            }
            Expression::Array { elements, type_name } => self.array(elements, type_name, level),
            Expression::Dictionary {
                keys,
                values,
                type_name,
            } => self.dictionary(keys, values, type_name, level),
            Expression::Dot {
                left_expression,
                right_expression,
            } => self.dot(left_expression, right_expression, level),
            Expression::BinaryOperator {
                left_expression,
                right_expression,
                operator_symbol,
                ..
            } => {
                let operator_symbol = match operator_symbol.as_str() {
                    "as!" => "as",
                    other => other,
                };
                let mut unit = self.expression(left_expression, level);
                unit.push_str(format!(" {} ", operator_symbol));
                unit.push_unit(self.expression(right_expression, level));
                unit
            }
            Expression::PrefixUnary {
                expression,
                operator_symbol,
                ..
            } => self.wrapped(operator_symbol, expression, "", level),
            Expression::PostfixUnary {
                expression,
                operator_symbol,
                ..
            } => self.wrapped("", expression, operator_symbol, level),
            Expression::If {
                condition,
                true_expression,
                false_expression,
            } => {
                let mut unit = self.wrapped("if (", condition, ") ", level);
                unit.push_unit(self.expression(true_expression, level));
                unit.push_str(" else ");
                unit.push_unit(self.expression(false_expression, level));
                unit
            }
            Expression::Call(data) => self.call(data, level),
            Expression::Closure {
                parameters,
                statements,
                ..
            } => self.closure(parameters, statements, level),
            Expression::LiteralInt { value } => TranslationUnit::text(value.to_string()),
            Expression::LiteralUInt { value } => TranslationUnit::text(format!("{}u", value)),
            Expression::LiteralDouble { value } => TranslationUnit::text(format!("{:?}", value)),
            Expression::LiteralFloat { value } => TranslationUnit::text(format!("{:?}f", value)),
            Expression::LiteralBool { value } => TranslationUnit::text(value.to_string()),
            Expression::LiteralString { value } => TranslationUnit::text(format!("\"{}\"", escape_string(value))),
            Expression::LiteralCharacter { value } => TranslationUnit::text(format!("'{}'", value)),
            Expression::Nil => TranslationUnit::text("null"),
            Expression::InterpolatedString { expressions } => {
                let mut unit = TranslationUnit::text("\"");
                for segment in expressions {
                    match segment {
                        Expression::LiteralString { value } => unit.push_str(escape_string(value)),
                        other => unit.push_unit(self.wrapped("${", other, "}", level)),
                    }
                }
                unit.push_str("\"");
                unit
            }
            Expression::Tuple { pairs } => self.tuple(pairs, level),
            Expression::TupleShuffle { .. } => {
                let mut unit = TranslationUnit::text("(");
                unit.push_unit(self.arguments(expression, level));
                unit.push_str(")");
                unit
            }
            Expression::Error => TranslationUnit::text(ERROR_PLACEHOLDER),
        }
    }

    fn wrapped(&self, before: &str, expression: &Expression, after: &str, level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::text(before);
        unit.push_unit(self.expression(expression, level));
        unit.push_str(after);
        unit
    }

    /// Items separated by `, `.
    fn comma_separated<'e>(&self, items: impl IntoIterator<Item = &'e Expression>, level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::new();
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                unit.push_str(", ");
            }
            unit.push_unit(self.expression(item, level));
        }
        unit
    }

    // =========================================================================
    // COLLECTIONS
    // =========================================================================

    fn array(&self, elements: &[Expression], type_name: &str, level: usize) -> TranslationUnit {
        if elements.is_empty() {
            let list_type = kotlin_type(type_name);
            return match list_type.strip_prefix("MutableList<").and_then(|rest| rest.strip_suffix('>')) {
                Some(element_type) => TranslationUnit::text(format!("mutableListOf<{}>()", element_type)),
                None => TranslationUnit::text("mutableListOf()"),
            };
        }
        let mut unit = TranslationUnit::text("mutableListOf(");
        unit.push_unit(self.comma_separated(elements, level));
        unit.push_str(")");
        unit
    }

    fn dictionary(&self, keys: &[Expression], values: &[Expression], type_name: &str, level: usize) -> TranslationUnit {
        if keys.is_empty() {
            let map_type = kotlin_type(type_name);
            return match map_type.strip_prefix("MutableMap<").and_then(|rest| rest.strip_suffix('>')) {
                Some(entry_types) => TranslationUnit::text(format!("mutableMapOf<{}>()", entry_types)),
                None => TranslationUnit::text("mutableMapOf()"),
            };
        }
        let mut unit = TranslationUnit::text("mutableMapOf(");
        for (index, (key, value)) in keys.iter().zip(values).enumerate() {
            if index > 0 {
                unit.push_str(", ");
            }
            unit.push_unit(self.expression(key, level));
            unit.push_str(" to ");
            unit.push_unit(self.expression(value, level));
        }
        unit.push_str(")");
        unit
    }

    /// Tuples become `Pair`/`Triple` values.
    fn tuple(&self, pairs: &[LabeledExpression], level: usize) -> TranslationUnit {
        let expressions = pairs.iter().map(|pair| &pair.expression);
        let constructor = match pairs {
            [] => return TranslationUnit::text("Unit"),
            [single] => return self.expression(&single.expression, level),
            [_, _] => "Pair",
            [_, _, _] => "Triple",
            _ => "listOf",
        };
        let mut unit = TranslationUnit::text(format!("{}(", constructor));
        unit.push_unit(self.comma_separated(expressions, level));
        unit.push_str(")");
        unit
    }

    // =========================================================================
    // MEMBERS AND CALLS
    // =========================================================================

    /// `left.right`; constructor references collapse to the type and enum
    /// elements take the spelling of their generated declaration.
    fn dot(&self, left: &Expression, right: &Expression, level: usize) -> TranslationUnit {
        if let Expression::DeclarationReference(member) = right {
            if member.identifier == "init" {
                return self.expression(left, level);
            }
            if let Expression::TypeExpression { type_name } = left {
                let element = match self.enum_kind(type_name) {
                    Some(EnumKind::EnumClass) => Some(upper_snake_case(&member.identifier)),
                    Some(EnumKind::SealedClass) => Some(capitalize(&member.identifier)),
                    None => None,
                };
                if let Some(element) = element {
                    let mut unit = TranslationUnit::with_range(member.range);
                    unit.push_str(format!("{}.{}", kotlin_type(type_name), element));
                    return unit;
                }
            }
        }

        let mut unit = self.expression(left, level);
        unit.push_str(".");
        unit.push_unit(self.expression(right, level));
        unit
    }

    fn call(&self, data: &CallExpressionData, level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::with_range(data.range);
        unit.push_unit(self.expression(&data.function, level));
        unit.push_str("(");
        unit.push_unit(self.arguments(&data.parameters, level));
        unit.push_str(")");
        unit
    }

    /// Call arguments, positional unless a default parameter was skipped;
    /// arguments after a skipped parameter are named.
    fn arguments(&self, parameters: &Expression, level: usize) -> TranslationUnit {
        match parameters {
            Expression::Tuple { pairs } => self.comma_separated(pairs.iter().map(|pair| &pair.expression), level),
            Expression::Parentheses { expression } => self.expression(expression, level),
            Expression::TupleShuffle {
                labels,
                indices,
                expressions,
            } => {
                let mut unit = TranslationUnit::new();
                let mut remaining = expressions.iter();
                let mut is_named = false;
                let mut is_first = true;

                for (position, index) in indices.iter().enumerate() {
                    let arguments: Vec<&Expression> = match index {
                        TupleShuffleIndex::Absent => {
                            is_named = true;
                            continue;
                        }
                        TupleShuffleIndex::Present => remaining.next().into_iter().collect(),
                        TupleShuffleIndex::Variadic { count } => remaining.by_ref().take(*count).collect(),
                    };
                    for argument in arguments {
                        if !is_first {
                            unit.push_str(", ");
                        }
                        is_first = false;
                        match labels.get(position) {
                            Some(label) if is_named && !label.is_empty() && label != "_" => {
                                unit.push_str(format!("{} = ", label));
                            }
                            _ => {}
                        }
                        unit.push_unit(self.expression(argument, level));
                    }
                }
                unit
            }
            other => self.expression(other, level),
        }
    }

    // =========================================================================
    // CLOSURES
    // =========================================================================

    /// `{ a, b -> body }`; single expressions stay on one line.
    fn closure(&self, parameters: &[LabeledType], statements: &[Statement], level: usize) -> TranslationUnit {
        let names: Vec<&str> = parameters.iter().map(|parameter| parameter.label.as_str()).collect();
        let header = if names.is_empty() {
            "{".to_string()
        } else {
            format!("{{ {} ->", names.join(", "))
        };

        let single = match statements {
            [Statement::Expression(expression)]
            | [Statement::Return {
                expression: Some(expression),
            }] => Some(expression),
            _ => None,
        };

        let mut unit = TranslationUnit::text(header);
        match single {
            Some(expression) => {
                unit.push_str(" ");
                unit.push_unit(self.expression(expression, level));
                unit.push_str(" }");
            }
            None => {
                unit.push_str("\n");
                unit.push_unit(self.statements(statements, level + 1));
                unit.push_str(format!("{}}}", self.indent(level)));
            }
        }
        unit
    }
}

/// A reference, tagged with its source range; `self` is `this`.
fn declaration_reference(data: &DeclarationReferenceData) -> TranslationUnit {
    let mut unit = TranslationUnit::with_range(data.range);
    unit.push_str(match data.identifier.as_str() {
        "self" => "this",
        identifier => identifier,
    });
    unit
}
