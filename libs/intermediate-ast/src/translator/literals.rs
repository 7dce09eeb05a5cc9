//! Literal and string-interpolation rules.

use super::dump_text::{clean_type, find_descendant, parse_integer};
use super::Translator;
use crate::ast::Expression;
use crate::error::TranslationError;
use crate::unexpected_structure;
use config::DumpDialect;
use dump_decoder::RawNode;

/// Numeric representation chosen from the literal's static type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericKind {
    Int,
    UInt,
    Double,
    Float,
}

fn numeric_kind(type_name: Option<&str>) -> NumericKind {
    match type_name {
        Some("Double" | "Float64" | "CGFloat") => NumericKind::Double,
        Some("Float" | "Float32") => NumericKind::Float,
        Some(name) if name.starts_with("UInt") => NumericKind::UInt,
        _ => NumericKind::Int,
    }
}

impl Translator {
    /// Translate a literal node.
    ///
    /// `type_override` is the type of the enclosing literal-initializer call,
    /// which is more precise than the builtin type printed on the literal.
    pub(super) fn translate_literal(
        &self,
        node: &RawNode,
        type_override: Option<&str>,
    ) -> Result<Expression, TranslationError> {
        let type_name = type_override
            .map(str::to_string)
            .or_else(|| node.attribute("type").map(clean_type));

        match node.name.as_str() {
            "Integer Literal Expression" => {
                let text = node
                    .attribute("value")
                    .ok_or_else(|| unexpected_structure!(node, "integer literal without a value"))?;
                let value = parse_integer(text)
                    .ok_or_else(|| unexpected_structure!(node, "malformed integer literal {}", text))?;
                let literal = match numeric_kind(type_name.as_deref()) {
                    NumericKind::Int => Expression::LiteralInt {
                        value: i64::try_from(value)
                            .map_err(|_| unexpected_structure!(node, "integer literal out of range"))?,
                    },
                    NumericKind::UInt => Expression::LiteralUInt {
                        value: u64::try_from(value)
                            .map_err(|_| unexpected_structure!(node, "unsigned literal out of range"))?,
                    },
                    NumericKind::Double => Expression::LiteralDouble { value: value as f64 },
                    NumericKind::Float => Expression::LiteralFloat { value: value as f32 },
                };
                Ok(self.apply_negative_flag(node, literal, type_name))
            }
            "Float Literal Expression" => {
                let text = node
                    .attribute("value")
                    .ok_or_else(|| unexpected_structure!(node, "float literal without a value"))?;
                let value: f64 = text
                    .replace('_', "")
                    .parse()
                    .map_err(|_| unexpected_structure!(node, "malformed float literal {}", text))?;
                let literal = match numeric_kind(type_name.as_deref()) {
                    NumericKind::Float => Expression::LiteralFloat { value: value as f32 },
                    _ => Expression::LiteralDouble { value },
                };
                Ok(self.apply_negative_flag(node, literal, type_name))
            }
            "Boolean Literal Expression" => match node.attribute("value") {
                Some("true") => Ok(Expression::LiteralBool { value: true }),
                Some("false") => Ok(Expression::LiteralBool { value: false }),
                _ => Err(unexpected_structure!(node, "malformed boolean literal")),
            },
            "String Literal Expression" => {
                let value = node
                    .attribute("value")
                    .ok_or_else(|| unexpected_structure!(node, "string literal without a value"))?
                    .to_string();
                if type_name.as_deref() == Some("Character") {
                    Ok(Expression::LiteralCharacter { value })
                } else {
                    Ok(Expression::LiteralString { value })
                }
            }
            "Nil Literal Expression" => Ok(Expression::Nil),
            _ => Err(unexpected_structure!(node, "expected a literal")),
        }
    }

    /// Newer dumps mark negative numeric literals with a `negative` flag
    /// instead of wrapping them in a prefix minus.
    fn apply_negative_flag(&self, node: &RawNode, literal: Expression, type_name: Option<String>) -> Expression {
        if self.dialect == DumpDialect::Modern && node.has_flag("negative") {
            Expression::PrefixUnary {
                expression: Box::new(literal),
                operator_symbol: "-".to_string(),
                type_name: type_name.unwrap_or_default(),
            }
        } else {
            literal
        }
    }

    // =========================================================================
    // INTERPOLATION
    // =========================================================================

    /// Translate `"a \(b) c"` into its ordered parts, dropping empty literal
    /// segments.
    pub(super) fn translate_interpolated_string(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let parts: Vec<&RawNode> = match self.dialect {
            DumpDialect::Modern => {
                let tap = find_descendant(node, "Tap Expression")
                    .ok_or_else(|| unexpected_structure!(node, "interpolation without a tap expression"))?;
                let body = tap
                    .subtree("Brace Statement")
                    .ok_or_else(|| unexpected_structure!(tap, "tap expression without a body"))?;
                body.subtrees_named("Call Expression")
                    .map(|call| {
                        let argument = call
                            .subtrees
                            .iter()
                            .skip(1)
                            .find(|child| matches!(child.name.as_str(), "Parentheses Expression" | "Tuple Expression"))
                            .ok_or_else(|| unexpected_structure!(call, "interpolation segment without an argument"))?;
                        argument
                            .subtree_at(0)
                            .ok_or_else(|| unexpected_structure!(argument, "empty interpolation segment"))
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
            DumpDialect::Legacy => node
                .subtrees
                .iter()
                .map(|child| match child.name.as_str() {
                    "Parentheses Expression" => child
                        .subtree_at(0)
                        .ok_or_else(|| unexpected_structure!(child, "empty interpolation segment")),
                    _ => Ok(child),
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let mut expressions = Vec::new();
        for part in parts {
            let is_empty_literal =
                part.name == "String Literal Expression" && part.attribute("value").map_or(false, str::is_empty);
            if !is_empty_literal {
                expressions.push(self.translate_expression(part)?);
            }
        }

        Ok(Expression::InterpolatedString { expressions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dump_decoder::decode;

    fn translate(dialect: DumpDialect, dump: &str) -> Expression {
        let raw = decode(dump).unwrap();
        Translator::new(dialect).translate_expression(&raw).unwrap()
    }

    #[test]
    fn test_integer_literal_typed_by_enclosing_call() {
        let dump = "(call_expr implicit type='Double' arg_labels=_builtinIntegerLiteral: \
                    (constructor_ref_call_expr implicit type='(_MaxBuiltinIntegerType) -> Double') \
                    (tuple_expr implicit type='(_builtinIntegerLiteral: Int2048)' names=_builtinIntegerLiteral \
                    (integer_literal_expr type='Int2048' value=3)))";
        assert_eq!(translate(DumpDialect::Legacy, dump), Expression::LiteralDouble { value: 3.0 });
    }

    #[test]
    fn test_negative_flag_synthesizes_prefix_minus() {
        let dump = "(integer_literal_expr type='Int' negative value=5)";
        assert_eq!(
            translate(DumpDialect::Modern, dump),
            Expression::PrefixUnary {
                expression: Box::new(Expression::LiteralInt { value: 5 }),
                operator_symbol: "-".to_string(),
                type_name: "Int".to_string(),
            }
        );
        assert_eq!(translate(DumpDialect::Legacy, dump), Expression::LiteralInt { value: 5 });
    }

    #[test]
    fn test_character_literal() {
        let dump = "(string_literal_expr type='Character' value=\"a\")";
        assert_eq!(
            translate(DumpDialect::Modern, dump),
            Expression::LiteralCharacter { value: "a".to_string() }
        );
    }

    #[test]
    fn test_legacy_interpolation_skips_empty_segments() {
        let dump = "(interpolated_string_literal_expr type='String' \
                    (string_literal_expr type='String' value=\"x = \") \
                    (paren_expr type='(Int)' (integer_literal_expr type='Int' value=1)) \
                    (string_literal_expr type='String' value=\"\"))";
        assert_eq!(
            translate(DumpDialect::Legacy, dump),
            Expression::InterpolatedString {
                expressions: vec![
                    Expression::LiteralString { value: "x = ".to_string() },
                    Expression::LiteralInt { value: 1 },
                ],
            }
        );
    }

    #[test]
    fn test_modern_interpolation_reads_tap_body() {
        let dump = "(interpolated_string_literal_expr type='String' \
                    (tap_expr type='DefaultStringInterpolation' \
                    (brace_stmt \
                    (call_expr type='()' \
                    (dot_syntax_call_expr type='(String) -> ()' \
                    (declref_expr type='(inout DefaultStringInterpolation) -> (String) -> ()' decl=Swift.(file).DefaultStringInterpolation.appendLiteral) \
                    (declref_expr implicit type='DefaultStringInterpolation' decl=main.(file).$interpolation@/a.swift:1:1)) \
                    (paren_expr type='(String)' (string_literal_expr type='String' value=\"n: \"))) \
                    (call_expr type='()' \
                    (dot_syntax_call_expr type='(Int) -> ()' \
                    (declref_expr type='(inout DefaultStringInterpolation) -> (Int) -> ()' decl=Swift.(file).DefaultStringInterpolation.appendInterpolation) \
                    (declref_expr implicit type='DefaultStringInterpolation' decl=main.(file).$interpolation@/a.swift:1:1)) \
                    (paren_expr type='(Int)' (declref_expr type='Int' decl=main.(file).n@/a.swift:1:5))))))";

        let Expression::InterpolatedString { expressions } = translate(DumpDialect::Modern, dump) else {
            panic!("expected an interpolated string");
        };
        assert_eq!(expressions.len(), 2);
        assert_eq!(expressions[0], Expression::LiteralString { value: "n: ".to_string() });
        let Expression::DeclarationReference(reference) = &expressions[1] else {
            panic!("expected a reference");
        };
        assert_eq!(reference.identifier, "n");
        assert_eq!(reference.type_name, "Int");
    }
}
