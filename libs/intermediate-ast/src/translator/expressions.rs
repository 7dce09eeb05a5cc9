//! Expression rules.

use super::dump_text::{
    clean_type, declaration_identifier, find_descendant, is_standard_library, node_range, node_type,
};
use super::statements::tuple_field_index;
use super::Translator;
use crate::ast::{CallExpressionData, DeclarationReferenceData, Expression, LabeledType, Statement};
use crate::error::TranslationError;
use crate::unexpected_structure;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use config::DumpDialect;
use dump_decoder::RawNode;

// =============================================================================
// BUILTIN LITERAL CALLS
// =============================================================================

const INTEGER_LITERAL_LABELS: &str = "_builtinIntegerLiteral:";
const BOOLEAN_LITERAL_LABELS: &str = "_builtinBooleanLiteral:";
const FLOAT_LITERAL_LABELS: &str = "_builtinFloatLiteral:";
const NIL_LITERAL_LABELS: &str = "nilLiteral:";
const STRING_LITERAL_LABEL_PREFIXES: &[&str] = &[
    "_builtinStringLiteral:",
    "_builtinUnicodeScalarLiteral:",
    "_builtinExtendedGraphemeClusterLiteral:",
];

/// Wrappers that only carry type-checker bookkeeping.
const TRANSPARENT_EXPRESSIONS: &[&str] = &[
    "Autoclosure Expression",
    "Optional Evaluation Expression",
    "Inject Into Optional",
    "Load Expression",
    "Inout Expression",
    "Erasure Expression",
    "Function Conversion Expression",
    "Derived To Base Expression",
    "Rebind Self In Constructor Expression",
    "Try Expression",
    "Force Try Expression",
    "Optional Try Expression",
    "Metatype Conversion Expression",
    "Collection Upcast Expression",
    "Dot Self Expression",
    "Identity Expression",
    "Await Expression",
    "Underlying To Opaque Expression",
    "Covariant Return Conversion Expression",
    "Covariant Function Conversion Expression",
];

/// Field name of a tuple component once it is rendered as a pair or triple.
fn tuple_field_name(index: usize) -> String {
    match index {
        0 => "first".to_string(),
        1 => "second".to_string(),
        2 => "third".to_string(),
        n => format!("component{}()", n + 1),
    }
}

fn child<'a>(node: &'a RawNode, index: usize) -> Result<&'a RawNode, TranslationError> {
    node.subtree_at(index)
        .ok_or_else(|| unexpected_structure!(node, "expected a child at index {}", index))
}

fn required_type(node: &RawNode) -> Result<String, TranslationError> {
    node_type(node).ok_or_else(|| unexpected_structure!(node, "expected a type attribute"))
}

/// Whether `expression` is the implicit `self` of a member access.
fn is_implicit_self(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::DeclarationReference(DeclarationReferenceData { identifier, is_implicit: true, .. })
            if identifier == "self"
    )
}

/// Replace every "Opaque Value Expression" in `body` with `existential`.
fn substitute_opaque_value(body: &RawNode, existential: &RawNode) -> RawNode {
    if body.name == "Opaque Value Expression" {
        return existential.clone();
    }
    RawNode {
        subtrees: body
            .subtrees
            .iter()
            .map(|subtree| substitute_opaque_value(subtree, existential))
            .collect(),
        ..body.clone()
    }
}

impl Translator {
    /// Translate an expression node.
    pub fn translate_expression(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.translate_expression_inner(node)
        })
        .map_err(|error| self.limit_tree(error))
    }

    fn translate_expression_inner(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        match node.name.as_str() {
            "Call Expression" => self.translate_call(node),
            "Declaration Reference Expression" => self
                .translate_declaration_reference(node)
                .map(Expression::DeclarationReference),
            "Type Expression" => self.translate_type_expression(node),
            "Member Reference Expression" => self.translate_member_reference(node),
            "Dot Syntax Call Expression" => self.translate_dot_syntax_call(node),
            "Constructor Reference Call Expression" => self.translate_expression(child(node, 1)?),
            "Prefix Unary Expression" => self.translate_unary(node, true),
            "Postfix Unary Expression" => self.translate_unary(node, false),
            "Binary Expression" => self.translate_binary(node),
            "If Expression" | "Ternary Expression" => Ok(Expression::If {
                condition: Box::new(self.translate_expression(child(node, 0)?)?),
                true_expression: Box::new(self.translate_expression(child(node, 1)?)?),
                false_expression: Box::new(self.translate_expression(child(node, 2)?)?),
            }),
            "Subscript Expression" => self.translate_subscript(node),
            "Array Expression" => self.translate_array(node),
            "Dictionary Expression" => self.translate_dictionary(node),
            "Tuple Expression" => self.translate_tuple(node),
            "Tuple Shuffle Expression" => self.translate_arguments_inner(node),
            "Parentheses Expression" => Ok(Expression::Parentheses {
                expression: Box::new(self.translate_expression(child(node, 0)?)?),
            }),
            "Force Value Expression" => Ok(Expression::ForceValue {
                expression: Box::new(self.translate_expression(child(node, 0)?)?),
            }),
            "Bind Optional Expression" => Ok(Expression::Optional {
                expression: Box::new(self.translate_expression(child(node, 0)?)?),
            }),
            "Closure Expression" => self.translate_closure(node),
            "Open Existential Expression" => {
                let existential = child(node, 1)?;
                let body = child(node, 2)?;
                self.translate_expression(&substitute_opaque_value(body, existential))
            }
            "Coerce Expression" => self.translate_cast(node, "as"),
            "Conditional Checked Cast Expression" => self.translate_cast(node, "as?"),
            "Forced Checked Cast Expression" => self.translate_cast(node, "as!"),
            "Is Subtype Expression" => self.translate_cast(node, "is"),
            "Tuple Element Expression" => self.translate_tuple_element(node),
            "Interpolated String Literal Expression" => self.translate_interpolated_string(node),
            "Integer Literal Expression"
            | "Float Literal Expression"
            | "Boolean Literal Expression"
            | "String Literal Expression"
            | "Nil Literal Expression" => self.translate_literal(node, None),
            name if TRANSPARENT_EXPRESSIONS.contains(&name) => self.translate_expression(child(node, 0)?),
            _ => Err(unexpected_structure!(node, "unknown expression")),
        }
    }

    // =========================================================================
    // CALLS AND REFERENCES
    // =========================================================================

    /// Literal initializer calls collapse to the literal; everything else is
    /// a call with a function and a tuple of arguments.
    fn translate_call(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let type_name = node.attribute("type").map(clean_type);

        if let Some(labels) = node.attribute("arg_labels") {
            let literal_name = match labels {
                INTEGER_LITERAL_LABELS => Some("Integer Literal Expression"),
                BOOLEAN_LITERAL_LABELS => Some("Boolean Literal Expression"),
                FLOAT_LITERAL_LABELS => Some("Float Literal Expression"),
                NIL_LITERAL_LABELS => return Ok(Expression::Nil),
                labels if STRING_LITERAL_LABEL_PREFIXES.iter().any(|prefix| labels.starts_with(prefix)) => {
                    Some("String Literal Expression")
                }
                _ => None,
            };
            if let Some(literal_name) = literal_name {
                let literal = find_descendant(node, literal_name)
                    .ok_or_else(|| unexpected_structure!(node, "literal call without a {}", literal_name))?;
                return self.translate_literal(literal, type_name.as_deref());
            }
        }

        let function_node = node
            .subtree("Declaration Reference Expression")
            .or_else(|| node.subtree("Dot Syntax Call Expression"))
            .or_else(|| node.subtree("Constructor Reference Call Expression"))
            .map_or_else(|| child(node, 0), Ok)?;
        let arguments_node = node
            .subtrees
            .iter()
            .skip(1)
            .find(|child| {
                matches!(
                    child.name.as_str(),
                    "Parentheses Expression" | "Tuple Expression" | "Tuple Shuffle Expression"
                )
            })
            .ok_or_else(|| unexpected_structure!(node, "call without arguments"))?;

        Ok(Expression::Call(CallExpressionData {
            function: Box::new(self.translate_expression(function_node)?),
            parameters: Box::new(self.translate_arguments_inner(arguments_node)?),
            type_name,
            range: node_range(node),
        }))
    }

    pub(super) fn translate_declaration_reference(
        &self,
        node: &RawNode,
    ) -> Result<DeclarationReferenceData, TranslationError> {
        let declaration = node
            .attribute("decl")
            .ok_or_else(|| unexpected_structure!(node, "reference without a declaration"))?;

        Ok(DeclarationReferenceData {
            identifier: declaration_identifier(declaration),
            type_name: required_type(node)?,
            is_standard_library: is_standard_library(declaration),
            is_implicit: node.has_flag("implicit"),
            range: node_range(node),
        })
    }

    fn translate_type_expression(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let type_name = node
            .attribute("typerepr")
            .map(clean_type)
            .or_else(|| {
                node.attribute("type")
                    .map(|type_name| clean_type(type_name.strip_suffix(".Type").unwrap_or(type_name)))
            })
            .ok_or_else(|| unexpected_structure!(node, "type expression without a type"))?;
        Ok(Expression::TypeExpression { type_name })
    }

    fn translate_member_reference(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let member = Expression::DeclarationReference(self.translate_declaration_reference(node)?);
        let base = self.translate_expression(child(node, 0)?)?;
        Ok(dot(base, member))
    }

    /// `(dot_syntax_call member base)` becomes `base.member`.
    fn translate_dot_syntax_call(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let member = self.translate_expression(child(node, 0)?)?;
        let base = self.translate_expression(child(node, 1)?)?;
        Ok(dot(base, member))
    }

    // =========================================================================
    // OPERATORS
    // =========================================================================

    /// Symbol of the operator function referenced by child 0 of `node`.
    fn operator_symbol(&self, node: &RawNode) -> Result<String, TranslationError> {
        let function = child(node, 0)?;
        let reference = if function.name == "Declaration Reference Expression" {
            function
        } else {
            find_descendant(function, "Declaration Reference Expression")
                .ok_or_else(|| unexpected_structure!(function, "operator without a declaration"))?
        };
        let declaration = reference
            .attribute("decl")
            .ok_or_else(|| unexpected_structure!(reference, "operator without a declaration"))?;
        Ok(declaration_identifier(declaration))
    }

    fn translate_unary(&self, node: &RawNode, is_prefix: bool) -> Result<Expression, TranslationError> {
        let operator_symbol = self.operator_symbol(node)?;
        let mut operand = child(node, 1)?;
        if operand.name == "Parentheses Expression" && operand.has_flag("implicit") {
            operand = child(operand, 0)?;
        }
        let expression = Box::new(self.translate_expression(operand)?);
        let type_name = required_type(node)?;

        Ok(if is_prefix {
            Expression::PrefixUnary {
                expression,
                operator_symbol,
                type_name,
            }
        } else {
            Expression::PostfixUnary {
                expression,
                operator_symbol,
                type_name,
            }
        })
    }

    fn translate_binary(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let operator_symbol = self.operator_symbol(node)?;
        let operands = child(node, 1)?;
        if operands.name != "Tuple Expression" || operands.subtrees.len() != 2 {
            return Err(unexpected_structure!(node, "binary operator needs a pair of operands"));
        }

        Ok(Expression::BinaryOperator {
            left_expression: Box::new(self.translate_expression(&operands.subtrees[0])?),
            right_expression: Box::new(self.translate_expression(&operands.subtrees[1])?),
            operator_symbol,
            type_name: required_type(node)?,
        })
    }

    /// Casts become binary operators whose right side is the target type.
    fn translate_cast(&self, node: &RawNode, operator_symbol: &str) -> Result<Expression, TranslationError> {
        let operand = self.translate_expression(child(node, 0)?)?;
        let result_type = required_type(node)?;
        let target_type = node
            .attribute("writtenType")
            .map(clean_type)
            .unwrap_or_else(|| match operator_symbol {
                "as?" => result_type.strip_suffix('?').unwrap_or(&result_type).to_string(),
                _ => result_type.clone(),
            });

        Ok(Expression::BinaryOperator {
            left_expression: Box::new(operand),
            right_expression: Box::new(Expression::TypeExpression { type_name: target_type }),
            operator_symbol: operator_symbol.to_string(),
            type_name: result_type,
        })
    }

    // =========================================================================
    // COLLECTIONS
    // =========================================================================

    fn translate_subscript(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let subscripted = self.translate_expression(child(node, 0)?)?;
        let index_node = child(node, 1)?;
        let index_node = match index_node.name.as_str() {
            "Parentheses Expression" => child(index_node, 0)?,
            "Tuple Expression" if index_node.subtrees.len() == 1 => child(index_node, 0)?,
            _ => index_node,
        };

        Ok(Expression::Subscript {
            subscripted_expression: Box::new(subscripted),
            index_expression: Box::new(self.translate_expression(index_node)?),
            type_name: required_type(node)?,
        })
    }

    /// Children of a collection literal, without the trailing semantic
    /// initializer some dialects print.
    fn collection_elements<'a>(&self, node: &'a RawNode) -> &'a [RawNode] {
        match (self.dialect, node.subtrees.split_last()) {
            (DumpDialect::Modern, Some((last, rest))) if last.name == "Semantic Expression" => rest,
            _ => &node.subtrees,
        }
    }

    fn translate_array(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let elements = self
            .collection_elements(node)
            .iter()
            .map(|element| self.translate_expression(element))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Expression::Array {
            elements,
            type_name: required_type(node)?,
        })
    }

    fn translate_dictionary(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let mut keys = Vec::new();
        let mut values = Vec::new();
        for pair in self.collection_elements(node) {
            if pair.name != "Tuple Expression" || pair.subtrees.len() != 2 {
                return Err(unexpected_structure!(pair, "dictionary entry must be a key/value pair"));
            }
            keys.push(self.translate_expression(&pair.subtrees[0])?);
            values.push(self.translate_expression(&pair.subtrees[1])?);
        }
        Ok(Expression::Dictionary {
            keys,
            values,
            type_name: required_type(node)?,
        })
    }

    /// `t.0` becomes `t.first`, `t.1` becomes `t.second`, and so on.
    fn translate_tuple_element(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let index = tuple_field_index(node)
            .ok_or_else(|| unexpected_structure!(node, "tuple element without a field index"))?;
        let base = self.translate_expression(child(node, 0)?)?;
        let field = Expression::DeclarationReference(DeclarationReferenceData::new(
            tuple_field_name(index),
            required_type(node)?,
        ));
        Ok(dot(base, field))
    }

    // =========================================================================
    // CLOSURES
    // =========================================================================

    fn translate_closure(&self, node: &RawNode) -> Result<Expression, TranslationError> {
        let parameters = node
            .subtree("Parameter List")
            .map(|list| {
                list.subtrees_named("Parameter")
                    .map(|parameter| {
                        let label = parameter
                            .standalone_at(0)
                            .ok_or_else(|| unexpected_structure!(parameter, "closure parameter without a name"))?;
                        Ok(LabeledType {
                            label: label.to_string(),
                            type_name: node_type(parameter).unwrap_or_default(),
                        })
                    })
                    .collect::<Result<Vec<_>, TranslationError>>()
            })
            .transpose()?
            .unwrap_or_default();

        let statements = match node.subtree("Brace Statement") {
            Some(brace) => self.translate_scope(&brace.subtrees)?,
            None => {
                let body = node
                    .subtrees
                    .iter()
                    .rev()
                    .find(|child| child.name != "Parameter List")
                    .ok_or_else(|| unexpected_structure!(node, "closure without a body"))?;
                vec![Statement::Expression(self.translate_expression(body)?)]
            }
        };

        Ok(Expression::Closure {
            parameters,
            statements,
            type_name: required_type(node)?,
        })
    }
}

/// `base.member`, dropping an implicit `self` base.
fn dot(base: Expression, member: Expression) -> Expression {
    if is_implicit_self(&base) {
        return member;
    }
    Expression::Dot {
        left_expression: Box::new(base),
        right_expression: Box::new(member),
    }
}
