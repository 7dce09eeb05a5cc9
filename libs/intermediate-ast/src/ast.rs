//! # Intermediate AST
//!
//! Target-agnostic statement and expression model. Every variant is a plain
//! tagged-union case, so equality is structural and derived.
//!
//! ## Example
//!
//! ```rust
//! use intermediate_ast::{Expression, Statement};
//!
//! let statement = Statement::Return {
//!     expression: Some(Expression::LiteralInt { value: 1 }),
//! };
//! assert_eq!(statement.name(), "returnStatement");
//! ```

use crate::source_range::SourceRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// STATEMENTS
// =============================================================================

/// A declaration or statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Expression(Expression),
    ImportDeclaration {
        module_name: String,
    },
    TypealiasDeclaration {
        identifier: String,
        type_name: String,
        is_implicit: bool,
    },
    ClassDeclaration {
        class_name: String,
        inherits: Vec<String>,
        members: Vec<Statement>,
    },
    /// Holds the static members of a type.
    CompanionObject {
        members: Vec<Statement>,
    },
    EnumDeclaration {
        access: Option<String>,
        enum_name: String,
        inherits: Vec<String>,
        elements: Vec<EnumElement>,
        members: Vec<Statement>,
        is_implicit: bool,
    },
    ProtocolDeclaration {
        protocol_name: String,
        members: Vec<Statement>,
    },
    StructDeclaration {
        struct_name: String,
        inherits: Vec<String>,
        members: Vec<Statement>,
    },
    FunctionDeclaration(FunctionDeclarationData),
    VariableDeclaration(VariableDeclarationData),
    Do {
        statements: Vec<Statement>,
    },
    Catch {
        variable_declaration: Option<VariableDeclarationData>,
        statements: Vec<Statement>,
    },
    ForEach {
        collection: Expression,
        variable: Expression,
        statements: Vec<Statement>,
    },
    While {
        expression: Expression,
        statements: Vec<Statement>,
    },
    If(IfStatementData),
    Switch {
        expression: Expression,
        cases: Vec<SwitchCase>,
    },
    Defer {
        statements: Vec<Statement>,
    },
    Throw {
        expression: Expression,
    },
    Return {
        expression: Option<Expression>,
    },
    Break,
    Continue,
    Assignment {
        left_hand_side: Expression,
        right_hand_side: Expression,
    },
    /// Stands in for a construct that failed to translate.
    Error,
}

impl Statement {
    /// Fixed name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Statement::Expression(_) => "expressionStatement",
            Statement::ImportDeclaration { .. } => "importDeclaration",
            Statement::TypealiasDeclaration { .. } => "typealiasDeclaration",
            Statement::ClassDeclaration { .. } => "classDeclaration",
            Statement::CompanionObject { .. } => "companionObject",
            Statement::EnumDeclaration { .. } => "enumDeclaration",
            Statement::ProtocolDeclaration { .. } => "protocolDeclaration",
            Statement::StructDeclaration { .. } => "structDeclaration",
            Statement::FunctionDeclaration(_) => "functionDeclaration",
            Statement::VariableDeclaration(_) => "variableDeclaration",
            Statement::Do { .. } => "doStatement",
            Statement::Catch { .. } => "catchStatement",
            Statement::ForEach { .. } => "forEachStatement",
            Statement::While { .. } => "whileStatement",
            Statement::If(_) => "ifStatement",
            Statement::Switch { .. } => "switchStatement",
            Statement::Defer { .. } => "deferStatement",
            Statement::Throw { .. } => "throwStatement",
            Statement::Return { .. } => "returnStatement",
            Statement::Break => "breakStatement",
            Statement::Continue => "continueStatement",
            Statement::Assignment { .. } => "assignmentStatement",
            Statement::Error => "error",
        }
    }

    /// Source range of the statement, taken from its first ranged expression.
    pub fn range(&self) -> Option<SourceRange> {
        match self {
            Statement::Expression(expression) => expression.range(),
            Statement::FunctionDeclaration(data) => data.range,
            Statement::VariableDeclaration(data) => data.range,
            Statement::Throw { expression } => expression.range(),
            Statement::Return { expression } => expression.as_ref().and_then(Expression::range),
            Statement::Assignment {
                left_hand_side,
                right_hand_side,
            } => left_hand_side.range().or_else(|| right_hand_side.range()),
            Statement::ForEach { collection, .. } => collection.range(),
            Statement::While { expression, .. } => expression.range(),
            Statement::Switch { expression, .. } => expression.range(),
            Statement::If(data) => data.conditions.iter().find_map(|condition| match condition {
                IfCondition::Condition(expression) => expression.range(),
                IfCondition::Declaration(data) => data.range,
            }),
            _ => None,
        }
    }
}

/// Function, method, initializer or accessor declaration.
///
/// Equality ignores `range`, including whether one is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionDeclarationData {
    /// Name without the argument labels (`foo` for `foo(x:)`).
    pub prefix: String,
    pub parameters: Vec<FunctionParameter>,
    pub return_type: String,
    pub function_type: String,
    pub generic_types: Vec<String>,
    pub is_implicit: bool,
    pub is_static: bool,
    pub is_mutating: bool,
    /// Receiver type when declared in an extension.
    pub extends_type: Option<String>,
    pub access: Option<String>,
    /// `None` for bodiless declarations (protocol requirements).
    pub statements: Option<Vec<Statement>>,
    pub range: Option<SourceRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameter {
    pub label: String,
    /// External label; `None` when the parameter is unlabeled at call sites.
    pub api_label: Option<String>,
    pub type_name: String,
    pub value: Option<Expression>,
}

/// Equality ignores `range`, including whether one is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableDeclarationData {
    pub identifier: String,
    pub type_name: String,
    pub expression: Option<Expression>,
    pub getter: Option<FunctionDeclarationData>,
    pub setter: Option<FunctionDeclarationData>,
    pub is_let: bool,
    pub is_implicit: bool,
    pub is_static: bool,
    pub extends_type: Option<String>,
    pub access: Option<String>,
    pub range: Option<SourceRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatementData {
    pub conditions: Vec<IfCondition>,
    pub statements: Vec<Statement>,
    /// An `else if` (with conditions) or a plain `else` (without).
    pub else_statement: Option<Box<IfStatementData>>,
    /// For guards, `statements` is the else body.
    pub is_guard: bool,
}

/// A condition of an `if` or `guard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IfCondition {
    Condition(Expression),
    /// Optional binding (`if let x = ...`).
    Declaration(VariableDeclarationData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumElement {
    pub name: String,
    pub associated_values: Vec<LabeledType>,
    pub raw_value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledType {
    pub label: String,
    pub type_name: String,
}

/// A `case` of a switch; no expressions means `default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub expressions: Vec<Expression>,
    pub statements: Vec<Statement>,
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// An expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Replacement text with named sub-expressions; only built by template
    /// replacement.
    Template {
        pattern: String,
        matches: BTreeMap<String, Expression>,
    },
    Parentheses {
        expression: Box<Expression>,
    },
    ForceValue {
        expression: Box<Expression>,
    },
    Optional {
        expression: Box<Expression>,
    },
    DeclarationReference(DeclarationReferenceData),
    TypeExpression {
        type_name: String,
    },
    Subscript {
        subscripted_expression: Box<Expression>,
        index_expression: Box<Expression>,
        type_name: String,
    },
    Array {
        elements: Vec<Expression>,
        type_name: String,
    },
    Dictionary {
        keys: Vec<Expression>,
        values: Vec<Expression>,
        type_name: String,
    },
    Dot {
        left_expression: Box<Expression>,
        right_expression: Box<Expression>,
    },
    BinaryOperator {
        left_expression: Box<Expression>,
        right_expression: Box<Expression>,
        operator_symbol: String,
        type_name: String,
    },
    PrefixUnary {
        expression: Box<Expression>,
        operator_symbol: String,
        type_name: String,
    },
    PostfixUnary {
        expression: Box<Expression>,
        operator_symbol: String,
        type_name: String,
    },
    /// Ternary conditional.
    If {
        condition: Box<Expression>,
        true_expression: Box<Expression>,
        false_expression: Box<Expression>,
    },
    Call(CallExpressionData),
    Closure {
        parameters: Vec<LabeledType>,
        statements: Vec<Statement>,
        type_name: String,
    },
    LiteralInt {
        value: i64,
    },
    LiteralUInt {
        value: u64,
    },
    LiteralDouble {
        value: f64,
    },
    LiteralFloat {
        value: f32,
    },
    LiteralBool {
        value: bool,
    },
    LiteralString {
        value: String,
    },
    LiteralCharacter {
        value: String,
    },
    Nil,
    InterpolatedString {
        expressions: Vec<Expression>,
    },
    Tuple {
        pairs: Vec<LabeledExpression>,
    },
    /// Call arguments reordered or collapsed into variadics by the compiler.
    TupleShuffle {
        labels: Vec<String>,
        indices: Vec<TupleShuffleIndex>,
        expressions: Vec<Expression>,
    },
    Error,
}

impl Expression {
    /// Fixed name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Expression::Template { .. } => "templateExpression",
            Expression::Parentheses { .. } => "parenthesesExpression",
            Expression::ForceValue { .. } => "forceValueExpression",
            Expression::Optional { .. } => "optionalExpression",
            Expression::DeclarationReference(_) => "declarationReferenceExpression",
            Expression::TypeExpression { .. } => "typeExpression",
            Expression::Subscript { .. } => "subscriptExpression",
            Expression::Array { .. } => "arrayExpression",
            Expression::Dictionary { .. } => "dictionaryExpression",
            Expression::Dot { .. } => "dotExpression",
            Expression::BinaryOperator { .. } => "binaryOperatorExpression",
            Expression::PrefixUnary { .. } => "prefixUnaryExpression",
            Expression::PostfixUnary { .. } => "postfixUnaryExpression",
            Expression::If { .. } => "ifExpression",
            Expression::Call(_) => "callExpression",
            Expression::Closure { .. } => "closureExpression",
            Expression::LiteralInt { .. } => "literalIntExpression",
            Expression::LiteralUInt { .. } => "literalUIntExpression",
            Expression::LiteralDouble { .. } => "literalDoubleExpression",
            Expression::LiteralFloat { .. } => "literalFloatExpression",
            Expression::LiteralBool { .. } => "literalBoolExpression",
            Expression::LiteralString { .. } => "literalStringExpression",
            Expression::LiteralCharacter { .. } => "literalCharacterExpression",
            Expression::Nil => "nilLiteralExpression",
            Expression::InterpolatedString { .. } => "interpolatedStringLiteralExpression",
            Expression::Tuple { .. } => "tupleExpression",
            Expression::TupleShuffle { .. } => "tupleShuffleExpression",
            Expression::Error => "error",
        }
    }

    /// Static type of the expression, when known.
    pub fn type_name(&self) -> Option<String> {
        match self {
            Expression::Template { .. } | Expression::Error => None,
            Expression::Parentheses { expression } => expression.type_name(),
            Expression::ForceValue { expression } => expression
                .type_name()
                .map(|type_name| type_name.strip_suffix('?').map(str::to_string).unwrap_or(type_name)),
            Expression::Optional { expression } => expression
                .type_name()
                .map(|type_name| type_name.strip_suffix('?').map(str::to_string).unwrap_or(type_name)),
            Expression::DeclarationReference(data) => Some(data.type_name.clone()),
            Expression::TypeExpression { type_name } => Some(type_name.clone()),
            Expression::Subscript { type_name, .. }
            | Expression::Array { type_name, .. }
            | Expression::Dictionary { type_name, .. }
            | Expression::BinaryOperator { type_name, .. }
            | Expression::PrefixUnary { type_name, .. }
            | Expression::PostfixUnary { type_name, .. }
            | Expression::Closure { type_name, .. } => Some(type_name.clone()),
            Expression::Dot {
                right_expression, ..
            } => right_expression.type_name(),
            Expression::If {
                true_expression, ..
            } => true_expression.type_name(),
            Expression::Call(data) => data.type_name.clone(),
            Expression::LiteralInt { .. } => Some("Int".to_string()),
            Expression::LiteralUInt { .. } => Some("UInt".to_string()),
            Expression::LiteralDouble { .. } => Some("Double".to_string()),
            Expression::LiteralFloat { .. } => Some("Float".to_string()),
            Expression::LiteralBool { .. } => Some("Bool".to_string()),
            Expression::LiteralString { .. } | Expression::InterpolatedString { .. } => {
                Some("String".to_string())
            }
            Expression::LiteralCharacter { .. } => Some("Character".to_string()),
            Expression::Nil => None,
            Expression::Tuple { pairs } => {
                let components: Option<Vec<String>> = pairs
                    .iter()
                    .map(|pair| {
                        let type_name = pair.expression.type_name()?;
                        Some(match &pair.label {
                            Some(label) => format!("{}: {}", label, type_name),
                            None => type_name,
                        })
                    })
                    .collect();
                components.map(|components| format!("({})", components.join(", ")))
            }
            Expression::TupleShuffle { .. } => None,
        }
    }

    /// Source range, for the expressions that record one.
    pub fn range(&self) -> Option<SourceRange> {
        match self {
            Expression::DeclarationReference(data) => data.range,
            Expression::Call(data) => data.range,
            Expression::Parentheses { expression }
            | Expression::ForceValue { expression }
            | Expression::Optional { expression }
            | Expression::PrefixUnary { expression, .. }
            | Expression::PostfixUnary { expression, .. } => expression.range(),
            Expression::Dot {
                left_expression,
                right_expression,
            }
            | Expression::BinaryOperator {
                left_expression,
                right_expression,
                ..
            } => left_expression.range().or_else(|| right_expression.range()),
            Expression::Subscript {
                subscripted_expression,
                ..
            } => subscripted_expression.range(),
            _ => None,
        }
    }
}

/// Equality ignores `range`, including whether one is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationReferenceData {
    pub identifier: String,
    pub type_name: String,
    pub is_standard_library: bool,
    pub is_implicit: bool,
    pub range: Option<SourceRange>,
}

impl DeclarationReferenceData {
    /// A reference built outside of translation (tests, templates, passes).
    pub fn new(identifier: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            type_name: type_name.into(),
            is_standard_library: false,
            is_implicit: false,
            range: None,
        }
    }
}

/// Equality ignores `range`, including whether one is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallExpressionData {
    pub function: Box<Expression>,
    /// A `Tuple` or `TupleShuffle` expression.
    pub parameters: Box<Expression>,
    pub type_name: Option<String>,
    pub range: Option<SourceRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExpression {
    pub label: Option<String>,
    pub expression: Expression,
}

/// Where each parameter of a shuffled tuple comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TupleShuffleIndex {
    /// Consumes `count` expressions into one variadic parameter.
    Variadic { count: usize },
    /// Parameter left to its default value.
    Absent,
    /// Consumes the next expression.
    Present,
}

// =============================================================================
// RANGE-INSENSITIVE EQUALITY
// =============================================================================

impl PartialEq for FunctionDeclarationData {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            prefix,
            parameters,
            return_type,
            function_type,
            generic_types,
            is_implicit,
            is_static,
            is_mutating,
            extends_type,
            access,
            statements,
            range: _,
        } = self;
        *prefix == other.prefix
            && *parameters == other.parameters
            && *return_type == other.return_type
            && *function_type == other.function_type
            && *generic_types == other.generic_types
            && *is_implicit == other.is_implicit
            && *is_static == other.is_static
            && *is_mutating == other.is_mutating
            && *extends_type == other.extends_type
            && *access == other.access
            && *statements == other.statements
    }
}

impl PartialEq for VariableDeclarationData {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            identifier,
            type_name,
            expression,
            getter,
            setter,
            is_let,
            is_implicit,
            is_static,
            extends_type,
            access,
            range: _,
        } = self;
        *identifier == other.identifier
            && *type_name == other.type_name
            && *expression == other.expression
            && *getter == other.getter
            && *setter == other.setter
            && *is_let == other.is_let
            && *is_implicit == other.is_implicit
            && *is_static == other.is_static
            && *extends_type == other.extends_type
            && *access == other.access
    }
}

impl PartialEq for DeclarationReferenceData {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            identifier,
            type_name,
            is_standard_library,
            is_implicit,
            range: _,
        } = self;
        *identifier == other.identifier
            && *type_name == other.type_name
            && *is_standard_library == other.is_standard_library
            && *is_implicit == other.is_implicit
    }
}

impl PartialEq for CallExpressionData {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            function,
            parameters,
            type_name,
            range: _,
        } = self;
        *function == other.function && *parameters == other.parameters && *type_name == other.type_name
    }
}

// =============================================================================
// TRANSLATED FILE
// =============================================================================

/// Result of translating one source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranslatedFile {
    /// Type, function and global variable declarations.
    pub declarations: Vec<Statement>,
    /// Top-level code, run from the program entry point.
    pub statements: Vec<Statement>,
}

// =============================================================================
// TESTS
// =============================================================================
