//! Declaration rules: imports, type aliases, nominal types, extensions,
//! functions, variables and pattern bindings.

use super::dump_text::{
    clean_type, function_prefix, node_range, node_type, parse_generic_types,
    parse_tuple_components, return_type_of, split_inherits, split_top_level,
};
use super::{PendingBindings, Translator};
use crate::ast::{
    EnumElement, FunctionDeclarationData, FunctionParameter, Statement, VariableDeclarationData,
};
use crate::error::TranslationError;
use crate::unexpected_structure;
use dump_decoder::RawNode;

/// Which accessor of a property a declaration implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessorKind {
    Get,
    Set,
    Other,
}

/// Classify an accessor declaration, or `None` if `node` is a plain function.
fn accessor_kind(node: &RawNode) -> Option<AccessorKind> {
    let is_get = ["getter_for", "get_for"]
        .iter()
        .any(|key| node.attribute(key).is_some())
        || node.has_flag("get")
        || node.has_flag("_get");
    let is_set = ["setter_for", "set_for"]
        .iter()
        .any(|key| node.attribute(key).is_some())
        || node.has_flag("set")
        || node.has_flag("_set");

    if is_get {
        Some(AccessorKind::Get)
    } else if is_set {
        Some(AccessorKind::Set)
    } else if node.name == "Accessor Declaration" {
        Some(AccessorKind::Other)
    } else {
        None
    }
}

fn required_name<'a>(node: &'a RawNode, what: &str) -> Result<&'a str, TranslationError> {
    node.standalone_at(0)
        .ok_or_else(|| unexpected_structure!(node, "{} without a name", what))
}

fn required_type(node: &RawNode) -> Result<String, TranslationError> {
    node_type(node).ok_or_else(|| unexpected_structure!(node, "expected a type attribute"))
}

impl Translator {
    // =========================================================================
    // SIMPLE DECLARATIONS
    // =========================================================================

    pub(super) fn translate_import(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        Ok(Statement::ImportDeclaration {
            module_name: required_name(node, "import")?.to_string(),
        })
    }

    pub(super) fn translate_typealias(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        let identifier = required_name(node, "typealias")?.to_string();
        let type_name = node
            .attribute("type")
            .map(clean_type)
            .ok_or_else(|| unexpected_structure!(node, "typealias without an aliased type"))?;

        Ok(Statement::TypealiasDeclaration {
            identifier,
            type_name,
            is_implicit: node.has_flag("implicit"),
        })
    }

    // =========================================================================
    // NOMINAL TYPES
    // =========================================================================

    pub(super) fn translate_class(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        Ok(Statement::ClassDeclaration {
            class_name: required_name(node, "class")?.to_string(),
            inherits: split_inherits(node.attribute("inherits")),
            members: self.translate_scope(&node.subtrees)?,
        })
    }

    pub(super) fn translate_struct(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        Ok(Statement::StructDeclaration {
            struct_name: required_name(node, "struct")?.to_string(),
            inherits: split_inherits(node.attribute("inherits")),
            members: self.translate_scope(&node.subtrees)?,
        })
    }

    pub(super) fn translate_protocol(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        Ok(Statement::ProtocolDeclaration {
            protocol_name: required_name(node, "protocol")?.to_string(),
            members: self.translate_scope(&node.subtrees)?,
        })
    }

    /// Enum cases may be grouped under "Enum Case Declaration" nodes or be
    /// direct children; every other child is a member.
    pub(super) fn translate_enum(&self, node: &RawNode) -> Result<Statement, TranslationError> {
        let enum_name = required_name(node, "enum")?.to_string();

        let mut elements = Vec::new();
        let mut members = Vec::new();
        let mut pending = PendingBindings::default();
        for child in &node.subtrees {
            match child.name.as_str() {
                "Enum Case Declaration" => {
                    for element in child.subtrees_named("Enum Element Declaration") {
                        elements.push(self.translate_enum_element(element)?);
                    }
                }
                "Enum Element Declaration" => {
                    // Elements listed both in a case group and directly are kept once.
                    let element = self.translate_enum_element(child)?;
                    if !elements.iter().any(|existing: &EnumElement| existing.name == element.name) {
                        elements.push(element);
                    }
                }
                _ => members.extend(self.translate_statement(child, &mut pending)?),
            }
        }

        Ok(Statement::EnumDeclaration {
            access: node.attribute("access").map(str::to_string),
            enum_name,
            inherits: split_inherits(node.attribute("inherits")),
            elements,
            members,
            is_implicit: node.has_flag("implicit"),
        })
    }

    fn translate_enum_element(&self, node: &RawNode) -> Result<EnumElement, TranslationError> {
        let name = function_prefix(required_name(node, "enum element")?);

        // `(E.Type) -> (x: Int, String) -> E` carries the associated values.
        let associated_values = node_type(node)
            .map(|interface_type| {
                let pieces = split_top_level(&interface_type, "->");
                if pieces.len() >= 3 {
                    parse_tuple_components(pieces[1])
                } else {
                    Vec::new()
                }
            })
            .unwrap_or_default();

        let raw_value = node
            .subtrees
            .iter()
            .find(|child| child.name.ends_with("Expression"))
            .map(|child| self.translate_expression(child))
            .transpose()?;

        Ok(EnumElement {
            name,
            associated_values,
            raw_value,
        })
    }

    /// Extension members are lifted out and tagged with the extended type.
    pub(super) fn translate_extension(&self, node: &RawNode) -> Result<Vec<Statement>, TranslationError> {
        let extended_type = required_name(node, "extension")?.to_string();
        let members = self.translate_scope(&node.subtrees)?;

        Ok(members
            .into_iter()
            .map(|member| match member {
                Statement::FunctionDeclaration(mut data) => {
                    data.extends_type = Some(extended_type.clone());
                    Statement::FunctionDeclaration(data)
                }
                Statement::VariableDeclaration(mut data) => {
                    data.extends_type = Some(extended_type.clone());
                    Statement::VariableDeclaration(data)
                }
                other => other,
            })
            .collect())
    }

    // =========================================================================
    // FUNCTIONS
    // =========================================================================

    /// Translate a function or initializer. Implicit functions and property
    /// accessors yield `None`.
    pub(super) fn translate_function(
        &self,
        node: &RawNode,
    ) -> Result<Option<FunctionDeclarationData>, TranslationError> {
        if node.has_flag("implicit") || accessor_kind(node).is_some() {
            return Ok(None);
        }
        self.translate_function_body(node).map(Some)
    }

    fn translate_function_body(&self, node: &RawNode) -> Result<FunctionDeclarationData, TranslationError> {
        let prefix = if node.name == "Constructor Declaration" {
            "init".to_string()
        } else {
            function_prefix(required_name(node, "function")?)
        };
        let function_type = required_type(node)?;

        let generic_types = node
            .standalone_attributes
            .iter()
            .find(|attribute| attribute.starts_with('<'))
            .map(|attribute| parse_generic_types(attribute))
            .unwrap_or_default();

        let parameters = match node.subtrees_named("Parameter List").last() {
            Some(list) => list
                .subtrees_named("Parameter")
                .map(|parameter| self.translate_parameter(parameter))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let statements = node
            .subtree("Brace Statement")
            .map(|brace| self.translate_scope(&brace.subtrees))
            .transpose()?;

        Ok(FunctionDeclarationData {
            prefix,
            parameters,
            return_type: return_type_of(&function_type),
            function_type,
            generic_types,
            is_implicit: node.has_flag("implicit"),
            is_static: node.has_flag("type") || node.has_flag("static"),
            is_mutating: node.has_flag("mutating"),
            extends_type: None,
            access: node.attribute("access").map(str::to_string),
            statements,
            range: node_range(node),
        })
    }

    fn translate_parameter(&self, node: &RawNode) -> Result<FunctionParameter, TranslationError> {
        let label = required_name(node, "parameter")?.to_string();
        let api_label = node
            .attribute("apiName")
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let value = node
            .subtrees
            .iter()
            .find(|child| child.name.ends_with("Expression"))
            .map(|child| self.translate_expression(child))
            .transpose()?;

        Ok(FunctionParameter {
            label,
            api_label,
            type_name: required_type(node)?,
            value,
        })
    }

    // =========================================================================
    // VARIABLES
    // =========================================================================

    /// Translate a variable declaration, attaching the pending initializer
    /// with the same identifier and type. Implicit variables yield `None`.
    pub(super) fn translate_variable(
        &self,
        node: &RawNode,
        pending: &mut PendingBindings,
    ) -> Result<Option<VariableDeclarationData>, TranslationError> {
        if node.has_flag("implicit") {
            return Ok(None);
        }

        let identifier = required_name(node, "variable")?.to_string();
        let type_name = required_type(node)?;
        let expression = pending.take(&identifier, &type_name);

        let mut getter = None;
        let mut setter = None;
        for child in &node.subtrees {
            if child.has_flag("implicit") {
                continue;
            }
            match accessor_kind(child) {
                Some(AccessorKind::Get) => {
                    let mut data = self.translate_accessor(child, "get")?;
                    data.return_type = type_name.clone();
                    getter = Some(data);
                }
                Some(AccessorKind::Set) => {
                    setter = Some(self.translate_accessor(child, "set")?);
                }
                Some(AccessorKind::Other) | None => {}
            }
        }

        Ok(Some(VariableDeclarationData {
            identifier,
            type_name,
            expression,
            getter,
            setter,
            is_let: node.has_flag("let"),
            is_implicit: false,
            is_static: node.has_flag("type") || node.has_flag("static"),
            extends_type: None,
            access: node.attribute("access").map(str::to_string),
            range: node_range(node),
        }))
    }

    fn translate_accessor(
        &self,
        node: &RawNode,
        prefix: &str,
    ) -> Result<FunctionDeclarationData, TranslationError> {
        let parameters = match node.subtrees_named("Parameter List").last() {
            Some(list) => list
                .subtrees_named("Parameter")
                .map(|parameter| self.translate_parameter(parameter))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        let function_type = node_type(node).unwrap_or_default();

        Ok(FunctionDeclarationData {
            prefix: prefix.to_string(),
            parameters,
            return_type: return_type_of(&function_type),
            function_type,
            statements: node
                .subtree("Brace Statement")
                .map(|brace| self.translate_scope(&brace.subtrees))
                .transpose()?,
            range: node_range(node),
            ..FunctionDeclarationData::default()
        })
    }

    // =========================================================================
    // PATTERN BINDINGS
    // =========================================================================

    /// Store the initializers of a pattern binding in `pending`.
    ///
    /// A binding lists patterns, each followed by its initializer. Some
    /// dialects print the initializer twice (original and processed); the
    /// last one is used. `_ = expression` becomes an expression statement.
    pub(super) fn translate_pattern_binding(
        &self,
        node: &RawNode,
        pending: &mut PendingBindings,
    ) -> Result<Vec<Statement>, TranslationError> {
        let mut statements = Vec::new();
        let mut index = 0;

        while index < node.subtrees.len() {
            let pattern = &node.subtrees[index];
            if !pattern.name.starts_with("Pattern") {
                return Err(unexpected_structure!(node, "expected a pattern at child {}", index));
            }
            index += 1;

            let mut initializer = None;
            while let Some(child) = node.subtrees.get(index) {
                if child.name.starts_with("Pattern") {
                    break;
                }
                initializer = Some(child);
                index += 1;
            }

            match (named_pattern(pattern), initializer) {
                (Some((identifier, type_name)), Some(initializer)) => {
                    let expression = self.translate_expression(initializer)?;
                    pending.insert(&identifier, &type_name, expression);
                }
                (Some(_), None) => {}
                (None, Some(initializer)) if pattern.name == "Pattern Any" => {
                    statements.push(Statement::Expression(self.translate_expression(initializer)?));
                }
                (None, _) => {
                    return Err(unexpected_structure!(pattern, "unsupported binding pattern"));
                }
            }
        }

        Ok(statements)
    }
}

/// Identifier and type bound by a named pattern, looking through typed,
/// `let`/`var` and parenthesized wrappers.
pub(super) fn named_pattern(pattern: &RawNode) -> Option<(String, String)> {
    match pattern.name.as_str() {
        "Pattern Named" => {
            let identifier = pattern.standalone_at(0)?.to_string();
            let type_name = node_type(pattern)?;
            Some((identifier, type_name))
        }
        "Pattern Typed" => {
            let (identifier, inner_type) = named_pattern(pattern.subtree_at(0)?)?;
            Some((identifier, node_type(pattern).unwrap_or(inner_type)))
        }
        "Pattern Let" | "Pattern Variable" | "Pattern Parentheses" => named_pattern(pattern.subtree_at(0)?),
        _ => None,
    }
}
