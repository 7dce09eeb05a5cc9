use super::KotlinRenderer;
use crate::names::{capitalize, upper_snake_case};
use crate::types::kotlin_type;
use crate::unit::TranslationUnit;
use intermediate_ast::{EnumElement, FunctionDeclarationData, FunctionParameter, Statement, VariableDeclarationData};

/// Raw value types an enum may declare as its first inherited type.
const RAW_VALUE_TYPES: &[&str] = &[
    "Int", "Int8", "Int16", "Int32", "Int64", "UInt", "UInt8", "UInt16", "UInt32", "UInt64", "Double", "Float",
    "String", "Character",
];

/// Kotlin modifier for an access level. Only private access narrows the
/// default public visibility.
fn access_modifier(access: Option<&str>) -> &'static str {
    match access {
        Some("private" | "fileprivate") => "private ",
        _ => "",
    }
}

fn inheritance_clause(inherits: &[String]) -> String {
    if inherits.is_empty() {
        return String::new();
    }
    let types: Vec<String> = inherits.iter().map(|name| kotlin_type(name)).collect();
    format!(": {}", types.join(", "))
}

impl KotlinRenderer {
    // =========================================================================
    // TYPES
    // =========================================================================

    pub(super) fn class_declaration(
        &self,
        class_name: &str,
        inherits: &[String],
        members: &[Statement],
        level: usize,
    ) -> TranslationUnit {
        let mut unit = TranslationUnit::text(format!(
            "{}class {}{}",
            self.indent(level),
            class_name,
            inheritance_clause(inherits)
        ));
        self.push_body(&mut unit, members, level);
        unit
    }

    /// A data class whose stored properties are its constructor parameters.
    pub(super) fn struct_declaration(
        &self,
        struct_name: &str,
        inherits: &[String],
        members: &[Statement],
        level: usize,
    ) -> TranslationUnit {
        let (stored, others): (Vec<&Statement>, Vec<&Statement>) = members.iter().partition(|member| {
            matches!(member, Statement::VariableDeclaration(data) if data.getter.is_none() && data.setter.is_none())
        });

        let mut unit = TranslationUnit::text(self.indent(level));
        if stored.is_empty() {
            unit.push_str(format!("class {}", struct_name));
        } else {
            unit.push_str(format!("data class {}(", struct_name));
            for (index, member) in stored.iter().enumerate() {
                let Statement::VariableDeclaration(data) = member else {
                    continue;
                };
                if index > 0 {
                    unit.push_str(", ");
                }
                unit.push_unit(self.property_parameter(data, level));
            }
            unit.push_str(")");
        }
        unit.push_str(inheritance_clause(inherits));

        let others: Vec<Statement> = others.into_iter().cloned().collect();
        self.push_body(&mut unit, &others, level);
        unit
    }

    /// `val x: Int = 0` inside a primary constructor.
    fn property_parameter(&self, data: &VariableDeclarationData, level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::with_range(data.range);
        unit.push_str(format!(
            "{}{} {}: {}",
            access_modifier(data.access.as_deref()),
            if data.is_let { "val" } else { "var" },
            data.identifier,
            kotlin_type(&data.type_name)
        ));
        if let Some(expression) = &data.expression {
            unit.push_str(" = ");
            unit.push_unit(self.expression(expression, level));
        }
        unit
    }

    /// Enums without associated values become enum classes, the others
    /// sealed classes with one subclass or object per element.
    pub(super) fn enum_declaration(
        &self,
        access: Option<&str>,
        enum_name: &str,
        inherits: &[String],
        elements: &[EnumElement],
        members: &[Statement],
        level: usize,
    ) -> TranslationUnit {
        let indentation = self.indent(level);
        let element_indentation = self.indent(level + 1);
        let modifier = access_modifier(access);

        if elements.iter().any(|element| !element.associated_values.is_empty()) {
            let mut unit = TranslationUnit::text(format!(
                "{}{}sealed class {}{} {{\n",
                indentation,
                modifier,
                enum_name,
                inheritance_clause(inherits)
            ));
            for element in elements {
                unit.push_str(element_indentation.clone());
                unit.push_str(self.sealed_member(enum_name, element));
                unit.push_str("\n");
            }
            unit.push_unit(self.statements(members, level + 1));
            unit.push_str(format!("{}}}\n", indentation));
            return unit;
        }

        let (raw_type, interfaces) = match inherits.split_first() {
            Some((first, rest)) if RAW_VALUE_TYPES.contains(&first.as_str()) => (Some(first.as_str()), rest),
            _ => (None, inherits),
        };
        let has_raw_values = raw_type.is_some() && elements.iter().any(|element| element.raw_value.is_some());

        let mut unit = TranslationUnit::text(format!("{}{}enum class {}", indentation, modifier, enum_name));
        if let (Some(raw_type), true) = (raw_type, has_raw_values) {
            unit.push_str(format!("(val rawValue: {})", kotlin_type(raw_type)));
        }
        unit.push_str(format!("{} {{\n", inheritance_clause(interfaces)));

        for element in elements {
            unit.push_str(format!("{}{}", element_indentation, upper_snake_case(&element.name)));
            if let (Some(raw_value), true) = (&element.raw_value, has_raw_values) {
                unit.push_str("(");
                unit.push_unit(self.expression(raw_value, level + 1));
                unit.push_str(")");
            }
            unit.push_str(",\n");
        }
        if unit.drop_last(",\n") {
            unit.push_str(if members.is_empty() { "\n" } else { ";\n\n" });
        }
        unit.push_unit(self.statements(members, level + 1));
        unit.push_str(format!("{}}}\n", indentation));
        unit
    }

    fn sealed_member(&self, enum_name: &str, element: &EnumElement) -> String {
        let name = capitalize(&element.name);
        if element.associated_values.is_empty() {
            return format!("object {}: {}()", name, enum_name);
        }
        let properties: Vec<String> = element
            .associated_values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let label = if value.label.is_empty() || value.label == "_" {
                    format!("value{}", index + 1)
                } else {
                    value.label.clone()
                };
                format!("val {}: {}", label, kotlin_type(&value.type_name))
            })
            .collect();
        format!("class {}({}): {}()", name, properties.join(", "), enum_name)
    }

    pub(super) fn protocol_declaration(&self, protocol_name: &str, members: &[Statement], level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::text(format!("{}interface {}", self.indent(level), protocol_name));
        self.push_body(&mut unit, members, level);
        unit
    }

    /// ` { members }` and the closing newline; just the newline when empty.
    fn push_body(&self, unit: &mut TranslationUnit, members: &[Statement], level: usize) {
        if !members.is_empty() {
            unit.push_str(" ");
            unit.push_unit(self.block(members, level));
        }
        unit.push_str("\n");
    }

    // =========================================================================
    // FUNCTIONS
    // =========================================================================

    pub(super) fn function_declaration(&self, data: &FunctionDeclarationData, level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::with_range(data.range);
        unit.push_str(self.indent(level));
        unit.push_str(access_modifier(data.access.as_deref()));

        if data.prefix == "init" {
            unit.push_str("constructor");
        } else {
            if data.prefix == "toString" && data.parameters.is_empty() {
                unit.push_str("override ");
            }
            unit.push_str("fun ");
            if !data.generic_types.is_empty() {
                unit.push_str(format!("<{}> ", data.generic_types.join(", ")));
            }
            if let Some(extended) = &data.extends_type {
                unit.push_str(format!("{}.", kotlin_type(extended)));
            }
            unit.push_str(data.prefix.clone());
        }

        unit.push_str("(");
        for (index, parameter) in data.parameters.iter().enumerate() {
            if index > 0 {
                unit.push_str(", ");
            }
            unit.push_unit(self.function_parameter(parameter, level));
        }
        unit.push_str(")");

        let return_type = data.return_type.trim();
        if data.prefix != "init" && !matches!(return_type, "" | "()" | "Void") {
            unit.push_str(format!(": {}", kotlin_type(return_type)));
        }

        if let Some(statements) = &data.statements {
            unit.push_str(" ");
            unit.push_unit(self.block(statements, level));
        }
        unit.push_str("\n");
        unit
    }

    fn function_parameter(&self, parameter: &FunctionParameter, level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::new();
        match parameter.type_name.trim().strip_suffix("...") {
            Some(element_type) => unit.push_str(format!("vararg {}: {}", parameter.label, kotlin_type(element_type))),
            None => unit.push_str(format!("{}: {}", parameter.label, kotlin_type(&parameter.type_name))),
        }
        if let Some(value) = &parameter.value {
            unit.push_str(" = ");
            unit.push_unit(self.expression(value, level));
        }
        unit
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    /// `val`/`var` declarations, with accessors on the following lines.
    pub(super) fn variable_declaration(&self, data: &VariableDeclarationData, level: usize) -> TranslationUnit {
        let keyword = match (&data.getter, &data.setter) {
            (_, Some(_)) => "var",
            (Some(_), None) => "val",
            (None, None) if data.is_let => "val",
            (None, None) => "var",
        };

        let mut unit = TranslationUnit::with_range(data.range);
        unit.push_str(format!(
            "{}{}{} ",
            self.indent(level),
            access_modifier(data.access.as_deref()),
            keyword
        ));
        if let Some(extended) = &data.extends_type {
            unit.push_str(format!("{}.", kotlin_type(extended)));
        }
        unit.push_str(data.identifier.clone());
        if !data.type_name.is_empty() {
            unit.push_str(format!(": {}", kotlin_type(&data.type_name)));
        }
        if let Some(expression) = &data.expression {
            unit.push_str(" = ");
            unit.push_unit(self.expression(expression, level));
        }
        unit.push_str("\n");

        let accessor_indentation = self.indent(level + 1);
        if let Some(getter) = &data.getter {
            unit.push_str(format!("{}get() ", accessor_indentation));
            unit.push_unit(self.block(getter.statements.as_deref().unwrap_or_default(), level + 1));
            unit.push_str("\n");
        }
        if let Some(setter) = &data.setter {
            let parameter = setter
                .parameters
                .first()
                .map_or("newValue", |parameter| parameter.label.as_str());
            unit.push_str(format!("{}set({}) ", accessor_indentation, parameter));
            unit.push_unit(self.block(setter.statements.as_deref().unwrap_or_default(), level + 1));
            unit.push_str("\n");
        }
        unit
    }
}
