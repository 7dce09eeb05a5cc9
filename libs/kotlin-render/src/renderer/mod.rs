//! # Kotlin Renderer
//!
//! Serializes a normalized [`TranslatedFile`] into a [`TranslationUnit`]
//! tree. Declarations come first, separated by blank lines; top-level
//! statements are wrapped in the program's `main` function.
//!
//! ## Submodules
//!
//! - `declarations`: types, functions, properties
//! - `statements`: control flow and statement lists
//! - `expressions`: expressions and literals

mod declarations;
mod expressions;
mod statements;


use crate::unit::TranslationUnit;
use config::constants::KOTLIN_MAIN_SIGNATURE;
use config::TranslationConfig;
use intermediate_ast::{Statement, TranslatedFile};
use std::collections::HashSet;

/// How an enum declared in the file is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnumKind {
    /// No element has associated values.
    EnumClass,
    /// Some element has associated values.
    SealedClass,
}

/// Renders one translated file.
///
/// The renderer knows the enums declared in the file, so that references
/// to their elements use the spelling of the generated declarations.
#[derive(Debug, Clone)]
pub struct KotlinRenderer {
    indentation: String,
    enum_classes: HashSet<String>,
    sealed_classes: HashSet<String>,
}

impl KotlinRenderer {
    /// Create a renderer for `file`.
    pub fn new(config: &TranslationConfig, file: &TranslatedFile) -> Self {
        let mut renderer = Self {
            indentation: config.indentation.clone(),
            enum_classes: HashSet::new(),
            sealed_classes: HashSet::new(),
        };
        renderer.collect_enums(&file.declarations);
        renderer
    }

    fn collect_enums(&mut self, statements: &[Statement]) {
        for statement in statements {
            match statement {
                Statement::EnumDeclaration {
                    enum_name,
                    elements,
                    members,
                    ..
                } => {
                    if elements.iter().any(|element| !element.associated_values.is_empty()) {
                        self.sealed_classes.insert(enum_name.clone());
                    } else {
                        self.enum_classes.insert(enum_name.clone());
                    }
                    self.collect_enums(members);
                }
                Statement::ClassDeclaration { members, .. }
                | Statement::StructDeclaration { members, .. }
                | Statement::CompanionObject { members }
                | Statement::ProtocolDeclaration { members, .. } => self.collect_enums(members),
                _ => {}
            }
        }
    }

    /// Kind of the enum named by `type_name`, which may be qualified.
    fn enum_kind(&self, type_name: &str) -> Option<EnumKind> {
        let short_name = type_name.rsplit('.').next().unwrap_or(type_name);
        if self.sealed_classes.contains(type_name) || self.sealed_classes.contains(short_name) {
            Some(EnumKind::SealedClass)
        } else if self.enum_classes.contains(type_name) || self.enum_classes.contains(short_name) {
            Some(EnumKind::EnumClass)
        } else {
            None
        }
    }

    /// Render the whole file.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use config::TranslationConfig;
    /// use intermediate_ast::{Statement, TranslatedFile};
    /// use kotlin_render::KotlinRenderer;
    ///
    /// let file = TranslatedFile {
    ///     declarations: Vec::new(),
    ///     statements: vec![Statement::Return { expression: None }],
    /// };
    /// let unit = KotlinRenderer::new(&TranslationConfig::default(), &file).render_file(&file);
    /// assert_eq!(unit.to_text(), "fun main(args: Array<String>) {\n    return\n}\n");
    /// ```
    pub fn render_file(&self, file: &TranslatedFile) -> TranslationUnit {
        let mut unit = TranslationUnit::new();

        let declarations: Vec<TranslationUnit> = file
            .declarations
            .iter()
            .map(|declaration| self.statement(declaration, 0))
            .filter(|rendered| !rendered.is_empty())
            .collect();
        for (index, declaration) in declarations.into_iter().enumerate() {
            if index > 0 {
                unit.push_str("\n");
            }
            unit.push_unit(declaration);
        }

        if !file.statements.is_empty() {
            if !unit.is_empty() {
                unit.push_str("\n");
            }
            unit.push_str(format!("{} {{\n", KOTLIN_MAIN_SIGNATURE));
            unit.push_unit(self.statements(&file.statements, 1));
            unit.push_str("}\n");
        }

        unit
    }

    fn indent(&self, level: usize) -> String {
        self.indentation.repeat(level)
    }

    /// `{`, the statements one level deeper, and `}` at `level`.
    fn block(&self, statements: &[Statement], level: usize) -> TranslationUnit {
        let mut unit = TranslationUnit::text("{\n");
        unit.push_unit(self.statements(statements, level + 1));
        unit.push_str(format!("{}}}", self.indent(level)));
        unit
    }
}
