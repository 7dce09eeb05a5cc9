//! Integration tests running dumps through translation and normalization.

use config::DumpDialect;
use dump_decoder::decode;
use intermediate_ast::passes::normalize;
use intermediate_ast::{
    Expression, FunctionDeclarationData, Statement, TranslatedFile, Translator, VariableDeclarationData,
};
use pretty_assertions::assert_eq;

const STRUCT_DUMP: &str = r#"(source_file "/tmp/point.swift"
  (struct_decl range=[/tmp/point.swift:1:1 - line:6:1] "Point" interface type='Point.Type' access=internal
    (pattern_binding_decl range=[/tmp/point.swift:2:3 - line:2:25]
      (pattern_named type='Int' 'origin')
      (integer_literal_expr type='Int' value=0))
    (var_decl range=[/tmp/point.swift:2:14 - line:2:14] "origin" type='Int' interface type='Int' access=internal static let)
    (var_decl range=[/tmp/point.swift:3:7 - line:3:7] "description" type='String' interface type='String' access=internal
      (accessor_decl range=[/tmp/point.swift:3:29 - line:5:3] interface type='(Point) -> () -> String' access=internal get_for=description
        (parameter_list)
        (brace_stmt range=[/tmp/point.swift:3:29 - line:5:3]
          (return_stmt range=[/tmp/point.swift:4:5 - line:4:12]
            (string_literal_expr type='String' value="point")))))
    (constructor_decl implicit range=[/tmp/point.swift:1:8 - line:1:8] "init()" interface type='(Point.Type) -> () -> Point' access=internal
      (parameter_list)
      (brace_stmt implicit))))"#;

fn translate(dump: &str) -> TranslatedFile {
    let raw = decode(dump).expect("dump should decode");
    Translator::new(DumpDialect::Modern)
        .translate_file(&raw)
        .expect("dump should translate")
}

#[test]
fn test_struct_is_normalized_for_rendering() {
    let file = normalize(translate(STRUCT_DUMP));

    let expected = Statement::StructDeclaration {
        struct_name: "Point".to_string(),
        inherits: Vec::new(),
        members: vec![
            Statement::FunctionDeclaration(FunctionDeclarationData {
                prefix: "toString".to_string(),
                return_type: "String".to_string(),
                function_type: "() -> String".to_string(),
                access: Some("internal".to_string()),
                statements: Some(vec![Statement::Return {
                    expression: Some(Expression::LiteralString {
                        value: "point".to_string(),
                    }),
                }]),
                ..FunctionDeclarationData::default()
            }),
            Statement::CompanionObject {
                members: vec![Statement::VariableDeclaration(VariableDeclarationData {
                    identifier: "origin".to_string(),
                    type_name: "Int".to_string(),
                    expression: Some(Expression::LiteralInt { value: 0 }),
                    is_let: true,
                    access: Some("internal".to_string()),
                    ..VariableDeclarationData::default()
                })],
            },
        ],
    };

    assert_eq!(file.declarations, vec![expected]);
    assert!(file.statements.is_empty());
}

#[test]
fn test_translated_file_survives_json() {
    let file = translate(STRUCT_DUMP);
    let json = serde_json::to_string(&file).expect("serialize");
    let restored: TranslatedFile = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, file);
}

#[test]
fn test_malformed_declaration_among_valid_ones() {
    let dump = r#"(source_file "/tmp/mixed.swift"
  (import_decl "Foundation")
  (var_decl "broken")
  (typealias "Count" type='Int')
  (import_decl "Dispatch"))"#;
    let raw = decode(dump).expect("decode");
    let translator = Translator::new(DumpDialect::Modern);

    let (file, errors) = translator.translate_file_collecting_errors(&raw).expect("translate");
    assert_eq!(
        file.declarations,
        vec![
            Statement::ImportDeclaration {
                module_name: "Foundation".to_string(),
            },
            Statement::Error,
            Statement::TypealiasDeclaration {
                identifier: "Count".to_string(),
                type_name: "Int".to_string(),
                is_implicit: false,
            },
            Statement::ImportDeclaration {
                module_name: "Dispatch".to_string(),
            },
        ]
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].node_name(), "Variable Declaration");

    assert!(translator.translate_file(&raw).is_err());
}
