//! Translator tests over small but complete dumps.

use super::*;
use crate::ast::*;
use crate::source_range::SourceRange;
use dump_decoder::{decode, substitute_placeholder};
use pretty_assertions::assert_eq;

// =============================================================================
// HELPERS
// =============================================================================

fn translate_with(dialect: DumpDialect, dump: &str) -> TranslatedFile {
    let raw = decode(dump).expect("dump should decode");
    Translator::new(dialect)
        .translate_file(&raw)
        .expect("dump should translate")
}

fn translate(dump: &str) -> TranslatedFile {
    translate_with(DumpDialect::Modern, dump)
}

/// Wrap statement dumps in a source file with one top-level code block.
fn top_level(statements: &str) -> Vec<Statement> {
    let dump = format!(
        "(source_file \"/tmp/main.swift\" (top_level_code_decl (brace_stmt {})))",
        statements
    );
    let file = translate(&dump);
    assert!(file.declarations.is_empty());
    file.statements
}

fn reference(identifier: &str, type_name: &str) -> Expression {
    Expression::DeclarationReference(DeclarationReferenceData::new(identifier, type_name))
}

fn standard_library_reference(identifier: &str, type_name: &str) -> Expression {
    Expression::DeclarationReference(DeclarationReferenceData {
        is_standard_library: true,
        ..DeclarationReferenceData::new(identifier, type_name)
    })
}

// =============================================================================
// DECLARATIONS
// =============================================================================

const VARIABLE_DUMP: &str = r#"(source_file "<<SOURCE_PATH>>"
  (top_level_code_decl range=[<<SOURCE_PATH>>:1:1 - line:1:13]
    (brace_stmt implicit range=[<<SOURCE_PATH>>:1:1 - line:1:13]
      (pattern_binding_decl range=[<<SOURCE_PATH>>:1:1 - line:1:13]
        (pattern_typed type='Int'
          (pattern_named type='Int' 'x')
          (type_ident
            (component id='Int' bind=Swift.(file).Int)))
        (call_expr implicit type='Int' location=<<SOURCE_PATH>>:1:14 range=[<<SOURCE_PATH>>:1:14 - line:1:14] nothrow arg_labels=_builtinIntegerLiteral:
          (constructor_ref_call_expr implicit type='(_MaxBuiltinIntegerType) -> Int' location=<<SOURCE_PATH>>:1:14 range=[<<SOURCE_PATH>>:1:14 - line:1:14] nothrow
            (declref_expr implicit type='(Int.Type) -> (_MaxBuiltinIntegerType) -> Int' location=<<SOURCE_PATH>>:1:14 range=[<<SOURCE_PATH>>:1:14 - line:1:14] decl=Swift.(file).Int.init(_builtinIntegerLiteral:) function_ref=single)
            (type_expr implicit type='Int.Type' location=<<SOURCE_PATH>>:1:14 range=[<<SOURCE_PATH>>:1:14 - line:1:14] typerepr='Int'))
          (tuple_expr implicit type='(_builtinIntegerLiteral: Int2048)' location=<<SOURCE_PATH>>:1:14 range=[<<SOURCE_PATH>>:1:14 - line:1:14] names=_builtinIntegerLiteral
            (integer_literal_expr type='Int2048' location=<<SOURCE_PATH>>:1:14 range=[<<SOURCE_PATH>>:1:14 - line:1:14] value=5))))))
  (var_decl range=[<<SOURCE_PATH>>:1:5 - line:1:5] "x" type='Int' interface type='Int' access=internal storage_kind=stored))
"#;

#[test]
fn test_pattern_binding_initializes_following_variable() {
    let file = translate_with(
        DumpDialect::Legacy,
        &substitute_placeholder(VARIABLE_DUMP, "/tmp/main.swift"),
    );

    assert!(file.statements.is_empty());
    assert_eq!(
        file.declarations,
        vec![Statement::VariableDeclaration(VariableDeclarationData {
            identifier: "x".to_string(),
            type_name: "Int".to_string(),
            expression: Some(Expression::LiteralInt { value: 5 }),
            access: Some("internal".to_string()),
            ..VariableDeclarationData::default()
        })]
    );

    let Statement::VariableDeclaration(variable) = &file.declarations[0] else {
        unreachable!();
    };
    let range = variable.range.expect("variable range");
    assert!(range.same_position(&SourceRange::new(1, 5, 1, 5)));
}

#[test]
fn test_variable_without_matching_binding_has_no_initializer() {
    let dump = r#"(source_file "/tmp/main.swift"
  (top_level_code_decl
    (brace_stmt
      (pattern_binding_decl
        (pattern_named type='Int' 'y')
        (integer_literal_expr type='Int' value=1))
      (pattern_binding_decl
        (pattern_named type='String' 'x')
        (string_literal_expr type='String' value="a"))))
  (var_decl "x" type='Int' interface type='Int' storage_kind=stored)
  (var_decl "z" type='Int' interface type='Int' storage_kind=stored))"#;

    let file = translate(dump);
    assert!(file.statements.is_empty());
    let variables: Vec<_> = file
        .declarations
        .iter()
        .map(|declaration| match declaration {
            Statement::VariableDeclaration(variable) => (variable.identifier.as_str(), variable.expression.is_none()),
            other => panic!("expected a variable, got {:?}", other),
        })
        .collect();
    assert_eq!(variables, vec![("x", true), ("z", true)]);
}

#[test]
fn test_original_and_processed_initializers_use_the_last() {
    let dump = r#"(source_file "/tmp/main.swift"
  (top_level_code_decl
    (brace_stmt
      (pattern_binding_decl
        (pattern_named type='Int' 'z')
        Original init:
        (integer_literal_expr type='Int' value=1)
        Processed init:
        (integer_literal_expr type='Int' value=2))))
  (var_decl "z" type='Int' interface type='Int' let))"#;

    let file = translate(dump);
    let Statement::VariableDeclaration(variable) = &file.declarations[0] else {
        panic!("expected a variable");
    };
    assert!(variable.is_let);
    assert_eq!(variable.expression, Some(Expression::LiteralInt { value: 2 }));
}

const FUNCTION_DUMP: &str = r#"(source_file "/tmp/f.swift"
  (func_decl range=[/tmp/f.swift:1:1 - line:3:1] "add(_:to:)" interface type='(Int, Int) -> Int' access=internal
    (parameter_list range=[/tmp/f.swift:1:9 - line:1:30]
      (parameter "a" type='Int' interface type='Int')
      (parameter "b" apiName=to type='Int' interface type='Int'))
    (brace_stmt range=[/tmp/f.swift:1:37 - line:3:1]
      (return_stmt range=[/tmp/f.swift:2:3 - line:2:14]
        (binary_expr type='Int' location=/tmp/f.swift:2:12 range=[/tmp/f.swift:2:10 - line:2:14] nothrow
          (dot_syntax_call_expr implicit type='(Int, Int) -> Int' location=/tmp/f.swift:2:12 range=[/tmp/f.swift:2:12 - line:2:12] nothrow
            (declref_expr type='(Int.Type) -> (Int, Int) -> Int' location=/tmp/f.swift:2:12 range=[/tmp/f.swift:2:12 - line:2:12] decl=Swift.(file).Int extension.+ function_ref=unapplied)
            (type_expr implicit type='Int.Type' location=/tmp/f.swift:2:12 range=[/tmp/f.swift:2:12 - line:2:12] typerepr='Int'))
          (tuple_expr implicit type='(Int, Int)' location=/tmp/f.swift:2:10 range=[/tmp/f.swift:2:10 - line:2:14]
            (declref_expr type='Int' location=/tmp/f.swift:2:10 range=[/tmp/f.swift:2:10 - line:2:10] decl=main.(file).add(_:to:).a@/tmp/f.swift:1:12 function_ref=unapplied)
            (declref_expr type='Int' location=/tmp/f.swift:2:14 range=[/tmp/f.swift:2:14 - line:2:14] decl=main.(file).add(_:to:).b@/tmp/f.swift:1:24 function_ref=unapplied))))))))"#;

#[test]
fn test_function_declaration() {
    let file = translate(FUNCTION_DUMP);

    let expected = FunctionDeclarationData {
        prefix: "add".to_string(),
        parameters: vec![
            FunctionParameter {
                label: "a".to_string(),
                api_label: None,
                type_name: "Int".to_string(),
                value: None,
            },
            FunctionParameter {
                label: "b".to_string(),
                api_label: Some("to".to_string()),
                type_name: "Int".to_string(),
                value: None,
            },
        ],
        return_type: "Int".to_string(),
        function_type: "(Int, Int) -> Int".to_string(),
        access: Some("internal".to_string()),
        statements: Some(vec![Statement::Return {
            expression: Some(Expression::BinaryOperator {
                left_expression: Box::new(reference("a", "Int")),
                right_expression: Box::new(reference("b", "Int")),
                operator_symbol: "+".to_string(),
                type_name: "Int".to_string(),
            }),
        }]),
        ..FunctionDeclarationData::default()
    };

    assert_eq!(file.declarations, vec![Statement::FunctionDeclaration(expected)]);
}

const CLASS_DUMP: &str = r#"(source_file "/tmp/c.swift"
  (class_decl range=[/tmp/c.swift:1:1 - line:4:1] "Counter" interface type='Counter.Type' access=internal inherits: Base, Printable
    (pattern_binding_decl range=[/tmp/c.swift:2:3 - line:2:15]
      (pattern_named type='Int' 'count')
      (integer_literal_expr type='Int' value=0))
    (var_decl range=[/tmp/c.swift:2:7 - line:2:7] "count" type='Int' interface type='Int' access=internal storage_kind=stored
      (accessor_decl implicit range=[/tmp/c.swift:2:7 - line:2:7] 'anonname=0x1' interface type='(Counter) -> () -> Int' access=internal get_for=count
        (parameter_list)
        (brace_stmt implicit)))
    (func_decl range=[/tmp/c.swift:3:3 - line:3:35] "current()" interface type='(Counter) -> () -> Int' access=internal
      (parameter_list range=[/tmp/c.swift:3:15 - line:3:16])
      (brace_stmt range=[/tmp/c.swift:3:24 - line:3:35]
        (return_stmt range=[/tmp/c.swift:3:26 - line:3:33]
          (member_ref_expr type='Int' location=/tmp/c.swift:3:33 range=[/tmp/c.swift:3:33 - line:3:33] decl=main.(file).Counter.count@/tmp/c.swift:2:7 direct_to_storage
            (declref_expr implicit type='Counter' location=/tmp/c.swift:3:33 range=[/tmp/c.swift:3:33 - line:3:33] decl=main.(file).Counter.current().self@/tmp/c.swift:3:8 function_ref=unapplied)))))
    (destructor_decl implicit range=[/tmp/c.swift:1:7 - line:1:7] "deinit" interface type='(Counter) -> () -> ()' access=internal
      (parameter "self")
      (brace_stmt implicit range=[/tmp/c.swift:1:7 - line:1:7]))))"#;

#[test]
fn test_class_members_and_implicit_self() {
    let file = translate(CLASS_DUMP);

    let expected = Statement::ClassDeclaration {
        class_name: "Counter".to_string(),
        inherits: vec!["Base".to_string(), "Printable".to_string()],
        members: vec![
            Statement::VariableDeclaration(VariableDeclarationData {
                identifier: "count".to_string(),
                type_name: "Int".to_string(),
                expression: Some(Expression::LiteralInt { value: 0 }),
                access: Some("internal".to_string()),
                ..VariableDeclarationData::default()
            }),
            Statement::FunctionDeclaration(FunctionDeclarationData {
                prefix: "current".to_string(),
                return_type: "Int".to_string(),
                function_type: "(Counter) -> () -> Int".to_string(),
                access: Some("internal".to_string()),
                statements: Some(vec![Statement::Return {
                    expression: Some(reference("count", "Int")),
                }]),
                ..FunctionDeclarationData::default()
            }),
        ],
    };

    assert_eq!(file.declarations, vec![expected]);
}

#[test]
fn test_enum_elements_and_raw_values() {
    let dump = r#"(source_file "/tmp/e.swift"
  (enum_decl "Shape" interface type='Shape.Type' access=internal inherits: Equatable
    (enum_case_decl
      (enum_element_decl "point" interface type='(Shape.Type) -> Shape' access=internal)
      (enum_element_decl "circle(radius:)" interface type='(Shape.Type) -> (Double) -> Shape' access=internal))
    (enum_element_decl "point" interface type='(Shape.Type) -> Shape' access=internal)
    (enum_element_decl "circle(radius:)" interface type='(Shape.Type) -> (radius: Double) -> Shape' access=internal)))"#;

    let file = translate(dump);
    let [Statement::EnumDeclaration {
        enum_name,
        access,
        inherits,
        elements,
        members,
        is_implicit,
    }] = file.declarations.as_slice()
    else {
        panic!("expected one enum");
    };

    assert_eq!(enum_name, "Shape");
    assert_eq!(access.as_deref(), Some("internal"));
    assert_eq!(inherits, &vec!["Equatable".to_string()]);
    assert!(members.is_empty());
    assert!(!is_implicit);
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].name, "point");
    assert!(elements[0].associated_values.is_empty());
    assert_eq!(elements[1].name, "circle");
    assert_eq!(
        elements[1].associated_values,
        vec![LabeledType {
            label: String::new(),
            type_name: "Double".to_string(),
        }]
    );
}

#[test]
fn test_extension_members_are_flattened() {
    let dump = r#"(source_file "/tmp/x.swift"
  (extension_decl range=[/tmp/x.swift:1:1 - line:3:1] Int
    (func_decl "doubled()" interface type='(Int) -> () -> Int' access=internal
      (parameter_list)
      (brace_stmt))))"#;

    let file = translate(dump);
    assert_eq!(
        file.declarations,
        vec![Statement::FunctionDeclaration(FunctionDeclarationData {
            prefix: "doubled".to_string(),
            return_type: "Int".to_string(),
            function_type: "(Int) -> () -> Int".to_string(),
            extends_type: Some("Int".to_string()),
            access: Some("internal".to_string()),
            statements: Some(Vec::new()),
            ..FunctionDeclarationData::default()
        })]
    );
}

#[test]
fn test_computed_property_getter() {
    let dump = r#"(source_file "/tmp/p.swift"
  (var_decl "answer" type='Int' interface type='Int' access=internal
    (accessor_decl "_" interface type='() -> Int' access=internal get_for=answer
      (parameter_list)
      (brace_stmt
        (return_stmt
          (integer_literal_expr type='Int' value=42))))))"#;

    let file = translate(dump);
    let Statement::VariableDeclaration(variable) = &file.declarations[0] else {
        panic!("expected a variable");
    };
    let getter = variable.getter.as_ref().expect("getter");
    assert_eq!(getter.prefix, "get");
    assert_eq!(getter.return_type, "Int");
    assert_eq!(
        getter.statements,
        Some(vec![Statement::Return {
            expression: Some(Expression::LiteralInt { value: 42 }),
        }])
    );
    assert!(variable.setter.is_none());
}

// =============================================================================
// STATEMENTS
// =============================================================================

#[test]
fn test_if_let_with_else() {
    let statements = top_level(
        r#"(if_stmt
            (pattern_optional_some type='Int?'
              (pattern_let type='Int'
                (pattern_named type='Int' 'y')))
            (declref_expr type='Int?' decl=main.(file).maybe@/tmp/main.swift:1:5 function_ref=unapplied)
            (brace_stmt
              (return_stmt))
            (brace_stmt
              (break_stmt)))"#,
    );

    assert_eq!(
        statements,
        vec![Statement::If(IfStatementData {
            conditions: vec![IfCondition::Declaration(VariableDeclarationData {
                identifier: "y".to_string(),
                type_name: "Int".to_string(),
                expression: Some(reference("maybe", "Int?")),
                is_let: true,
                ..VariableDeclarationData::default()
            })],
            statements: vec![Statement::Return { expression: None }],
            else_statement: Some(Box::new(IfStatementData {
                conditions: Vec::new(),
                statements: vec![Statement::Break],
                else_statement: None,
                is_guard: false,
            })),
            is_guard: false,
        })]
    );
}

#[test]
fn test_guard_with_negation() {
    let statements = top_level(
        r#"(guard_stmt
            (prefix_unary_expr type='Bool'
              (dot_syntax_call_expr implicit type='(Bool) -> Bool'
                (declref_expr type='(Bool.Type) -> (Bool) -> Bool' decl=Swift.(file).Bool.! function_ref=unapplied)
                (type_expr implicit type='Bool.Type' typerepr='Bool'))
              (declref_expr type='Bool' decl=main.(file).ready@/tmp/main.swift:1:5 function_ref=unapplied))
            (brace_stmt
              (return_stmt)))"#,
    );

    assert_eq!(
        statements,
        vec![Statement::If(IfStatementData {
            conditions: vec![IfCondition::Condition(Expression::PrefixUnary {
                expression: Box::new(reference("ready", "Bool")),
                operator_symbol: "!".to_string(),
                type_name: "Bool".to_string(),
            })],
            statements: vec![Statement::Return { expression: None }],
            else_statement: None,
            is_guard: true,
        })]
    );
}

#[test]
fn test_switch_with_literal_and_default_cases() {
    let statements = top_level(
        r#"(switch_stmt
            (declref_expr type='Int' decl=main.(file).n@/tmp/main.swift:1:5 function_ref=unapplied)
            (case_stmt
              (case_label_item
                (pattern_expr type='Int'
                  (integer_literal_expr type='Int' value=1)))
              (brace_stmt
                (break_stmt)))
            (case_stmt default
              (case_label_item default
                (pattern_any type='Int'))
              (brace_stmt
                (continue_stmt))))"#,
    );

    assert_eq!(
        statements,
        vec![Statement::Switch {
            expression: reference("n", "Int"),
            cases: vec![
                SwitchCase {
                    expressions: vec![Expression::LiteralInt { value: 1 }],
                    statements: vec![Statement::Break],
                },
                SwitchCase {
                    expressions: Vec::new(),
                    statements: vec![Statement::Continue],
                },
            ],
        }]
    );
}

#[test]
fn test_switch_on_enum_element() {
    let statements = top_level(
        r#"(switch_stmt
            (declref_expr type='Shape' decl=main.(file).shape@/tmp/main.swift:1:5 function_ref=unapplied)
            (case_stmt
              (case_label_item
                (pattern_enum_element type='Shape' Shape.point))
              (brace_stmt
                (break_stmt))))"#,
    );

    let [Statement::Switch { cases, .. }] = statements.as_slice() else {
        panic!("expected a switch");
    };
    assert_eq!(
        cases[0].expressions,
        vec![Expression::Dot {
            left_expression: Box::new(Expression::TypeExpression {
                type_name: "Shape".to_string(),
            }),
            right_expression: Box::new(reference("point", "Shape")),
        }]
    );
}

#[test]
fn test_for_each_loop() {
    let statements = top_level(
        r#"(for_each_stmt
            (pattern_named type='Int' 'i')
            (declref_expr type='[Int]' decl=main.(file).numbers@/tmp/main.swift:1:5 function_ref=unapplied)
            (brace_stmt
              (continue_stmt)))"#,
    );

    assert_eq!(
        statements,
        vec![Statement::ForEach {
            collection: reference("numbers", "[Int]"),
            variable: reference("i", "Int"),
            statements: vec![Statement::Continue],
        }]
    );
}

#[test]
fn test_do_catch_splits_into_do_and_catch() {
    let statements = top_level(
        r#"(do_catch_stmt
            (brace_stmt
              (break_stmt))
            (catch
              (pattern_let type='Error'
                (pattern_named type='Error' 'error'))
              (brace_stmt
                (continue_stmt))))"#,
    );

    assert_eq!(
        statements,
        vec![
            Statement::Do {
                statements: vec![Statement::Break],
            },
            Statement::Catch {
                variable_declaration: Some(VariableDeclarationData {
                    identifier: "error".to_string(),
                    type_name: "Error".to_string(),
                    is_let: true,
                    ..VariableDeclarationData::default()
                }),
                statements: vec![Statement::Continue],
            },
        ]
    );
}

#[test]
fn test_assignments() {
    let statements = top_level(
        r#"(assign_expr type='()'
            (declref_expr type='@lvalue Int' decl=main.(file).x@/tmp/main.swift:1:5 function_ref=unapplied)
            (integer_literal_expr type='Int' value=2))
          (assign_expr type='()'
            (discard_assignment_expr type='@lvalue Int')
            (integer_literal_expr type='Int' value=3))"#,
    );

    assert_eq!(
        statements,
        vec![
            Statement::Assignment {
                left_hand_side: reference("x", "Int"),
                right_hand_side: Expression::LiteralInt { value: 2 },
            },
            Statement::Expression(Expression::LiteralInt { value: 3 }),
        ]
    );
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

#[test]
fn test_print_call_with_tuple_shuffle() {
    let statements = top_level(
        r#"(call_expr type='()' nothrow arg_labels=_:
            (declref_expr type='(Any..., String, String) -> ()' decl=Swift.(file).print(_:separator:terminator:) function_ref=single)
            (tuple_shuffle_expr implicit type='(Any..., separator: String, terminator: String)' elements=[-2, -1, -1] variadic_sources=[0]
              (paren_expr type='(Any)'
                (erasure_expr implicit type='Any'
                  (string_literal_expr type='String' value="hi")))))"#,
    );

    assert_eq!(
        statements,
        vec![Statement::Expression(Expression::Call(CallExpressionData {
            function: Box::new(standard_library_reference("print", "(Any..., String, String) -> ()")),
            parameters: Box::new(Expression::TupleShuffle {
                labels: vec![String::new(), "separator".to_string(), "terminator".to_string()],
                indices: vec![
                    TupleShuffleIndex::Variadic { count: 1 },
                    TupleShuffleIndex::Absent,
                    TupleShuffleIndex::Absent,
                ],
                expressions: vec![Expression::LiteralString {
                    value: "hi".to_string(),
                }],
            }),
            type_name: Some("()".to_string()),
            range: None,
        }))]
    );
}

#[test]
fn test_casts_and_collections() {
    let statements = top_level(
        r#"(conditional_checked_cast_expr type='Int?' writtenType='Int'
            (declref_expr type='Any' decl=main.(file).value@/tmp/main.swift:1:5 function_ref=unapplied))
          (array_expr type='[Int]'
            (integer_literal_expr type='Int' value=1)
            (integer_literal_expr type='Int' value=2))
          (dictionary_expr type='[String : Int]'
            (tuple_expr type='(String, Int)'
              (string_literal_expr type='String' value="a")
              (integer_literal_expr type='Int' value=1)))"#,
    );

    assert_eq!(
        statements,
        vec![
            Statement::Expression(Expression::BinaryOperator {
                left_expression: Box::new(reference("value", "Any")),
                right_expression: Box::new(Expression::TypeExpression {
                    type_name: "Int".to_string(),
                }),
                operator_symbol: "as?".to_string(),
                type_name: "Int?".to_string(),
            }),
            Statement::Expression(Expression::Array {
                elements: vec![Expression::LiteralInt { value: 1 }, Expression::LiteralInt { value: 2 }],
                type_name: "[Int]".to_string(),
            }),
            Statement::Expression(Expression::Dictionary {
                keys: vec![Expression::LiteralString { value: "a".to_string() }],
                values: vec![Expression::LiteralInt { value: 1 }],
                type_name: "[String : Int]".to_string(),
            }),
        ]
    );
}

#[test]
fn test_tuple_element_and_optional_chain() {
    let statements = top_level(
        r#"(tuple_element_expr type='Int' field #1
            (declref_expr type='(Int, Int)' decl=main.(file).pair@/tmp/main.swift:1:5 function_ref=unapplied))
          (optional_evaluation_expr type='Int?'
            (inject_into_optional implicit type='Int?'
              (member_ref_expr type='Int' decl=Swift.(file).String.count
                (bind_optional_expr type='String'
                  (declref_expr type='String?' decl=main.(file).name@/tmp/main.swift:2:5 function_ref=unapplied)))))"#,
    );

    assert_eq!(
        statements,
        vec![
            Statement::Expression(Expression::Dot {
                left_expression: Box::new(reference("pair", "(Int, Int)")),
                right_expression: Box::new(reference("second", "Int")),
            }),
            Statement::Expression(Expression::Dot {
                left_expression: Box::new(Expression::Optional {
                    expression: Box::new(reference("name", "String?")),
                }),
                right_expression: Box::new(standard_library_reference("count", "Int")),
            }),
        ]
    );
}

// =============================================================================
// ERRORS
// =============================================================================

const PARTIALLY_BROKEN_DUMP: &str = r#"(source_file "/tmp/main.swift"
  (top_level_code_decl
    (brace_stmt
      (unresolved_member_expr type='Int')))
  (top_level_code_decl
    (brace_stmt
      (break_stmt))))"#;

#[test]
fn test_strict_translation_stops_at_first_error() {
    let raw = decode(PARTIALLY_BROKEN_DUMP).unwrap();
    let error = Translator::new(DumpDialect::Modern)
        .translate_file(&raw)
        .unwrap_err();
    assert_eq!(error.node_name(), "Unresolved Member Expression");
    assert_eq!(error.message(), "unknown expression");
}

#[test]
fn test_collecting_translation_replaces_failures_with_error_statements() {
    let raw = decode(PARTIALLY_BROKEN_DUMP).unwrap();
    let (file, errors) = Translator::new(DumpDialect::Modern)
        .translate_file_collecting_errors(&raw)
        .unwrap();

    assert_eq!(file.statements, vec![Statement::Error, Statement::Break]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_root_must_be_source_file() {
    let raw = decode("(brace_stmt)").unwrap();
    let error = Translator::new(DumpDialect::Modern)
        .translate_file_collecting_errors(&raw)
        .unwrap_err();
    assert_eq!(error.node_name(), "Brace Statement");
}

#[test]
fn test_error_trees_use_the_translator_horizontal_limit() {
    let raw = decode(PARTIALLY_BROKEN_DUMP).unwrap();
    let narrow = Translator::new(DumpDialect::Modern).with_horizontal_limit(Some(12));
    assert_eq!(narrow.horizontal_limit(), Some(12));

    let error = narrow.translate_file(&raw).unwrap_err();
    let tree = error.tree();
    assert!(tree.starts_with("Unresolved …\n"), "{}", tree);
    assert!(tree.lines().all(|line| line.chars().count() <= 12), "{}", tree);

    let (_, errors) = narrow.translate_file_collecting_errors(&raw).unwrap();
    assert_eq!(errors[0].tree(), tree);

    let unlimited = Translator::new(DumpDialect::Modern).with_horizontal_limit(None);
    let tree = unlimited.translate_file(&raw).unwrap_err().tree();
    assert!(tree.starts_with("Unresolved Member Expression"), "{}", tree);
    assert!(tree.contains("Int"), "{}", tree);
}
