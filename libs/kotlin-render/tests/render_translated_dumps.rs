//! Decoding, translating, normalizing and rendering whole dumps.

use config::{DumpDialect, TranslationConfig};
use dump_decoder::{decode, substitute_placeholder};
use intermediate_ast::passes::normalize;
use intermediate_ast::{SourceRange, TranslatedFile, Translator};
use kotlin_render::position::OutputPosition;
use kotlin_render::{render_file, ErrorMap};
use pretty_assertions::assert_eq;
use template_engine::{record_templates, replace_templates};

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

const TEMPLATES_DUMP: &str = r#"(source_file "/tmp/templates.swift"
  (func_decl range=[/tmp/templates.swift:1:1 - line:6:1] "transpilationTemplates()" interface type='() -> ()' access=internal
    (parameter_list range=[/tmp/templates.swift:1:28 - line:1:29])
    (brace_stmt range=[/tmp/templates.swift:1:31 - line:6:1]
      (call_expr type='()' location=/tmp/templates.swift:4:12 range=[/tmp/templates.swift:4:5 - line:4:21] nothrow
        (dot_syntax_call_expr type='(Any) -> ()' location=/tmp/templates.swift:4:12 range=[/tmp/templates.swift:4:5 - line:4:12] nothrow
          (declref_expr type='(inout Array<Any>) -> (Any) -> ()' location=/tmp/templates.swift:4:12 range=[/tmp/templates.swift:4:12 - line:4:12] decl=Swift.(file).Array.append function_ref=single)
          (inout_expr implicit type='inout Array<Any>' location=/tmp/templates.swift:4:5 range=[/tmp/templates.swift:4:5 - line:4:5]
            (declref_expr type='@lvalue [Any]' location=/tmp/templates.swift:4:5 range=[/tmp/templates.swift:4:5 - line:4:5] decl=main.(file).transpilationTemplates()._array@/tmp/templates.swift:2:9 function_ref=unapplied)))
        (paren_expr type='(Any)' location=/tmp/templates.swift:4:20 range=[/tmp/templates.swift:4:19 - line:4:21]
          (declref_expr type='Any' location=/tmp/templates.swift:4:20 range=[/tmp/templates.swift:4:20 - line:4:20] decl=main.(file).transpilationTemplates()._x@/tmp/templates.swift:3:9 function_ref=unapplied)))
      (string_literal_expr type='String' location=/tmp/templates.swift:5:5 range=[/tmp/templates.swift:5:5 - line:5:5] value="_array.add(_x)"))))"#;

const APPEND_DUMP: &str = r#"(source_file "/tmp/main.swift"
  (top_level_code_decl range=[/tmp/main.swift:2:1 - line:2:17]
    (brace_stmt implicit range=[/tmp/main.swift:2:1 - line:2:17]
      (call_expr type='()' location=/tmp/main.swift:2:9 range=[/tmp/main.swift:2:1 - line:2:17] nothrow
        (dot_syntax_call_expr type='(Int) -> ()' location=/tmp/main.swift:2:9 range=[/tmp/main.swift:2:1 - line:2:9] nothrow
          (declref_expr type='(inout Array<Int>) -> (Int) -> ()' location=/tmp/main.swift:2:9 range=[/tmp/main.swift:2:9 - line:2:9] decl=Swift.(file).Array.append function_ref=single)
          (inout_expr implicit type='inout Array<Int>' location=/tmp/main.swift:2:1 range=[/tmp/main.swift:2:1 - line:2:1]
            (declref_expr type='@lvalue [Int]' location=/tmp/main.swift:2:1 range=[/tmp/main.swift:2:1 - line:2:1] decl=main.(file).numbers@/tmp/main.swift:1:5 function_ref=unapplied)))
        (paren_expr type='(Int)' location=/tmp/main.swift:2:16 range=[/tmp/main.swift:2:15 - line:2:17]
          (integer_literal_expr type='Int' location=/tmp/main.swift:2:16 range=[/tmp/main.swift:2:16 - line:2:16] value=4))))))"#;

fn translate(dialect: DumpDialect, dump: &str) -> TranslatedFile {
    let raw = decode(dump).expect("dump should decode");
    Translator::new(dialect)
        .translate_file(&raw)
        .expect("dump should translate")
}

#[test]
fn test_variable_declaration_end_to_end() {
    let dump = substitute_placeholder(VARIABLE_DUMP, "/tmp/main.swift");
    let config = TranslationConfig::default();

    let rendered = render_file(&normalize(translate(DumpDialect::Legacy, &dump)), &config);
    assert_eq!(rendered.kotlin, "var x: Int = 5\n");
    assert_eq!(
        rendered.error_map.to_sidecar("/tmp/main.swift"),
        "/tmp/main.swift\n1:1:2:1:1:5:1:5\n"
    );

    let constant = dump.replace("storage_kind=stored", "let");
    let rendered = render_file(&normalize(translate(DumpDialect::Legacy, &constant)), &config);
    assert_eq!(rendered.kotlin, "val x: Int = 5\n");
}

#[test]
fn test_function_positions_map_back_to_source() {
    let file = normalize(translate(DumpDialect::Modern, FUNCTION_DUMP));
    let rendered = render_file(&file, &TranslationConfig::default());

    assert_eq!(rendered.kotlin, "fun add(a: Int, b: Int): Int {\n    return a + b\n}\n");
    assert_eq!(rendered.error_map.len(), 3);

    let left = rendered.error_map.source_range_at(2, 12).expect("left operand is mapped");
    assert!(left.same_position(&SourceRange::new(2, 10, 2, 10)));
    let right = rendered.error_map.source_range_at(2, 16).expect("right operand is mapped");
    assert!(right.same_position(&SourceRange::new(2, 14, 2, 14)));
    let body = rendered.error_map.source_range_at(1, 1).expect("declaration is mapped");
    assert!(body.same_position(&SourceRange::new(1, 1, 3, 1)));

    let sidecar = rendered.error_map.to_sidecar("/tmp/f.swift");
    let (path, parsed) = ErrorMap::parse_sidecar(&sidecar).expect("sidecar should parse");
    assert_eq!(path, "/tmp/f.swift");
    assert_eq!(parsed.entries()[2].output_end, OutputPosition::new(4, 1));
}

#[test]
fn test_template_replacement_renders_substituted_call() {
    let (_, templates) = record_templates(translate(DumpDialect::Modern, TEMPLATES_DUMP)).expect("templates should record");
    let file = replace_templates(translate(DumpDialect::Modern, APPEND_DUMP), &templates);

    let rendered = render_file(&normalize(file), &TranslationConfig::default());
    assert_eq!(rendered.kotlin, "fun main(args: Array<String>) {\n    numbers.add(4)\n}\n");
}

#[test]
fn test_untemplated_call_keeps_its_shape() {
    let file = normalize(translate(DumpDialect::Modern, APPEND_DUMP));
    let rendered = render_file(&file, &TranslationConfig::default());
    assert_eq!(rendered.kotlin, "fun main(args: Array<String>) {\n    numbers.append(4)\n}\n");
}
