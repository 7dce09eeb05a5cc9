use super::*;
use crate::filesystem::{FileSystemError, InMemoryFilesystem};
use crate::issues::Severity;
use config::DumpDialect;
use pretty_assertions::assert_eq;

/// `var x: Int = 5`, a body-less top-level code node and `return`.
const PARTIALLY_BROKEN_DUMP: &str = r#"(source_file "<<SOURCE_PATH>>"
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
  (var_decl range=[<<SOURCE_PATH>>:1:5 - line:1:5] "x" type='Int' interface type='Int' access=internal storage_kind=stored)
  (top_level_code_decl range=[<<SOURCE_PATH>>:2:1 - line:2:5])
  (top_level_code_decl range=[<<SOURCE_PATH>>:3:1 - line:3:6]
    (brace_stmt implicit range=[<<SOURCE_PATH>>:3:1 - line:3:6]
      (return_stmt range=[<<SOURCE_PATH>>:3:1 - line:3:1]))))
"#;

const RETURN_DUMP: &str = r#"(source_file "<<SOURCE_PATH>>"
  (top_level_code_decl range=[<<SOURCE_PATH>>:1:1 - line:1:6]
    (brace_stmt implicit range=[<<SOURCE_PATH>>:1:1 - line:1:6]
      (return_stmt range=[<<SOURCE_PATH>>:1:1 - line:1:1]))))"#;

fn context(stop_at_first_error: bool) -> TranslationContext {
    TranslationContext::new(
        TranslationConfig::default()
            .with_dialect(DumpDialect::Legacy)
            .with_stop_at_first_error(stop_at_first_error),
    )
}

#[test]
fn test_continue_policy_keeps_valid_declarations() {
    let context = context(false);
    let output = context
        .translate_dump("/tmp/main.swift", PARTIALLY_BROKEN_DUMP)
        .expect("file should still translate");

    assert_eq!(
        output.kotlin,
        "var x: Int = 5\n\nfun main(args: Array<String>) {\n    <<Error>>\n    return\n}\n"
    );

    let issues = context.issues().sorted();
    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.severity, Severity::Error);
    assert_eq!(issue.source_path.as_deref(), Some("/tmp/main.swift"));
    assert!(issue.message.contains("Top Level Code Declaration"), "{}", issue.message);
    let range = issue.range.expect("issue should be located");
    assert_eq!((range.line_start, range.column_start), (2, 1));
}

#[test]
fn test_stop_policy_fails_the_file() {
    let context = context(true);
    let error = context
        .translate_dump("/tmp/main.swift", PARTIALLY_BROKEN_DUMP)
        .unwrap_err();

    let PipelineError::Translation { source_path, error } = &error else {
        panic!("expected a translation error, got {:?}", error);
    };
    assert_eq!(source_path, "/tmp/main.swift");
    assert_eq!(error.node_name(), "Top Level Code Declaration");
    assert_eq!(context.issues().len(), 1);
}

#[test]
fn test_decode_errors_are_fatal_to_the_file() {
    let context = context(false);
    let error = context.translate_dump("/tmp/bad.swift", "(source_file \"x\"").unwrap_err();
    assert!(matches!(error, PipelineError::Decode { .. }));
    assert_eq!(error.source_path(), Some("/tmp/bad.swift"));

    let issues = context.issues().sorted();
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.starts_with("cannot decode dump"));
}

#[test]
fn test_files_keep_input_order() {
    let context = context(false);
    let inputs: Vec<DumpInput> = (0..16)
        .map(|index| DumpInput::new(format!("/tmp/file{}.swift", index), RETURN_DUMP))
        .collect();

    let outputs = context.translate_files(&inputs).unwrap();
    let paths: Vec<_> = outputs
        .iter()
        .map(|output| output.as_ref().map(|output| output.source_path.clone()))
        .collect();
    let expected: Vec<_> = inputs.iter().map(|input| Some(input.source_path.clone())).collect();
    assert_eq!(paths, expected);
}

#[test]
fn test_continue_policy_skips_failed_files() {
    let context = context(false);
    let inputs = vec![
        DumpInput::new("/tmp/a.swift", RETURN_DUMP),
        DumpInput::new("/tmp/b.swift", "(source_file"),
        DumpInput::new("/tmp/c.swift", RETURN_DUMP),
    ];

    let outputs = context.translate_files(&inputs).unwrap();
    assert!(outputs[0].is_some());
    assert!(outputs[1].is_none());
    assert!(outputs[2].is_some());
    assert_eq!(context.issues().len(), 1);
}

#[test]
fn test_stop_policy_aborts_the_run() {
    let context = context(true);
    let inputs = vec![
        DumpInput::new("/tmp/a.swift", RETURN_DUMP),
        DumpInput::new("/tmp/b.swift", "(source_file"),
    ];

    let error = context.translate_files(&inputs).unwrap_err();
    assert_eq!(error.source_path(), Some("/tmp/b.swift"));
}

#[test]
fn test_stop_policy_reports_the_first_failure_in_input_order() {
    let mut inputs = vec![DumpInput::new("/tmp/a.swift", RETURN_DUMP)];
    inputs.extend((0..8).map(|index| DumpInput::new(format!("/tmp/broken{}.swift", index), "(source_file")));

    for _ in 0..16 {
        let context = context(true);
        let error = context.translate_files(&inputs).unwrap_err();
        assert_eq!(error.source_path(), Some("/tmp/broken0.swift"));
    }
}

#[test]
fn test_issue_trees_use_the_configured_horizontal_limit() {
    let context = TranslationContext::new(
        TranslationConfig::default()
            .with_dialect(DumpDialect::Legacy)
            .with_horizontal_limit(Some(12)),
    );
    context
        .translate_dump("/tmp/main.swift", PARTIALLY_BROKEN_DUMP)
        .unwrap();

    let issues = context.issues().sorted();
    let tree = issues[0].tree.as_deref().expect("issue should carry the node");
    assert!(tree.starts_with("Top Level C…\n"), "{}", tree);
    assert!(tree.lines().all(|line| line.chars().count() <= 12), "{}", tree);
}

#[test]
fn test_sidecar_uses_source_path() {
    let context = context(false);
    let output = context
        .translate_dump("/tmp/main.swift", PARTIALLY_BROKEN_DUMP)
        .unwrap();
    assert_eq!(output.error_map_sidecar(), "/tmp/main.swift\n1:1:2:1:1:5:1:5\n");
}

#[test]
fn test_filesystem_errors_follow_the_policy() {
    let mut filesystem = InMemoryFilesystem::default();
    filesystem.insert("/tmp/a.swift.ast", RETURN_DUMP);
    let files = vec![
        DumpFile::new("/tmp/a.swift", "/tmp/a.swift.ast"),
        DumpFile::new("/tmp/b.swift", "/tmp/b.swift.ast"),
    ];

    let lenient = context(false);
    let outputs = lenient.translate_from_filesystem(&filesystem, &files).unwrap();
    assert!(outputs[0].is_some());
    assert!(outputs[1].is_none());
    assert_eq!(
        lenient.issues().sorted()[0].message,
        "file not found: /tmp/b.swift.ast"
    );

    let strict = context(true);
    let error = strict.translate_from_filesystem(&filesystem, &files).unwrap_err();
    assert_eq!(
        error,
        PipelineError::FileSystem(FileSystemError::NotFound {
            path: "/tmp/b.swift.ast".to_string()
        })
    );
}
