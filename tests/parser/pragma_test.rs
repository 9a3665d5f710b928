//! プリプロセッサ行のパーサーテスト

use super::*;
use oclparse::NodeKind;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("enable")]
#[test_case("disable")]
#[test_case("require")]
#[test_case("warn")]
fn test_extension_pragma(behavior: &str) {
    let source = format!("#pragma OPENCL EXTENSION cl_khr_fp64 : {}\n", behavior);
    let tree = assert_parse_success(&source);
    let pragma = tree.items().next().expect("pragma");
    assert_eq!(pragma.kind(), NodeKind::PragmaDirective);
    assert_eq!(
        pragma.field_node("extension").map(|n| tree.node_text(n)),
        Some("cl_khr_fp64")
    );
    assert_eq!(pragma.field_node("behavior").map(|n| tree.node_text(n)), Some(behavior));
    // 行全体がそのまま残る
    assert_eq!(tree.node_text(pragma), source.trim_end());
}

#[test]
fn test_extension_all() {
    let tree = assert_parse_success("#pragma OPENCL EXTENSION all : disable");
    assert_eq!(tree.items().next().map(|n| n.kind()), Some(NodeKind::PragmaDirective));
}

#[test_case("1.0")]
#[test_case("1.2")]
#[test_case("2.0")]
#[test_case("3.0")]
fn test_version_pragma(version: &str) {
    let tree = assert_parse_success(&format!("#pragma OPENCL {}", version));
    let pragma = tree.items().next().expect("pragma");
    assert_eq!(pragma.kind(), NodeKind::VersionPragma);
    assert_eq!(pragma.field_node("version").map(|n| tree.node_text(n)), Some(version));
}

#[test_case("#pragma unroll 4" ; "unroll")]
#[test_case("#pragma OPENCL FP_CONTRACT ON" ; "fp contract")]
#[test_case("#pragma OPENCL EXTENSION khr_fp64 : enable" ; "missing cl prefix")]
#[test_case("#pragma OPENCL EXTENSION cl_khr_fp64 : maybe" ; "unknown behavior")]
#[test_case("#pragma OPENCL 4.0" ; "unknown version")]
fn test_other_pragmas_are_kept_verbatim(source: &str) {
    let tree = assert_parse_success(source);
    let pragma = tree.items().next().expect("pragma");
    assert_eq!(pragma.kind(), NodeKind::PragmaLine);
    assert_eq!(tree.node_text(pragma), source);
}

#[test]
fn test_pragma_ends_at_line_end() {
    assert_eq!(
        sexp("#pragma OPENCL EXTENSION cl_khr_fp16 : enable\nhalf h;"),
        "(source_file (pragma_directive extension: (identifier) behavior: (identifier)) \
         (declaration type: (primitive_type) declarator: (identifier)))"
    );
}

#[test]
fn test_pragma_inside_function_body() {
    let tree = assert_parse_success(
        "void f(int n) {\n#pragma unroll\n  for (int i = 0; i < n; i++) { }\n}",
    );
    let body = tree.root().find(NodeKind::CompoundStatement).expect("body");
    let kinds: Vec<_> = body.child_nodes().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::PragmaLine, NodeKind::ForStatement]);
}

#[test]
fn test_preprocessor_directives() {
    let tree = assert_parse_success("#define N 16\n#include \"common.h\"\nint x[N];");
    let kinds: Vec<_> = tree.items().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::PreprocDirective, NodeKind::PreprocDirective, NodeKind::Declaration]
    );
    let define = tree.items().next().expect("define");
    assert_eq!(tree.node_text(define), "#define N 16");
}

#[test]
fn test_line_continuation_extends_directive() {
    let tree = assert_parse_success("#define SQ(x) \\\n  ((x) * (x))\nint y;");
    assert_eq!(tree.items().count(), 2);
}
