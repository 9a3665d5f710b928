//! エラー回復のパーサーテスト

use super::*;
use oclparse::{NodeKind, SyntaxNode, Tree};
use pretty_assertions::assert_eq;

/// ノードの葉トークンの字句を空白なしで連結する
fn leaf_text(tree: &Tree, node: &SyntaxNode) -> String {
    node.leaves()
        .iter()
        .map(|token| token.text(tree.source()))
        .collect()
}

#[test]
fn test_one_bad_item_does_not_swallow_the_rest() {
    let mut source = String::from("int = ;\n");
    for i in 0..10 {
        source.push_str(&format!("int good{} = {};\n", i, i));
    }

    let (tree, diagnostics) = parse_source(&source);
    assert_eq!(diagnostics.len(), 1);
    let items: Vec<_> = tree.items().collect();
    assert_eq!(items.len(), 11);
    assert_eq!(items[0].kind(), NodeKind::Error);
    assert_eq!(items.iter().filter(|item| !item.has_error()).count(), 10);
}

#[test]
fn test_error_node_keeps_every_skipped_token() {
    let source = "float x = 1 +* ;\nint y;";
    let (tree, diagnostics) = parse_source(source);
    assert_eq!(diagnostics.len(), 1);

    let error = tree.items().next().expect("error");
    assert!(error.is_error());
    assert_eq!(tree.node_text(error), "float x = 1 +* ;");
    assert_eq!(leaf_text(&tree, error), "floatx=1+*;");
}

#[test]
fn test_recovery_stops_before_preprocessor_line() {
    let (tree, _) = parse_source("int x = (\n#pragma OPENCL EXTENSION cl_khr_fp64 : enable\nint y;");
    let kinds: Vec<_> = tree.items().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Error, NodeKind::PragmaDirective, NodeKind::Declaration]
    );
}

#[test]
fn test_statement_error_stays_inside_function() {
    let source = "void f() {\n  x = ;\n  y = 1;\n}\nint z;";
    let (tree, diagnostics) = parse_source(source);
    assert_eq!(diagnostics.len(), 1);

    let kinds: Vec<_> = tree.items().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::FunctionDefinition, NodeKind::Declaration]);

    let body = tree.root().find(NodeKind::CompoundStatement).expect("body");
    let statements: Vec<_> = body.child_nodes().map(|n| n.kind()).collect();
    assert_eq!(statements, vec![NodeKind::Error, NodeKind::ExpressionStatement]);
}

#[test]
fn test_statement_recovery_stops_at_next_line_keyword() {
    let source = "void f() {\n  a = b +\n  return a;\n}";
    let (tree, diagnostics) = parse_source(source);
    assert_eq!(diagnostics.len(), 1);
    let body = tree.root().find(NodeKind::CompoundStatement).expect("body");
    let statements: Vec<_> = body.child_nodes().map(|n| n.kind()).collect();
    assert_eq!(statements, vec![NodeKind::Error, NodeKind::ReturnStatement]);
}

#[test]
fn test_missing_closing_brace_reports_eof() {
    let (tree, diagnostics) = parse_source("void f() { int x;");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message().contains("end of input"));
    assert!(tree.has_error());
}

#[test]
fn test_lex_errors_are_reported_once() {
    let (_, diagnostics) = parse_source("float4 v;\nfloat f = v.x @ 1;");
    let lex: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.kind() == DiagnosticKind::Lex)
        .collect();
    assert_eq!(lex.len(), 1);
}

#[test]
fn test_unterminated_string_still_produces_tree() {
    let (tree, diagnostics) = parse_source("void f() { printf(\"oops); }\n}\nint after;");
    assert!(diagnostics.iter().any(|d| d.kind() == DiagnosticKind::Lex));
    assert!(tree.items().any(|item| item.kind() == NodeKind::Declaration));
}

#[test]
fn test_diagnostics_are_sorted_by_offset() {
    let (_, diagnostics) = parse_source("int a = ;\n__global global int b;\nint c = ;\n");
    let offsets: Vec<_> = diagnostics.iter().map(|d| d.span().start).collect();
    let mut sorted = offsets.clone();
    sorted.sort();
    assert_eq!(offsets, sorted);
    assert_eq!(diagnostics.len(), 3);
}

#[test]
fn test_deeply_nested_parentheses_are_rejected_gracefully() {
    let depth = 10_000;
    let source = format!("int x = {}1{};\nint y;", "(".repeat(depth), ")".repeat(depth));
    let (tree, diagnostics) = parse_source(&source);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message().contains("shallower nesting"));

    let kinds: Vec<_> = tree.items().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::Error, NodeKind::Declaration]);
}

#[test]
fn test_long_prefix_operator_chain_is_rejected_gracefully() {
    let source = format!("int x = {}1;\nint y;", "-".repeat(5_000));
    let (tree, diagnostics) = parse_source(&source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(tree.items().last().map(|n| n.kind()), Some(NodeKind::Declaration));
}

#[test]
fn test_deeply_nested_blocks_stay_inside_function() {
    let depth = 5_000;
    let source = format!("void f() {{ {}{} }}\nint z;", "{".repeat(depth), "}".repeat(depth));
    let (tree, diagnostics) = parse_source(&source);
    assert_eq!(diagnostics.len(), 1);
    let kinds: Vec<_> = tree.items().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::FunctionDefinition, NodeKind::Declaration]);
}

#[test]
fn test_moderate_nesting_parses_cleanly() {
    let source = format!("int x = {}1{};", "(".repeat(60), ")".repeat(60));
    assert_parse_success(&source);
}

#[test]
fn test_abandoned_cast_does_not_declare_enumerators() {
    let source = "typedef int A;\nvoid f() {\n  x = (enum { A } + 1);\n  A * p;\n}";
    let (tree, diagnostics) = parse_source(source);
    assert_eq!(diagnostics.len(), 1);
    let body = tree.root().find(NodeKind::CompoundStatement).expect("body");
    let kinds: Vec<_> = body.child_nodes().map(|n| n.kind()).collect();
    // `A` は型名のままなので2文目はポインタ宣言
    assert_eq!(kinds, vec![NodeKind::Error, NodeKind::Declaration]);
}
