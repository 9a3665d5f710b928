//! カーネル定義のパーサーテスト

use super::*;
use oclparse::{NodeKind, ParseError};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn test_vector_add_kernel() {
    let source = r#"
__kernel void vadd(__global const float *a,
                   __global const float *b,
                   __global float *c)
{
    int i = get_global_id(0);
    c[i] = a[i] + b[i];
}
"#;
    let tree = assert_parse_success(source);
    let kernel = tree.items().next().expect("kernel");
    assert_eq!(kernel.kind(), NodeKind::KernelFunctionDefinition);
    assert_eq!(kernel.field_node("type").map(|t| t.kind()), Some(NodeKind::PrimitiveType));

    let declarator = kernel.field_node("declarator").expect("declarator");
    assert_eq!(declarator.kind(), NodeKind::FunctionDeclarator);
    let parameters = declarator.field_node("parameters").expect("parameters");
    assert_eq!(
        parameters
            .child_nodes()
            .filter(|p| p.kind() == NodeKind::ParameterDeclaration)
            .count(),
        3
    );
    assert_eq!(
        kernel.field_node("body").map(|b| b.kind()),
        Some(NodeKind::CompoundStatement)
    );
}

#[test_case("__kernel" ; "underscored")]
#[test_case("kernel" ; "plain")]
fn test_kernel_spellings(spelling: &str) {
    let tree = assert_parse_success(&format!("{} void k(int n) {{ }}", spelling));
    let kernel = tree.items().next().expect("kernel");
    assert_eq!(kernel.kind(), NodeKind::KernelFunctionDefinition);
    assert!(kernel.qualifier_set().is_kernel());
}

#[test]
fn test_kernel_without_body() {
    let (tree, diagnostics) = parse_source("__kernel void foo(int n);");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind(), DiagnosticKind::MissingBody);
    assert!(matches!(
        &diagnostics[0].error,
        ParseError::MissingBody { name, .. } if name == "foo"
    ));

    let item = tree.items().next().expect("declaration");
    assert_eq!(item.kind(), NodeKind::Declaration);
    assert!(tree.root().find(NodeKind::KernelFunctionDefinition).is_none());
}

#[test]
fn test_kernel_with_non_function_declarator() {
    let (tree, diagnostics) = parse_source("__kernel int x;");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind(), DiagnosticKind::UnexpectedToken);
    assert_eq!(tree.items().next().map(|i| i.kind()), Some(NodeKind::Declaration));
}

#[test]
fn test_kernel_pointer_to_function_is_not_a_kernel() {
    let (_, diagnostics) = parse_source("__kernel void (*fp)(int);");
    assert_eq!(
        diagnostics.iter().map(|d| d.kind()).collect::<Vec<_>>(),
        vec![DiagnosticKind::UnexpectedToken]
    );
}

#[test]
fn test_kernel_parameters_are_visible_in_body() {
    // 仮引数 `T` は型名 `T` を隠すので `T * 2` は乗算になる
    let tree = assert_parse_success("typedef int T;\n__kernel void k(int T) { int y = T * 2; }");
    let body = tree
        .root()
        .find(NodeKind::KernelFunctionDefinition)
        .and_then(|k| k.field_node("body"))
        .expect("body");
    assert!(body.find(NodeKind::BinaryExpression).is_some());
}

#[test]
fn test_line_positions_in_diagnostics() {
    let (_, diagnostics) = parse_source("\n\n__kernel void foo(int n);\n");
    assert_eq!(diagnostics[0].position.line, 3);
}
