//! 文のパーサーテスト

use super::*;
use oclparse::NodeKind;
use pretty_assertions::assert_eq;

/// 関数本体に並ぶ項目の種類
fn body_kinds(body: &str) -> Vec<NodeKind> {
    let tree = assert_parse_success(&format!("void f(int n) {{ {} }}", body));
    let block = tree.root().find(NodeKind::CompoundStatement).expect("body");
    block.child_nodes().map(|n| n.kind()).collect()
}

#[test]
fn test_control_flow_statements() {
    assert_eq!(
        body_kinds(
            "if (n) return; else n = 1;\n\
             while (n > 0) n--;\n\
             do { n++; } while (n < 10);\n\
             for (;;) break;\n\
             switch (n) { case 0: break; default: ; }\n\
             goto done;\n\
             done: ;"
        ),
        vec![
            NodeKind::IfStatement,
            NodeKind::WhileStatement,
            NodeKind::DoStatement,
            NodeKind::ForStatement,
            NodeKind::SwitchStatement,
            NodeKind::GotoStatement,
            NodeKind::LabeledStatement,
        ]
    );
}

#[test]
fn test_local_declarations_with_qualifiers() {
    assert_eq!(
        body_kinds("__local float tile[64]; const int k = 2; private uint4 lanes;"),
        vec![NodeKind::Declaration, NodeKind::Declaration, NodeKind::Declaration]
    );
}

#[test]
fn test_local_typedef_is_scoped() {
    let source = "void f() { typedef int L; L a; }\nvoid g() { L * b; }";
    let tree = assert_parse_success(source);
    // `g` の中では `L` は型名ではないので乗算の式文になる
    let g_body = tree.items().nth(1).and_then(|g| g.field_node("body")).expect("g body");
    assert_eq!(
        g_body.child_nodes().next().map(|n| n.kind()),
        Some(NodeKind::ExpressionStatement)
    );
}

#[test]
fn test_for_loop_scope_ends_with_loop() {
    let tree = assert_parse_success(
        "typedef int i;\nvoid f() { for (float i = 0; i < 1; i += 1) { } i x; }",
    );
    let body = tree.items().nth(1).and_then(|f| f.field_node("body")).expect("body");
    let kinds: Vec<_> = body.child_nodes().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::ForStatement, NodeKind::Declaration]);
}

#[test]
fn test_else_binds_to_nearest_if() {
    let tree = assert_parse_success("void f(int a, int b) { if (a) if (b) a = 1; else b = 1; }");
    let outer = tree.root().find(NodeKind::IfStatement).expect("if");
    assert!(outer.field_node("alternative").is_none());
    let inner = outer.field_node("consequence").expect("inner if");
    assert!(inner.field_node("alternative").is_some());
}

#[test]
fn test_barrier_in_kernel_loop() {
    let source = r#"
__kernel void reduce(__global float *data, __local float *scratch)
{
    uint lid = get_local_id(0);
    for (uint s = get_local_size(0) / 2; s > 0; s >>= 1) {
        if (lid < s)
            scratch[lid] += scratch[lid + s];
        barrier(CLK_LOCAL_MEM_FENCE);
    }
}
"#;
    let tree = assert_parse_success(source);
    let calls = tree.root().find_all(NodeKind::BuiltinFunctionCall);
    assert_eq!(calls.len(), 3);
}
