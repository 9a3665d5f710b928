//! スウィズルとフィールドアクセスの判別テスト

use super::*;
use oclparse::NodeKind;
use pretty_assertions::assert_eq;
use test_case::test_case;

/// 関数本体の最初の式文の式の種類
fn expression_kind(prelude: &str, expr: &str) -> NodeKind {
    let tree = assert_parse_success(&format!("{}\nvoid f() {{ {}; }}", prelude, expr));
    tree.root()
        .find(NodeKind::ExpressionStatement)
        .and_then(|stmt| stmt.child_nodes().next())
        .map(|node| node.kind())
        .expect("expression")
}

#[test_case("v.x" ; "single component")]
#[test_case("v.xyzw" ; "four components")]
#[test_case("v.rgba" ; "color set")]
#[test_case("v.s0123" ; "numeric")]
#[test_case("v.S9aF" ; "numeric upper prefix")]
#[test_case("v.xxyy" ; "repeated")]
fn test_swizzle_on_vector_variable(expr: &str) {
    assert_eq!(expression_kind("float16 v;", expr), NodeKind::SwizzleAccess);
}

#[test_case("s.count" ; "ordinary name")]
#[test_case("s.xr" ; "mixed sets")]
#[test_case("s.xyzwx" ; "too many components")]
#[test_case("s.s" ; "numeric without digits")]
#[test_case("s.x_" ; "identifier continues")]
fn test_field_access_when_not_a_swizzle_pattern(expr: &str) {
    assert_eq!(expression_kind("struct S { int count; } s;", expr), NodeKind::FieldExpression);
}

#[test]
fn test_arrow_is_always_field_access() {
    assert_eq!(expression_kind("struct S { int x; } *p;", "p->x"), NodeKind::FieldExpression);
}

#[test]
fn test_literal_operand_is_not_a_vector() {
    assert_eq!(expression_kind("", "(1.0f).x"), NodeKind::FieldExpression);
}

#[test]
fn test_vector_literal_operand_is_a_vector() {
    assert_eq!(
        expression_kind("", "(float4)(1.0f, 2.0f, 3.0f, 4.0f).zw"),
        NodeKind::SwizzleAccess
    );
}

#[test]
fn test_non_vector_compound_literal_is_not_a_vector() {
    assert_eq!(
        expression_kind("struct P { int x; };", "(struct P){ 1 }.x"),
        NodeKind::FieldExpression
    );
}

#[test]
fn test_swizzle_chain_and_assignment() {
    let tree = assert_parse_success("void f(float4 a) { a.xy = a.yx; }");
    let assignment = tree.root().find(NodeKind::AssignmentExpression).expect("assignment");
    assert_eq!(
        assignment.to_sexp(),
        "(assignment_expression left: (swizzle_access argument: (identifier)) \
         right: (swizzle_access argument: (identifier)))"
    );
}

#[test]
fn test_member_named_like_swizzle_is_swizzle() {
    // 構文だけでは区別できないのでスウィズルとして扱う
    assert_eq!(
        expression_kind("struct Q { int x; } q;", "q.x"),
        NodeKind::SwizzleAccess
    );
}

#[test]
fn test_designator_after_swizzle_keeps_normal_lexing() {
    let tree = assert_parse_success(
        "struct P { float x; float y; };\nvoid f(float2 v) { struct P p = { .x = v.x, .y = v.y }; }",
    );
    assert_eq!(tree.root().find_all(NodeKind::FieldDesignator).len(), 2);
    assert_eq!(tree.root().find_all(NodeKind::SwizzleAccess).len(), 2);
}
