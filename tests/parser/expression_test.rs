//! 式のパーサーテスト

use super::*;
use oclparse::NodeKind;
use pretty_assertions::assert_eq;
use test_case::test_case;

/// `int r = <expr>;` の初期化子のS式
fn initializer(expr: &str) -> String {
    let tree = assert_parse_success(&format!("int r = {};", expr));
    tree.root()
        .find(NodeKind::InitDeclarator)
        .and_then(|init| init.field_node("value"))
        .expect("initializer")
        .to_sexp()
}

/// 関数本体の式文のS式
fn statement_expression(expr: &str) -> String {
    let tree = assert_parse_success(&format!("void f() {{ {}; }}", expr));
    tree.root()
        .find(NodeKind::ExpressionStatement)
        .and_then(|stmt| stmt.child_nodes().next())
        .expect("expression")
        .to_sexp()
}

const ID: &str = "(identifier)";

fn binary(left: &str, right: &str) -> String {
    format!("(binary_expression left: {} right: {})", left, right)
}

#[test_case("a * b + c", &binary(&binary(ID, ID), ID) ; "multiplicative over additive")]
#[test_case("a + b * c", &binary(ID, &binary(ID, ID)) ; "additive under multiplicative")]
#[test_case("a << b + c", &binary(ID, &binary(ID, ID)) ; "shift under additive")]
#[test_case("a < b == c", &binary(&binary(ID, ID), ID) ; "relational over equality")]
#[test_case("a & b ^ c | d", &binary(&binary(&binary(ID, ID), ID), ID) ; "bitwise chain")]
#[test_case("a || b && c", &binary(ID, &binary(ID, ID)) ; "and binds tighter than or")]
#[test_case("a - b - c", &binary(&binary(ID, ID), ID) ; "left associative")]
#[test_case("a / b % c", &binary(&binary(ID, ID), ID) ; "same level left to right")]
fn test_binary_precedence(source: &str, expected: &str) {
    assert_eq!(initializer(source), expected);
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(
        statement_expression("a = b += c"),
        "(assignment_expression left: (identifier) right: \
         (assignment_expression left: (identifier) right: (identifier)))"
    );
}

#[test]
fn test_comma_expression_in_statement() {
    assert_eq!(
        statement_expression("i++, j--"),
        "(comma_expression left: (update_expression argument: (identifier)) \
         right: (update_expression argument: (identifier)))"
    );
}

#[test]
fn test_conditional_middle_accepts_assignment() {
    assert_eq!(
        statement_expression("c ? x = 1 : y"),
        "(conditional_expression condition: (identifier) \
         consequence: (assignment_expression left: (identifier) right: (number_literal)) \
         alternative: (identifier))"
    );
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_eq!(
        initializer("-a * *p"),
        "(binary_expression left: (unary_expression argument: (identifier)) \
         right: (pointer_expression argument: (identifier)))"
    );
}

#[test]
fn test_cast_binds_tighter_than_binary() {
    assert_eq!(
        initializer("(float)a / b"),
        "(binary_expression left: (cast_expression type: (type_descriptor type: (primitive_type)) \
         value: (identifier)) right: (identifier))"
    );
}

#[test]
fn test_cast_to_pointer_type() {
    assert_eq!(
        statement_expression("p = (__global float *)q"),
        "(assignment_expression left: (identifier) right: (cast_expression \
         type: (type_descriptor (address_space_qualifier) type: (primitive_type) \
         declarator: (abstract_pointer_declarator)) value: (identifier)))"
    );
}

#[test]
fn test_parenthesized_identifier_is_not_a_cast() {
    assert_eq!(
        initializer("(a) + b"),
        "(binary_expression left: (parenthesized_expression (identifier)) right: (identifier))"
    );
}

#[test]
fn test_typedef_name_enables_cast() {
    let tree = assert_parse_success("typedef int myint;\nint r = (myint)x;");
    let cast = tree.root().find(NodeKind::CastExpression).expect("cast");
    assert_eq!(
        cast.to_sexp(),
        "(cast_expression type: (type_descriptor type: (type_identifier)) value: (identifier))"
    );
}

#[test]
fn test_vector_literal() {
    assert_eq!(
        initializer("(float4)(0.0f, v.xy, 1.0f)"),
        "(vector_literal type: (type_descriptor type: (vector_type)) arguments: (argument_list \
         (number_literal) (swizzle_access argument: (identifier)) (number_literal)))"
    );
}

#[test]
fn test_scalar_cast_of_parenthesized_value() {
    assert_eq!(
        initializer("(int)(x)"),
        "(cast_expression type: (type_descriptor type: (primitive_type)) \
         value: (parenthesized_expression (identifier)))"
    );
}

#[test]
fn test_compound_literal() {
    let tree = assert_parse_success("struct P { int x; int y; };\nvoid f() { g((struct P){ 1, 2 }); }");
    let literal = tree
        .root()
        .find(NodeKind::CompoundLiteralExpression)
        .expect("compound literal");
    assert_eq!(
        literal.to_sexp(),
        "(compound_literal_expression type: (type_descriptor type: (struct_specifier name: (type_identifier))) \
         value: (initializer_list (number_literal) (number_literal)))"
    );
}

#[test]
fn test_sizeof_and_vec_step() {
    assert_eq!(
        initializer("sizeof(float4) + vec_step(v)"),
        "(binary_expression left: (sizeof_expression type: (type_descriptor type: (vector_type))) \
         right: (vec_step_expression value: (identifier)))"
    );
}

#[test_case("get_global_id(0)" ; "work item")]
#[test_case("atomic_add(p, 1)" ; "atomic")]
#[test_case("barrier(CLK_LOCAL_MEM_FENCE)" ; "synchronization")]
#[test_case("native_sin(x)" ; "math")]
#[test_case("read_imagef(img, smp, coord)" ; "image")]
#[test_case("vload4(0, p)" ; "vector data")]
fn test_builtin_function_calls(source: &str) {
    let tree = assert_parse_success(&format!("void f() {{ {}; }}", source));
    let call = tree.root().find(NodeKind::BuiltinFunctionCall).expect("builtin call");
    assert_eq!(
        call.field_node("function").map(|f| f.kind()),
        Some(NodeKind::BuiltinFunction)
    );
    assert!(tree.root().find(NodeKind::CallExpression).is_none());
}

#[test]
fn test_user_function_is_call_expression() {
    assert_eq!(
        statement_expression("helper(a, b[i])"),
        "(call_expression function: (identifier) arguments: (argument_list (identifier) \
         (subscript_expression argument: (identifier) index: (identifier))))"
    );
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        statement_expression("printf(\"%d\" \"\\n\", x)"),
        "(call_expression function: (identifier) arguments: (argument_list \
         (concatenated_string (string_literal) (string_literal)) (identifier)))"
    );
}

#[test_case("0x1.8p3f" ; "hex float with fraction")]
#[test_case("0x1p-2" ; "hex float without fraction")]
fn test_hex_float_initializer(literal: &str) {
    assert_eq!(initializer(literal), "(number_literal)");
}
