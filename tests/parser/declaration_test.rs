//! 宣言と修飾子のパーサーテスト

use super::*;
use oclparse::ast::{Qualifier, QualifierCategory};
use oclparse::NodeKind;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn test_simple_declarations() {
    assert_eq!(
        sexp("int a, *b, c[4];"),
        "(source_file (declaration type: (primitive_type) declarator: (identifier) \
         declarator: (pointer_declarator declarator: (identifier)) \
         declarator: (array_declarator declarator: (identifier) size: (number_literal))))"
    );
}

#[test]
fn test_qualifier_runs_around_type() {
    let tree = assert_parse_success("__constant const float4 volatile table[2] = { 0 };");
    let declaration = tree.items().next().expect("declaration");
    let set = declaration.qualifier_set();
    assert_eq!(set.len(), 3);
    assert_eq!(set.address_space(), Some(Qualifier::Constant));
    assert!(set.contains(Qualifier::Const));
    assert!(set.contains(Qualifier::Volatile));
}

#[test_case("__global" ; "underscored")]
#[test_case("global" ; "plain")]
fn test_address_space_aliases(spelling: &str) {
    let tree = assert_parse_success(&format!("{} int *p;", spelling));
    let declaration = tree.items().next().expect("declaration");
    assert_eq!(declaration.qualifier_set().address_space(), Some(Qualifier::Global));
}

#[test]
fn test_duplicate_qualifier_is_reported_once() {
    let (tree, diagnostics) = parse_source("__global global int x;");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind(), DiagnosticKind::DuplicateQualifier);

    let declaration = tree.items().next().expect("declaration");
    assert_eq!(declaration.kind(), NodeKind::Declaration);
    let set = declaration.qualifier_set();
    assert_eq!(set.len(), 1);
    assert_eq!(
        set.iter()
            .filter(|entry| entry.qualifier.category() == QualifierCategory::AddressSpace)
            .count(),
        1
    );
    // 重複したトークンはERRORノードとして残る
    assert_eq!(
        declaration.to_sexp(),
        "(declaration (address_space_qualifier) (ERROR) type: (primitive_type) declarator: (identifier))"
    );
}

#[test]
fn test_different_categories_are_not_duplicates() {
    assert!(diagnostic_kinds("__global const volatile int *restrict p;").is_empty());
    assert!(diagnostic_kinds("static __local int x;").is_empty());
}

#[test]
fn test_access_qualifier_is_its_own_category() {
    assert_eq!(
        diagnostic_kinds("void f(read_only write_only image2d_t img);"),
        vec![DiagnosticKind::DuplicateQualifier]
    );
}

#[test]
fn test_typedef_registers_type_name() {
    assert_eq!(
        sexp("typedef float4 vec;\nvec v;"),
        "(source_file (type_definition (storage_class_specifier) type: (vector_type) declarator: (identifier)) \
         (declaration type: (type_identifier) declarator: (identifier)))"
    );
}

#[test]
fn test_unknown_type_name_is_an_error() {
    let (tree, diagnostics) = parse_source("vec v;");
    assert_eq!(diagnostics.len(), 1);
    assert!(tree.has_error());
}

#[test]
fn test_struct_with_bitfields_and_attributes() {
    assert_eq!(
        sexp("struct __attribute__((packed)) S { uint flags : 4; float2 pos; } s;"),
        "(source_file (declaration type: (struct_specifier \
         (attribute_specifier (attribute name: (identifier))) name: (type_identifier) \
         body: (field_declaration_list \
         (field_declaration type: (primitive_type) declarator: (field_identifier) (bitfield_clause (number_literal))) \
         (field_declaration type: (vector_type) declarator: (field_identifier)))) \
         declarator: (identifier)))"
    );
}

#[test]
fn test_conditional_directives_inside_struct_body() {
    assert_eq!(
        sexp("struct S {\n#ifdef USE_A\n  int a;\n#endif\n  float b;\n};"),
        "(source_file (declaration type: (struct_specifier name: (type_identifier) \
         body: (field_declaration_list \
         (preproc_directive) \
         (field_declaration type: (primitive_type) declarator: (field_identifier)) \
         (preproc_directive) \
         (field_declaration type: (primitive_type) declarator: (field_identifier))))))"
    );
}

#[test]
fn test_enum_values_are_expressions() {
    assert_eq!(
        sexp("enum Mode { A, B = 2, C = B + 1 };"),
        "(source_file (declaration type: (enum_specifier name: (type_identifier) body: (enumerator_list \
         (enumerator name: (identifier)) \
         (enumerator name: (identifier) value: (number_literal)) \
         (enumerator name: (identifier) value: (binary_expression left: (identifier) right: (number_literal)))))))"
    );
}

#[test]
fn test_attribute_arguments_accept_types() {
    let tree = assert_parse_success(
        "__kernel __attribute__((vec_type_hint(float4), reqd_work_group_size(16, 1, 1))) void k() {}",
    );
    let attributes = tree.root().find_all(NodeKind::Attribute);
    assert_eq!(attributes.len(), 2);
    let hint = attributes[0].field_node("arguments").expect("arguments");
    assert_eq!(
        hint.to_sexp(),
        "(argument_list (type_descriptor type: (vector_type)))"
    );
}

#[test]
fn test_aligned_attribute_after_declarator() {
    assert_eq!(
        sexp("int x __attribute__((aligned(16)));"),
        "(source_file (declaration type: (primitive_type) declarator: (identifier) \
         (attribute_specifier (attribute name: (identifier) arguments: (argument_list (number_literal))))))"
    );
}

#[test]
fn test_function_pointer_declaration() {
    assert_eq!(
        sexp("int (*handler)(int, float);"),
        "(source_file (declaration type: (primitive_type) declarator: (function_declarator \
         declarator: (parenthesized_declarator (pointer_declarator declarator: (identifier))) \
         parameters: (parameter_list (parameter_declaration type: (primitive_type)) \
         (parameter_declaration type: (primitive_type))))))"
    );
}

#[test]
fn test_function_definition() {
    let tree = assert_parse_success("static inline float sq(float x) { return x * x; }");
    let definition = tree.items().next().expect("definition");
    assert_eq!(definition.kind(), NodeKind::FunctionDefinition);
    assert_eq!(
        definition.qualifier_set().iter().map(|e| e.qualifier).collect::<Vec<_>>(),
        vec![Qualifier::Static, Qualifier::Inline]
    );
    assert!(definition.field_node("body").is_some());
}

#[test]
fn test_initializer_list_with_designators() {
    let tree = assert_parse_success("struct P { int x; int y; };\nstruct P p = { .y = 1, .x = 2 };");
    let pairs = tree.root().find_all(NodeKind::InitializerPair);
    assert_eq!(pairs.len(), 2);
    assert!(pairs
        .iter()
        .all(|pair| pair.field_node("designator").map(|d| d.kind()) == Some(NodeKind::FieldDesignator)));
}

#[test]
fn test_pipe_and_image_parameters() {
    let tree = assert_parse_success(
        "__kernel void k(read_only pipe int in, __write_only image2d_t out, sampler_t s) {}",
    );
    let parameters: Vec<_> = tree.root().find_all(NodeKind::ParameterDeclaration);
    let types: Vec<_> = parameters
        .iter()
        .filter_map(|p| p.field_node("type"))
        .map(|t| t.kind())
        .collect();
    assert_eq!(
        types,
        vec![NodeKind::PipeType, NodeKind::ImageType, NodeKind::SamplerType]
    );
}
