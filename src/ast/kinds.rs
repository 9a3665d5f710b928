//! ノード種別とそのフィールド名の一覧

use serde::{Serialize, Serializer};

/// ノード種別の定義から列挙型・名前・フィールド・カタログを一度に生成する
macro_rules! node_kinds {
    ($($variant:ident => $name:literal [$($field:literal),*]),* $(,)?) => {
        /// 構文木のノード種別
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $($variant),*
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant),*];

            /// tree-sitter形式のノード名
            pub fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$variant => $name),*
                }
            }

            /// このノードが持ち得るフィールド名
            pub fn fields(self) -> &'static [&'static str] {
                match self {
                    $(NodeKind::$variant => &[$($field),*]),*
                }
            }
        }

        static CATALOG: &[NodeKindInfo] = &[
            $(NodeKindInfo {
                kind: NodeKind::$variant,
                name: $name,
                fields: &[$($field),*],
            }),*
        ];
    };
}

node_kinds! {
    // トップレベル
    SourceFile => "source_file" [],
    Error => "ERROR" [],
    Declaration => "declaration" ["type", "declarator"],
    TypeDefinition => "type_definition" ["type", "declarator"],
    FunctionDefinition => "function_definition" ["type", "declarator", "body"],
    KernelFunctionDefinition => "kernel_function_definition" ["type", "declarator", "body"],
    PragmaDirective => "pragma_directive" ["extension", "behavior"],
    VersionPragma => "version_pragma" ["version"],
    PragmaLine => "pragma_line" [],
    PreprocDirective => "preproc_directive" ["directive"],

    // 修飾子
    StorageClassSpecifier => "storage_class_specifier" [],
    TypeQualifier => "type_qualifier" [],
    AddressSpaceQualifier => "address_space_qualifier" [],
    AccessQualifier => "access_qualifier" [],
    FunctionSpecifier => "function_specifier" [],
    KernelQualifier => "kernel_qualifier" [],
    AttributeSpecifier => "attribute_specifier" [],
    Attribute => "attribute" ["name", "arguments"],

    // 型指定子
    PrimitiveType => "primitive_type" [],
    SizedTypeSpecifier => "sized_type_specifier" [],
    VectorType => "vector_type" [],
    ImageType => "image_type" [],
    SamplerType => "sampler_type" [],
    OpaqueType => "opaque_type" [],
    PipeType => "pipe_type" ["type"],
    TypeIdentifier => "type_identifier" [],
    StructSpecifier => "struct_specifier" ["name", "body"],
    UnionSpecifier => "union_specifier" ["name", "body"],
    EnumSpecifier => "enum_specifier" ["name", "body"],
    FieldDeclarationList => "field_declaration_list" [],
    FieldDeclaration => "field_declaration" ["type", "declarator"],
    BitfieldClause => "bitfield_clause" [],
    EnumeratorList => "enumerator_list" [],
    Enumerator => "enumerator" ["name", "value"],

    // 宣言子
    InitDeclarator => "init_declarator" ["declarator", "value"],
    PointerDeclarator => "pointer_declarator" ["declarator"],
    ParenthesizedDeclarator => "parenthesized_declarator" [],
    ArrayDeclarator => "array_declarator" ["declarator", "size"],
    FunctionDeclarator => "function_declarator" ["declarator", "parameters"],
    AbstractPointerDeclarator => "abstract_pointer_declarator" ["declarator"],
    AbstractParenthesizedDeclarator => "abstract_parenthesized_declarator" [],
    AbstractArrayDeclarator => "abstract_array_declarator" ["declarator", "size"],
    AbstractFunctionDeclarator => "abstract_function_declarator" ["declarator", "parameters"],
    ParameterList => "parameter_list" [],
    ParameterDeclaration => "parameter_declaration" ["type", "declarator"],
    VariadicParameter => "variadic_parameter" [],
    TypeDescriptor => "type_descriptor" ["type", "declarator"],
    Identifier => "identifier" [],
    FieldIdentifier => "field_identifier" [],
    InitializerList => "initializer_list" [],
    InitializerPair => "initializer_pair" ["designator", "value"],
    FieldDesignator => "field_designator" [],
    SubscriptDesignator => "subscript_designator" [],

    // 文
    CompoundStatement => "compound_statement" [],
    ExpressionStatement => "expression_statement" [],
    IfStatement => "if_statement" ["condition", "consequence", "alternative"],
    ElseClause => "else_clause" [],
    WhileStatement => "while_statement" ["condition", "body"],
    DoStatement => "do_statement" ["body", "condition"],
    ForStatement => "for_statement" ["initializer", "condition", "update", "body"],
    SwitchStatement => "switch_statement" ["condition", "body"],
    CaseStatement => "case_statement" ["value"],
    ReturnStatement => "return_statement" [],
    BreakStatement => "break_statement" [],
    ContinueStatement => "continue_statement" [],
    GotoStatement => "goto_statement" ["label"],
    LabeledStatement => "labeled_statement" ["label"],

    // 式
    CommaExpression => "comma_expression" ["left", "right"],
    AssignmentExpression => "assignment_expression" ["left", "operator", "right"],
    ConditionalExpression => "conditional_expression" ["condition", "consequence", "alternative"],
    BinaryExpression => "binary_expression" ["left", "operator", "right"],
    UnaryExpression => "unary_expression" ["operator", "argument"],
    PointerExpression => "pointer_expression" ["operator", "argument"],
    UpdateExpression => "update_expression" ["operator", "argument"],
    CastExpression => "cast_expression" ["type", "value"],
    VectorLiteral => "vector_literal" ["type", "arguments"],
    CompoundLiteralExpression => "compound_literal_expression" ["type", "value"],
    SizeofExpression => "sizeof_expression" ["type", "value"],
    AlignofExpression => "alignof_expression" ["type"],
    VecStepExpression => "vec_step_expression" ["type", "value"],
    CallExpression => "call_expression" ["function", "arguments"],
    BuiltinFunctionCall => "builtin_function_call" ["function", "arguments"],
    BuiltinFunction => "builtin_function" [],
    ArgumentList => "argument_list" [],
    SubscriptExpression => "subscript_expression" ["argument", "index"],
    FieldExpression => "field_expression" ["argument", "operator", "field"],
    SwizzleAccess => "swizzle_access" ["argument", "accessor"],
    ParenthesizedExpression => "parenthesized_expression" [],
    NumberLiteral => "number_literal" [],
    CharLiteral => "char_literal" [],
    StringLiteral => "string_literal" [],
    ConcatenatedString => "concatenated_string" [],
}

impl NodeKind {
    /// 名前からノード種別を引く
    pub fn from_name(name: &str) -> Option<NodeKind> {
        CATALOG.iter().find(|info| info.name == name).map(|info| info.kind)
    }

    pub fn has_field(self, field: &str) -> bool {
        self.fields().contains(&field)
    }

    pub fn is_qualifier(self) -> bool {
        matches!(
            self,
            NodeKind::StorageClassSpecifier
                | NodeKind::TypeQualifier
                | NodeKind::AddressSpaceQualifier
                | NodeKind::AccessQualifier
                | NodeKind::FunctionSpecifier
                | NodeKind::KernelQualifier
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// カタログの1項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeKindInfo {
    pub kind: NodeKind,
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

/// すべてのノード種別とフィールド名（ハイライトクエリなど下流ツール向け）
pub fn node_kind_catalog() -> &'static [NodeKindInfo] {
    CATALOG
}
