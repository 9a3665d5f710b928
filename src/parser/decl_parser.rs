//! 宣言（修飾子、属性、変数、関数、カーネル）の解析

use crate::ast::{
    NodeBuilder, NodeKind, Qualifier, QualifierSet, SyntaxElement, SyntaxNode,
};
use crate::error::ParseError;
use crate::lexer::{Token, TokenClass, TokenKind};

use super::declarator_parser::{declarator_name, declares_function, parameter_names, DeclaratorMode};
use super::{ParseResult, Parser};

/// 宣言指定子の並び（修飾子・属性・型指定子）
///
/// 修飾子と型指定子は任意の順で現れ得る（`const int`、`int const`）。
/// すべての修飾子は1つの [`QualifierSet`] にまとめる。
#[derive(Debug)]
pub(super) struct DeclSpecifiers {
    elements: Vec<(Option<&'static str>, SyntaxElement)>,
    pub(super) qualifiers: QualifierSet,
}

impl DeclSpecifiers {
    /// 解析した順に子要素としてノードへ追加する
    pub(super) fn push_into(self, builder: &mut NodeBuilder) {
        for (field, element) in self.elements {
            builder.push(field, element);
        }
    }
}

impl<'a> Parser<'a> {
    /// 宣言の先頭になり得るトークンか
    pub(super) fn starts_declaration(&self, token: &Token) -> bool {
        Qualifier::from_token(token.kind).is_some()
            || token.kind == TokenKind::Attribute
            || self.starts_type_specifier(token)
    }

    /// 宣言指定子を解析
    ///
    /// 修飾子の並びと1つの型指定子が交互に現れる。
    pub(super) fn parse_declaration_specifiers(&mut self) -> ParseResult<DeclSpecifiers> {
        let mut specifiers = DeclSpecifiers {
            elements: Vec::new(),
            qualifiers: QualifierSet::new(),
        };
        let mut has_type = false;

        loop {
            self.parse_qualifiers(&mut specifiers)?;
            match self.current() {
                Some(token) if !has_type && self.starts_type_specifier(&token) => {
                    let ty = self.parse_type_specifier()?;
                    specifiers.elements.push((Some("type"), ty.into()));
                    has_type = true;
                }
                _ => break,
            }
        }

        if !has_type {
            return Err(self.error("type specifier"));
        }
        Ok(specifiers)
    }

    /// 修飾子・属性の連続を読む。読んだ要素の数を返す
    pub(super) fn parse_qualifiers(&mut self, specifiers: &mut DeclSpecifiers) -> ParseResult<usize> {
        let before = specifiers.elements.len();
        while let Some(token) = self.current() {
            if let Some(qualifier) = Qualifier::from_token(token.kind) {
                self.advance();
                let element = self.qualifier_element(qualifier, token, &mut specifiers.qualifiers);
                specifiers.elements.push((None, element));
            } else if token.kind == TokenKind::Attribute {
                let attribute = self.parse_attribute_specifier()?;
                specifiers.elements.push((None, attribute.into()));
            } else {
                break;
            }
        }
        Ok(specifiers.elements.len() - before)
    }

    /// 修飾子を集合に登録し、ノードを作る
    ///
    /// 同じカテゴリの修飾子が既にあれば診断を出し、トークンをERRORノードに包む。
    pub(super) fn qualifier_element(
        &mut self,
        qualifier: Qualifier,
        token: Token,
        set: &mut QualifierSet,
    ) -> SyntaxElement {
        match set.insert(qualifier, token.span) {
            Ok(()) => self.leaf(qualifier.node_kind(), token).into(),
            Err(first) => {
                self.report(ParseError::DuplicateQualifier {
                    category: qualifier.category(),
                    first: first.span,
                    span: token.span,
                });
                self.leaf(NodeKind::Error, token).into()
            }
        }
    }

    /// `__attribute__((name, name(args)))`
    pub(super) fn parse_attribute_specifier(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::AttributeSpecifier);
        builder.token(self.expect(TokenKind::Attribute)?);
        builder.token(self.expect(TokenKind::LeftParen)?);
        builder.token(self.expect(TokenKind::LeftParen)?);

        while !self.check(TokenKind::RightParen) {
            let attribute = self.parse_attribute()?;
            builder.node(attribute);
            match self.match_token(TokenKind::Comma) {
                Some(comma) => {
                    builder.token(comma);
                }
                None => break,
            }
        }

        builder.token(self.expect(TokenKind::RightParen)?);
        builder.token(self.expect(TokenKind::RightParen)?);
        Ok(builder.finish())
    }

    /// 属性1つ。引数は式または型名（`vec_type_hint(float4)`）
    fn parse_attribute(&mut self) -> ParseResult<SyntaxNode> {
        let name = match self.current() {
            Some(token)
                if matches!(token.kind.class(), TokenClass::Identifier | TokenClass::Keyword) =>
            {
                self.advance();
                token
            }
            _ => return Err(self.error("attribute name")),
        };

        let mut builder = NodeBuilder::new(NodeKind::Attribute);
        builder.field("name", self.leaf(NodeKind::Identifier, name));

        if self.check(TokenKind::LeftParen) {
            let mut arguments = NodeBuilder::new(NodeKind::ArgumentList);
            arguments.token(self.expect(TokenKind::LeftParen)?);
            while !self.check(TokenKind::RightParen) {
                let argument = if self.starts_type_name_at(0) {
                    self.parse_type_descriptor()?
                } else {
                    self.parse_assignment_expression()?
                };
                arguments.node(argument);
                match self.match_token(TokenKind::Comma) {
                    Some(comma) => {
                        arguments.token(comma);
                    }
                    None => break,
                }
            }
            arguments.token(self.expect(TokenKind::RightParen)?);
            builder.field("arguments", arguments.finish());
        }
        Ok(builder.finish())
    }

    /// 連続する属性指定子
    pub(super) fn parse_attributes(&mut self) -> ParseResult<Vec<SyntaxNode>> {
        let mut attributes = Vec::new();
        while self.check(TokenKind::Attribute) {
            attributes.push(self.parse_attribute_specifier()?);
        }
        Ok(attributes)
    }

    pub(super) fn parse_attributes_into(&mut self, builder: &mut NodeBuilder) -> ParseResult<()> {
        for attribute in self.parse_attributes()? {
            builder.node(attribute);
        }
        Ok(())
    }

    /// ファイルスコープの宣言・関数定義・カーネル定義
    pub(super) fn parse_external_declaration(&mut self) -> ParseResult<SyntaxNode> {
        let specifiers = self.parse_declaration_specifiers()?;
        if specifiers.qualifiers.is_kernel() {
            return self.parse_kernel_definition(specifiers);
        }
        self.parse_declaration_rest(specifiers, true)
    }

    /// ブロック内の宣言
    pub(super) fn parse_local_declaration(&mut self) -> ParseResult<SyntaxNode> {
        let specifiers = self.parse_declaration_specifiers()?;
        self.parse_declaration_rest(specifiers, false)
    }

    /// 宣言指定子より後ろを解析
    fn parse_declaration_rest(
        &mut self,
        specifiers: DeclSpecifiers,
        allow_definition: bool,
    ) -> ParseResult<SyntaxNode> {
        let is_typedef = specifiers.qualifiers.is_typedef();
        let kind = if is_typedef {
            NodeKind::TypeDefinition
        } else {
            NodeKind::Declaration
        };
        let mut builder = NodeBuilder::new(kind);
        specifiers.push_into(&mut builder);

        // `struct S { ... };` のように宣言子を持たない宣言
        if let Some(semicolon) = self.match_token(TokenKind::Semicolon) {
            builder.token(semicolon);
            return Ok(builder.finish());
        }

        let declarator = self.parse_required_declarator(DeclaratorMode::Named)?;
        let attributes = self.parse_attributes()?;

        if allow_definition
            && !is_typedef
            && declares_function(&declarator)
            && self.check(TokenKind::LeftBrace)
        {
            builder.set_kind(NodeKind::FunctionDefinition);
            return self.finish_function_definition(builder, declarator, attributes);
        }
        self.finish_declaration(builder, declarator, attributes, is_typedef)
    }

    /// カーネル定義
    ///
    /// 宣言子が関数宣言子でない場合と本体がない場合は診断を出して通常の宣言にする。
    fn parse_kernel_definition(&mut self, specifiers: DeclSpecifiers) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::Declaration);
        specifiers.push_into(&mut builder);

        let declarator = self.parse_required_declarator(DeclaratorMode::Named)?;
        if !declares_function(&declarator) {
            self.report(ParseError::UnexpectedToken {
                expected: "function declarator".to_string(),
                found: declarator.kind().name().to_string(),
                span: declarator.span(),
            });
            let attributes = self.parse_attributes()?;
            return self.finish_declaration(builder, declarator, attributes, false);
        }

        let attributes = self.parse_attributes()?;
        if self.check(TokenKind::LeftBrace) {
            builder.set_kind(NodeKind::KernelFunctionDefinition);
            return self.finish_function_definition(builder, declarator, attributes);
        }

        let name = declarator_name(&declarator)
            .map(|token| self.text(&token).to_string())
            .unwrap_or_default();
        self.report(ParseError::MissingBody {
            name,
            span: declarator.span(),
        });
        self.finish_declaration(builder, declarator, attributes, false)
    }

    /// 関数・カーネルの本体を解析して定義を完成させる
    fn finish_function_definition(
        &mut self,
        mut builder: NodeBuilder,
        declarator: SyntaxNode,
        attributes: Vec<SyntaxNode>,
    ) -> ParseResult<SyntaxNode> {
        self.declare_name(&declarator, false);
        let parameters = parameter_names(&declarator, self.source);

        builder.field("declarator", declarator);
        for attribute in attributes {
            builder.node(attribute);
        }

        self.scopes.push();
        for name in &parameters {
            self.scopes.declare(name, false);
        }
        let body = self.parse_compound_statement();
        self.scopes.pop();

        builder.field("body", body?);
        Ok(builder.finish())
    }

    /// 残りの宣言子（`, b = 1, *c`）と `;` を解析
    fn finish_declaration(
        &mut self,
        mut builder: NodeBuilder,
        first: SyntaxNode,
        first_attributes: Vec<SyntaxNode>,
        is_typedef: bool,
    ) -> ParseResult<SyntaxNode> {
        let mut declarator = first;
        let mut attributes = first_attributes;

        loop {
            self.declare_name(&declarator, is_typedef);

            if let Some(assign) = self.match_token(TokenKind::Assign) {
                let mut init = NodeBuilder::new(NodeKind::InitDeclarator);
                init.field("declarator", declarator);
                for attribute in attributes {
                    init.node(attribute);
                }
                init.token(assign);
                init.field("value", self.parse_initializer()?);
                builder.field("declarator", init.finish());
            } else {
                builder.field("declarator", declarator);
                for attribute in attributes {
                    builder.node(attribute);
                }
            }

            match self.match_token(TokenKind::Comma) {
                Some(comma) => {
                    builder.token(comma);
                    declarator = self.parse_required_declarator(DeclaratorMode::Named)?;
                    attributes = self.parse_attributes()?;
                }
                None => break,
            }
        }

        builder.token(self.expect(TokenKind::Semicolon)?);
        Ok(builder.finish())
    }

    /// 宣言子の名前をスコープに登録する
    fn declare_name(&mut self, declarator: &SyntaxNode, is_type: bool) {
        if let Some(token) = declarator_name(declarator) {
            let name = self.text(&token);
            log::trace!("declaring `{}` (type: {})", name, is_type);
            self.scopes.declare(name, is_type);
        }
    }
}
