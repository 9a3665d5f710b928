//! 型指定子の解析

use crate::ast::{NodeBuilder, NodeKind, Qualifier, QualifierCategory, SyntaxNode};
use crate::lexer::{Token, TokenKind};

use super::declarator_parser::DeclaratorMode;
use super::{ParseResult, Parser};

/// 型指定子の先頭になり得るキーワード
fn is_type_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Void
            | TokenKind::Char
            | TokenKind::Short
            | TokenKind::Int
            | TokenKind::Long
            | TokenKind::Float
            | TokenKind::Double
            | TokenKind::Signed
            | TokenKind::Unsigned
            | TokenKind::ScalarType
            | TokenKind::VectorType
            | TokenKind::ImageType
            | TokenKind::SamplerType
            | TokenKind::OpaqueType
            | TokenKind::Pipe
            | TokenKind::Struct
            | TokenKind::Union
            | TokenKind::Enum
    )
}

fn is_size_modifier(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Signed | TokenKind::Unsigned | TokenKind::Short | TokenKind::Long
    )
}

impl<'a> Parser<'a> {
    /// トークンが型指定子を始めるか（識別子はスコープ上の型名のみ）
    pub(super) fn starts_type_specifier(&self, token: &Token) -> bool {
        match token.kind {
            TokenKind::Identifier => self.scopes.is_type(self.text(token)),
            kind => is_type_keyword(kind),
        }
    }

    /// `offset` 先から型名（キャストや `sizeof` の中身）が始まるか
    pub(super) fn starts_type_name_at(&mut self, offset: usize) -> bool {
        let Some(token) = self.peek(offset) else {
            return false;
        };
        if let Some(qualifier) = Qualifier::from_token(token.kind) {
            return !matches!(
                qualifier.category(),
                QualifierCategory::StorageClass | QualifierCategory::Inline | QualifierCategory::Kernel
            );
        }
        token.kind == TokenKind::Attribute || self.starts_type_specifier(&token)
    }

    /// 型指定子を解析
    ///
    /// 判定順: 基本型、ベクトル型、イメージ・サンプラー・不透明型・パイプ、
    /// 構造体・共用体・列挙型、スコープ上の型名。
    pub(super) fn parse_type_specifier(&mut self) -> ParseResult<SyntaxNode> {
        let Some(token) = self.current() else {
            return Err(self.error("type specifier"));
        };

        match token.kind {
            kind if is_size_modifier(kind) => self.parse_sized_type_specifier(),
            TokenKind::Void
            | TokenKind::Char
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Double
            | TokenKind::ScalarType => {
                self.advance();
                Ok(self.leaf(NodeKind::PrimitiveType, token))
            }
            TokenKind::VectorType => {
                self.advance();
                Ok(self.leaf(NodeKind::VectorType, token))
            }
            TokenKind::ImageType => {
                self.advance();
                Ok(self.leaf(NodeKind::ImageType, token))
            }
            TokenKind::SamplerType => {
                self.advance();
                Ok(self.leaf(NodeKind::SamplerType, token))
            }
            TokenKind::OpaqueType => {
                self.advance();
                Ok(self.leaf(NodeKind::OpaqueType, token))
            }
            TokenKind::Pipe => self.parse_pipe_type(),
            TokenKind::Struct => self.parse_record_specifier(TokenKind::Struct, NodeKind::StructSpecifier),
            TokenKind::Union => self.parse_record_specifier(TokenKind::Union, NodeKind::UnionSpecifier),
            TokenKind::Enum => self.parse_enum_specifier(),
            TokenKind::Identifier if self.scopes.is_type(self.text(&token)) => {
                self.advance();
                Ok(self.leaf(NodeKind::TypeIdentifier, token))
            }
            _ => Err(self.error("type specifier")),
        }
    }

    /// `unsigned long int` のような型
    fn parse_sized_type_specifier(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::SizedTypeSpecifier);
        while let Some(token) = self.current() {
            if !is_size_modifier(token.kind) {
                break;
            }
            self.advance();
            builder.token(token);
        }

        if let Some(token) = self.current() {
            if matches!(
                token.kind,
                TokenKind::Char | TokenKind::Int | TokenKind::Float | TokenKind::Double
            ) {
                self.advance();
                builder.node(self.leaf(NodeKind::PrimitiveType, token));
            }
        }
        Ok(builder.finish())
    }

    /// `pipe int`
    fn parse_pipe_type(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::PipeType);
        builder.token(self.expect(TokenKind::Pipe)?);
        let element = self.parse_type_specifier()?;
        builder.field("type", element);
        Ok(builder.finish())
    }

    /// 構造体・共用体
    fn parse_record_specifier(&mut self, keyword: TokenKind, kind: NodeKind) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(kind);
        builder.token(self.expect(keyword)?);
        self.parse_attributes_into(&mut builder)?;

        let name = self.match_token(TokenKind::Identifier);
        if let Some(name) = name {
            builder.field("name", self.leaf(NodeKind::TypeIdentifier, name));
        }

        if self.check(TokenKind::LeftBrace) {
            let body = self.nested(Self::parse_field_declaration_list)?;
            builder.field("body", body);
            self.parse_attributes_into(&mut builder)?;
        } else if name.is_none() {
            return Err(self.error("struct name or `{`"));
        }
        Ok(builder.finish())
    }

    /// `{ int a; float4 b; }`
    fn parse_field_declaration_list(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::FieldDeclarationList);
        builder.token(self.expect(TokenKind::LeftBrace)?);
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let member = match self.current_kind() {
                Some(TokenKind::Pragma) => self.parse_pragma()?,
                Some(TokenKind::Directive) => self.parse_preproc_directive()?,
                _ => self.parse_field_declaration()?,
            };
            builder.node(member);
        }
        builder.token(self.expect(TokenKind::RightBrace)?);
        Ok(builder.finish())
    }

    /// メンバー宣言（ビットフィールドを含む）
    fn parse_field_declaration(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::FieldDeclaration);
        let specifiers = self.parse_declaration_specifiers()?;
        specifiers.push_into(&mut builder);

        if !self.check(TokenKind::Semicolon) {
            loop {
                if !self.check(TokenKind::Colon) {
                    let declarator = self.parse_required_declarator(DeclaratorMode::Field)?;
                    builder.field("declarator", declarator);
                }
                if self.check(TokenKind::Colon) {
                    let mut bitfield = NodeBuilder::new(NodeKind::BitfieldClause);
                    bitfield.token(self.expect(TokenKind::Colon)?);
                    bitfield.node(self.parse_conditional_expression()?);
                    builder.node(bitfield.finish());
                }
                self.parse_attributes_into(&mut builder)?;
                match self.match_token(TokenKind::Comma) {
                    Some(comma) => {
                        builder.token(comma);
                    }
                    None => break,
                }
            }
        }
        builder.token(self.expect(TokenKind::Semicolon)?);
        Ok(builder.finish())
    }

    /// 列挙型
    fn parse_enum_specifier(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::EnumSpecifier);
        builder.token(self.expect(TokenKind::Enum)?);
        self.parse_attributes_into(&mut builder)?;

        let name = self.match_token(TokenKind::Identifier);
        if let Some(name) = name {
            builder.field("name", self.leaf(NodeKind::TypeIdentifier, name));
        }

        if self.check(TokenKind::LeftBrace) {
            let body = self.parse_enumerator_list()?;
            builder.field("body", body);
        } else if name.is_none() {
            return Err(self.error("enum name or `{`"));
        }
        Ok(builder.finish())
    }

    /// `{ A, B = 2, }`
    fn parse_enumerator_list(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::EnumeratorList);
        builder.token(self.expect(TokenKind::LeftBrace)?);

        while !self.check(TokenKind::RightBrace) {
            let name = self.expect_identifier()?;
            let text = self.text(&name);
            self.scopes.declare(text, false);

            let mut enumerator = NodeBuilder::new(NodeKind::Enumerator);
            enumerator.field("name", self.leaf(NodeKind::Identifier, name));
            if let Some(assign) = self.match_token(TokenKind::Assign) {
                enumerator.token(assign);
                enumerator.field("value", self.parse_conditional_expression()?);
            }
            builder.node(enumerator.finish());

            match self.match_token(TokenKind::Comma) {
                Some(comma) => {
                    builder.token(comma);
                }
                None => break,
            }
        }

        builder.token(self.expect(TokenKind::RightBrace)?);
        Ok(builder.finish())
    }

    /// 型名（`(float4)`、`sizeof(__global int *)` の中身）
    pub(super) fn parse_type_descriptor(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::TypeDescriptor);
        let specifiers = self.parse_declaration_specifiers()?;
        specifiers.push_into(&mut builder);

        if let Some(declarator) = self.parse_declarator(DeclaratorMode::Abstract)? {
            builder.field("declarator", declarator);
        }
        Ok(builder.finish())
    }
}
