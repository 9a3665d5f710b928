//! 複合的な式（キャスト、複合リテラル、ベクトルリテラル、初期化子リスト）の解析

use crate::ast::{NodeBuilder, NodeKind, SyntaxNode};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};

use crate::parser::{ParseResult, Parser};

/// 宣言子を持たないベクトル型の型名か（`(float4)(...)` をベクトルリテラルにする）
fn is_vector_type_name(ty: &SyntaxNode) -> bool {
    ty.field_node("declarator").is_none()
        && ty
            .field_node("type")
            .is_some_and(|t| t.kind() == NodeKind::VectorType)
}

impl<'a> Parser<'a> {
    /// `(型)` で始まる式を試す
    ///
    /// 型名として読めなければ巻き戻して `None` を返す（呼び出し側は括弧式として読み直す）。
    pub(in crate::parser) fn try_parse_cast(&mut self) -> ParseResult<Option<SyntaxNode>> {
        let start = self.snapshot();
        let (open, ty, close) = match self.parse_parenthesized_type() {
            Ok(parts) => parts,
            Err(error) => {
                log::trace!("not a cast, reparsing as parenthesized expression: {}", error);
                self.restore(start);
                return Ok(None);
            }
        };

        let node = match self.current_kind() {
            Some(TokenKind::LeftBrace) => {
                let literal = self.finish_compound_literal(open, ty, close)?;
                self.parse_postfix_suffixes(literal)?
            }
            Some(TokenKind::LeftParen) if is_vector_type_name(&ty) => {
                let literal = self.finish_vector_literal(open, ty, close)?;
                self.parse_postfix_suffixes(literal)?
            }
            _ => {
                let mut builder = NodeBuilder::new(NodeKind::CastExpression);
                builder.token(open).field("type", ty).token(close);
                builder.field("value", self.parse_cast_expression()?);
                builder.finish()
            }
        };
        Ok(Some(node))
    }

    /// `( type_descriptor )`
    ///
    /// 型名の後に `)` が来なければ [`ParseError::AmbiguousCast`]。
    pub(in crate::parser) fn parse_parenthesized_type(&mut self) -> ParseResult<(Token, SyntaxNode, Token)> {
        let open = self.expect(TokenKind::LeftParen)?;
        let ty = self.parse_type_descriptor()?;
        match self.match_token(TokenKind::RightParen) {
            Some(close) => Ok((open, ty, close)),
            None => Err(ParseError::AmbiguousCast {
                span: open.span.to(ty.span()),
            }),
        }
    }

    /// `(struct S){ .a = 1 }`
    fn finish_compound_literal(&mut self, open: Token, ty: SyntaxNode, close: Token) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::CompoundLiteralExpression);
        builder.token(open).field("type", ty).token(close);
        builder.field("value", self.parse_initializer_list()?);
        Ok(builder.finish())
    }

    /// `(float4)(1.0f, v.xy, 0.0f)`
    fn finish_vector_literal(&mut self, open: Token, ty: SyntaxNode, close: Token) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::VectorLiteral);
        builder.token(open).field("type", ty).token(close);
        builder.field("arguments", self.parse_argument_list()?);
        Ok(builder.finish())
    }

    /// 初期化子（式または `{...}`）
    pub(in crate::parser) fn parse_initializer(&mut self) -> ParseResult<SyntaxNode> {
        if self.check(TokenKind::LeftBrace) {
            self.nested(Self::parse_initializer_list)
        } else {
            self.parse_assignment_expression()
        }
    }

    /// `{ 1, .x = 2, [3] = 4, }`
    pub(in crate::parser) fn parse_initializer_list(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::InitializerList);
        builder.token(self.expect(TokenKind::LeftBrace)?);

        while !self.check(TokenKind::RightBrace) {
            let item = match self.current_kind() {
                Some(TokenKind::Dot) | Some(TokenKind::LeftBracket) => self.parse_initializer_pair()?,
                _ => self.parse_initializer()?,
            };
            builder.node(item);
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

    /// 指示付き初期化子 `.a[2] = value`
    fn parse_initializer_pair(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::InitializerPair);
        loop {
            match self.current_kind() {
                Some(TokenKind::Dot) => {
                    let mut designator = NodeBuilder::new(NodeKind::FieldDesignator);
                    designator.token(self.expect(TokenKind::Dot)?);
                    let name = self.expect_identifier()?;
                    designator.node(self.leaf(NodeKind::FieldIdentifier, name));
                    builder.field("designator", designator.finish());
                }
                Some(TokenKind::LeftBracket) => {
                    let mut designator = NodeBuilder::new(NodeKind::SubscriptDesignator);
                    designator.token(self.expect(TokenKind::LeftBracket)?);
                    designator.node(self.parse_conditional_expression()?);
                    designator.token(self.expect(TokenKind::RightBracket)?);
                    builder.field("designator", designator.finish());
                }
                _ => break,
            }
        }
        builder.token(self.expect(TokenKind::Assign)?);
        builder.field("value", self.parse_initializer()?);
        Ok(builder.finish())
    }
}
