//! 一次式（識別子、リテラル、括弧式）の解析

use crate::ast::{NodeBuilder, NodeKind, SyntaxNode};
use crate::lexer::TokenKind;

use crate::parser::precedence::Precedence;
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 一次式を解析
    pub(in crate::parser) fn parse_primary_expression(&mut self) -> ParseResult<SyntaxNode> {
        let Some(token) = self.current() else {
            return Err(self.error("expression"));
        };

        let kind = match token.kind {
            TokenKind::Identifier => NodeKind::Identifier,
            TokenKind::NumberLiteral => NodeKind::NumberLiteral,
            TokenKind::CharLiteral => NodeKind::CharLiteral,
            TokenKind::StringLiteral => return self.parse_string_literal(),
            TokenKind::LeftParen => return self.parse_parenthesized_expression(),
            _ => return Err(self.error("expression")),
        };
        self.advance();
        Ok(self.leaf(kind, token))
    }

    /// 文字列リテラル。隣接する文字列は concatenated_string にまとめる
    fn parse_string_literal(&mut self) -> ParseResult<SyntaxNode> {
        let mut strings = Vec::new();
        while let Some(token) = self.match_token(TokenKind::StringLiteral) {
            strings.push(self.leaf(NodeKind::StringLiteral, token));
        }

        match strings.len() {
            0 => Err(self.error("string literal")),
            1 => Ok(strings.remove(0)),
            _ => {
                let mut builder = NodeBuilder::new(NodeKind::ConcatenatedString);
                for string in strings {
                    builder.node(string);
                }
                Ok(builder.finish())
            }
        }
    }

    /// `( 式 )`
    pub(in crate::parser) fn parse_parenthesized_expression(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::ParenthesizedExpression);
        builder.token(self.expect(TokenKind::LeftParen)?);
        builder.node(self.nested(|parser| parser.parse_expression(Precedence::Comma))?);
        builder.token(self.expect(TokenKind::RightParen)?);
        Ok(builder.finish())
    }
}
