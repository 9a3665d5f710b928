//! 単項式（前置演算子、`sizeof`、`_Alignof`、`vec_step`）の解析

use crate::ast::{NodeBuilder, NodeKind, SyntaxNode};
use crate::lexer::{Token, TokenKind};

use crate::parser::precedence::{prefix_entry, Precedence};
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 単項式を解析
    pub(in crate::parser) fn parse_unary_expression(&mut self) -> ParseResult<SyntaxNode> {
        let Some(token) = self.current() else {
            return Err(self.error("expression"));
        };
        // `(型)` の項目はキャスト式側で扱う
        let Some(entry) = prefix_entry(token.kind).filter(|e| e.level == Precedence::Unary) else {
            return self.parse_postfix_expression();
        };

        match entry.operator {
            TokenKind::Sizeof => self.parse_sizeof_expression(),
            TokenKind::Alignof => self.parse_alignof_expression(),
            TokenKind::VecStep => self.parse_vec_step_expression(),
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                self.advance();
                let argument = self.nested(Self::parse_unary_expression)?;
                Ok(prefix_node(NodeKind::UpdateExpression, token, argument))
            }
            operator => {
                self.advance();
                let kind = match operator {
                    TokenKind::Star | TokenKind::Ampersand => NodeKind::PointerExpression,
                    _ => NodeKind::UnaryExpression,
                };
                let argument = self.parse_cast_expression()?;
                Ok(prefix_node(kind, token, argument))
            }
        }
    }

    /// `sizeof(型)` または `sizeof 式`
    fn parse_sizeof_expression(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::SizeofExpression);
        builder.token(self.expect(TokenKind::Sizeof)?);

        if self.check(TokenKind::LeftParen) && self.starts_type_name_at(1) {
            let start = self.snapshot();
            match self.parse_parenthesized_type() {
                Ok((open, ty, close)) => {
                    builder.token(open).field("type", ty).token(close);
                    return Ok(builder.finish());
                }
                Err(error) => {
                    log::trace!("sizeof operand is not a type: {}", error);
                    self.restore(start);
                }
            }
        }

        builder.field("value", self.nested(Self::parse_unary_expression)?);
        Ok(builder.finish())
    }

    /// `_Alignof(型)`
    fn parse_alignof_expression(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::AlignofExpression);
        builder.token(self.expect(TokenKind::Alignof)?);
        builder.token(self.expect(TokenKind::LeftParen)?);
        builder.field("type", self.parse_type_descriptor()?);
        builder.token(self.expect(TokenKind::RightParen)?);
        Ok(builder.finish())
    }

    /// `vec_step(型)` または `vec_step(式)`
    fn parse_vec_step_expression(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::VecStepExpression);
        builder.token(self.expect(TokenKind::VecStep)?);

        if self.starts_type_name_at(1) {
            let start = self.snapshot();
            match self.parse_parenthesized_type() {
                Ok((open, ty, close)) => {
                    builder.token(open).field("type", ty).token(close);
                    return Ok(builder.finish());
                }
                Err(error) => {
                    log::trace!("vec_step operand is not a type: {}", error);
                    self.restore(start);
                }
            }
        }

        builder.token(self.expect(TokenKind::LeftParen)?);
        builder.field("value", self.parse_expression(Precedence::Comma)?);
        builder.token(self.expect(TokenKind::RightParen)?);
        Ok(builder.finish())
    }
}

fn prefix_node(kind: NodeKind, operator: Token, argument: SyntaxNode) -> SyntaxNode {
    let mut builder = NodeBuilder::new(kind);
    builder.field_token("operator", operator);
    builder.field("argument", argument);
    builder.finish()
}
