//! 式の解析（二項演算子は優先順位法）

use crate::ast::{NodeBuilder, NodeKind, SyntaxNode};
use crate::lexer::{Token, TokenKind};

use super::precedence::{infix_entry, Associativity, Precedence};
use super::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// `min` 以上の優先順位の演算子だけを取り込んで式を解析
    pub(super) fn parse_expression(&mut self, min: Precedence) -> ParseResult<SyntaxNode> {
        let mut left = self.parse_cast_expression()?;

        while let Some(token) = self.current() {
            let Some(entry) = infix_entry(token.kind) else {
                break;
            };
            if entry.level < min {
                break;
            }
            self.advance();

            left = if entry.level == Precedence::Conditional {
                self.finish_conditional_expression(left, token)?
            } else {
                let right_min = match entry.associativity {
                    Associativity::Left => entry.level.next(),
                    Associativity::Right => entry.level,
                };
                let right = self.parse_expression(right_min)?;
                binary_node(entry.level, left, token, right)
            };
        }
        Ok(left)
    }

    /// カンマ式を含まない式（引数、初期化子）
    pub(super) fn parse_assignment_expression(&mut self) -> ParseResult<SyntaxNode> {
        self.parse_expression(Precedence::Assignment)
    }

    /// 定数式（配列サイズ、`case` ラベル、ビットフィールド幅）
    pub(super) fn parse_conditional_expression(&mut self) -> ParseResult<SyntaxNode> {
        self.parse_expression(Precedence::Conditional)
    }

    /// `cond ? a : b`（`?` は消費済み）
    fn finish_conditional_expression(
        &mut self,
        condition: SyntaxNode,
        question: Token,
    ) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::ConditionalExpression);
        builder.field("condition", condition);
        builder.token(question);
        builder.field("consequence", self.parse_expression(Precedence::Comma)?);
        builder.token(self.expect(TokenKind::Colon)?);
        builder.field("alternative", self.parse_expression(Precedence::Conditional)?);
        Ok(builder.finish())
    }

    /// キャスト式（`(型)` で始まらなければ単項式）
    pub(super) fn parse_cast_expression(&mut self) -> ParseResult<SyntaxNode> {
        self.nested(|parser| {
            if parser.check(TokenKind::LeftParen) && parser.starts_type_name_at(1) {
                if let Some(node) = parser.try_parse_cast()? {
                    return Ok(node);
                }
            }
            parser.parse_unary_expression()
        })
    }
}

fn binary_node(level: Precedence, left: SyntaxNode, operator: Token, right: SyntaxNode) -> SyntaxNode {
    let kind = match level {
        Precedence::Comma => NodeKind::CommaExpression,
        Precedence::Assignment => NodeKind::AssignmentExpression,
        _ => NodeKind::BinaryExpression,
    };
    let mut builder = NodeBuilder::new(kind);
    builder.field("left", left);
    if kind == NodeKind::CommaExpression {
        builder.token(operator);
    } else {
        builder.field_token("operator", operator);
    }
    builder.field("right", right);
    builder.finish()
}
