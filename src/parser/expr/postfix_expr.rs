// 後置演算式の解析
//
// 添字、フィールドアクセス、スウィズル、関数呼び出し、後置インクリメントを解析する。

use crate::ast::{builtin_category, NodeBuilder, NodeKind, SyntaxNode};
use crate::lexer::{Token, TokenKind};

use crate::parser::precedence::{postfix_entry, Precedence};
use crate::parser::{ParseResult, Parser};

/// スウィズルを適用できる（ベクトルになり得る）式か
///
/// リテラルとベクトル型以外の複合リテラルは除く。括弧は透過する。
fn may_be_vector(node: &SyntaxNode) -> bool {
    match node.kind() {
        NodeKind::NumberLiteral
        | NodeKind::CharLiteral
        | NodeKind::StringLiteral
        | NodeKind::ConcatenatedString => false,
        NodeKind::CompoundLiteralExpression => node
            .field_node("type")
            .and_then(|ty| ty.field_node("type"))
            .is_some_and(|ty| ty.kind() == NodeKind::VectorType),
        NodeKind::ParenthesizedExpression => node.child_nodes().next().map_or(true, may_be_vector),
        _ => true,
    }
}

impl<'a> Parser<'a> {
    /// 後置式を解析
    pub(in crate::parser) fn parse_postfix_expression(&mut self) -> ParseResult<SyntaxNode> {
        let primary = self.parse_primary_expression()?;
        self.parse_postfix_suffixes(primary)
    }

    /// 既に解析した式に続く後置演算子を取り込む
    pub(in crate::parser) fn parse_postfix_suffixes(&mut self, mut expr: SyntaxNode) -> ParseResult<SyntaxNode> {
        while let Some(token) = self.peek_postfix() {
            let Some(entry) = postfix_entry(token.kind) else {
                break;
            };
            expr = match entry.operator {
                TokenKind::LeftParen => self.parse_call(expr)?,
                TokenKind::LeftBracket => self.parse_subscript(expr)?,
                TokenKind::SwizzleAccessor if may_be_vector(&expr) => {
                    self.advance();
                    let mut builder = NodeBuilder::new(NodeKind::SwizzleAccess);
                    builder.field("argument", expr);
                    builder.field_token("accessor", token);
                    builder.finish()
                }
                // 通常モードで読み直すと `.` と識別子になる
                TokenKind::SwizzleAccessor | TokenKind::Dot | TokenKind::Arrow => {
                    self.parse_field_access(expr)?
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    self.advance();
                    let mut builder = NodeBuilder::new(NodeKind::UpdateExpression);
                    builder.field("argument", expr);
                    builder.field_token("operator", token);
                    builder.finish()
                }
                _ => break,
            };
        }
        Ok(expr)
    }

    /// `a[i]`
    fn parse_subscript(&mut self, argument: SyntaxNode) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::SubscriptExpression);
        builder.field("argument", argument);
        builder.token(self.expect(TokenKind::LeftBracket)?);
        builder.field("index", self.parse_expression(Precedence::Comma)?);
        builder.token(self.expect(TokenKind::RightBracket)?);
        Ok(builder.finish())
    }

    /// `s.field` / `p->field`
    fn parse_field_access(&mut self, argument: SyntaxNode) -> ParseResult<SyntaxNode> {
        let operator = match self.current() {
            Some(token) if matches!(token.kind, TokenKind::Dot | TokenKind::Arrow) => {
                self.advance();
                token
            }
            _ => return Err(self.error("`.` or `->`")),
        };
        let field = self.expect_identifier()?;

        let mut builder = NodeBuilder::new(NodeKind::FieldExpression);
        builder.field("argument", argument);
        builder.field_token("operator", operator);
        builder.field("field", self.leaf(NodeKind::FieldIdentifier, field));
        Ok(builder.finish())
    }

    /// 関数呼び出し。組み込み関数の名前なら builtin_function_call にする
    fn parse_call(&mut self, callee: SyntaxNode) -> ParseResult<SyntaxNode> {
        let arguments = self.parse_argument_list()?;

        let mut builder = match self.builtin_callee(&callee) {
            Some(name) => {
                let mut builder = NodeBuilder::new(NodeKind::BuiltinFunctionCall);
                builder.field("function", self.leaf(NodeKind::BuiltinFunction, name));
                builder
            }
            None => {
                let mut builder = NodeBuilder::new(NodeKind::CallExpression);
                builder.field("function", callee);
                builder
            }
        };
        builder.field("arguments", arguments);
        Ok(builder.finish())
    }

    /// 組み込み関数の名前を指す識別子（同名の変数・関数で隠されていないもの）
    fn builtin_callee(&self, callee: &SyntaxNode) -> Option<Token> {
        if callee.kind() != NodeKind::Identifier {
            return None;
        }
        let token = callee.child_tokens().next().copied()?;
        let name = self.text(&token);
        (builtin_category(name).is_some() && !self.scopes.is_ordinary(name)).then_some(token)
    }

    /// `(a, b, c)`
    pub(in crate::parser) fn parse_argument_list(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::ArgumentList);
        builder.token(self.expect(TokenKind::LeftParen)?);

        while !self.check(TokenKind::RightParen) {
            builder.node(self.parse_assignment_expression()?);
            match self.match_token(TokenKind::Comma) {
                Some(comma) => {
                    builder.token(comma);
                }
                None => break,
            }
        }

        builder.token(self.expect(TokenKind::RightParen)?);
        Ok(builder.finish())
    }
}
