//! 文の解析

use crate::ast::{NodeBuilder, NodeKind, SyntaxNode};
use crate::lexer::{Token, TokenKind};

use super::parser_impl::RecoveryLevel;
use super::precedence::Precedence;
use super::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 文を解析
    pub(super) fn parse_statement(&mut self) -> ParseResult<SyntaxNode> {
        let Some(token) = self.current() else {
            return Err(self.error("statement"));
        };

        self.nested(|parser| match token.kind {
            TokenKind::LeftBrace => parser.nested(Self::parse_compound_statement),
            TokenKind::If => parser.parse_if_statement(),
            TokenKind::While => parser.parse_while_statement(),
            TokenKind::Do => parser.parse_do_statement(),
            TokenKind::For => parser.parse_for_statement(),
            TokenKind::Switch => parser.parse_switch_statement(),
            TokenKind::Case | TokenKind::Default => parser.parse_case_statement(),
            TokenKind::Return => parser.parse_return_statement(),
            TokenKind::Break => parser.parse_jump_statement(TokenKind::Break, NodeKind::BreakStatement),
            TokenKind::Continue => parser.parse_jump_statement(TokenKind::Continue, NodeKind::ContinueStatement),
            TokenKind::Goto => parser.parse_goto_statement(),
            TokenKind::Pragma => parser.parse_pragma(),
            TokenKind::Directive => parser.parse_preproc_directive(),
            TokenKind::Identifier if parser.peek_kind(1) == Some(TokenKind::Colon) => {
                parser.parse_labeled_statement()
            }
            _ => parser.parse_expression_statement(),
        })
    }

    /// ブロック内の項目（宣言または文）
    fn parse_block_item(&mut self) -> ParseResult<SyntaxNode> {
        match self.current() {
            Some(token) if self.starts_local_declaration(&token) => self.parse_local_declaration(),
            _ => self.parse_statement(),
        }
    }

    /// 型名で始まる識別子はラベルでなければ宣言
    fn starts_local_declaration(&mut self, token: &Token) -> bool {
        match token.kind {
            TokenKind::Identifier => {
                self.scopes.is_type(self.text(token)) && self.peek_kind(1) != Some(TokenKind::Colon)
            }
            _ => self.starts_declaration(token),
        }
    }

    /// `}` または `stop` のトークンまで項目を並べる。失敗した項目はその場で回復する
    fn parse_block_items(&mut self, builder: &mut NodeBuilder, stop: &[TokenKind]) {
        while let Some(token) = self.current() {
            if token.kind == TokenKind::RightBrace || stop.contains(&token.kind) {
                break;
            }
            let start = self.snapshot();
            let item = match self.parse_block_item() {
                Ok(item) => item,
                Err(error) => self.recover(start, error, RecoveryLevel::Statement),
            };
            builder.node(item);
        }
    }

    /// `{ ... }`
    pub(super) fn parse_compound_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::CompoundStatement);
        builder.token(self.expect(TokenKind::LeftBrace)?);

        self.scopes.push();
        self.parse_block_items(&mut builder, &[]);
        self.scopes.pop();

        builder.token(self.expect(TokenKind::RightBrace)?);
        Ok(builder.finish())
    }

    /// `if (cond) stmt else stmt`
    fn parse_if_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::IfStatement);
        builder.token(self.expect(TokenKind::If)?);
        builder.field("condition", self.parse_parenthesized_expression()?);
        builder.field("consequence", self.parse_statement()?);

        if let Some(else_token) = self.match_token(TokenKind::Else) {
            let mut alternative = NodeBuilder::new(NodeKind::ElseClause);
            alternative.token(else_token);
            alternative.node(self.parse_statement()?);
            builder.field("alternative", alternative.finish());
        }
        Ok(builder.finish())
    }

    fn parse_while_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::WhileStatement);
        builder.token(self.expect(TokenKind::While)?);
        builder.field("condition", self.parse_parenthesized_expression()?);
        builder.field("body", self.parse_statement()?);
        Ok(builder.finish())
    }

    fn parse_do_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::DoStatement);
        builder.token(self.expect(TokenKind::Do)?);
        builder.field("body", self.parse_statement()?);
        builder.token(self.expect(TokenKind::While)?);
        builder.field("condition", self.parse_parenthesized_expression()?);
        builder.token(self.expect(TokenKind::Semicolon)?);
        Ok(builder.finish())
    }

    /// `for (init; cond; update) body`
    ///
    /// 初期化部の宣言はループ本体までのスコープを持つ。
    fn parse_for_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::ForStatement);
        builder.token(self.expect(TokenKind::For)?);
        builder.token(self.expect(TokenKind::LeftParen)?);

        self.scopes.push();
        let result = self.parse_for_rest(&mut builder);
        self.scopes.pop();
        result?;

        Ok(builder.finish())
    }

    fn parse_for_rest(&mut self, builder: &mut NodeBuilder) -> ParseResult<()> {
        match self.current() {
            Some(token) if token.kind == TokenKind::Semicolon => {
                self.advance();
                builder.token(token);
            }
            Some(token) if self.starts_local_declaration(&token) => {
                // 宣言は `;` まで含む
                builder.field("initializer", self.parse_local_declaration()?);
            }
            _ => {
                builder.field("initializer", self.parse_expression(Precedence::Comma)?);
                builder.token(self.expect(TokenKind::Semicolon)?);
            }
        }

        if !self.check(TokenKind::Semicolon) {
            builder.field("condition", self.parse_expression(Precedence::Comma)?);
        }
        builder.token(self.expect(TokenKind::Semicolon)?);

        if !self.check(TokenKind::RightParen) {
            builder.field("update", self.parse_expression(Precedence::Comma)?);
        }
        builder.token(self.expect(TokenKind::RightParen)?);

        builder.field("body", self.parse_statement()?);
        Ok(())
    }

    fn parse_switch_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::SwitchStatement);
        builder.token(self.expect(TokenKind::Switch)?);
        builder.field("condition", self.parse_parenthesized_expression()?);
        builder.field("body", self.parse_compound_statement()?);
        Ok(builder.finish())
    }

    /// `case value:` / `default:` とそれに続く文（次のラベルまで）
    fn parse_case_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::CaseStatement);
        match self.match_token(TokenKind::Case) {
            Some(case) => {
                builder.token(case);
                builder.field("value", self.parse_conditional_expression()?);
            }
            None => {
                builder.token(self.expect(TokenKind::Default)?);
            }
        }
        builder.token(self.expect(TokenKind::Colon)?);

        self.parse_block_items(&mut builder, &[TokenKind::Case, TokenKind::Default]);
        Ok(builder.finish())
    }

    fn parse_return_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::ReturnStatement);
        builder.token(self.expect(TokenKind::Return)?);
        if !self.check(TokenKind::Semicolon) {
            builder.node(self.parse_expression(Precedence::Comma)?);
        }
        builder.token(self.expect(TokenKind::Semicolon)?);
        Ok(builder.finish())
    }

    /// `break;` / `continue;`
    fn parse_jump_statement(&mut self, keyword: TokenKind, kind: NodeKind) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(kind);
        builder.token(self.expect(keyword)?);
        builder.token(self.expect(TokenKind::Semicolon)?);
        Ok(builder.finish())
    }

    fn parse_goto_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::GotoStatement);
        builder.token(self.expect(TokenKind::Goto)?);
        let label = self.expect_identifier()?;
        builder.field("label", self.leaf(NodeKind::Identifier, label));
        builder.token(self.expect(TokenKind::Semicolon)?);
        Ok(builder.finish())
    }

    /// `label: stmt`
    fn parse_labeled_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::LabeledStatement);
        let label = self.expect_identifier()?;
        builder.field("label", self.leaf(NodeKind::Identifier, label));
        builder.token(self.expect(TokenKind::Colon)?);
        builder.node(self.parse_statement()?);
        Ok(builder.finish())
    }

    /// 式文（空文を含む）
    fn parse_expression_statement(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::ExpressionStatement);
        if !self.check(TokenKind::Semicolon) {
            builder.node(self.parse_expression(Precedence::Comma)?);
        }
        builder.token(self.expect(TokenKind::Semicolon)?);
        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn statement(source: &str) -> String {
        let mut parser = Parser::new(source);
        parser.parse_statement().expect("statement").to_sexp()
    }

    #[test]
    fn test_if_else() {
        assert_eq!(
            statement("if (a) b = 1; else { return; }"),
            "(if_statement condition: (parenthesized_expression (identifier)) \
             consequence: (expression_statement (assignment_expression left: (identifier) right: (number_literal))) \
             alternative: (else_clause (compound_statement (return_statement))))"
        );
    }

    #[test]
    fn test_for_with_declaration() {
        assert_eq!(
            statement("for (int i = 0; i < n; i++) ;"),
            "(for_statement initializer: (declaration type: (primitive_type) \
             declarator: (init_declarator declarator: (identifier) value: (number_literal))) \
             condition: (binary_expression left: (identifier) right: (identifier)) \
             update: (update_expression argument: (identifier)) body: (expression_statement))"
        );
    }

    #[test]
    fn test_switch_cases_collect_statements() {
        let sexp = statement("switch (x) { case 1: a(); break; default: b(); }");
        assert_eq!(
            sexp,
            "(switch_statement condition: (parenthesized_expression (identifier)) body: (compound_statement \
             (case_statement value: (number_literal) \
             (expression_statement (call_expression function: (identifier) arguments: (argument_list))) (break_statement)) \
             (case_statement (expression_statement (call_expression function: (identifier) arguments: (argument_list))))))"
        );
    }

    #[test]
    fn test_labels_and_goto() {
        assert_eq!(
            statement("retry: goto retry;"),
            "(labeled_statement label: (identifier) (goto_statement label: (identifier)))"
        );
    }

    #[test]
    fn test_do_while() {
        assert_eq!(
            statement("do i--; while (i);"),
            "(do_statement body: (expression_statement (update_expression argument: (identifier))) \
             condition: (parenthesized_expression (identifier)))"
        );
    }

    #[test]
    fn test_block_recovers_per_statement() {
        let mut parser = Parser::new("{ a = ; b = 2; }");
        let block = parser.parse_compound_statement().expect("block");
        assert_eq!(
            block.to_sexp(),
            "(compound_statement (ERROR) (expression_statement (assignment_expression left: (identifier) right: (number_literal))))"
        );
        assert_eq!(parser.diagnostics.len(), 1);
    }

    #[test]
    fn test_typedef_name_starts_local_declaration() {
        let mut parser = Parser::new("{ T x; T: x; }");
        parser.scopes.declare("T", true);
        let block = parser.parse_compound_statement().expect("block");
        assert_eq!(
            block.to_sexp(),
            "(compound_statement (declaration type: (type_identifier) declarator: (identifier)) \
             (labeled_statement label: (identifier) (expression_statement (identifier))))"
        );
    }
}
