//! メインパーサー構造とユーティリティ

use crate::ast::{NodeBuilder, NodeKind, Span, SyntaxNode, Tree};
use crate::error::{Diagnostic, DiagnosticKind, ParseError};
use crate::lexer::{LexMode, LineIndex, Token, TokenClass, TokenKind};

use super::cursor::{Checkpoint, TokenCursor};
use super::scope::ScopeStack;
use super::ParseResult;

/// OpenCL Cパーサー
///
/// 1回の解析ごとに作成し、[`Parser::parse`] で消費する。
pub struct Parser<'a> {
    pub(super) source: &'a str,
    pub(super) cursor: TokenCursor<'a>,
    pub(super) scopes: ScopeStack,
    pub(super) diagnostics: Vec<ParseError>,
    nesting: usize,
}

/// 式・文・宣言子の入れ子の上限
const MAX_NESTING: usize = 256;

/// 先読みを取り消すための地点（トークン位置・診断の数・スコープの変更記録）
#[derive(Debug, Clone, Copy)]
pub(super) struct Snapshot {
    cursor: Checkpoint,
    diagnostics: usize,
    scopes: usize,
}

/// 回復処理をどこから呼んだか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RecoveryLevel {
    TopLevel,
    Statement,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: TokenCursor::new(source),
            scopes: ScopeStack::new(),
            diagnostics: Vec::new(),
            nesting: 0,
        }
    }

    /// ソース全体を解析して構文木と診断を返す
    pub fn parse(mut self) -> (Tree, Vec<Diagnostic>) {
        log::debug!("parsing {} bytes", self.source.len());

        let mut root = NodeBuilder::new(NodeKind::SourceFile);
        while !self.is_at_end() {
            let item = self.parse_top_level_item();
            root.node(item);
        }
        let root = root.finish_with_span(Span::new(0, self.source.len()));

        let diagnostics = self.finish_diagnostics();
        log::debug!(
            "parsed {} top-level items with {} diagnostics",
            root.child_nodes().count(),
            diagnostics.len()
        );
        (Tree::new(self.source, root), diagnostics)
    }

    /// トップレベル項目を1つ解析（失敗時はERRORノードを返す）
    fn parse_top_level_item(&mut self) -> SyntaxNode {
        let start = self.snapshot();
        match self.parse_item() {
            Ok(node) => node,
            Err(error) => self.recover(start, error, RecoveryLevel::TopLevel),
        }
    }

    /// トップレベルの振り分け
    pub(super) fn parse_item(&mut self) -> ParseResult<SyntaxNode> {
        match self.current_kind() {
            Some(TokenKind::Pragma) => self.parse_pragma(),
            Some(TokenKind::Directive) => self.parse_preproc_directive(),
            _ => self.parse_external_declaration(),
        }
    }

    /// 診断を位置付きに変換し、オフセット順に並べる
    fn finish_diagnostics(&mut self) -> Vec<Diagnostic> {
        let lines = LineIndex::new(self.source);
        let mut errors: Vec<ParseError> = self
            .cursor
            .take_errors()
            .into_iter()
            .map(ParseError::Lex)
            .collect();
        errors.append(&mut self.diagnostics);

        let mut diagnostics: Vec<Diagnostic> = errors
            .into_iter()
            .filter(|error| error.kind() != DiagnosticKind::AmbiguousCast)
            .map(|error| {
                let position = lines.position(self.source, error.span().start);
                Diagnostic::new(error, position)
            })
            .collect();
        diagnostics.sort_by_key(|d| d.span().start);
        diagnostics
    }

    // ==================== エラー回復 ====================

    /// パニックモードでの回復
    ///
    /// 項目の先頭から失敗地点までに消費したトークンと、同期点までに読み飛ばした
    /// トークンをすべて1つのERRORノードに入れる。少なくとも1トークンは消費する。
    pub(super) fn recover(
        &mut self,
        start: Snapshot,
        error: ParseError,
        level: RecoveryLevel,
    ) -> SyntaxNode {
        log::trace!("recovering from `{}` at {:?}", error, error.span());
        self.diagnostics.push(error);
        self.cursor.set_mode(LexMode::Normal);

        let mut node = NodeBuilder::new(NodeKind::Error);
        let mut depth: i32 = 0;
        for token in self.cursor.consumed_since(start.cursor.pos) {
            depth += brace_delta(token.kind);
            node.token(token);
        }

        while let Some(token) = self.current() {
            if !node.is_empty() && self.is_sync_point(&token, depth, level) {
                break;
            }
            self.advance();
            node.token(token);
            depth += brace_delta(token.kind);
            if token.kind == TokenKind::Semicolon && depth <= 0 {
                break;
            }
        }
        node.finish()
    }

    /// このトークンの手前で読み飛ばしを止めるか
    fn is_sync_point(&mut self, token: &Token, depth: i32, level: RecoveryLevel) -> bool {
        match token.kind {
            TokenKind::Pragma | TokenKind::Directive => true,
            TokenKind::RightBrace => depth <= 0,
            _ if depth > 0 || !token.newline_before => false,
            kind if level == RecoveryLevel::Statement && is_statement_keyword(kind) => true,
            _ => self.starts_declaration(token),
        }
    }

    // ==================== ユーティリティメソッド ====================

    /// 入れ子を1段深くして `parse` を呼ぶ。上限を超えたらエラー
    pub(super) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.nesting >= MAX_NESTING {
            return Err(self.error("shallower nesting"));
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    pub(super) fn snapshot(&self) -> Snapshot {
        Snapshot {
            cursor: self.cursor.checkpoint(),
            diagnostics: self.diagnostics.len(),
            scopes: self.scopes.mark(),
        }
    }

    /// 先読みを取り消す（その間に出た診断と宣言も捨てる）
    pub(super) fn restore(&mut self, snapshot: Snapshot) {
        self.cursor.rewind(snapshot.cursor);
        self.diagnostics.truncate(snapshot.diagnostics);
        self.scopes.undo_to(snapshot.scopes);
    }

    /// 現在のトークンを取得
    pub(super) fn current(&mut self) -> Option<Token> {
        self.cursor.peek(0)
    }

    pub(super) fn current_kind(&mut self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    /// 特定のオフセット先のトークンを取得
    pub(super) fn peek(&mut self, offset: usize) -> Option<Token> {
        self.cursor.peek(offset)
    }

    pub(super) fn peek_kind(&mut self, offset: usize) -> Option<TokenKind> {
        self.peek(offset).map(|t| t.kind)
    }

    /// 後置演算子の位置でトークンを覗く（スウィズルアクセサを認識する）
    pub(super) fn peek_postfix(&mut self) -> Option<Token> {
        let mode = self.cursor.mode();
        self.cursor.set_mode(LexMode::Postfix);
        let token = self.current();
        self.cursor.set_mode(mode);
        token
    }

    /// 終端に到達したかチェック
    pub(super) fn is_at_end(&mut self) -> bool {
        self.current().is_none()
    }

    /// 次のトークンに進む
    pub(super) fn advance(&mut self) -> Option<Token> {
        self.cursor.advance()
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&mut self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// 特定のトークンにマッチしたら進む
    pub(super) fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// 特定のトークンを期待
    pub(super) fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        match self.match_token(kind) {
            Some(token) => Ok(token),
            None => Err(self.error(kind.describe())),
        }
    }

    /// 識別子を期待
    pub(super) fn expect_identifier(&mut self) -> ParseResult<Token> {
        self.expect(TokenKind::Identifier)
    }

    /// 現在のトークンに対する「期待したものと違う」エラーを作成
    pub(super) fn error(&mut self, expected: &str) -> ParseError {
        match self.current() {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.describe_token(&token),
                span: token.span,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                span: Span::new(self.source.len(), self.source.len()),
            },
        }
    }

    fn describe_token(&self, token: &Token) -> String {
        match token.kind.class() {
            TokenClass::Identifier | TokenClass::NumberLiteral | TokenClass::StringLiteral => {
                format!("{} `{}`", token.kind.describe(), self.text(token))
            }
            _ => token.kind.describe().to_string(),
        }
    }

    /// 解析を止めない診断を記録
    pub(super) fn report(&mut self, error: ParseError) {
        log::trace!("reporting `{}`", error);
        self.diagnostics.push(error);
    }

    /// トークンの字句
    pub(super) fn text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }

    /// 単一トークンを包むノード
    pub(super) fn leaf(&self, kind: NodeKind, token: Token) -> SyntaxNode {
        let mut builder = NodeBuilder::new(kind);
        builder.token(token);
        builder.finish()
    }
}

fn brace_delta(kind: TokenKind) -> i32 {
    match kind {
        TokenKind::LeftBrace => 1,
        TokenKind::RightBrace => -1,
        _ => 0,
    }
}

pub(super) fn is_statement_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::If
            | TokenKind::While
            | TokenKind::Do
            | TokenKind::For
            | TokenKind::Switch
            | TokenKind::Case
            | TokenKind::Default
            | TokenKind::Return
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Goto
    )
}
