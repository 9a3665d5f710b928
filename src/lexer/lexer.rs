//! レキサーのメイン実装

use std::collections::BTreeMap;

use logos::{Lexer as LogosLexer, Logos};

use super::swizzle;
use super::token::{Token, TokenKind};
use crate::ast::Span;
use crate::error::{LexError, LexErrorKind};

/// 字句モード
///
/// パーサーが後置式のループに入っている間だけ `Postfix` になり、
/// `.xyz` のようなスウィズルアクセサが単一トークンとして字句化される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexMode {
    #[default]
    Normal,
    Postfix,
}

/// OpenCL Cのレキサー
///
/// 遅延的にトークンを生成する。巻き戻しは `reset_to` で明示的に行う。
pub struct Lexer<'a> {
    source: &'a str,
    inner: LogosLexer<'a, TokenKind>,
    /// `inner` が字句化している部分文字列の開始オフセット
    base: usize,
    /// 直前に生成したトークンの終了オフセット
    last_end: usize,
    mode: LexMode,
    errors: BTreeMap<usize, LexError>,
}

impl<'a> Lexer<'a> {
    /// 新しいレキサーを作成
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            base: 0,
            last_end: 0,
            mode: LexMode::Normal,
            errors: BTreeMap::new(),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn mode(&self) -> LexMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LexMode) {
        self.mode = mode;
    }

    /// 指定オフセットから字句化をやり直す
    ///
    /// `previous_end` は直前のトークンの終了位置で、改行フラグの計算に使う。
    pub fn reset_to(&mut self, offset: usize, previous_end: usize) {
        log::trace!("relexing from offset {} in {:?} mode", offset, self.mode);
        self.inner = TokenKind::lexer(&self.source[offset..]);
        self.base = offset;
        self.last_end = previous_end;
    }

    /// 次のトークンを取得
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            let result = self.inner.next()?;
            let range = self.inner.span();
            let start = self.base + range.start;
            let end = self.base + range.end;

            let kind = match result {
                Ok(TokenKind::Comment) => continue,
                Ok(TokenKind::Dot) if self.mode == LexMode::Postfix => {
                    match swizzle::accessor_len(&self.source[end..]) {
                        Some(len) => {
                            self.inner.bump(len);
                            TokenKind::SwizzleAccessor
                        }
                        None => TokenKind::Dot,
                    }
                }
                Ok(kind) => kind,
                Err(kind) => match self.recover(kind, start, end) {
                    Some(kind) => kind,
                    // 不正な文字と未完了のコメントは読み飛ばす
                    None => continue,
                },
            };

            let end = self.base + self.inner.span().end;
            let newline_before = has_newline(&self.source[self.last_end.min(start)..start]);
            self.last_end = end;

            return Some(Token {
                kind,
                span: Span::new(start, end),
                newline_before,
            });
        }
    }

    /// 字句エラーを記録し、代わりに生成するトークン種別を返す
    fn recover(&mut self, kind: LexErrorKind, start: usize, end: usize) -> Option<TokenKind> {
        let text = &self.source[start..end];
        let offset = match &kind {
            LexErrorKind::InvalidEscape { at, .. } => start + at,
            _ => start,
        };
        let replacement = match &kind {
            LexErrorKind::UnrecognizedCharacter | LexErrorKind::UnterminatedComment => None,
            LexErrorKind::UnterminatedChar => Some(TokenKind::CharLiteral),
            LexErrorKind::UnterminatedString => Some(TokenKind::StringLiteral),
            LexErrorKind::InvalidEscape { .. } => {
                if text.trim_start_matches('L').starts_with('\'') {
                    Some(TokenKind::CharLiteral)
                } else {
                    Some(TokenKind::StringLiteral)
                }
            }
        };
        // 巻き戻しによる再字句化で同じエラーが重複しないようオフセットで管理する
        self.errors
            .entry(offset)
            .or_insert_with(|| LexError::new(kind, offset, text));
        replacement
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors).into_values().collect()
    }

    /// すべてのトークンを収集
    pub fn collect_tokens(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// 行継続を除いた改行が含まれるか
fn has_newline(gap: &str) -> bool {
    let bytes = gap.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'\n' && !matches!(&bytes[..i], [.., b'\\'] | [.., b'\\', b'\r'])
    })
}

/// ソースコードをトークン化（通常モード）
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    (tokens, lexer.take_errors())
}

/// デバッグ用：トークンストリームを文字列として出力
pub fn format_tokens(source: &str, tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| format!("{:?} {:?} @ {}..{}", t.kind, t.text(source), t.span.start, t.span.end))
        .collect::<Vec<_>>()
        .join("\n")
}
