//! 字句モードを考慮したトークンカーソル
//!
//! トークンは必要になった時点で字句化し、バッファに追記する。キャストの先読みなどで
//! 巻き戻した後に別のモードで同じ位置を読むと、モードで結果が変わるトークン
//! （`.` とスウィズルアクセサ）だけをその位置から字句化し直す。

use crate::error::LexError;
use crate::lexer::{LexMode, Lexer, Token};

#[derive(Debug, Clone, Copy)]
struct Buffered {
    token: Token,
    mode: LexMode,
}

/// 巻き戻し地点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Checkpoint {
    pub(super) pos: usize,
    mode: LexMode,
}

pub(super) struct TokenCursor<'a> {
    lexer: Lexer<'a>,
    buffer: Vec<Buffered>,
    pos: usize,
    mode: LexMode,
    exhausted: bool,
}

impl<'a> TokenCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            buffer: Vec::new(),
            pos: 0,
            mode: LexMode::Normal,
            exhausted: false,
        }
    }

    pub fn mode(&self) -> LexMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LexMode) {
        self.mode = mode;
    }

    /// 現在位置（消費済みトークン数）
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// 現在位置から `offset` 個先のトークンを現在のモードで覗く
    pub fn peek(&mut self, offset: usize) -> Option<Token> {
        let index = self.pos + offset;
        for i in self.pos..=index {
            self.revalidate(i);
        }
        self.fill(index)
    }

    /// 現在のトークンを消費する
    ///
    /// 直前の `peek` が返したトークンをそのまま消費する。まだ字句化されていなければ
    /// 現在のモードで字句化する。
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.fill(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// 消費済みのトークン（`from` 以降）
    pub fn consumed_since(&self, from: usize) -> Vec<Token> {
        self.buffer[from.min(self.pos)..self.pos]
            .iter()
            .map(|b| b.token)
            .collect()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            mode: self.mode,
        }
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        log::trace!("rewinding token cursor {} -> {}", self.pos, checkpoint.pos);
        self.pos = checkpoint.pos;
        self.mode = checkpoint.mode;
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        self.lexer.take_errors()
    }

    /// `index` のトークンが別のモードで字句化されていれば、そこから先を捨てて読み直す
    fn revalidate(&mut self, index: usize) {
        let Some(buffered) = self.buffer.get(index) else {
            return;
        };
        if buffered.mode == self.mode || !buffered.token.kind.is_mode_sensitive() {
            return;
        }
        let start = buffered.token.span.start;
        let previous_end = index
            .checked_sub(1)
            .and_then(|i| self.buffer.get(i))
            .map_or(0, |b| b.token.span.end);
        self.buffer.truncate(index);
        self.lexer.reset_to(start, previous_end);
        self.exhausted = false;
    }

    fn fill(&mut self, index: usize) -> Option<Token> {
        while self.buffer.len() <= index && !self.exhausted {
            self.lexer.set_mode(self.mode);
            match self.lexer.next_token() {
                Some(token) => self.buffer.push(Buffered {
                    token,
                    mode: self.mode,
                }),
                None => self.exhausted = true,
            }
        }
        self.buffer.get(index).map(|b| b.token)
    }
}
