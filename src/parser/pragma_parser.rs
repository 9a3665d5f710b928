//! プリプロセッサ行（`#pragma` とその他のディレクティブ）の解析

use crate::ast::{NodeBuilder, NodeKind, SyntaxNode};
use crate::lexer::{Token, TokenKind};

use super::{ParseResult, Parser};

/// 拡張の振る舞い
const BEHAVIORS: &[&str] = &["enable", "disable", "require", "warn"];

/// `#pragma OPENCL <version>` で受け付ける版
const VERSIONS: &[&str] = &["1.0", "1.1", "1.2", "2.0", "3.0"];

fn is_extension_name(name: &str) -> bool {
    name == "all" || name.strip_prefix("cl_").is_some_and(|rest| !rest.is_empty())
}

impl<'a> Parser<'a> {
    /// `#pragma` 行を解析
    pub(super) fn parse_pragma(&mut self) -> ParseResult<SyntaxNode> {
        let marker = self.expect(TokenKind::Pragma)?;
        let line = self.take_line();
        Ok(self.build_pragma(marker, line))
    }

    /// `#define` などを行末までまとめる
    pub(super) fn parse_preproc_directive(&mut self) -> ParseResult<SyntaxNode> {
        let marker = self.expect(TokenKind::Directive)?;
        let mut builder = NodeBuilder::new(NodeKind::PreprocDirective);
        builder.field_token("directive", marker);
        for token in self.take_line() {
            builder.token(token);
        }
        Ok(builder.finish())
    }

    /// 現在の行に残っているトークンを消費する
    fn take_line(&mut self) -> Vec<Token> {
        let mut line = Vec::new();
        while let Some(token) = self.current() {
            if token.newline_before {
                break;
            }
            self.advance();
            line.push(token);
        }
        line
    }

    fn build_pragma(&self, marker: Token, line: Vec<Token>) -> SyntaxNode {
        let words: Vec<&str> = line.iter().map(|t| self.text(t)).collect();

        match words.as_slice() {
            ["OPENCL", "EXTENSION", name, ":", behavior]
                if line[2].kind == TokenKind::Identifier
                    && is_extension_name(name)
                    && BEHAVIORS.contains(behavior) =>
            {
                let mut builder = NodeBuilder::new(NodeKind::PragmaDirective);
                builder.token(marker).token(line[0]).token(line[1]);
                builder.field("extension", self.leaf(NodeKind::Identifier, line[2]));
                builder.token(line[3]);
                builder.field("behavior", self.leaf(NodeKind::Identifier, line[4]));
                builder.finish()
            }
            ["OPENCL", version]
                if line[1].kind == TokenKind::NumberLiteral && VERSIONS.contains(version) =>
            {
                let mut builder = NodeBuilder::new(NodeKind::VersionPragma);
                builder.token(marker).token(line[0]);
                builder.field("version", self.leaf(NodeKind::NumberLiteral, line[1]));
                builder.finish()
            }
            _ => {
                log::trace!("unrecognized pragma {:?}", words);
                let mut builder = NodeBuilder::new(NodeKind::PragmaLine);
                builder.token(marker);
                builder.extend(line.into_iter().map(Into::into));
                builder.finish()
            }
        }
    }
}
