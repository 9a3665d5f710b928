//! リテラルの検査
//!
//! トークン列にはリテラルの字句をそのまま残すため、ここでは値への変換はせず
//! エスケープシーケンスの妥当性と終端だけを確認する。

use logos::Lexer as LogosLexer;

use super::token::TokenKind;
use crate::error::LexErrorKind;

/// 文字列・文字リテラルのエスケープシーケンスを検査
pub(super) fn validate_escapes(lex: &mut LogosLexer<TokenKind>) -> Result<(), LexErrorKind> {
    match find_invalid_escape(lex.slice()) {
        Some((at, sequence)) => Err(LexErrorKind::InvalidEscape { sequence, at }),
        None => Ok(()),
    }
}

/// 閉じ引用符のないリテラル
pub(super) fn unterminated_literal(lex: &mut LogosLexer<TokenKind>) -> Result<(), LexErrorKind> {
    if lex.slice().trim_start_matches(['L', 'u', '8']).starts_with('\'') {
        Err(LexErrorKind::UnterminatedChar)
    } else {
        Err(LexErrorKind::UnterminatedString)
    }
}

/// ブロックコメントを読み進める
pub(super) fn block_comment(lex: &mut LogosLexer<TokenKind>) -> Result<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            // 未完了のコメントは入力の末尾まで飲み込む
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedComment)
        }
    }
}

/// 最初の不正なエスケープシーケンスの位置と字句を返す
pub fn find_invalid_escape(literal: &str) -> Option<(usize, String)> {
    let bytes = literal.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let start = i;
        let Some(&next) = bytes.get(i + 1) else {
            return Some((start, "\\".to_string()));
        };
        i += 2;
        match next {
            b'n' | b't' | b'r' | b'v' | b'b' | b'f' | b'a' | b'\\' | b'\'' | b'"' | b'?' => {}
            b'0'..=b'7' => {
                // 8進数は最大3桁
                let mut digits = 1;
                while digits < 3 && matches!(bytes.get(i), Some(b'0'..=b'7')) {
                    i += 1;
                    digits += 1;
                }
            }
            b'x' => {
                let hex = count_hex(&bytes[i..], usize::MAX);
                if hex == 0 {
                    return Some((start, "\\x".to_string()));
                }
                i += hex;
            }
            b'u' | b'U' => {
                let width = if next == b'u' { 4 } else { 8 };
                let hex = count_hex(&bytes[i..], width);
                if hex != width {
                    return Some((start, literal[start..i + hex].to_string()));
                }
                i += hex;
            }
            _ => {
                let end = literal[start + 1..]
                    .chars()
                    .next()
                    .map(|c| start + 1 + c.len_utf8())
                    .unwrap_or(start + 1);
                return Some((start, literal[start..end].to_string()));
            }
        }
    }

    None
}

fn count_hex(bytes: &[u8], limit: usize) -> usize {
    bytes
        .iter()
        .take(limit)
        .take_while(|b| b.is_ascii_hexdigit())
        .count()
}
