//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、字句解析と構文解析で使用されるエラー型と、
//! 呼び出し側に返す診断情報を提供します。

use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label};
use serde::Serialize;
use thiserror::Error;

use crate::ast::{QualifierCategory, Span};
use crate::lexer::Position;

/// 字句エラーの種別
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum LexErrorKind {
    #[default]
    #[error("unrecognized character")]
    UnrecognizedCharacter,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated character literal")]
    UnterminatedChar,

    #[error("unterminated block comment")]
    UnterminatedComment,

    /// `at` はリテラル先頭からの相対オフセット
    #[error("invalid escape sequence '{sequence}'")]
    InvalidEscape { sequence: String, at: usize },
}

/// 字句エラー（問題のあるバイトオフセットを持つ）
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{kind} at byte {offset}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: usize,
    /// エラーになったトークンの字句
    pub lexeme: String,
}

impl LexError {
    pub fn new(kind: LexErrorKind, offset: usize, lexeme: &str) -> Self {
        Self {
            kind,
            offset,
            lexeme: lexeme.to_string(),
        }
    }

    pub fn span(&self) -> Span {
        let len = match &self.kind {
            LexErrorKind::InvalidEscape { sequence, .. } => sequence.len(),
            _ => self.lexeme.chars().next().map_or(0, char::len_utf8),
        };
        Span::new(self.offset, self.offset + len)
    }
}

/// 構文解析エラー
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseError {
    #[error("{0}")]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: String, span: Span },

    #[error("duplicate {category} qualifier")]
    DuplicateQualifier {
        category: QualifierCategory,
        first: Span,
        span: Span,
    },

    #[error("kernel `{name}` is declared without a body")]
    MissingBody { name: String, span: Span },

    /// キャストか括弧式かを先読みで決められなかった（内部でのみ使用）
    #[error("ambiguous cast")]
    AmbiguousCast { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::DuplicateQualifier { span, .. }
            | ParseError::MissingBody { span, .. }
            | ParseError::AmbiguousCast { span } => *span,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ParseError::Lex(_) => DiagnosticKind::Lex,
            ParseError::UnexpectedToken { .. } | ParseError::UnexpectedEof { .. } => {
                DiagnosticKind::UnexpectedToken
            }
            ParseError::DuplicateQualifier { .. } => DiagnosticKind::DuplicateQualifier,
            ParseError::MissingBody { .. } => DiagnosticKind::MissingBody,
            ParseError::AmbiguousCast { .. } => DiagnosticKind::AmbiguousCast,
        }
    }
}

/// 診断の種別タグ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    Lex,
    UnexpectedToken,
    DuplicateQualifier,
    MissingBody,
    AmbiguousCast,
}

/// 位置情報付きの診断
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub error: ParseError,
    pub position: Position,
}

impl Diagnostic {
    pub fn new(error: ParseError, position: Position) -> Self {
        Self { error, position }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.error.kind()
    }

    pub fn span(&self) -> Span {
        self.error.span()
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_codespan<FileId: Copy>(&self, file_id: FileId) -> CodespanDiagnostic<FileId> {
        let span = self.span();
        let primary = Label::primary(file_id, span.start..span.end);
        let labels = match &self.error {
            ParseError::Lex(_) => vec![primary.with_message("malformed token")],
            ParseError::UnexpectedToken { expected, .. } | ParseError::UnexpectedEof { expected, .. } => {
                vec![primary.with_message(format!("expected {}", expected))]
            }
            ParseError::DuplicateQualifier { first, .. } => vec![
                primary.with_message("this qualifier is ignored"),
                Label::secondary(file_id, first.start..first.end)
                    .with_message("first qualifier of this category"),
            ],
            ParseError::MissingBody { .. } => {
                vec![primary.with_message("kernel functions must have a body")]
            }
            ParseError::AmbiguousCast { .. } => vec![primary],
        };

        CodespanDiagnostic::error()
            .with_message(self.message())
            .with_labels(labels)
    }
}
