//! OpenCL C Parser Library
//!
//! This library parses OpenCL C kernel source into a concrete syntax tree with
//! tree-sitter-style node kinds, and reports lexical and syntactic diagnostics
//! without stopping at the first error.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use ast::{node_kind_catalog, NodeKind, NodeKindInfo, Span, SyntaxElement, SyntaxNode, Tree};
pub use error::{Diagnostic, DiagnosticKind, LexError, LexErrorKind, ParseError};
pub use lexer::{Lexer, Token, TokenClass, TokenKind};
pub use parser::{parse, ParseResult, Parser};
