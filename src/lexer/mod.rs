//! Lexical analysis module for OpenCL C.
//!
//! This module turns kernel source text into a lazy stream of classified tokens.
//! Keyword aliases (`__global`/`global`, `__kernel`/`kernel`, ...) collapse into one
//! token kind, vector type names such as `float4` are single tokens, and the swizzle
//! accessor `.xyz` is produced only while the parser has switched the lexer into
//! [`LexMode::Postfix`].

mod lexer;
mod literal_parser;
mod position;
pub mod swizzle;
mod token;

pub use lexer::{format_tokens, tokenize, LexMode, Lexer};
pub use literal_parser::find_invalid_escape;
pub use position::{LineIndex, Position};
pub use token::{Token, TokenClass, TokenKind};
