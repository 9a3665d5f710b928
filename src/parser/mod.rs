//! パーサーモジュール
//!
//! トークン列を具象構文木（[`Tree`]）に解析する。再帰下降で宣言・文を読み、
//! 二項演算子は [`precedence`] の表に従う優先順位法で読む。
//!
//! ## 字句モードとの連携
//!
//! スウィズル（`v.xyz`）と構造体メンバー（`s.count`）は後置位置でしか区別できないので、
//! 後置式のループでだけレキサーを `Postfix` モードにしてトークンを覗く。
//! 先読みを巻き戻すと、モードが食い違ったトークンは読み直される。
//!
//! ## エラー回復
//!
//! 解析に失敗した項目はERRORノードになり、同期点（行頭の宣言や文、`;`、`}`、
//! プリプロセッサ行）から解析を再開する。1つの誤りが後続の項目を巻き込むことはない。

mod cursor;
mod decl_parser;
mod declarator_parser;
mod expr;
mod expr_parser;
mod parser_impl;
mod pragma_parser;
pub mod precedence;
mod scope;
mod stmt_parser;
mod type_parser;

// 公開API
pub use parser_impl::Parser;
pub use precedence::{Associativity, Fixity, Precedence, PrecedenceEntry, PRECEDENCE_TABLE};

use crate::ast::Tree;
use crate::error::{Diagnostic, ParseError};

pub type ParseResult<T> = Result<T, ParseError>;

/// ソースを解析して構文木と診断を返す
pub fn parse(source: &str) -> (Tree, Vec<Diagnostic>) {
    Parser::new(source).parse()
}
