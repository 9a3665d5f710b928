//! 式の解析モジュール
//!
//! 二項演算子の優先順位処理は `expr_parser` にあり、ここでは単項・後置・一次式と
//! キャストや初期化子のような複合的な式を種類ごとのサブモジュールに分けて扱う。

mod complex_expr;
mod literal_expr;
mod postfix_expr;
mod unary_expr;
