//! パーサーテストの共通モジュール
//!
//! パーサーテストで使用する共通のヘルパー関数を定義する。

use oclparse::{Diagnostic, DiagnosticKind, Tree};

/// ソースコードを解析して構文木と診断を取得するヘルパー関数
pub fn parse_source(source: &str) -> (Tree, Vec<Diagnostic>) {
    oclparse::parse(source)
}

/// 診断なしで解析できることを確認し、構文木を返す
pub fn assert_parse_success(source: &str) -> Tree {
    let (tree, diagnostics) = parse_source(source);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics for {:?}: {:?}",
        source,
        diagnostics
    );
    assert!(!tree.has_error(), "unexpected ERROR node: {}", tree.to_sexp());
    tree
}

/// 解析に成功した構文木のS式
pub fn sexp(source: &str) -> String {
    assert_parse_success(source).to_sexp()
}

/// 診断の種類の一覧
pub fn diagnostic_kinds(source: &str) -> Vec<DiagnosticKind> {
    parse_source(source).1.iter().map(|d| d.kind()).collect()
}

// サブモジュールの宣言
#[cfg(test)]
mod declaration_test;
#[cfg(test)]
mod error_test;
#[cfg(test)]
mod expression_test;
#[cfg(test)]
mod kernel_test;
#[cfg(test)]
mod pragma_test;
#[cfg(test)]
mod statement_test;
#[cfg(test)]
mod swizzle_test;
