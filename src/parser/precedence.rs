//! 演算子の優先順位表

use serde::Serialize;

use crate::lexer::TokenKind;

/// 優先順位（低い順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Precedence {
    Comma,
    Assignment,
    Conditional,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Cast,
    Unary,
    Postfix,
}

impl Precedence {
    /// 一段階高い優先順位
    pub fn next(self) -> Precedence {
        use Precedence::*;
        match self {
            Comma => Assignment,
            Assignment => Conditional,
            Conditional => LogicalOr,
            LogicalOr => LogicalAnd,
            LogicalAnd => BitwiseOr,
            BitwiseOr => BitwiseXor,
            BitwiseXor => BitwiseAnd,
            BitwiseAnd => Equality,
            Equality => Relational,
            Relational => Shift,
            Shift => Additive,
            Additive => Multiplicative,
            Multiplicative => Cast,
            Cast => Unary,
            Unary | Postfix => Postfix,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Fixity {
    Prefix,
    Infix,
    Postfix,
}

/// 優先順位表の1項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrecedenceEntry {
    pub operator: TokenKind,
    pub lexeme: &'static str,
    pub level: Precedence,
    pub associativity: Associativity,
    pub fixity: Fixity,
}

const fn entry(
    operator: TokenKind,
    lexeme: &'static str,
    level: Precedence,
    associativity: Associativity,
    fixity: Fixity,
) -> PrecedenceEntry {
    PrecedenceEntry {
        operator,
        lexeme,
        level,
        associativity,
        fixity,
    }
}

const fn infix(operator: TokenKind, lexeme: &'static str, level: Precedence) -> PrecedenceEntry {
    entry(operator, lexeme, level, Associativity::Left, Fixity::Infix)
}

const fn infix_right(operator: TokenKind, lexeme: &'static str, level: Precedence) -> PrecedenceEntry {
    entry(operator, lexeme, level, Associativity::Right, Fixity::Infix)
}

const fn prefix(operator: TokenKind, lexeme: &'static str) -> PrecedenceEntry {
    entry(operator, lexeme, Precedence::Unary, Associativity::Right, Fixity::Prefix)
}

const fn postfix(operator: TokenKind, lexeme: &'static str) -> PrecedenceEntry {
    entry(operator, lexeme, Precedence::Postfix, Associativity::Left, Fixity::Postfix)
}

pub static PRECEDENCE_TABLE: &[PrecedenceEntry] = &[
    infix(TokenKind::Comma, ",", Precedence::Comma),
    infix_right(TokenKind::Assign, "=", Precedence::Assignment),
    infix_right(TokenKind::PlusAssign, "+=", Precedence::Assignment),
    infix_right(TokenKind::MinusAssign, "-=", Precedence::Assignment),
    infix_right(TokenKind::StarAssign, "*=", Precedence::Assignment),
    infix_right(TokenKind::SlashAssign, "/=", Precedence::Assignment),
    infix_right(TokenKind::PercentAssign, "%=", Precedence::Assignment),
    infix_right(TokenKind::AmpersandAssign, "&=", Precedence::Assignment),
    infix_right(TokenKind::PipeAssign, "|=", Precedence::Assignment),
    infix_right(TokenKind::CaretAssign, "^=", Precedence::Assignment),
    infix_right(TokenKind::LtLtAssign, "<<=", Precedence::Assignment),
    infix_right(TokenKind::GtGtAssign, ">>=", Precedence::Assignment),
    infix_right(TokenKind::Question, "?", Precedence::Conditional),
    infix(TokenKind::OrOr, "||", Precedence::LogicalOr),
    infix(TokenKind::AndAnd, "&&", Precedence::LogicalAnd),
    infix(TokenKind::Or, "|", Precedence::BitwiseOr),
    infix(TokenKind::Caret, "^", Precedence::BitwiseXor),
    infix(TokenKind::Ampersand, "&", Precedence::BitwiseAnd),
    infix(TokenKind::EqEq, "==", Precedence::Equality),
    infix(TokenKind::NotEq, "!=", Precedence::Equality),
    infix(TokenKind::Lt, "<", Precedence::Relational),
    infix(TokenKind::Gt, ">", Precedence::Relational),
    infix(TokenKind::LtEq, "<=", Precedence::Relational),
    infix(TokenKind::GtEq, ">=", Precedence::Relational),
    infix(TokenKind::LtLt, "<<", Precedence::Shift),
    infix(TokenKind::GtGt, ">>", Precedence::Shift),
    infix(TokenKind::Plus, "+", Precedence::Additive),
    infix(TokenKind::Minus, "-", Precedence::Additive),
    infix(TokenKind::Star, "*", Precedence::Multiplicative),
    infix(TokenKind::Slash, "/", Precedence::Multiplicative),
    infix(TokenKind::Percent, "%", Precedence::Multiplicative),
    entry(TokenKind::LeftParen, "(type)", Precedence::Cast, Associativity::Right, Fixity::Prefix),
    prefix(TokenKind::Plus, "+"),
    prefix(TokenKind::Minus, "-"),
    prefix(TokenKind::Bang, "!"),
    prefix(TokenKind::Tilde, "~"),
    prefix(TokenKind::Star, "*"),
    prefix(TokenKind::Ampersand, "&"),
    prefix(TokenKind::PlusPlus, "++"),
    prefix(TokenKind::MinusMinus, "--"),
    prefix(TokenKind::Sizeof, "sizeof"),
    prefix(TokenKind::Alignof, "_Alignof"),
    prefix(TokenKind::VecStep, "vec_step"),
    postfix(TokenKind::PlusPlus, "++"),
    postfix(TokenKind::MinusMinus, "--"),
    postfix(TokenKind::LeftParen, "()"),
    postfix(TokenKind::LeftBracket, "[]"),
    postfix(TokenKind::Dot, "."),
    postfix(TokenKind::Arrow, "->"),
    postfix(TokenKind::SwizzleAccessor, ".xyzw"),
];

fn lookup(kind: TokenKind, fixity: Fixity) -> Option<&'static PrecedenceEntry> {
    PRECEDENCE_TABLE
        .iter()
        .find(|entry| entry.operator == kind && entry.fixity == fixity)
}

/// 二項（中置）演算子の項目
pub fn infix_entry(kind: TokenKind) -> Option<&'static PrecedenceEntry> {
    lookup(kind, Fixity::Infix)
}

pub fn prefix_entry(kind: TokenKind) -> Option<&'static PrecedenceEntry> {
    lookup(kind, Fixity::Prefix)
}

pub fn postfix_entry(kind: TokenKind) -> Option<&'static PrecedenceEntry> {
    lookup(kind, Fixity::Postfix)
}
