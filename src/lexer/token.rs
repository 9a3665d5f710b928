//! トークン定義

use logos::Logos;
use serde::Serialize;
use std::fmt;

use super::literal_parser::{block_comment, unterminated_literal, validate_escapes};
use crate::ast::Span;
use crate::error::LexErrorKind;

/// OpenCL Cのトークン型
///
/// アンダースコア付きの綴りと素の綴り（`__global` と `global` など）は
/// 同じバリアントに正規化される。元の綴りはスパンから取得できる。
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f\v]+")] // 空白文字をスキップ
#[logos(skip r"\\\r?\n")] // 行継続
pub enum TokenKind {
    // 記憶域クラス
    #[token("typedef")]
    Typedef,
    #[token("extern")]
    Extern,
    #[token("static")]
    Static,
    #[token("auto")]
    Auto,
    #[token("register")]
    Register,

    // 型修飾子
    #[token("const")]
    #[token("__const")]
    Const,
    #[token("volatile")]
    #[token("__volatile")]
    Volatile,
    #[token("restrict")]
    #[token("__restrict")]
    Restrict,
    #[token("inline")]
    #[token("__inline")]
    Inline,

    // アドレス空間修飾子
    #[token("__global")]
    #[token("global")]
    Global,
    #[token("__local")]
    #[token("local")]
    Local,
    #[token("__private")]
    #[token("private")]
    Private,
    #[token("__constant")]
    #[token("constant")]
    Constant,
    #[token("__generic")]
    #[token("generic")]
    Generic,

    // アクセス修飾子
    #[token("__read_only")]
    #[token("read_only")]
    ReadOnly,
    #[token("__write_only")]
    #[token("write_only")]
    WriteOnly,
    #[token("__read_write")]
    #[token("read_write")]
    ReadWrite,

    // カーネル修飾子
    #[token("__kernel")]
    #[token("kernel")]
    Kernel,

    #[token("__attribute__")]
    #[token("__attribute")]
    Attribute,

    // 基本型
    #[token("void")]
    Void,
    #[token("char")]
    Char,
    #[token("short")]
    Short,
    #[token("int")]
    Int,
    #[token("long")]
    Long,
    #[token("float")]
    Float,
    #[token("double")]
    Double,
    #[token("signed")]
    Signed,
    #[token("unsigned")]
    Unsigned,
    #[token("bool")]
    #[token("_Bool")]
    #[token("uchar")]
    #[token("ushort")]
    #[token("uint")]
    #[token("ulong")]
    #[token("half")]
    #[token("size_t")]
    #[token("ptrdiff_t")]
    #[token("intptr_t")]
    #[token("uintptr_t")]
    ScalarType,

    // ベクトル型（基本型の直後に要素数が続く単一トークン）
    #[regex(
        r"(char|uchar|short|ushort|int|uint|long|ulong|float|double|half|bool)(2|3|4|8|16)",
        priority = 5
    )]
    VectorType,

    // イメージ・サンプラー・パイプ型
    #[token("image1d_t")]
    #[token("image1d_array_t")]
    #[token("image1d_buffer_t")]
    #[token("image2d_t")]
    #[token("image2d_array_t")]
    #[token("image2d_depth_t")]
    #[token("image2d_array_depth_t")]
    #[token("image3d_t")]
    ImageType,
    #[token("sampler_t")]
    SamplerType,
    #[token("event_t")]
    #[token("queue_t")]
    #[token("clk_event_t")]
    #[token("reserve_id_t")]
    #[token("ndrange_t")]
    OpaqueType,
    #[token("pipe")]
    Pipe,

    // 複合型
    #[token("struct")]
    Struct,
    #[token("union")]
    Union,
    #[token("enum")]
    Enum,

    // 制御構文
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("for")]
    For,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("goto")]
    Goto,

    // 組み込み演算子
    #[token("sizeof")]
    Sizeof,
    #[token("_Alignof")]
    #[token("__alignof__")]
    Alignof,
    #[token("vec_step")]
    VecStep,

    // 識別子（キーワードの後に来る必要がある）
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", priority = 1)]
    Identifier,

    // 数値リテラル
    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*")]
    #[regex(r"0[xX]([0-9a-fA-F]+\.?[0-9a-fA-F]*|\.[0-9a-fA-F]+)[pP][+-]?[0-9]+[fFhHlL]?")]
    #[regex(r"[0-9]+[uUlL]*")]
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?[fFhHlL]?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?[fFhHlL]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFhHlL]?")]
    NumberLiteral,

    // 文字列・文字リテラル
    #[regex(r#"(L|u8)?"([^"\\\n]|\\.)*""#, validate_escapes)]
    #[regex(r#"(L|u8)?"([^"\\\n]|\\.)*"#, unterminated_literal)]
    StringLiteral,
    #[regex(r"L?'([^'\\\n]|\\.)+'", validate_escapes)]
    #[regex(r"L?'([^'\\\n]|\\.)*", unterminated_literal)]
    CharLiteral,

    // プリプロセッサ
    #[regex(r"#[ \t]*pragma", priority = 10)]
    Pragma,
    #[regex(r"#[ \t]*[a-zA-Z_]+", priority = 5)]
    Directive,
    #[token("#")]
    Hash,
    #[token("##")]
    HashHash,

    // 演算子
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Or,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("&=")]
    AmpersandAssign,
    #[token("|=")]
    PipeAssign,
    #[token("^=")]
    CaretAssign,
    #[token("<<=")]
    LtLtAssign,
    #[token(">>=")]
    GtGtAssign,
    #[token("?")]
    Question,

    // デリミタ
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("->")]
    Arrow,
    #[token("...")]
    Ellipsis,

    // コメント（レキサーラッパーで読み飛ばす）
    #[regex(r"//[^\n]*")]
    #[token("/*", block_comment)]
    Comment,

    // 後置モードでのみラッパーが生成する（`.xyz`、`.s01`）
    SwizzleAccessor,
}

/// トークンの大分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenClass {
    Identifier,
    Keyword,
    Punctuation,
    NumberLiteral,
    StringLiteral,
    Comment,
    PragmaMarker,
    SwizzleAccessor,
}

impl TokenKind {
    /// 大分類を取得
    pub fn class(self) -> TokenClass {
        use TokenKind::*;
        match self {
            Identifier => TokenClass::Identifier,
            NumberLiteral => TokenClass::NumberLiteral,
            StringLiteral | CharLiteral => TokenClass::StringLiteral,
            Comment => TokenClass::Comment,
            Pragma | Directive => TokenClass::PragmaMarker,
            SwizzleAccessor => TokenClass::SwizzleAccessor,
            kind if kind.is_keyword() => TokenClass::Keyword,
            _ => TokenClass::Punctuation,
        }
    }

    /// キーワードかどうか
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Typedef
                | Extern
                | Static
                | Auto
                | Register
                | Const
                | Volatile
                | Restrict
                | Inline
                | Global
                | Local
                | Private
                | Constant
                | Generic
                | ReadOnly
                | WriteOnly
                | ReadWrite
                | Kernel
                | Attribute
                | Void
                | Char
                | Short
                | Int
                | Long
                | Float
                | Double
                | Signed
                | Unsigned
                | ScalarType
                | VectorType
                | ImageType
                | SamplerType
                | OpaqueType
                | Pipe
                | Struct
                | Union
                | Enum
                | If
                | Else
                | While
                | Do
                | For
                | Switch
                | Case
                | Default
                | Break
                | Continue
                | Return
                | Goto
                | Sizeof
                | Alignof
                | VecStep
        )
    }

    /// 字句モードによって字句化の結果が変わり得るトークン
    pub fn is_mode_sensitive(self) -> bool {
        matches!(self, TokenKind::Dot | TokenKind::SwizzleAccessor)
    }

    /// エラーメッセージ用の表記
    pub fn describe(self) -> &'static str {
        use TokenKind::*;
        match self {
            Typedef => "`typedef`",
            Extern => "`extern`",
            Static => "`static`",
            Auto => "`auto`",
            Register => "`register`",
            Const => "`const`",
            Volatile => "`volatile`",
            Restrict => "`restrict`",
            Inline => "`inline`",
            Global => "`__global`",
            Local => "`__local`",
            Private => "`__private`",
            Constant => "`__constant`",
            Generic => "`__generic`",
            ReadOnly => "`__read_only`",
            WriteOnly => "`__write_only`",
            ReadWrite => "`__read_write`",
            Kernel => "`__kernel`",
            Attribute => "`__attribute__`",
            Void => "`void`",
            Char => "`char`",
            Short => "`short`",
            Int => "`int`",
            Long => "`long`",
            Float => "`float`",
            Double => "`double`",
            Signed => "`signed`",
            Unsigned => "`unsigned`",
            ScalarType => "scalar type",
            VectorType => "vector type",
            ImageType => "image type",
            SamplerType => "`sampler_t`",
            OpaqueType => "opaque type",
            Pipe => "`pipe`",
            Struct => "`struct`",
            Union => "`union`",
            Enum => "`enum`",
            If => "`if`",
            Else => "`else`",
            While => "`while`",
            Do => "`do`",
            For => "`for`",
            Switch => "`switch`",
            Case => "`case`",
            Default => "`default`",
            Break => "`break`",
            Continue => "`continue`",
            Return => "`return`",
            Goto => "`goto`",
            Sizeof => "`sizeof`",
            Alignof => "`_Alignof`",
            VecStep => "`vec_step`",
            Identifier => "identifier",
            NumberLiteral => "number literal",
            StringLiteral => "string literal",
            CharLiteral => "character literal",
            Pragma => "`#pragma`",
            Directive => "preprocessor directive",
            Hash => "`#`",
            HashHash => "`##`",
            Plus => "`+`",
            Minus => "`-`",
            Star => "`*`",
            Slash => "`/`",
            Percent => "`%`",
            PlusPlus => "`++`",
            MinusMinus => "`--`",
            EqEq => "`==`",
            NotEq => "`!=`",
            Lt => "`<`",
            Gt => "`>`",
            LtEq => "`<=`",
            GtEq => "`>=`",
            AndAnd => "`&&`",
            OrOr => "`||`",
            Bang => "`!`",
            Ampersand => "`&`",
            Or => "`|`",
            Caret => "`^`",
            Tilde => "`~`",
            LtLt => "`<<`",
            GtGt => "`>>`",
            Assign => "`=`",
            PlusAssign => "`+=`",
            MinusAssign => "`-=`",
            StarAssign => "`*=`",
            SlashAssign => "`/=`",
            PercentAssign => "`%=`",
            AmpersandAssign => "`&=`",
            PipeAssign => "`|=`",
            CaretAssign => "`^=`",
            LtLtAssign => "`<<=`",
            GtGtAssign => "`>>=`",
            Question => "`?`",
            LeftParen => "`(`",
            RightParen => "`)`",
            LeftBracket => "`[`",
            RightBracket => "`]`",
            LeftBrace => "`{`",
            RightBrace => "`}`",
            Comma => "`,`",
            Semicolon => "`;`",
            Colon => "`:`",
            Dot => "`.`",
            Arrow => "`->`",
            Ellipsis => "`...`",
            Comment => "comment",
            SwizzleAccessor => "swizzle accessor",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// 位置情報付きトークン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 直前の読み飛ばし区間に改行が含まれていたか
    #[serde(skip)]
    pub newline_before: bool,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            newline_before: false,
        }
    }

    /// ソースからトークンの字句を取り出す
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }
}
