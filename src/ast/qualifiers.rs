//! 修飾子の正規化とカテゴリ管理

use serde::Serialize;
use std::fmt;

use super::{NodeKind, Span};
use crate::lexer::TokenKind;

/// 別名を正規化した修飾子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Qualifier {
    Typedef,
    Extern,
    Static,
    Auto,
    Register,
    Const,
    Volatile,
    Restrict,
    Inline,
    Global,
    Local,
    Private,
    Constant,
    Generic,
    ReadOnly,
    WriteOnly,
    ReadWrite,
    Kernel,
}

/// 修飾子のカテゴリ。同じカテゴリの修飾子は一つの宣言に一度しか現れない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QualifierCategory {
    StorageClass,
    Const,
    Volatile,
    Restrict,
    Inline,
    AddressSpace,
    Access,
    Kernel,
}

impl fmt::Display for QualifierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QualifierCategory::StorageClass => "storage class",
            QualifierCategory::Const => "const",
            QualifierCategory::Volatile => "volatile",
            QualifierCategory::Restrict => "restrict",
            QualifierCategory::Inline => "inline",
            QualifierCategory::AddressSpace => "address space",
            QualifierCategory::Access => "access",
            QualifierCategory::Kernel => "kernel",
        };
        f.write_str(name)
    }
}

/// 綴りから正規化後の修飾子への対応表
pub static QUALIFIER_ALIASES: &[(&str, Qualifier)] = &[
    ("typedef", Qualifier::Typedef),
    ("extern", Qualifier::Extern),
    ("static", Qualifier::Static),
    ("auto", Qualifier::Auto),
    ("register", Qualifier::Register),
    ("const", Qualifier::Const),
    ("__const", Qualifier::Const),
    ("volatile", Qualifier::Volatile),
    ("__volatile", Qualifier::Volatile),
    ("restrict", Qualifier::Restrict),
    ("__restrict", Qualifier::Restrict),
    ("inline", Qualifier::Inline),
    ("__inline", Qualifier::Inline),
    ("__global", Qualifier::Global),
    ("global", Qualifier::Global),
    ("__local", Qualifier::Local),
    ("local", Qualifier::Local),
    ("__private", Qualifier::Private),
    ("private", Qualifier::Private),
    ("__constant", Qualifier::Constant),
    ("constant", Qualifier::Constant),
    ("__generic", Qualifier::Generic),
    ("generic", Qualifier::Generic),
    ("__read_only", Qualifier::ReadOnly),
    ("read_only", Qualifier::ReadOnly),
    ("__write_only", Qualifier::WriteOnly),
    ("write_only", Qualifier::WriteOnly),
    ("__read_write", Qualifier::ReadWrite),
    ("read_write", Qualifier::ReadWrite),
    ("__kernel", Qualifier::Kernel),
    ("kernel", Qualifier::Kernel),
];

/// 綴りを正規化する
pub fn resolve_alias(spelling: &str) -> Option<Qualifier> {
    QUALIFIER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == spelling)
        .map(|(_, qualifier)| *qualifier)
}

impl Qualifier {
    pub fn from_token(kind: TokenKind) -> Option<Qualifier> {
        let qualifier = match kind {
            TokenKind::Typedef => Qualifier::Typedef,
            TokenKind::Extern => Qualifier::Extern,
            TokenKind::Static => Qualifier::Static,
            TokenKind::Auto => Qualifier::Auto,
            TokenKind::Register => Qualifier::Register,
            TokenKind::Const => Qualifier::Const,
            TokenKind::Volatile => Qualifier::Volatile,
            TokenKind::Restrict => Qualifier::Restrict,
            TokenKind::Inline => Qualifier::Inline,
            TokenKind::Global => Qualifier::Global,
            TokenKind::Local => Qualifier::Local,
            TokenKind::Private => Qualifier::Private,
            TokenKind::Constant => Qualifier::Constant,
            TokenKind::Generic => Qualifier::Generic,
            TokenKind::ReadOnly => Qualifier::ReadOnly,
            TokenKind::WriteOnly => Qualifier::WriteOnly,
            TokenKind::ReadWrite => Qualifier::ReadWrite,
            TokenKind::Kernel => Qualifier::Kernel,
            _ => return None,
        };
        Some(qualifier)
    }

    pub fn category(self) -> QualifierCategory {
        match self {
            Qualifier::Typedef
            | Qualifier::Extern
            | Qualifier::Static
            | Qualifier::Auto
            | Qualifier::Register => QualifierCategory::StorageClass,
            Qualifier::Const => QualifierCategory::Const,
            Qualifier::Volatile => QualifierCategory::Volatile,
            Qualifier::Restrict => QualifierCategory::Restrict,
            Qualifier::Inline => QualifierCategory::Inline,
            Qualifier::Global
            | Qualifier::Local
            | Qualifier::Private
            | Qualifier::Constant
            | Qualifier::Generic => QualifierCategory::AddressSpace,
            Qualifier::ReadOnly | Qualifier::WriteOnly | Qualifier::ReadWrite => {
                QualifierCategory::Access
            }
            Qualifier::Kernel => QualifierCategory::Kernel,
        }
    }

    /// 構文木上のノード種別
    pub fn node_kind(self) -> NodeKind {
        match self.category() {
            QualifierCategory::StorageClass => NodeKind::StorageClassSpecifier,
            QualifierCategory::Const | QualifierCategory::Volatile | QualifierCategory::Restrict => {
                NodeKind::TypeQualifier
            }
            QualifierCategory::Inline => NodeKind::FunctionSpecifier,
            QualifierCategory::AddressSpace => NodeKind::AddressSpaceQualifier,
            QualifierCategory::Access => NodeKind::AccessQualifier,
            QualifierCategory::Kernel => NodeKind::KernelQualifier,
        }
    }

    /// ポインタ宣言子の `*` の後に置ける修飾子か
    pub fn is_pointer_qualifier(self) -> bool {
        matches!(
            self.category(),
            QualifierCategory::Const
                | QualifierCategory::Volatile
                | QualifierCategory::Restrict
                | QualifierCategory::AddressSpace
        )
    }
}

/// 修飾子とその出現位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualifierEntry {
    pub qualifier: Qualifier,
    pub span: Span,
}

/// 宣言に付いた修飾子の集合（出現順）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualifierSet {
    entries: Vec<QualifierEntry>,
}

impl QualifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 修飾子を追加する
    ///
    /// 同じカテゴリが既にある場合は追加せず、先に現れた項目を返す。
    pub fn insert(&mut self, qualifier: Qualifier, span: Span) -> Result<(), QualifierEntry> {
        if let Some(existing) = self.get(qualifier.category()) {
            return Err(existing);
        }
        self.entries.push(QualifierEntry { qualifier, span });
        Ok(())
    }

    pub fn get(&self, category: QualifierCategory) -> Option<QualifierEntry> {
        self.entries
            .iter()
            .find(|entry| entry.qualifier.category() == category)
            .copied()
    }

    pub fn contains(&self, qualifier: Qualifier) -> bool {
        self.entries.iter().any(|entry| entry.qualifier == qualifier)
    }

    pub fn address_space(&self) -> Option<Qualifier> {
        self.get(QualifierCategory::AddressSpace).map(|e| e.qualifier)
    }

    pub fn is_kernel(&self) -> bool {
        self.contains(Qualifier::Kernel)
    }

    pub fn is_typedef(&self) -> bool {
        self.contains(Qualifier::Typedef)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QualifierEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
