//! Concrete syntax tree definitions for OpenCL C.
//!
//! The tree is generic: every node carries a [`NodeKind`] tag, its children in
//! source order, and a map from field names to child indices. Leaves are the
//! tokens themselves, so concatenating the leaves of any node reproduces its
//! source span without whitespace and comments.

mod builder;
pub mod builtins;
mod kinds;
mod node;
mod qualifiers;

use serde::{Deserialize, Serialize};

pub(crate) use builder::NodeBuilder;
pub use builtins::{builtin_category, BuiltinCategory};
pub use kinds::{node_kind_catalog, NodeKind, NodeKindInfo};
pub use node::{SyntaxElement, SyntaxNode, Tree};
pub use qualifiers::{
    resolve_alias, Qualifier, QualifierCategory, QualifierEntry, QualifierSet, QUALIFIER_ALIASES,
};

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
