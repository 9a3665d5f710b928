//! ボトムアップのノード構築

use indexmap::IndexMap;

use super::{NodeKind, Span, SyntaxElement, SyntaxNode};
use crate::lexer::Token;

/// 子要素を出現順に積み上げて [`SyntaxNode`] を作る
#[derive(Debug)]
pub(crate) struct NodeBuilder {
    kind: NodeKind,
    children: Vec<SyntaxElement>,
    fields: IndexMap<&'static str, Vec<usize>>,
}

impl NodeBuilder {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            fields: IndexMap::new(),
        }
    }

    /// 種別を後から変更する（宣言から関数定義への昇格など）
    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    pub fn token(&mut self, token: Token) -> &mut Self {
        self.push(None, token.into())
    }

    pub fn node(&mut self, node: SyntaxNode) -> &mut Self {
        self.push(None, node.into())
    }

    pub fn element(&mut self, element: SyntaxElement) -> &mut Self {
        self.push(None, element)
    }

    pub fn field(&mut self, name: &'static str, node: SyntaxNode) -> &mut Self {
        self.push(Some(name), node.into())
    }

    pub fn field_token(&mut self, name: &'static str, token: Token) -> &mut Self {
        self.push(Some(name), token.into())
    }

    pub fn push(&mut self, field: Option<&'static str>, element: SyntaxElement) -> &mut Self {
        debug_assert!(
            field.map_or(true, |name| self.kind.has_field(name) || self.kind == NodeKind::Error),
            "{} has no field {:?}",
            self.kind,
            field
        );
        if let Some(name) = field {
            self.fields.entry(name).or_default().push(self.children.len());
        }
        self.children.push(element);
        self
    }

    pub fn extend(&mut self, elements: impl IntoIterator<Item = SyntaxElement>) -> &mut Self {
        for element in elements {
            self.push(None, element);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// 子要素のスパンからノードを作る
    pub fn finish(self) -> SyntaxNode {
        let span = match (self.children.first(), self.children.last()) {
            (Some(first), Some(last)) => first.span().to(last.span()),
            _ => Span::dummy(),
        };
        self.finish_with_span(span)
    }

    /// 子を持たないノード（空のソースファイルなど）のためにスパンを指定する
    pub fn finish_with_span(self, span: Span) -> SyntaxNode {
        SyntaxNode {
            kind: self.kind,
            span,
            children: self.children,
            fields: self.fields,
        }
    }
}
