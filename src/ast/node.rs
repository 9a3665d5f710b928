//! 構文木のノードと木全体

use indexmap::IndexMap;
use serde::Serialize;

use super::{NodeKind, Qualifier, QualifierSet, Span};
use crate::lexer::{LineIndex, Position, Token};

/// 子要素（ノードまたは葉のトークン）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(Token),
}

impl SyntaxElement {
    pub fn span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.span,
            SyntaxElement::Token(token) => token.span,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }

    fn collect_leaves(&self, out: &mut Vec<Token>) {
        match self {
            SyntaxElement::Node(node) => node.collect_leaves(out),
            SyntaxElement::Token(token) => out.push(*token),
        }
    }
}

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        SyntaxElement::Node(node)
    }
}

impl From<Token> for SyntaxElement {
    fn from(token: Token) -> Self {
        SyntaxElement::Token(token)
    }
}

/// 構文木のノード
///
/// 構築後は変更されない。フィールドは名前から子要素のインデックスへの対応で、
/// 複数の宣言子を持つ宣言のように同じ名前が複数の子を指すこともある。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    pub(crate) kind: NodeKind,
    pub(crate) span: Span,
    pub(crate) children: Vec<SyntaxElement>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub(crate) fields: IndexMap<&'static str, Vec<usize>>,
}

impl SyntaxNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[SyntaxElement] {
        &self.children
    }

    /// 子ノードのみ
    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    /// 直下のトークンのみ
    pub fn child_tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(SyntaxElement::as_token)
    }

    pub fn is_error(&self) -> bool {
        self.kind == NodeKind::Error
    }

    /// 名前付きフィールドの最初の要素
    pub fn field(&self, name: &str) -> Option<&SyntaxElement> {
        self.fields_named(name).next()
    }

    /// 名前付きフィールドのすべての要素
    pub fn fields_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a SyntaxElement> + 'a {
        self.fields
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(move |&index| self.children.get(index))
    }

    pub fn field_node(&self, name: &str) -> Option<&SyntaxNode> {
        self.field(name).and_then(SyntaxElement::as_node)
    }

    pub fn field_token(&self, name: &str) -> Option<&Token> {
        self.field(name).and_then(SyntaxElement::as_token)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// 子要素のインデックスに付いたフィールド名
    fn field_name_of(&self, index: usize) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(_, indices)| indices.contains(&index))
            .map(|(name, _)| *name)
    }

    /// 葉のトークン（出現順）
    pub fn leaves(&self) -> Vec<Token> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<Token>) {
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// 自身を含むすべての子孫ノード（先行順）
    pub fn descendants(&self) -> Vec<&SyntaxNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut children: Vec<_> = node.child_nodes().collect();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    pub fn find(&self, kind: NodeKind) -> Option<&SyntaxNode> {
        self.descendants().into_iter().find(|node| node.kind == kind)
    }

    pub fn find_all(&self, kind: NodeKind) -> Vec<&SyntaxNode> {
        self.descendants()
            .into_iter()
            .filter(|node| node.kind == kind)
            .collect()
    }

    pub fn has_error(&self) -> bool {
        self.descendants().iter().any(|node| node.is_error())
    }

    /// ソース上のテキスト
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }

    /// 直下の修飾子ノードから修飾子集合を再計算する
    ///
    /// `ERROR` ノードに包まれた重複修飾子は含まれない。
    pub fn qualifier_set(&self) -> QualifierSet {
        let mut set = QualifierSet::new();
        for node in self.child_nodes().filter(|node| node.kind.is_qualifier()) {
            let qualifier = node
                .child_tokens()
                .next()
                .and_then(|token| Qualifier::from_token(token.kind).map(|q| (q, token.span)));
            if let Some((qualifier, span)) = qualifier {
                let _ = set.insert(qualifier, span);
            }
        }
        set
    }

    /// tree-sitter形式のS式（名前付きノードのみ）
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.kind.name());
        for (index, child) in self.children.iter().enumerate() {
            let SyntaxElement::Node(node) = child else {
                continue;
            };
            out.push(' ');
            if let Some(name) = self.field_name_of(index) {
                out.push_str(name);
                out.push_str(": ");
            }
            node.write_sexp(out);
        }
        out.push(')');
    }
}

/// 解析結果の構文木
#[derive(Debug, Clone, Serialize)]
pub struct Tree {
    source: String,
    root: SyntaxNode,
    #[serde(skip)]
    lines: LineIndex,
}

impl Tree {
    pub fn new(source: &str, root: SyntaxNode) -> Self {
        Self {
            source: source.to_string(),
            lines: LineIndex::new(source),
            root,
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// トップレベルの項目
    pub fn items(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.root.child_nodes()
    }

    pub fn node_text(&self, node: &SyntaxNode) -> &str {
        node.text(&self.source)
    }

    pub fn text(&self, span: Span) -> &str {
        &self.source[span.start..span.end]
    }

    pub fn position(&self, offset: usize) -> Position {
        self.lines.position(&self.source, offset)
    }

    pub fn has_error(&self) -> bool {
        self.root.has_error()
    }

    pub fn to_sexp(&self) -> String {
        self.root.to_sexp()
    }
}
