//! 宣言子（ポインタ、配列、関数、括弧）の解析

use crate::ast::{NodeBuilder, NodeKind, Qualifier, QualifierSet, SyntaxNode};
use crate::lexer::{Token, TokenKind};

use super::{ParseResult, Parser};

/// 宣言子に名前を要求するかどうか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DeclaratorMode {
    /// 変数・関数の宣言（名前が必須）
    Named,
    /// 構造体メンバー（名前は field_identifier）
    Field,
    /// 型名の中（名前を持たない）
    Abstract,
    /// 仮引数（名前は省略可能）
    Either,
}

impl DeclaratorMode {
    fn allows_name(self) -> bool {
        self != DeclaratorMode::Abstract
    }

    fn requires_name(self) -> bool {
        matches!(self, DeclaratorMode::Named | DeclaratorMode::Field)
    }
}

fn is_abstract(node: &SyntaxNode) -> bool {
    matches!(
        node.kind(),
        NodeKind::AbstractPointerDeclarator
            | NodeKind::AbstractParenthesizedDeclarator
            | NodeKind::AbstractArrayDeclarator
            | NodeKind::AbstractFunctionDeclarator
    )
}

/// 名前（識別子）を直接持つ宣言子
///
/// 括弧は透過する。`(*f)(int)` なら pointer_declarator、`f(int)` なら function_declarator。
fn name_holder(node: &SyntaxNode) -> Option<&SyntaxNode> {
    let mut holder = None;
    let mut current = node;
    loop {
        match current.kind() {
            NodeKind::Identifier | NodeKind::FieldIdentifier => return holder,
            NodeKind::ParenthesizedDeclarator => current = current.child_nodes().next()?,
            _ => {
                holder = Some(current);
                current = current.field_node("declarator")?;
            }
        }
    }
}

/// 宣言子が宣言する名前のトークン
pub(super) fn declarator_name(node: &SyntaxNode) -> Option<Token> {
    let mut current = node;
    loop {
        match current.kind() {
            NodeKind::Identifier | NodeKind::FieldIdentifier => {
                return current.child_tokens().next().copied()
            }
            NodeKind::ParenthesizedDeclarator => current = current.child_nodes().next()?,
            _ => current = current.field_node("declarator")?,
        }
    }
}

/// 関数を宣言しているか（関数ポインタは含まない）
pub(super) fn declares_function(node: &SyntaxNode) -> bool {
    name_holder(node).is_some_and(|holder| holder.kind() == NodeKind::FunctionDeclarator)
}

/// 関数宣言子の仮引数名
pub(super) fn parameter_names<'s>(node: &SyntaxNode, source: &'s str) -> Vec<&'s str> {
    let Some(parameters) = name_holder(node).and_then(|holder| holder.field_node("parameters"))
    else {
        return Vec::new();
    };
    parameters
        .child_nodes()
        .filter(|p| p.kind() == NodeKind::ParameterDeclaration)
        .filter_map(|p| p.field_node("declarator"))
        .filter_map(declarator_name)
        .map(|token| token.text(source))
        .collect()
}

impl<'a> Parser<'a> {
    pub(super) fn parse_required_declarator(&mut self, mode: DeclaratorMode) -> ParseResult<SyntaxNode> {
        match self.nested(|parser| parser.parse_declarator(mode))? {
            Some(declarator) => Ok(declarator),
            None => Err(self.error("declarator")),
        }
    }

    /// 宣言子を解析
    ///
    /// 抽象宣言子は空になり得るので `None` を返すことがある。
    pub(super) fn parse_declarator(&mut self, mode: DeclaratorMode) -> ParseResult<Option<SyntaxNode>> {
        let Some(star) = self.match_token(TokenKind::Star) else {
            return self.parse_direct_declarator(mode);
        };

        let mut builder = NodeBuilder::new(NodeKind::PointerDeclarator);
        builder.token(star);
        self.parse_pointer_qualifiers(&mut builder);

        match self.parse_declarator(mode)? {
            Some(inner) => {
                if is_abstract(&inner) {
                    builder.set_kind(NodeKind::AbstractPointerDeclarator);
                }
                builder.field("declarator", inner);
            }
            None if mode.requires_name() => return Err(self.error("identifier")),
            None => builder.set_kind(NodeKind::AbstractPointerDeclarator),
        }
        Ok(Some(builder.finish()))
    }

    /// `*` の後ろの `const` / `volatile` / `restrict`
    fn parse_pointer_qualifiers(&mut self, builder: &mut NodeBuilder) {
        let mut qualifiers = QualifierSet::new();
        while let Some(token) = self.current() {
            match Qualifier::from_token(token.kind) {
                Some(qualifier) if qualifier.is_pointer_qualifier() => {
                    self.advance();
                    let element = self.qualifier_element(qualifier, token, &mut qualifiers);
                    builder.element(element);
                }
                _ => break,
            }
        }
    }

    /// `(` が入れ子の宣言子を開くか（そうでなければ仮引数リスト）
    fn paren_opens_declarator(&mut self, mode: DeclaratorMode) -> bool {
        match mode {
            DeclaratorMode::Named | DeclaratorMode::Field => true,
            DeclaratorMode::Abstract | DeclaratorMode::Either => match self.peek(1) {
                Some(token) => match token.kind {
                    TokenKind::Star | TokenKind::LeftParen | TokenKind::LeftBracket => true,
                    TokenKind::Identifier => {
                        mode == DeclaratorMode::Either && !self.scopes.is_type(self.text(&token))
                    }
                    _ => false,
                },
                None => false,
            },
        }
    }

    /// 名前または括弧の後に配列・関数の接尾辞が続く宣言子
    fn parse_direct_declarator(&mut self, mode: DeclaratorMode) -> ParseResult<Option<SyntaxNode>> {
        let mut declarator = match self.current() {
            Some(token) if token.kind == TokenKind::Identifier && mode.allows_name() => {
                self.advance();
                let kind = if mode == DeclaratorMode::Field {
                    NodeKind::FieldIdentifier
                } else {
                    NodeKind::Identifier
                };
                Some(self.leaf(kind, token))
            }
            Some(token) if token.kind == TokenKind::LeftParen && self.paren_opens_declarator(mode) => {
                Some(self.nested(|parser| parser.parse_parenthesized_declarator(mode))?)
            }
            _ => None,
        };

        if declarator.is_none() && mode.requires_name() {
            return Err(self.error("identifier"));
        }

        loop {
            let (concrete, abstract_kind) = match self.current_kind() {
                Some(TokenKind::LeftBracket) => (NodeKind::ArrayDeclarator, NodeKind::AbstractArrayDeclarator),
                Some(TokenKind::LeftParen) => {
                    (NodeKind::FunctionDeclarator, NodeKind::AbstractFunctionDeclarator)
                }
                _ => break,
            };

            let inner_is_abstract = declarator.as_ref().map_or(true, is_abstract);
            let mut builder = NodeBuilder::new(if inner_is_abstract { abstract_kind } else { concrete });
            if let Some(inner) = declarator.take() {
                builder.field("declarator", inner);
            }

            if concrete == NodeKind::ArrayDeclarator {
                builder.token(self.expect(TokenKind::LeftBracket)?);
                if !self.check(TokenKind::RightBracket) {
                    builder.field("size", self.parse_assignment_expression()?);
                }
                builder.token(self.expect(TokenKind::RightBracket)?);
            } else {
                builder.field("parameters", self.parse_parameter_list()?);
            }
            declarator = Some(builder.finish());
        }

        Ok(declarator)
    }

    /// `(*name)`
    fn parse_parenthesized_declarator(&mut self, mode: DeclaratorMode) -> ParseResult<SyntaxNode> {
        let open = self.expect(TokenKind::LeftParen)?;
        let inner = self.parse_required_declarator(mode)?;
        let close = self.expect(TokenKind::RightParen)?;

        let kind = if is_abstract(&inner) {
            NodeKind::AbstractParenthesizedDeclarator
        } else {
            NodeKind::ParenthesizedDeclarator
        };
        let mut builder = NodeBuilder::new(kind);
        builder.token(open).node(inner).token(close);
        Ok(builder.finish())
    }

    /// 仮引数リスト `(int a, __global float *b, ...)`
    pub(super) fn parse_parameter_list(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::ParameterList);
        builder.token(self.expect(TokenKind::LeftParen)?);

        while !self.check(TokenKind::RightParen) {
            if let Some(ellipsis) = self.match_token(TokenKind::Ellipsis) {
                builder.node(self.leaf(NodeKind::VariadicParameter, ellipsis));
                break;
            }
            let parameter = self.parse_parameter_declaration()?;
            builder.node(parameter);
            match self.match_token(TokenKind::Comma) {
                Some(comma) => {
                    builder.token(comma);
                }
                None => break,
            }
        }

        builder.token(self.expect(TokenKind::RightParen)?);
        Ok(builder.finish())
    }

    fn parse_parameter_declaration(&mut self) -> ParseResult<SyntaxNode> {
        let mut builder = NodeBuilder::new(NodeKind::ParameterDeclaration);
        let specifiers = self.parse_declaration_specifiers()?;
        specifiers.push_into(&mut builder);

        if let Some(declarator) = self.parse_declarator(DeclaratorMode::Either)? {
            builder.field("declarator", declarator);
        }
        self.parse_attributes_into(&mut builder)?;
        Ok(builder.finish())
    }
}
