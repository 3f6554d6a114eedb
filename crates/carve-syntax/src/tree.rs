//! Owned, mutable syntax tree with attached trivia.
//!
//! Every node owns its children; cloning is always deep, so two copies never
//! observe each other's edits. Reconstruction is a pre-order walk emitting
//! leading trivia, token text and trailing trivia.

use std::fmt::{self, Write as _};
use std::{io, mem};

use camino::Utf8Path;

use crate::walk::{Preorder, WalkEvent};
use crate::{Number, SyntaxKind, Trivia, TriviaPieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

/// Text of a terminal together with the trivia it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxToken {
    leading: Trivia,
    text: String,
    value: Option<Number>,
    trailing: Trivia,
}

impl SyntaxToken {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            leading: Trivia::default(),
            text: text.into(),
            value: None,
            trailing: Trivia::default(),
        }
    }

    pub fn with_value(mut self, value: Option<Number>) -> Self {
        self.value = value;
        self
    }

    pub fn with_leading(mut self, leading: Trivia) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_trailing(mut self, trailing: Trivia) -> Self {
        self.trailing = trailing;
        self
    }

    /// The token text without trivia. String literals are stored unquoted.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn value(&self) -> Option<Number> {
        self.value
    }

    pub fn leading(&self) -> &Trivia {
        &self.leading
    }

    pub fn trailing(&self) -> &Trivia {
        &self.trailing
    }

    pub fn leading_mut(&mut self) -> &mut Trivia {
        &mut self.leading
    }

    pub fn trailing_mut(&mut self) -> &mut Trivia {
        &mut self.trailing
    }

    pub fn has_trailing(&self, kind: TriviaPieceKind) -> bool {
        self.trailing.contains(kind)
    }

    /// Removes and returns the trailing trivia.
    pub fn take_trailing(&mut self) -> Trivia {
        mem::take(&mut self.trailing)
    }
}

/// A tagged tree node: either a terminal carrying a token, or a non-terminal
/// owning an ordered list of children.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    data: NodeOrToken<Vec<SyntaxNode>, SyntaxToken>,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind, children: Vec<SyntaxNode>) -> Self {
        Self { kind, data: NodeOrToken::Node(children) }
    }

    pub fn token(kind: SyntaxKind, token: SyntaxToken) -> Self {
        Self { kind, data: NodeOrToken::Token(token) }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Relabels this node in place.
    pub fn set_kind(&mut self, kind: SyntaxKind) {
        self.kind = kind;
    }

    /// Returns a deep copy of this node carrying `kind`.
    pub fn retag(&self, kind: SyntaxKind) -> Self {
        self.clone().with_kind(kind)
    }

    /// Moves this node under a different tag.
    pub fn with_kind(mut self, kind: SyntaxKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_token(&self) -> bool {
        matches!(self.data, NodeOrToken::Token(_))
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        self.data.as_token()
    }

    pub fn as_token_mut(&mut self) -> Option<&mut SyntaxToken> {
        match &mut self.data {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken> {
        self.data.into_token()
    }

    /// The own text of a terminal, without trivia.
    pub fn text(&self) -> Option<&str> {
        self.as_token().map(SyntaxToken::text)
    }

    pub fn value(&self) -> Option<Number> {
        self.as_token().and_then(SyntaxToken::value)
    }

    /// Immediate children in reconstruction order. Terminals have none.
    pub fn children(&self) -> &[SyntaxNode] {
        match &self.data {
            NodeOrToken::Node(children) => children,
            NodeOrToken::Token(_) => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<SyntaxNode>> {
        match &mut self.data {
            NodeOrToken::Node(children) => Some(children),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn first_of_kind(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.children().iter().find(|child| child.kind == kind)
    }

    pub fn first_of_kind_mut(&mut self, kind: SyntaxKind) -> Option<&mut SyntaxNode> {
        self.children_mut()?.iter_mut().find(|child| child.kind == kind)
    }

    pub fn all_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.children().iter().filter(move |child| child.kind == kind)
    }

    pub fn has_kind(&self, kind: SyntaxKind) -> bool {
        self.children().iter().any(|child| child.kind == kind)
    }

    pub fn position_of_kind(&self, kind: SyntaxKind) -> Option<usize> {
        self.children().iter().position(|child| child.kind == kind)
    }

    #[track_caller]
    fn expect_children_mut(&mut self) -> &mut Vec<SyntaxNode> {
        let kind = self.kind;
        match self.children_mut() {
            Some(children) => children,
            None => panic!("`{kind:?}` is a terminal and cannot own children"),
        }
    }

    /// Inserts `child` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if this node is a terminal or `index > len`.
    #[track_caller]
    pub fn insert_child(&mut self, index: usize, child: SyntaxNode) {
        self.expect_children_mut().insert(index, child);
    }

    /// # Panics
    ///
    /// Panics if this node is a terminal.
    #[track_caller]
    pub fn push_child(&mut self, child: SyntaxNode) {
        self.expect_children_mut().push(child);
    }

    /// # Panics
    ///
    /// Panics if this node is a terminal or `index` is out of bounds.
    #[track_caller]
    pub fn remove_child(&mut self, index: usize) -> SyntaxNode {
        self.expect_children_mut().remove(index)
    }

    /// The first terminal in pre-order, including this node itself.
    pub fn first_token(&self) -> Option<&SyntaxToken> {
        match &self.data {
            NodeOrToken::Token(token) => Some(token),
            NodeOrToken::Node(children) => children.iter().find_map(Self::first_token),
        }
    }

    pub fn last_token_mut(&mut self) -> Option<&mut SyntaxToken> {
        match &mut self.data {
            NodeOrToken::Token(token) => Some(token),
            NodeOrToken::Node(children) => children.iter_mut().rev().find_map(Self::last_token_mut),
        }
    }

    /// Walks this subtree in pre-order, emitting enter and leave events.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self)
    }

    /// This node and all of its descendants in pre-order.
    pub fn descendants(&self) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }

    /// Writes the exact source text of this subtree.
    pub fn write_text(&self, out: &mut impl fmt::Write) -> fmt::Result {
        for node in self.descendants() {
            let Some(token) = node.as_token() else { continue };
            write!(out, "{}", token.leading)?;
            write_own_text(node.kind, token, out)?;
            write!(out, "{}", token.trailing)?;
        }
        Ok(())
    }

    /// Rebuilds the source text of this subtree, trivia included.
    pub fn reconstruct(&self) -> String {
        let mut text = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_text(&mut text);
        text
    }

    /// Concatenated token text of this subtree, without any trivia.
    pub fn trimmed_text(&self) -> String {
        let mut text = String::new();
        for node in self.descendants() {
            if let Some(token) = node.as_token() {
                let _ = write_own_text(node.kind, token, &mut text);
            }
        }
        text
    }

    /// Persists the reconstructed text to `path`, replacing its contents.
    pub fn write_to(&self, path: impl AsRef<Utf8Path>) -> io::Result<()> {
        std::fs::write(path.as_ref(), self.reconstruct())
    }

    /// Joins adjacent terminals into one terminal of `kind`. The trivia between
    /// them becomes part of its text, so reconstruction is unchanged.
    ///
    /// Returns `None` if `terminals` is empty or holds a non-terminal.
    pub fn merge_terminals(kind: SyntaxKind, terminals: &[Self]) -> Option<Self> {
        let first = terminals.first()?.as_token()?;
        let last = terminals.last()?.as_token()?;

        let mut text = String::new();
        for (index, node) in terminals.iter().enumerate() {
            let token = node.as_token()?;
            if index > 0 {
                let _ = write!(text, "{}", token.leading);
            }
            let _ = write_own_text(node.kind, token, &mut text);
            if index + 1 < terminals.len() {
                let _ = write!(text, "{}", token.trailing);
            }
        }

        let token = SyntaxToken {
            leading: first.leading.clone(),
            text,
            value: None,
            trailing: last.trailing.clone(),
        };
        Some(Self::token(kind, token))
    }

    /// Indented dump of kinds and token texts, one node per line.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;
        for event in self.preorder() {
            match event {
                WalkEvent::Enter(node) => {
                    let _ = write!(out, "{:indent$}{:?}", "", node.kind, indent = depth * 2);
                    if let Some(text) = node.text() {
                        let _ = write!(out, " {text:?}");
                    }
                    out.push('\n');
                    depth += 1;
                }
                WalkEvent::Leave(_) => depth -= 1,
            }
        }
        out
    }
}

fn write_own_text(kind: SyntaxKind, token: &SyntaxToken, out: &mut impl fmt::Write) -> fmt::Result {
    if kind == SyntaxKind::STRING {
        write!(out, "\"{}\"", token.text)
    } else {
        out.write_str(&token.text)
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f)
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;
    use crate::SyntaxKind::*;

    fn terminal(kind: SyntaxKind, text: &str, trailing: &str) -> SyntaxNode {
        let token = SyntaxToken::new(text).with_trailing(Trivia::from_text(trailing).unwrap());
        SyntaxNode::token(kind, token)
    }

    fn ident(text: &str, trailing: &str) -> SyntaxNode {
        terminal(IDENT, text, trailing)
    }

    fn field() -> SyntaxNode {
        SyntaxNode::new(
            FIELD,
            vec![
                ident("public", " ").with_kind(ACCESSOR),
                SyntaxNode::new(
                    TYPE,
                    vec![SyntaxNode::new(QUALIFIED_NAME, vec![ident("int", " ")])],
                ),
                SyntaxNode::new(MEMBER_NAME, vec![ident("count", "")]),
                terminal(SEMICOLON, ";", "\n"),
            ],
        )
    }

    #[test]
    fn reconstruct_concatenates_trivia_in_order() {
        let node = field();
        assert_eq!(node.reconstruct(), "public int count;\n");
        assert_eq!(node.to_string(), node.reconstruct());
        assert_eq!(node.trimmed_text(), "publicintcount;");
    }

    #[test]
    fn string_terminals_are_requoted() {
        let token = SyntaxToken::new("a b").with_leading(Trivia::from_text(" ").unwrap());
        let node = SyntaxNode::token(STRING, token);
        assert_eq!(node.reconstruct(), " \"a b\"");
        assert_eq!(node.text(), Some("a b"));
    }

    #[test]
    fn queries_look_at_immediate_children() {
        let node = field();
        assert!(node.has_kind(TYPE));
        assert!(!node.has_kind(QUALIFIED_NAME));
        assert_eq!(node.first_of_kind(ACCESSOR).and_then(SyntaxNode::text), Some("public"));
        assert_eq!(node.all_of_kind(MEMBER_NAME).count(), 1);
        assert_eq!(node.position_of_kind(SEMICOLON), Some(3));
        assert!(node.first_of_kind(CLASS).is_none());
    }

    #[test]
    fn retag_is_deep_and_reversible() {
        let node = field();
        let mut tagged = node.retag(PROPERTY);
        assert_eq!(tagged.kind(), PROPERTY);
        assert_eq!(tagged.reconstruct(), node.reconstruct());
        assert_eq!(tagged.retag(FIELD), node);

        tagged.first_of_kind_mut(MEMBER_NAME).unwrap().children_mut().unwrap()[0]
            .as_token_mut()
            .unwrap()
            .set_text("total");
        assert_eq!(tagged.reconstruct(), "public int total;\n");
        assert_eq!(node.reconstruct(), "public int count;\n");
    }

    #[test]
    fn child_mutation_keeps_unrelated_formatting() {
        let mut block = SyntaxNode::new(CLASS_BLOCK, vec![field()]);
        block.insert_child(0, ident("// x", "\n"));
        block.push_child(ident("}", ""));
        assert_eq!(block.reconstruct(), "// x\npublic int count;\n}");

        let removed = block.remove_child(0);
        assert_eq!(removed.text(), Some("// x"));
        assert_eq!(block.reconstruct(), "public int count;\n}");
    }

    #[test]
    #[should_panic(expected = "is a terminal")]
    fn terminals_reject_children() {
        ident("x", "").push_child(ident("y", ""));
    }

    #[test]
    fn merge_keeps_inner_trivia() {
        let dot = terminal(DOT, ".", " ");
        let merged = SyntaxNode::merge_terminals(IDENT, &[dot, ident("ctor", "\n")]).unwrap();
        assert_eq!(merged.text(), Some(". ctor"));
        assert_eq!(merged.reconstruct(), ". ctor\n");

        let quoted = SyntaxNode::token(STRING, SyntaxToken::new("x"));
        let merged = SyntaxNode::merge_terminals(COMMENT_TEXT, &[quoted]).unwrap();
        assert_eq!(merged.text(), Some("\"x\""));

        assert!(SyntaxNode::merge_terminals(IDENT, &[]).is_none());
        assert!(SyntaxNode::merge_terminals(IDENT, &[field()]).is_none());
    }

    #[test]
    fn last_token_trivia_can_be_edited() {
        let mut node = field();
        let trailing = node.last_token_mut().unwrap().take_trailing();
        assert_eq!(trailing.to_string(), "\n");
        assert_eq!(node.reconstruct(), "public int count;");
        assert_eq!(node.first_token().map(SyntaxToken::text), Some("public"));
    }

    #[test]
    fn debug_tree_lists_kinds_and_texts() {
        expect![[r#"
            FIELD
              ACCESSOR "public"
              TYPE
                QUALIFIED_NAME
                  IDENT "int"
              MEMBER_NAME
                IDENT "count"
              SEMICOLON ";"
        "#]]
        .assert_eq(&field().debug_tree());
    }
}
