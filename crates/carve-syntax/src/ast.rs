//! Typed views over the untyped tree.
//!
//! Views borrow the tree and never own nodes; they only interpret the shape
//! the parser produces.

use crate::SyntaxKind::{self, *};
use crate::SyntaxNode;

pub trait AstNode<'a>: Sized {
    fn cast(syntax: &'a SyntaxNode) -> Option<Self>;

    fn syntax(self) -> &'a SyntaxNode;
}

macro_rules! ast_node {
    ($($name:ident => $kind:ident),* $(,)?) => {$(
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name<'a>(&'a SyntaxNode);

        impl<'a> AstNode<'a> for $name<'a> {
            fn cast(syntax: &'a SyntaxNode) -> Option<Self> {
                (syntax.kind() == $kind).then_some(Self(syntax))
            }

            fn syntax(self) -> &'a SyntaxNode {
                self.0
            }
        }
    )*};
}

ast_node! {
    CompilationUnit => COMPILATION_UNIT,
    Using => USING,
    Namespace => NAMESPACE,
    Class => CLASS,
    Comment => COMMENT,
    Attribute => ATTRIBUTE,
    Parameter => PARAM,
    Type => TYPE,
}

fn children_of<'a, N: AstNode<'a> + 'a>(node: &'a SyntaxNode) -> impl Iterator<Item = N> + 'a {
    node.children().iter().filter_map(N::cast)
}

fn qualified_name(node: &SyntaxNode) -> Option<String> {
    node.first_of_kind(QUALIFIED_NAME).map(SyntaxNode::trimmed_text)
}

impl<'a> CompilationUnit<'a> {
    pub fn usings(self) -> impl Iterator<Item = Using<'a>> + 'a {
        children_of::<Using<'a>>(self.0)
    }

    pub fn namespaces(self) -> impl Iterator<Item = Namespace<'a>> + 'a {
        children_of::<Namespace<'a>>(self.0)
    }

    /// Classes declared directly at the top level.
    pub fn classes(self) -> impl Iterator<Item = Class<'a>> + 'a {
        children_of::<Class<'a>>(self.0)
    }

    /// Every class in the unit, nested ones included, in source order.
    pub fn all_classes(self) -> impl Iterator<Item = Class<'a>> + 'a {
        self.0.descendants().filter_map(Class::cast)
    }
}

impl<'a> Using<'a> {
    pub fn path(self) -> Option<String> {
        qualified_name(self.0)
    }

    /// The alias in `using Alias = Some.Path;`.
    pub fn alias(self) -> Option<&'a str> {
        if !self.0.has_kind(EQ) {
            return None;
        }
        self.0.children().get(1).and_then(SyntaxNode::text)
    }
}

impl<'a> Namespace<'a> {
    pub fn name(self) -> Option<String> {
        self.0.first_of_kind(NAMESPACE_STATEMENT).and_then(qualified_name)
    }

    pub fn classes(self) -> impl Iterator<Item = Class<'a>> + 'a {
        children_of::<Class<'a>>(self.0)
    }

    pub fn attributes(self) -> impl Iterator<Item = Attribute<'a>> + 'a {
        children_of::<Attribute<'a>>(self.0)
    }

    pub fn comments(self) -> impl Iterator<Item = Comment<'a>> + 'a {
        children_of::<Comment<'a>>(self.0)
    }
}

impl<'a> Class<'a> {
    pub fn statement(self) -> Option<&'a SyntaxNode> {
        self.0.first_of_kind(CLASS_STATEMENT)
    }

    pub fn block(self) -> Option<&'a SyntaxNode> {
        self.0.first_of_kind(CLASS_BLOCK)
    }

    /// The identifier following the `class` keyword.
    pub fn name(self) -> Option<&'a str> {
        self.statement()?.all_of_kind(IDENT).nth(1).and_then(SyntaxNode::text)
    }

    pub fn accessors(self) -> impl Iterator<Item = &'a str> + 'a {
        self.statement()
            .into_iter()
            .flat_map(|statement| statement.all_of_kind(ACCESSOR))
            .filter_map(SyntaxNode::text)
    }

    pub fn is_abstract(self) -> bool {
        self.has_modifier(ABSTRACT)
    }

    pub fn is_sealed(self) -> bool {
        self.has_modifier(SEALED)
    }

    pub fn is_static(self) -> bool {
        self.has_modifier(STATIC)
    }

    fn has_modifier(self, kind: SyntaxKind) -> bool {
        self.statement().is_some_and(|statement| statement.has_kind(kind))
    }

    pub fn generic_params(self) -> Option<&'a SyntaxNode> {
        self.statement()?.first_of_kind(GENERIC_ARGS)
    }

    pub fn base_types(self) -> impl Iterator<Item = Type<'a>> + 'a {
        self.statement()
            .and_then(|statement| statement.first_of_kind(CLASS_INHERITANCE))
            .into_iter()
            .flat_map(children_of::<Type<'a>>)
    }

    /// The comment between the declaration and its block, if any.
    pub fn comment(self) -> Option<Comment<'a>> {
        children_of::<Comment<'a>>(self.0).next()
    }

    pub fn members(self) -> impl Iterator<Item = Member<'a>> + 'a {
        self.block().into_iter().flat_map(|block| block.children().iter().filter_map(Member::cast))
    }

    pub fn nested_classes(self) -> impl Iterator<Item = Class<'a>> + 'a {
        self.block().into_iter().flat_map(children_of::<Class<'a>>)
    }

    /// Members paired with the comment that directly follows them in the block.
    pub fn annotated_members(self) -> Vec<(Member<'a>, Option<Comment<'a>>)> {
        let Some(block) = self.block() else { return Vec::new() };
        let children = block.children();

        children
            .iter()
            .enumerate()
            .filter_map(|(index, child)| {
                let member = Member::cast(child)?;
                let comment = children.get(index + 1).and_then(Comment::cast);
                Some((member, comment))
            })
            .collect()
    }
}

/// A class member, classified by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Member<'a> {
    Field(&'a SyntaxNode),
    Property(&'a SyntaxNode),
    Method(&'a SyntaxNode),
    Ctor(&'a SyntaxNode),
}

impl<'a> AstNode<'a> for Member<'a> {
    fn cast(syntax: &'a SyntaxNode) -> Option<Self> {
        Some(match syntax.kind() {
            FIELD => Self::Field(syntax),
            PROPERTY => Self::Property(syntax),
            METHOD => Self::Method(syntax),
            CTOR => Self::Ctor(syntax),
            _ => return None,
        })
    }

    fn syntax(self) -> &'a SyntaxNode {
        match self {
            Self::Field(node) | Self::Property(node) | Self::Method(node) | Self::Ctor(node) => {
                node
            }
        }
    }
}

impl<'a> Member<'a> {
    /// The member name without surrounding trivia.
    ///
    /// A decompiled constructor keeps any trivia inside its marker, so
    /// `void . ctor` names the member `". ctor"`.
    pub fn name(self) -> String {
        self.syntax().first_of_kind(MEMBER_NAME).map(SyntaxNode::trimmed_text).unwrap_or_default()
    }

    /// Declared or return type. Source constructors have none.
    pub fn ty(self) -> Option<Type<'a>> {
        children_of::<Type<'a>>(self.syntax()).next()
    }

    pub fn accessors(self) -> impl Iterator<Item = &'a str> + 'a {
        self.syntax().all_of_kind(ACCESSOR).filter_map(SyntaxNode::text)
    }

    pub fn has_modifier(self, kind: SyntaxKind) -> bool {
        self.syntax().has_kind(kind)
    }

    pub fn parameters(self) -> impl Iterator<Item = Parameter<'a>> + 'a {
        self.syntax().first_of_kind(METHOD_BODY).into_iter().flat_map(children_of::<Parameter<'a>>)
    }

    pub fn body(self) -> Option<&'a SyntaxNode> {
        match self {
            Self::Property(node) => node.first_of_kind(PROPERTY_BODY),
            Self::Method(node) | Self::Ctor(node) => node.first_of_kind(METHOD_BODY),
            Self::Field(node) => node.first_of_kind(FIELD_INITIALIZER),
        }
    }
}

impl<'a> Comment<'a> {
    /// Text after `//`, without its trailing line break.
    pub fn text(self) -> &'a str {
        self.0.first_of_kind(COMMENT_TEXT).and_then(SyntaxNode::text).unwrap_or_default()
    }

    /// Parses the comment as a hexadecimal offset such as `0x1A2B`.
    pub fn hex_offset(self) -> Option<u64> {
        let text = self.text().trim();
        let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
        u64::from_str_radix(digits, 16).ok()
    }
}

impl<'a> Attribute<'a> {
    pub fn name(self) -> Option<String> {
        qualified_name(self.0)
    }

    /// Argument terminals, without parentheses and separators.
    pub fn arguments(self) -> impl Iterator<Item = &'a SyntaxNode> + 'a {
        self.0
            .first_of_kind(ATTRIBUTE_ARGS)
            .into_iter()
            .flat_map(SyntaxNode::children)
            .filter(|node| !matches!(node.kind(), LEFT_PAREN | RIGHT_PAREN | COMMA))
    }
}

impl<'a> Parameter<'a> {
    pub fn is_out(self) -> bool {
        self.0.has_kind(OUT)
    }

    pub fn ty(self) -> Option<Type<'a>> {
        children_of::<Type<'a>>(self.0).next()
    }

    pub fn name(self) -> Option<&'a str> {
        self.0.first_of_kind(IDENT).and_then(SyntaxNode::text)
    }

    /// The literal or identifier after `=`.
    pub fn default_value(self) -> Option<&'a SyntaxNode> {
        self.0.first_of_kind(PARAM_DEFAULT)?.children().get(1)
    }
}

impl<'a> Type<'a> {
    pub fn is_tuple(self) -> bool {
        self.0.has_kind(TUPLE_TYPE)
    }

    pub fn is_array(self) -> bool {
        self.0.has_kind(ARRAY_TYPE)
    }

    /// Dotted name of a non-tuple type, e.g. `System.Int32` or `void`.
    pub fn name(self) -> Option<String> {
        qualified_name(self.0)
    }

    pub fn tuple_elements(self) -> impl Iterator<Item = Type<'a>> + 'a {
        self.0.first_of_kind(TUPLE_TYPE).into_iter().flat_map(children_of::<Type<'a>>)
    }

    pub fn generic_args(self) -> impl Iterator<Item = Type<'a>> + 'a {
        self.0.first_of_kind(GENERIC_ARGS).into_iter().flat_map(children_of::<Type<'a>>)
    }
}
