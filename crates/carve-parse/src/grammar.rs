use carve_errors::Result;
use carve_syntax::SyntaxKind::*;
use carve_syntax::{SyntaxNode, SyntaxSet};

use crate::parser::Parser;

pub(crate) mod classes;
pub(crate) mod items;
mod members;
mod types;

/// `IDENT (. IDENT)*`
pub(crate) fn qualified_name(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    if !p.at(IDENT)? {
        return p.error("expected a name");
    }

    let mut children = vec![p.bump()?];
    while p.at(DOT)? && p.nth_kind(1)? == IDENT {
        children.push(p.bump()?);
        children.push(p.bump()?);
    }

    Ok(SyntaxNode::new(QUALIFIED_NAME, children))
}

/// Keywords that may start a class declaration.
pub(crate) fn is_class_keyword(text: &str) -> bool {
    matches!(
        text,
        "public" | "internal" | "private" | "protected" | "abstract" | "sealed" | "static" | "class"
    )
}

/// Literals and identifiers accepted as an argument or default value.
const VALUE: SyntaxSet = SyntaxSet::new([STRING, NUMBER, IDENT]);

pub(crate) fn at_value(p: &mut Parser<'_>) -> Result<bool> {
    p.at_set(&VALUE)
}
