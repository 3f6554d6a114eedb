use carve_errors::Result;
use carve_syntax::SyntaxKind::{self, *};
use carve_syntax::SyntaxNode;

use super::qualified_name;
use crate::parser::Parser;

/// Tuple, `void`, or a dotted name with optional generic arguments, then an
/// optional `[]`.
pub(crate) fn type_(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = Vec::new();

    if p.at(LEFT_PAREN)? {
        children.push(tuple_type(p)?);
    } else if p.at_ident("void")? {
        let void = SyntaxNode::new(QUALIFIED_NAME, vec![p.bump()?]);
        return Ok(SyntaxNode::new(TYPE, vec![void]));
    } else {
        children.push(qualified_name(p)?);
        if p.at(LT)? {
            children.push(generic_args(p)?);
        }
    }

    if p.at(LEFT_BRACKET)? {
        if p.nth_kind(1)? != RIGHT_BRACKET {
            return p.error("invalid type array indicator");
        }
        children.push(SyntaxNode::new(ARRAY_TYPE, vec![p.bump()?, p.bump()?]));
    }

    Ok(SyntaxNode::new(TYPE, children))
}

/// A single identifier as a type, used where the next `.` must not be read
/// as part of a dotted name.
pub(crate) fn simple_type(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    if !p.at(IDENT)? {
        return p.error("expected a type");
    }
    let name = SyntaxNode::new(QUALIFIED_NAME, vec![p.bump()?]);
    Ok(SyntaxNode::new(TYPE, vec![name]))
}

fn tuple_type(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let children = delimited(p, RIGHT_PAREN, "invalid tuple type")?;
    Ok(SyntaxNode::new(TUPLE_TYPE, children))
}

pub(crate) fn generic_args(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let children = delimited(p, GT, "invalid generic type")?;
    Ok(SyntaxNode::new(GENERIC_ARGS, children))
}

/// `bra item (, item)* ket` with the opening delimiter at the cursor.
fn delimited(p: &mut Parser<'_>, ket: SyntaxKind, message: &str) -> Result<Vec<SyntaxNode>> {
    let mut children = vec![p.bump()?];

    while !p.at(ket)? {
        children.push(type_(p)?);

        match p.peek_kind()? {
            COMMA => children.push(p.bump()?),
            kind if kind == ket => {}
            _ => return p.error(message),
        }
    }

    children.push(p.bump()?);
    Ok(children)
}
