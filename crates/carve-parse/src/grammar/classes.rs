use carve_errors::Result;
use carve_syntax::SyntaxKind::{self, *};
use carve_syntax::SyntaxNode;

use super::items::{attribute, block_comment, comment};
use super::{is_class_keyword, members, types};
use crate::parser::Parser;

/// How far ahead a class block looks for `class` before treating an item
/// as a member.
const NESTED_CLASS_LOOKAHEAD: usize = 3;

enum ClassModifier {
    Tagged(SyntaxKind),
    Class,
}

fn class_modifier(p: &mut Parser<'_>) -> Result<ClassModifier> {
    Ok(match p.peek_ident()? {
        Some("public" | "internal" | "private" | "protected") => ClassModifier::Tagged(ACCESSOR),
        Some("abstract") => ClassModifier::Tagged(ABSTRACT),
        Some("sealed") => ClassModifier::Tagged(SEALED),
        Some("static") => ClassModifier::Tagged(STATIC),
        Some("class") => ClassModifier::Class,
        _ => return p.error("unknown class identifier"),
    })
}

/// `modifiers class Name[<T>] [: Base, ...] [// comment] { ... }`
pub(crate) fn class(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut statement = Vec::new();
    loop {
        match class_modifier(p)? {
            ClassModifier::Tagged(kind) => statement.push(p.bump_as(kind)?),
            ClassModifier::Class => {
                statement.push(p.bump()?);
                break;
            }
        }
    }

    if !p.at(IDENT)? {
        return p.error("no class name given");
    }
    let name = p.bump()?;
    let class_name = name.text().unwrap_or_default().to_owned();
    statement.push(name);

    if p.at(LT)? {
        statement.push(types::generic_args(p)?);
    }
    if p.at(COLON)? {
        statement.push(inheritance(p)?);
    }

    let mut children = vec![SyntaxNode::new(CLASS_STATEMENT, statement)];
    if p.at(DOUBLE_SLASH)? {
        children.push(comment(p)?);
    }

    if !p.at(LEFT_BRACE)? {
        return p.error("no valid class block");
    }
    let block = class_block(p, &class_name)?;
    tracing::debug!(
        class = %class_name,
        children = block.children().len(),
        "parsed class declaration"
    );
    children.push(block);

    Ok(SyntaxNode::new(CLASS, children))
}

fn inheritance(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = vec![p.bump()?, types::type_(p)?];
    while p.at(COMMA)? {
        children.push(p.bump()?);
        children.push(types::type_(p)?);
    }
    Ok(SyntaxNode::new(CLASS_INHERITANCE, children))
}

enum ClassItem {
    Comment,
    BlockComment,
    Attribute,
    NestedClass,
    Member,
    Close,
    End,
}

fn class_item(p: &mut Parser<'_>) -> Result<ClassItem> {
    Ok(match p.peek_kind()? {
        RIGHT_BRACE => ClassItem::Close,
        EOF => ClassItem::End,
        DOUBLE_SLASH => ClassItem::Comment,
        BLOCK_COMMENT_START => ClassItem::BlockComment,
        LEFT_BRACKET => ClassItem::Attribute,
        _ => {
            if at_nested_class(p)? {
                ClassItem::NestedClass
            } else {
                ClassItem::Member
            }
        }
    })
}

/// A run of class keywords reaching `class` within the lookahead window.
fn at_nested_class(p: &mut Parser<'_>) -> Result<bool> {
    for n in 0..NESTED_CLASS_LOOKAHEAD {
        match p.nth_ident(n)? {
            Some("class") => return Ok(true),
            Some(text) if is_class_keyword(text) => {}
            _ => return Ok(false),
        }
    }
    Ok(false)
}

fn class_block(p: &mut Parser<'_>, class_name: &str) -> Result<SyntaxNode> {
    let mut children = vec![p.bump()?];

    loop {
        let child = match class_item(p)? {
            ClassItem::Comment => comment(p)?,
            ClassItem::BlockComment => block_comment(p)?,
            ClassItem::Attribute => attribute(p)?,
            ClassItem::NestedClass => class(p)?,
            ClassItem::Member => members::member(p, class_name)?,
            ClassItem::Close => {
                children.push(p.bump()?);
                break;
            }
            ClassItem::End => return p.error("unexpected end of input in class block"),
        };
        children.push(child);
    }

    Ok(SyntaxNode::new(CLASS_BLOCK, children))
}
