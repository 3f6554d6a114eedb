use carve_errors::Result;
use carve_syntax::SyntaxKind::*;
use carve_syntax::{SyntaxNode, SyntaxToken, TriviaPieceKind};

use super::{at_value, classes, is_class_keyword, qualified_name};
use crate::parser::Parser;

enum TopLevel {
    Using,
    Namespace,
    Class,
    Attribute,
    Comment,
    BlockComment,
    Other,
    End,
}

fn top_level(p: &mut Parser<'_>) -> Result<TopLevel> {
    Ok(match p.peek_kind()? {
        EOF => TopLevel::End,
        DOUBLE_SLASH => TopLevel::Comment,
        BLOCK_COMMENT_START => TopLevel::BlockComment,
        LEFT_BRACKET => TopLevel::Attribute,
        IDENT => match p.peek_ident()? {
            Some("using") => TopLevel::Using,
            Some("namespace") => TopLevel::Namespace,
            Some(text) if is_class_keyword(text) => TopLevel::Class,
            _ => return p.error("Unknown code block"),
        },
        _ => TopLevel::Other,
    })
}

pub(crate) fn compilation_unit(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = Vec::new();

    loop {
        let child = match top_level(p)? {
            TopLevel::Using => using(p)?,
            TopLevel::Namespace => namespace(p)?,
            TopLevel::Class => classes::class(p)?,
            TopLevel::Attribute => attribute(p)?,
            TopLevel::Comment => comment(p)?,
            TopLevel::BlockComment => block_comment(p)?,
            TopLevel::Other => p.bump()?,
            TopLevel::End => {
                children.push(p.bump()?);
                break;
            }
        };
        children.push(child);
    }

    Ok(SyntaxNode::new(COMPILATION_UNIT, children))
}

/// `using [static] [Alias =] Qualified.Name;`
fn using(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = vec![p.bump()?];

    if p.at_ident("static")? {
        children.push(p.bump_as(STATIC)?);
    } else if p.at(IDENT)? && p.nth_kind(1)? == EQ {
        children.push(p.bump()?);
        children.push(p.bump()?);
    }

    children.push(qualified_name(p)?);
    children.push(p.expect(SEMICOLON, "missing `;` after using directive")?);

    Ok(SyntaxNode::new(USING, children))
}

enum NamespaceItem {
    Using,
    Namespace,
    Class,
    Attribute,
    Comment,
    BlockComment,
    Passthrough,
    Close,
    End,
}

fn namespace_item(p: &mut Parser<'_>) -> Result<NamespaceItem> {
    Ok(match p.peek_kind()? {
        RIGHT_BRACE => NamespaceItem::Close,
        EOF => NamespaceItem::End,
        DOUBLE_SLASH => NamespaceItem::Comment,
        BLOCK_COMMENT_START => NamespaceItem::BlockComment,
        LEFT_BRACKET => NamespaceItem::Attribute,
        IDENT => match p.peek_ident()? {
            Some("using") => NamespaceItem::Using,
            Some("namespace") => NamespaceItem::Namespace,
            Some(text) if is_class_keyword(text) => NamespaceItem::Class,
            _ => NamespaceItem::Passthrough,
        },
        _ => NamespaceItem::Passthrough,
    })
}

pub(crate) fn namespace(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let statement = SyntaxNode::new(NAMESPACE_STATEMENT, vec![p.bump()?, qualified_name(p)?]);
    let mut children = vec![statement, p.expect(LEFT_BRACE, "no namespace unit open brace")?];

    loop {
        let child = match namespace_item(p)? {
            NamespaceItem::Using => using(p)?,
            NamespaceItem::Namespace => namespace(p)?,
            NamespaceItem::Class => classes::class(p)?,
            NamespaceItem::Attribute => attribute(p)?,
            NamespaceItem::Comment => comment(p)?,
            NamespaceItem::BlockComment => block_comment(p)?,
            NamespaceItem::Passthrough => {
                passthrough(p, &mut children)?;
                continue;
            }
            NamespaceItem::Close => {
                children.push(p.bump()?);
                break;
            }
            NamespaceItem::End => return p.error("unexpected end of input in namespace"),
        };
        children.push(child);
    }

    Ok(SyntaxNode::new(NAMESPACE, children))
}

/// Keeps namespace-level content that has no structural meaning as plain
/// terminals. Consumes one statement: up to a `;` or the `}` that balances
/// the first brace, stopping early at the namespace's own `}`.
fn passthrough(p: &mut Parser<'_>, children: &mut Vec<SyntaxNode>) -> Result<()> {
    let mut depth = 0usize;

    loop {
        match p.peek_kind()? {
            EOF if depth > 0 => return p.error("unbalanced braces in namespace"),
            EOF | RIGHT_BRACE if depth == 0 => return Ok(()),
            _ => {}
        }

        let node = p.bump()?;
        tracing::trace!(kind = ?node.kind(), text = node.text(), "passing through namespace token");
        let kind = node.kind();
        children.push(node);

        match kind {
            LEFT_BRACE => depth += 1,
            RIGHT_BRACE => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            SEMICOLON if depth == 0 => return Ok(()),
            _ => {}
        }
    }
}

fn ends_in_newline(token: &SyntaxToken) -> bool {
    token.has_trailing(TriviaPieceKind::Newline)
}

/// `// text` up to the end of the line.
pub(crate) fn comment(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let slash = p.bump()?;
    let ends_line = slash.as_token().is_some_and(ends_in_newline);

    let mut children = vec![slash];
    if !ends_line && !p.at(EOF)? {
        children.push(comment_text(p)?);
    }

    Ok(SyntaxNode::new(COMMENT, children))
}

/// Collapses every terminal up to the end of the line into one `COMMENT_TEXT`
/// terminal.
fn comment_text(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut terminals = Vec::new();

    loop {
        let node = p.bump()?;
        let ends_line = node.as_token().is_some_and(ends_in_newline);
        terminals.push(node);
        if ends_line || p.at(EOF)? {
            break;
        }
    }

    match SyntaxNode::merge_terminals(COMMENT_TEXT, &terminals) {
        Some(text) => Ok(text),
        None => Ok(SyntaxNode::token(COMMENT_TEXT, SyntaxToken::new(""))),
    }
}

/// `/* ... */`, kept token for token.
pub(crate) fn block_comment(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = vec![p.bump()?];
    p.bump_until(BLOCK_COMMENT_END, &mut children, "unterminated block comment")?;
    Ok(SyntaxNode::new(BLOCK_COMMENT, children))
}

/// `[Name]` or `[Name(args)]`.
pub(crate) fn attribute(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = vec![p.bump()?, qualified_name(p)?];

    if p.at(LEFT_PAREN)? {
        children.push(attribute_args(p)?);
    }

    children.push(p.expect(RIGHT_BRACKET, "invalid attribute closing bracket")?);
    Ok(SyntaxNode::new(ATTRIBUTE, children))
}

/// Positional or `Name = value` arguments; values are literals or dotted names.
fn attribute_args(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = vec![p.bump()?];

    while !p.at(RIGHT_PAREN)? {
        attribute_value(p, &mut children)?;
        if p.at(EQ)? {
            children.push(p.bump()?);
            attribute_value(p, &mut children)?;
        }

        match p.peek_kind()? {
            COMMA => children.push(p.bump()?),
            RIGHT_PAREN => {}
            _ => return p.error("invalid attribute ctor invocation parameter"),
        }
    }

    children.push(p.bump()?);
    Ok(SyntaxNode::new(ATTRIBUTE_ARGS, children))
}

fn attribute_value(p: &mut Parser<'_>, children: &mut Vec<SyntaxNode>) -> Result<()> {
    if !at_value(p)? {
        return p.error("invalid attribute ctor invocation parameter");
    }

    let is_name = p.at(IDENT)?;
    children.push(p.bump()?);
    while is_name && p.at(DOT)? && p.nth_kind(1)? == IDENT {
        children.push(p.bump()?);
        children.push(p.bump()?);
    }
    Ok(())
}
