use carve_errors::Result;
use carve_syntax::SyntaxKind::{self, *};
use carve_syntax::SyntaxNode;

use super::{at_value, types};
use crate::parser::Parser;

fn member_modifier(text: Option<&str>) -> Option<SyntaxKind> {
    Some(match text? {
        "override" => OVERRIDE,
        "static" => STATIC,
        "readonly" => READONLY,
        "abstract" => ABSTRACT,
        "sealed" => SEALED,
        "virtual" => VIRTUAL,
        "const" => CONST,
        "extern" => EXTERN,
        _ => return None,
    })
}

fn is_accessor(text: Option<&str>) -> bool {
    matches!(text, Some("public" | "internal" | "private" | "protected"))
}

enum MemberShape {
    Field,
    InitializedField,
    Property,
    Method,
}

fn member_shape(p: &mut Parser<'_>) -> Result<MemberShape> {
    Ok(match p.peek_kind()? {
        SEMICOLON => MemberShape::Field,
        EQ => MemberShape::InitializedField,
        LEFT_BRACE => MemberShape::Property,
        LEFT_PAREN => MemberShape::Method,
        _ => return p.error("unknown member body"),
    })
}

/// Decompiled constructors are spelled `void .ctor(...)` or `void .cctor(...)`.
fn at_decompiled_ctor(p: &mut Parser<'_>) -> Result<bool> {
    Ok(p.nth_kind(1)? == DOT && matches!(p.nth_ident(2)?, Some("ctor" | "cctor")))
}

/// Accessors, modifiers, type, name and a shape-specific tail.
pub(crate) fn member(p: &mut Parser<'_>, class_name: &str) -> Result<SyntaxNode> {
    let mut children = Vec::new();

    while is_accessor(p.peek_ident()?) {
        children.push(p.bump_as(ACCESSOR)?);
    }
    while let Some(kind) = member_modifier(p.peek_ident()?) {
        children.push(p.bump_as(kind)?);
    }

    if p.at_ident("class")? {
        return p.error("too many modifiers before nested class");
    }

    let decompiled_ctor = at_decompiled_ctor(p)?;
    let source_ctor = !decompiled_ctor && p.at_ident(class_name)? && p.nth_kind(1)? == LEFT_PAREN;

    if decompiled_ctor {
        children.push(types::simple_type(p)?);
        let marker = [p.bump()?, p.bump()?];
        let merged = SyntaxNode::merge_terminals(IDENT, &marker);
        children.push(SyntaxNode::new(MEMBER_NAME, merged.into_iter().collect()));
    } else {
        if !source_ctor {
            children.push(types::type_(p)?);
        }
        children.push(member_name(p)?);
    }

    let kind = match member_shape(p)? {
        MemberShape::Field => {
            children.push(p.bump()?);
            FIELD
        }
        MemberShape::InitializedField => {
            children.push(field_initializer(p)?);
            children.push(p.bump()?);
            FIELD
        }
        MemberShape::Property => {
            children.push(opaque_body(p, PROPERTY_BODY)?);
            PROPERTY
        }
        MemberShape::Method => {
            children.push(method_body(p)?);
            if decompiled_ctor || source_ctor { CTOR } else { METHOD }
        }
    };

    Ok(SyntaxNode::new(kind, children))
}

/// Identifiers and angle brackets, as in `<Value>k__BackingField` or `Get<T>`.
fn member_name(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = Vec::new();
    while matches!(p.peek_kind()?, IDENT | LT | GT) {
        children.push(p.bump()?);
    }

    if children.is_empty() {
        return p.error("no member name given");
    }
    Ok(SyntaxNode::new(MEMBER_NAME, children))
}

/// `= ...` up to, not including, the terminating `;`.
fn field_initializer(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = vec![p.bump()?];
    loop {
        match p.peek_kind()? {
            SEMICOLON => break,
            EOF => return p.error("unterminated field initializer"),
            _ => children.push(p.bump()?),
        }
    }
    Ok(SyntaxNode::new(FIELD_INITIALIZER, children))
}

/// `{` then every terminal up to the first `}`; nested braces are not tracked.
fn opaque_body(p: &mut Parser<'_>, kind: SyntaxKind) -> Result<SyntaxNode> {
    let mut children = Vec::new();
    opaque_block(p, &mut children)?;
    Ok(SyntaxNode::new(kind, children))
}

fn opaque_block(p: &mut Parser<'_>, children: &mut Vec<SyntaxNode>) -> Result<()> {
    p.bump_until(RIGHT_BRACE, children, "unterminated member body")
}

/// `(params) [: base(...)]` followed by `;` or an opaque block.
fn method_body(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = vec![p.bump()?];

    while !p.at(RIGHT_PAREN)? {
        children.push(param(p)?);

        match p.peek_kind()? {
            COMMA => children.push(p.bump()?),
            RIGHT_PAREN => {}
            _ => return p.error("invalid parameter"),
        }
    }
    children.push(p.bump()?);

    if p.at(COLON)? {
        children.push(ctor_initializer(p)?);
    }

    match p.peek_kind()? {
        SEMICOLON => children.push(p.bump()?),
        LEFT_BRACE => opaque_block(p, &mut children)?,
        _ => return p.error("invalid method body"),
    }

    Ok(SyntaxNode::new(METHOD_BODY, children))
}

/// `: base(args)` or `: this(args)`.
fn ctor_initializer(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = vec![p.bump()?];

    if !matches!(p.peek_ident()?, Some("base" | "this")) {
        return p.error("invalid ctor invocation target");
    }
    children.push(p.bump()?);
    children.push(p.expect(LEFT_PAREN, "invalid ctor invocation statement")?);

    while !p.at(RIGHT_PAREN)? {
        if !at_value(p)? {
            return p.error("invalid ctor invocation parameter");
        }
        children.push(p.bump()?);

        match p.peek_kind()? {
            COMMA => children.push(p.bump()?),
            RIGHT_PAREN => {}
            _ => return p.error("invalid ctor invocation parameter"),
        }
    }
    children.push(p.bump()?);

    Ok(SyntaxNode::new(CTOR_INITIALIZER, children))
}

/// `[out|ref] Type name [= value]`
fn param(p: &mut Parser<'_>) -> Result<SyntaxNode> {
    let mut children = Vec::new();

    match p.peek_ident()? {
        Some("out") => children.push(p.bump_as(OUT)?),
        Some("ref") => children.push(p.bump_as(REF)?),
        _ => {}
    }

    children.push(types::type_(p)?);
    children.push(p.expect(IDENT, "no parameter name given")?);

    if p.at(EQ)? {
        let eq = p.bump()?;
        if !at_value(p)? {
            return p.error("invalid parameter value");
        }
        children.push(SyntaxNode::new(PARAM_DEFAULT, vec![eq, p.bump()?]));
    }

    Ok(SyntaxNode::new(PARAM, children))
}
