use carve_errors::{Error, Result};
use carve_syntax::{SyntaxKind, SyntaxNode, SyntaxSet};
use carve_tokenizer::Tokenizer;

use crate::NodeReader;

pub(crate) struct Parser<'a> {
    reader: NodeReader<'a>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokenizer: Tokenizer<'a>) -> Self {
        Self { reader: NodeReader::new(tokenizer) }
    }

    pub(crate) fn nth_kind(&mut self, n: usize) -> Result<SyntaxKind> {
        Ok(self.reader.peek(n)?.kind())
    }

    pub(crate) fn peek_kind(&mut self) -> Result<SyntaxKind> {
        self.nth_kind(0)
    }

    /// Text of the `n`th terminal ahead if it is an identifier.
    pub(crate) fn nth_ident(&mut self, n: usize) -> Result<Option<&str>> {
        let node = self.reader.peek(n)?;
        Ok(if node.kind() == SyntaxKind::IDENT { node.text() } else { None })
    }

    pub(crate) fn peek_ident(&mut self) -> Result<Option<&str>> {
        self.nth_ident(0)
    }

    pub(crate) fn at(&mut self, kind: SyntaxKind) -> Result<bool> {
        Ok(self.peek_kind()? == kind)
    }

    pub(crate) fn at_set(&mut self, set: &SyntaxSet) -> Result<bool> {
        Ok(set.contains(self.peek_kind()?))
    }

    pub(crate) fn at_ident(&mut self, text: &str) -> Result<bool> {
        Ok(self.peek_ident()? == Some(text))
    }

    pub(crate) fn bump(&mut self) -> Result<SyntaxNode> {
        self.reader.read()
    }

    /// Consumes the next terminal under a grammar-specific tag.
    pub(crate) fn bump_as(&mut self, kind: SyntaxKind) -> Result<SyntaxNode> {
        Ok(self.bump()?.with_kind(kind))
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind, message: &str) -> Result<SyntaxNode> {
        if self.at(kind)? { self.bump() } else { self.error(message) }
    }

    /// Fails the parse, pointing at the next terminal.
    pub(crate) fn error<T>(&mut self, message: &str) -> Result<T> {
        Err(Error::parse(message, self.reader.range(0)?))
    }

    /// Consumes terminals up to and including the first `ket`.
    pub(crate) fn bump_until(
        &mut self,
        ket: SyntaxKind,
        children: &mut Vec<SyntaxNode>,
        message: &str,
    ) -> Result<()> {
        loop {
            match self.peek_kind()? {
                SyntaxKind::EOF => return self.error(message),
                kind => {
                    children.push(self.bump()?);
                    if kind == ket {
                        return Ok(());
                    }
                }
            }
        }
    }
}
