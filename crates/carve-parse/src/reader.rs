use std::collections::VecDeque;

use carve_errors::Result;
use carve_syntax::SyntaxKind::*;
use carve_syntax::{SyntaxNode, SyntaxToken, Trivia, TriviaPiece, TriviaPieceKind};
use carve_tokenizer::{Token, Tokenizer};
use text_size::TextRange;

/// Turns the token stream into terminals with their trivia attached and
/// buffers them for lookahead.
///
/// Leading trivia is everything before a significant token; trailing trivia is
/// the whole run after it, up to the next significant token. Callers never see
/// trivia tokens directly.
pub struct NodeReader<'a> {
    tokenizer: Tokenizer<'a>,
    /// Raw token lexed while draining trivia but not yet promoted.
    current: Option<Token>,
    pending: VecDeque<(SyntaxNode, TextRange)>,
}

impl<'a> NodeReader<'a> {
    pub fn new(tokenizer: Tokenizer<'a>) -> Self {
        Self { tokenizer, current: None, pending: VecDeque::new() }
    }

    /// The terminal `n` positions ahead, without consuming anything.
    pub fn peek(&mut self, n: usize) -> Result<&SyntaxNode> {
        self.fill(n)?;
        Ok(&self.pending[n].0)
    }

    /// Source range of the terminal `n` positions ahead, trivia excluded.
    pub fn range(&mut self, n: usize) -> Result<TextRange> {
        self.fill(n)?;
        Ok(self.pending[n].1)
    }

    /// Consumes the next terminal. Past the end this keeps returning `EOF`.
    pub fn read(&mut self) -> Result<SyntaxNode> {
        match self.pending.pop_front() {
            Some((node, _)) => Ok(node),
            None => self.promote().map(|(node, _)| node),
        }
    }

    fn fill(&mut self, n: usize) -> Result<()> {
        while self.pending.len() <= n {
            let promoted = self.promote()?;
            self.pending.push_back(promoted);
        }
        Ok(())
    }

    fn next_raw(&mut self) -> Result<Token> {
        match self.current.take() {
            Some(token) => Ok(token),
            None => self.tokenizer.next_token(),
        }
    }

    fn trivia(&mut self) -> Result<Trivia> {
        let mut trivia = Trivia::default();
        loop {
            let token = self.next_raw()?;
            let kind = match token.kind {
                WHITESPACE => TriviaPieceKind::Whitespace,
                TAB => TriviaPieceKind::Tab,
                NEWLINE => TriviaPieceKind::Newline,
                _ => {
                    self.current = Some(token);
                    return Ok(trivia);
                }
            };
            trivia.push(TriviaPiece::new(kind, token.range.len()));
        }
    }

    fn promote(&mut self) -> Result<(SyntaxNode, TextRange)> {
        let leading = self.trivia()?;
        let token = self.next_raw()?;
        let trailing = if token.kind == EOF { Trivia::default() } else { self.trivia()? };

        let mut text = token.text(self.tokenizer.source());
        if token.kind == STRING {
            text = &text[1..text.len() - 1];
        }

        let syntax = SyntaxToken::new(text)
            .with_value(token.value)
            .with_leading(leading)
            .with_trailing(trailing);
        Ok((SyntaxNode::token(token.kind, syntax), token.range))
    }
}

#[cfg(test)]
mod tests {
    use carve_syntax::SyntaxKind;

    use super::*;

    fn reader(text: &str) -> NodeReader<'_> {
        NodeReader::new(Tokenizer::new(text))
    }

    fn kind_and_text(node: &SyntaxNode) -> (SyntaxKind, String) {
        (node.kind(), node.text().unwrap_or_default().to_owned())
    }

    #[test]
    fn trivia_is_attached_to_terminals() {
        let mut reader = reader("  class\tFoo \r\n{");

        let class = reader.read().unwrap();
        let token = class.as_token().unwrap();
        assert_eq!(token.leading().to_string(), "  ");
        assert_eq!(token.text(), "class");
        assert_eq!(token.trailing().to_string(), "\t");

        let name = reader.read().unwrap();
        assert_eq!(name.as_token().unwrap().trailing().to_string(), " \r\n");
        assert!(name.as_token().unwrap().has_trailing(TriviaPieceKind::Newline));

        assert_eq!(reader.read().unwrap().kind(), LEFT_BRACE);
        let eof = reader.read().unwrap();
        assert_eq!(eof.kind(), EOF);
        assert!(eof.as_token().unwrap().trailing().is_empty());
        assert_eq!(reader.read().unwrap().kind(), EOF);
    }

    #[test]
    fn repeated_peeks_do_not_advance() {
        let mut reader = reader("a b c");
        assert_eq!(kind_and_text(reader.peek(2).unwrap()), (IDENT, "c".to_owned()));
        assert_eq!(kind_and_text(reader.peek(2).unwrap()), (IDENT, "c".to_owned()));
        assert_eq!(kind_and_text(reader.peek(0).unwrap()), (IDENT, "a".to_owned()));
        assert_eq!(reader.range(1).unwrap(), TextRange::new(2.into(), 3.into()));

        let read: Vec<_> = (0..4).map(|_| kind_and_text(&reader.read().unwrap())).collect();
        assert_eq!(
            read,
            [
                (IDENT, "a".to_owned()),
                (IDENT, "b".to_owned()),
                (IDENT, "c".to_owned()),
                (EOF, String::new()),
            ]
        );
    }

    #[test]
    fn reads_interleave_with_peeks() {
        let mut reader = reader("a b c d");
        reader.peek(1).unwrap();
        assert_eq!(reader.read().unwrap().text(), Some("a"));
        assert_eq!(reader.peek(1).unwrap().text(), Some("c"));
        assert_eq!(reader.read().unwrap().text(), Some("b"));
        assert_eq!(reader.read().unwrap().text(), Some("c"));
        assert_eq!(reader.read().unwrap().text(), Some("d"));
    }

    #[test]
    fn strings_lose_quotes_but_keep_value() {
        let mut reader = reader("\"0x10\" 42");
        let string = reader.read().unwrap();
        assert_eq!(string.kind(), STRING);
        assert_eq!(string.text(), Some("0x10"));
        assert_eq!(string.reconstruct(), "\"0x10\" ");

        let number = reader.read().unwrap();
        assert_eq!(number.value(), Some(carve_syntax::Number::Int(42)));
    }

    #[test]
    fn trivia_only_input_round_trips() {
        let mut reader = reader(" \n\t");
        let eof = reader.read().unwrap();
        assert_eq!(eof.kind(), EOF);
        assert_eq!(eof.reconstruct(), " \n\t");
    }
}
