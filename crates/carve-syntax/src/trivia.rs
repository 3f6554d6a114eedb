//! Trivia pieces attached to tokens.

use std::fmt;

use text_size::TextSize;

/// Kinds of trivia stored alongside tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Whitespace,
    Tab,
    /// Either `\n` (length 1) or `\r\n` (length 2).
    Newline,
}

/// A trivia fragment with its kind and length.
///
/// The text is fully determined by the two: a run of spaces, a run of tabs,
/// or a single line break.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    /// Creates a new trivia piece with the given kind and length.
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }
}

impl fmt::Display for TriviaPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = u32::from(self.len);
        match self.kind {
            TriviaPieceKind::Whitespace => (0..len).try_for_each(|_| f.write_str(" ")),
            TriviaPieceKind::Tab => (0..len).try_for_each(|_| f.write_str("\t")),
            TriviaPieceKind::Newline if len == 2 => f.write_str("\r\n"),
            TriviaPieceKind::Newline => f.write_str("\n"),
        }
    }
}

/// An ordered run of trivia owned by one token, either before or after it.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Trivia {
    pieces: Vec<TriviaPiece>,
}

impl Trivia {
    /// Splits `text` into trivia pieces, or returns `None` if it holds anything
    /// other than spaces, tabs and line breaks.
    pub fn from_text(text: &str) -> Option<Self> {
        let mut pieces = Vec::new();
        let mut rest = text;

        while let Some(first) = rest.chars().next() {
            let (kind, len) = match first {
                ' ' => (TriviaPieceKind::Whitespace, run_len(rest, ' ')),
                '\t' => (TriviaPieceKind::Tab, run_len(rest, '\t')),
                '\n' => (TriviaPieceKind::Newline, 1),
                '\r' if rest[1..].starts_with('\n') => (TriviaPieceKind::Newline, 2),
                _ => return None,
            };

            pieces.push(TriviaPiece::new(kind, TextSize::try_from(len).ok()?));
            rest = &rest[len..];
        }

        Some(Self { pieces })
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        &self.pieces
    }

    pub fn push(&mut self, piece: TriviaPiece) {
        self.pieces.push(piece);
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Total length in bytes.
    pub fn len(&self) -> TextSize {
        self.pieces.iter().map(|piece| piece.len).sum()
    }

    pub fn contains(&self, kind: TriviaPieceKind) -> bool {
        self.pieces.iter().any(|piece| piece.kind == kind)
    }
}

fn run_len(text: &str, c: char) -> usize {
    text.len() - text.trim_start_matches(c).len()
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pieces.iter().try_for_each(|piece| piece.fmt(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_round_trips() {
        for text in ["", " ", "    ", "\t\t", "\r\n        ", "\n\n  \t \r\n"] {
            let trivia = Trivia::from_text(text).unwrap();
            assert_eq!(trivia.to_string(), text);
            assert_eq!(u32::from(trivia.len()) as usize, text.len());
        }
    }

    #[test]
    fn from_text_groups_runs() {
        let trivia = Trivia::from_text("  \t\r\n\n").unwrap();
        let kinds: Vec<_> =
            trivia.pieces().iter().map(|piece| (piece.kind, u32::from(piece.len))).collect();
        assert_eq!(
            kinds,
            vec![
                (TriviaPieceKind::Whitespace, 2),
                (TriviaPieceKind::Tab, 1),
                (TriviaPieceKind::Newline, 2),
                (TriviaPieceKind::Newline, 1),
            ]
        );
        assert!(trivia.contains(TriviaPieceKind::Newline));
    }

    #[test]
    fn from_text_rejects_significant_text() {
        assert_eq!(Trivia::from_text(" x "), None);
        assert_eq!(Trivia::from_text("\r"), None);
    }
}
