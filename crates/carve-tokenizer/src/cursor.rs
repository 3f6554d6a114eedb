use std::str::Chars;

use text_size::{TextLen, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

pub(crate) struct Cursor<'a> {
    chars: Chars<'a>,
    len: TextSize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { chars: text.chars(), len: text.text_len() }
    }

    pub(crate) fn len_remaining(&self) -> TextSize {
        self.chars.as_str().text_len()
    }

    pub(crate) fn pos_within_token(&self) -> TextSize {
        self.len - self.len_remaining()
    }

    pub(crate) fn reset_pos_within_token(&mut self) {
        self.len = self.len_remaining();
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn advance(&mut self) -> char {
        self.chars.next().unwrap_or(EOF_CHAR)
    }

    /// Consumes the next character if it is `expected`.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        let matches = !self.is_eof() && self.peek() == expected;
        if matches {
            self.advance();
        }
        matches
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }
}
