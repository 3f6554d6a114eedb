mod cursor;

use carve_errors::{Error, Result};
pub use carve_syntax::SyntaxKind;
use carve_syntax::Number;
use carve_syntax::SyntaxKind::*;
use cursor::Cursor;
use text_size::{TextLen, TextRange, TextSize};

/// One lexeme: its kind, where it sits in the source, and its numeric value
/// for number literals.
///
/// Whitespace, tabs and line breaks come out as tokens of their own; turning
/// them into trivia is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub value: Option<Number>,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range]
    }
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: Cursor::new(text) }
    }

    /// Starts tokenizing at `offset`. Ranges stay relative to the whole `text`.
    ///
    /// Returns `None` if `offset` is out of bounds or not on a char boundary.
    pub fn at_offset(text: &'a str, offset: TextSize) -> Option<Self> {
        let rest = text.get(usize::from(offset)..)?;
        Some(Self { text, cursor: Cursor::new(rest) })
    }

    pub fn source(&self) -> &'a str {
        self.text
    }

    fn offset(&self) -> TextSize {
        self.text.text_len() - self.cursor.len_remaining()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn token_text(&self) -> &'a str {
        &self.text[self.range()]
    }

    /// Lexes the next token. Once the input is exhausted every call yields an
    /// empty `EOF` token.
    pub fn next_token(&mut self) -> Result<Token> {
        if self.cursor.is_eof() {
            return Ok(Token { kind: EOF, range: TextRange::empty(self.offset()), value: None });
        }

        let mut value = None;
        let kind = match self.cursor.advance() {
            ' ' => {
                self.cursor.advance_while(|c| c == ' ');
                WHITESPACE
            }
            '\t' => {
                self.cursor.advance_while(|c| c == '\t');
                TAB
            }
            '\n' => NEWLINE,
            '\r' if self.cursor.eat('\n') => NEWLINE,
            '\r' => CARRIAGE_RETURN,
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '@' => AT,
            '.' => DOT,
            '!' => BANG,
            ':' => COLON,
            ';' => SEMICOLON,
            ',' => COMMA,
            '#' => HASH,
            '|' => PIPE,
            '=' if self.cursor.eat('=') => EQ_EQ,
            '=' if self.cursor.eat('>') => FAT_ARROW,
            '=' => EQ,
            '<' if self.cursor.eat('=') => LT_EQ,
            '<' => LT,
            '>' if self.cursor.eat('=') => GT_EQ,
            '>' => GT,
            '*' if self.cursor.eat('/') => BLOCK_COMMENT_END,
            '*' => STAR,
            '/' if self.cursor.eat('/') => DOUBLE_SLASH,
            '/' if self.cursor.eat('*') => BLOCK_COMMENT_START,
            '/' => SLASH,
            '+' | '-' if self.cursor.peek().is_ascii_digit() => {
                value = Some(self.number()?);
                NUMBER
            }
            '+' if self.cursor.eat('=') => PLUS_EQ,
            '+' => PLUS,
            '-' if self.cursor.eat('=') => MINUS_EQ,
            '-' => MINUS,
            '"' => self.string()?,
            '0'..='9' => {
                value = Some(self.number()?);
                NUMBER
            }
            _ => {
                self.cursor.advance_while(|c| !is_identifier_boundary(c));
                IDENT
            }
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();
        Ok(Token { kind, range, value })
    }

    /// Literal text runs verbatim up to the closing quote; there are no escapes.
    fn string(&mut self) -> Result<SyntaxKind> {
        self.cursor.advance_while(|c| c != '"');
        if !self.cursor.eat('"') {
            return Err(Error::lex("unterminated string literal", self.range()));
        }
        Ok(STRING)
    }

    fn number(&mut self) -> Result<Number> {
        let mut dots = 0;
        loop {
            match self.cursor.peek() {
                '0'..='9' => {}
                '.' if dots == 0 => dots += 1,
                '.' => {
                    self.cursor.advance();
                    let message = "found second decimal point in numeric value";
                    return Err(Error::lex(message, self.range()));
                }
                _ => break,
            }
            self.cursor.advance();
        }

        let text = self.token_text();
        if dots == 0 {
            if let Ok(value) = text.parse::<i32>() {
                return Ok(Number::Int(value));
            }
            return match text.parse::<i64>() {
                Ok(value) => Ok(Number::Long(value)),
                Err(_) => Err(Error::lex("unsupported integer numeric literal", self.range())),
            };
        }

        match text.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(Number::Float(value)),
            _ => match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Number::Double(value)),
                _ => Err(Error::lex("unsupported floating point numeric literal", self.range())),
            },
        }
    }
}

fn is_identifier_boundary(c: char) -> bool {
    matches!(
        c,
        '=' | '<'
            | '>'
            | '-'
            | ' '
            | '.'
            | ','
            | ':'
            | ';'
            | '*'
            | '#'
            | '`'
            | '\n'
            | '\r'
            | '\t'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<(SyntaxKind, &str)> {
        let mut tokenizer = Tokenizer::new(text);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.next_token().unwrap();
            if token.kind == EOF {
                return tokens;
            }
            tokens.push((token.kind, token.text(text)));
        }
    }

    fn single(text: &str) -> Token {
        let mut tokenizer = Tokenizer::new(text);
        let token = tokenizer.next_token().unwrap();
        assert_eq!(tokenizer.next_token().unwrap().kind, EOF, "Input: '{text}'");
        token
    }

    fn lex_error(text: &str) -> String {
        let mut tokenizer = Tokenizer::new(text);
        loop {
            match tokenizer.next_token() {
                Ok(token) if token.kind == EOF => panic!("no error for '{text}'"),
                Ok(_) => {}
                Err(Error::Lex(diagnostic)) => return diagnostic.message().to_owned(),
                Err(other) => panic!("unexpected error {other}"),
            }
        }
    }

    #[test]
    fn integer_widens_on_overflow() {
        assert_eq!(single("2147483647").value, Some(Number::Int(2147483647)));
        assert_eq!(single("2147483648").value, Some(Number::Long(2147483648)));
        assert_eq!(single("0").value, Some(Number::Int(0)));
        assert_eq!(
            lex_error("99999999999999999999"),
            "unsupported integer numeric literal"
        );
    }

    #[test]
    fn fractional_literals() {
        let token = single("1.5");
        assert_eq!(token.kind, NUMBER);
        assert_eq!(token.value, Some(Number::Float(1.5)));

        let huge = format!("{}.5", "9".repeat(40));
        assert!(matches!(single(&huge).value, Some(Number::Double(_))));
    }

    #[test]
    fn second_decimal_point_is_fatal() {
        assert_eq!(lex_error("1.2.3"), "found second decimal point in numeric value");
    }

    #[test]
    fn signed_numbers() {
        assert_eq!(single("-5").value, Some(Number::Int(-5)));
        assert_eq!(single("+7").value, Some(Number::Int(7)));
        assert_eq!(tokens("- 5"), [(MINUS, "-"), (WHITESPACE, " "), (NUMBER, "5")]);
    }

    #[test]
    fn two_char_operators_take_priority() {
        assert_eq!(
            tokens("== => += -= <= >= // /* */"),
            [
                (EQ_EQ, "=="),
                (WHITESPACE, " "),
                (FAT_ARROW, "=>"),
                (WHITESPACE, " "),
                (PLUS_EQ, "+="),
                (WHITESPACE, " "),
                (MINUS_EQ, "-="),
                (WHITESPACE, " "),
                (LT_EQ, "<="),
                (WHITESPACE, " "),
                (GT_EQ, ">="),
                (WHITESPACE, " "),
                (DOUBLE_SLASH, "//"),
                (WHITESPACE, " "),
                (BLOCK_COMMENT_START, "/*"),
                (WHITESPACE, " "),
                (BLOCK_COMMENT_END, "*/"),
            ]
        );
        assert_eq!(
            tokens("=<>*/+-"),
            [(EQ, "="), (LT, "<"), (GT, ">"), (BLOCK_COMMENT_END, "*/"), (PLUS, "+"), (MINUS, "-")]
        );
    }

    #[test]
    fn trivia_runs_and_line_breaks() {
        assert_eq!(
            tokens("a  \t\t\r\nb\n\rc"),
            [
                (IDENT, "a"),
                (WHITESPACE, "  "),
                (TAB, "\t\t"),
                (NEWLINE, "\r\n"),
                (IDENT, "b"),
                (NEWLINE, "\n"),
                (CARRIAGE_RETURN, "\r"),
                (IDENT, "c"),
            ]
        );
    }

    #[test]
    fn identifiers_stop_at_boundaries() {
        assert_eq!(
            tokens("List<int> System.Int32 a+b int? @x"),
            [
                (IDENT, "List"),
                (LT, "<"),
                (IDENT, "int"),
                (GT, ">"),
                (WHITESPACE, " "),
                (IDENT, "System"),
                (DOT, "."),
                (IDENT, "Int32"),
                (WHITESPACE, " "),
                (IDENT, "a+b"),
                (WHITESPACE, " "),
                (IDENT, "int?"),
                (WHITESPACE, " "),
                (AT, "@"),
                (IDENT, "x"),
            ]
        );
    }

    #[test]
    fn hex_looking_comment_text() {
        assert_eq!(tokens("0x10"), [(NUMBER, "0"), (IDENT, "x10")]);
    }

    #[test]
    fn strings_are_verbatim() {
        let text = r#""hello world" "x//y\""#;
        assert_eq!(
            tokens(text),
            [(STRING, r#""hello world""#), (WHITESPACE, " "), (STRING, r#""x//y\""#)]
        );
    }

    #[test]
    fn unterminated_string_is_fatal() {
        assert_eq!(lex_error("x = \"abc"), "unterminated string literal");
    }

    #[test]
    fn at_offset_keeps_absolute_ranges() {
        let text = "using A;\nclass B";
        let mut tokenizer = Tokenizer::at_offset(text, TextSize::new(9)).unwrap();
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, IDENT);
        assert_eq!(token.range, TextRange::new(9.into(), 14.into()));
        assert_eq!(token.text(text), "class");

        assert!(Tokenizer::at_offset(text, TextSize::new(100)).is_none());
        assert!(Tokenizer::at_offset("é", TextSize::new(1)).is_none());
    }

    #[test]
    fn eof_repeats() {
        let mut tokenizer = Tokenizer::new("x");
        assert_eq!(tokenizer.next_token().unwrap().kind, IDENT);
        let eof = tokenizer.next_token().unwrap();
        assert_eq!(eof.kind, EOF);
        assert_eq!(eof.range, TextRange::empty(1.into()));
        assert_eq!(tokenizer.next_token().unwrap().kind, EOF);
    }
}
