//! Recursive-descent parser producing lossless syntax trees.
//!
//! Any deviation from the supported declaration grammar aborts the parse with
//! a diagnostic; there is no recovery.

use camino::Utf8Path;
use carve_errors::{Error, Result};
use carve_syntax::SyntaxNode;
use carve_tokenizer::Tokenizer;
use text_size::{TextRange, TextSize};

mod grammar;
mod parser;
mod reader;

pub use reader::NodeReader;

use crate::parser::Parser;

/// Parses a whole source file into a `COMPILATION_UNIT` tree.
pub fn parse_unit(text: &str) -> Result<SyntaxNode> {
    let mut parser = Parser::new(Tokenizer::new(text));
    grammar::items::compilation_unit(&mut parser)
}

/// Parses the single class declaration that starts at byte `offset`.
///
/// Only the declaration is tokenized, so this stays cheap on large inputs.
/// Diagnostic ranges are relative to the whole `text`.
pub fn parse_declaration_at(text: &str, offset: usize) -> Result<SyntaxNode> {
    let start = TextSize::try_from(offset).ok();
    let tokenizer = start.and_then(|start| Tokenizer::at_offset(text, start));
    let Some(tokenizer) = tokenizer else {
        let end = TextSize::try_from(text.len()).unwrap_or_default();
        return Err(Error::parse(
            format!("declaration offset {offset} is not a character boundary of the input"),
            TextRange::empty(end),
        ));
    };

    tracing::debug!(offset, "parsing declaration");
    let mut parser = Parser::new(tokenizer);
    grammar::classes::class(&mut parser)
}

/// Byte offset of the first occurrence of `needle`, typically a declaration
/// header like `public class Foo`.
pub fn declaration_offset(text: &str, needle: &str) -> Option<usize> {
    text.find(needle)
}

/// Reads and parses the file at `path`.
pub fn parse_file(path: &Utf8Path) -> Result<SyntaxNode> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| Error::Io { path: path.to_owned(), source })?;
    parse_unit(&text)
}
