use std::fmt::{self, Display};
use std::io;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
use camino::Utf8PathBuf;
pub use text_size::{TextRange, TextSize};

/// A message attached to the source range that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}", self.message, self.range)
    }
}

/// Fatal failures of a single parse.
///
/// Lexical and grammar errors abort the parse they occur in; nothing is
/// recovered. Whether other inputs keep going is up to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lex(Diagnostic),
    #[error("parse error: {0}")]
    Parse(Diagnostic),
    #[error("failed to read `{path}`")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn lex(message: impl Into<String>, range: TextRange) -> Self {
        Self::Lex(Diagnostic::error(message, range))
    }

    pub fn parse(message: impl Into<String>, range: TextRange) -> Self {
        Self::Parse(Diagnostic::error(message, range))
    }

    /// The diagnostic behind a lexical or grammar error.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Lex(diagnostic) | Self::Parse(diagnostic) => Some(diagnostic),
            Self::Io { .. } => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
