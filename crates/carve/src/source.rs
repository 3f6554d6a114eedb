use anyhow::Context;
use camino::Utf8PathBuf;
use carve_errors::{Error, Renderer};

/// A file loaded for parsing, kept around to render diagnostics against.
pub(crate) struct SourceFile {
    pub(crate) path: Utf8PathBuf,
    pub(crate) text: String,
}

impl SourceFile {
    pub(crate) fn read(path: Utf8PathBuf) -> anyhow::Result<Self> {
        let text =
            std::fs::read_to_string(&path).with_context(|| format!("failed to read `{path}`"))?;
        Ok(Self { path, text })
    }

    /// Prints the error, with a source snippet when it points into this file.
    pub(crate) fn report(&self, error: &Error, renderer: &Renderer) {
        if let Some(diagnostic) = error.diagnostic() {
            eprintln!("{}", diagnostic.render(renderer, self.path.as_str(), &self.text));
        } else {
            eprintln!("{}: {error}", self.path);
        }
    }
}
