mod source;

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use carve_errors::Renderer;
use carve_syntax::SyntaxNode;
use carve_syntax::ast::{AstNode as _, CompilationUnit};
use clap::{Parser, Subcommand};
use source::SourceFile;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Lossless parser for generated class declarations")]
struct Options {
    /// Log parser decisions. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the syntax tree of a file.
    Dump { path: Utf8PathBuf },
    /// Parse every file and report the ones that cannot be read or parsed.
    Check {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
    },
    /// Pull a single class declaration out of a larger file.
    Extract {
        path: Utf8PathBuf,
        /// Text the declaration starts with, e.g. `public class Foo`.
        #[arg(long)]
        marker: String,
        /// Write the declaration here instead of stdout.
        #[arg(long)]
        output: Option<Utf8PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    let default_level = if options.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let renderer = Renderer::styled();

    match options.command {
        Command::Dump { path } => {
            let file = SourceFile::read(path)?;
            let tree = parse(&file, &renderer)?;
            print!("{}", tree.debug_tree());
        }
        Command::Check { paths } => {
            let failures = check(&paths, &renderer);
            if failures > 0 {
                bail!("{failures} of {} files failed to parse", paths.len());
            }
        }
        Command::Extract { path, marker, output } => {
            let file = SourceFile::read(path)?;
            let offset = carve_parse::declaration_offset(&file.text, &marker)
                .with_context(|| format!("`{marker}` does not occur in `{}`", file.path))?;

            let class = match carve_parse::parse_declaration_at(&file.text, offset) {
                Ok(class) => class,
                Err(error) => {
                    file.report(&error, &renderer);
                    bail!("failed to parse the declaration at offset {offset}");
                }
            };

            match output {
                Some(output) => class
                    .write_to(&output)
                    .with_context(|| format!("failed to write `{output}`"))?,
                None => print!("{class}"),
            }
        }
    }

    Ok(())
}

fn parse(file: &SourceFile, renderer: &Renderer) -> anyhow::Result<SyntaxNode> {
    carve_parse::parse_unit(&file.text).or_else(|error| {
        file.report(&error, renderer);
        bail!("failed to parse `{}`", file.path)
    })
}

/// Parses every file, reporting the ones that cannot be read or parsed.
/// Returns how many failed.
fn check(paths: &[Utf8PathBuf], renderer: &Renderer) -> usize {
    let mut failures = 0;

    for path in paths {
        let file = match SourceFile::read(path.clone()) {
            Ok(file) => file,
            Err(error) => {
                eprintln!("{error:#}");
                failures += 1;
                continue;
            }
        };

        match carve_parse::parse_unit(&file.text) {
            Ok(tree) => println!("{}: {}", file.path, summary(&tree)),
            Err(error) => {
                file.report(&error, renderer);
                failures += 1;
            }
        }
    }

    failures
}

fn summary(tree: &SyntaxNode) -> String {
    let Some(unit) = CompilationUnit::cast(tree) else { return String::new() };
    let classes = unit.all_classes().count();
    let members: usize = unit.all_classes().map(|class| class.members().count()).sum();
    format!("{classes} classes, {members} members")
}
