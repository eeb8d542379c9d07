//! yaml2json CLI: convert YAML from a file or stdin to pretty-printed JSON.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use yaml2json::convert_stream;

#[derive(Debug, Parser)]
#[command(name = "yaml2json")]
#[command(about = "Convert multi-document YAML to pretty-printed JSON", long_about = None)]
#[command(version)]
#[command(after_help = "Examples:\n  yaml2json foo.yaml\n  cat foo.yaml | yaml2json")]
struct Cli {
    /// Input YAML file (reads from stdin if omitted)
    filename: Option<PathBuf>,
}

/// Print usage to stderr. Asking for usage is not an error, so callers
/// follow this with a zero exit.
fn usage_to_stderr() {
    let help = Cli::command().render_help();
    eprint!("{help}");
}

fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.filename {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            convert_stream(file, &mut out)?;
        }
        None => {
            if atty::is(atty::Stream::Stdin) {
                // No file argument and nothing piped in.
                usage_to_stderr();
                return Ok(());
            }
            let stdin = io::stdin();
            convert_stream(stdin.lock(), &mut out)?;
        }
    }

    out.flush().context("failed to write output")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            eprint!("{}", err.render());
            return Ok(());
        }
        Err(err) => err.exit(),
    };

    run(cli)
}
