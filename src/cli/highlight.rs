use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use opbrowse::highlight;
use tracing::instrument;

use super::{Session, terminal};

#[derive(Debug, Parser)]
#[command(about = "Highlight a local markup file, or standard input")]
pub struct Highlight {
    /// The file to highlight. Reads standard input when omitted
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Colored text
    #[default]
    Pretty,
    /// Uncolored text
    Plain,
    /// Style regions as JSON
    Json,
}

impl Highlight {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let text = match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => io::read_to_string(io::stdin()).context("failed to read standard input")?,
        };

        let regions = highlight(&text);

        match self.output {
            OutputFormat::Pretty | OutputFormat::Plain => {
                let colored =
                    matches!(self.output, OutputFormat::Pretty) && terminal::supports_color();
                print!(
                    "{}",
                    terminal::paint(&text, &regions, &session.config().palette, colored)
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&regions)?);
            }
        }
        Ok(())
    }
}
