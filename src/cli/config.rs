use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use super::{Session, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show the effective configuration, or write it to a file")]
pub struct Command {
    /// Write the configuration to this TOML file instead of printing it
    #[arg(long, value_name = "PATH")]
    write: Option<PathBuf>,
}

impl Command {
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let config = session.config();

        match &self.write {
            Some(path) => {
                config
                    .save(path)
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("{}", format!("Wrote {}", path.display()).success());
            }
            None => print!("{}", config.to_toml().map_err(anyhow::Error::msg)?),
        }
        Ok(())
    }
}
