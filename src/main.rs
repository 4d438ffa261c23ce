//! Command-line front end for browsing a web-service operation catalog.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
