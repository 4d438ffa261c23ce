use std::path::PathBuf;

mod browse;
mod config;
mod highlight;
mod list;
mod show;
mod terminal;

use anyhow::Context;
use browse::Browse;
use clap::ArgAction;
use highlight::Highlight;
use list::{Operations, Services};
use opbrowse::{
    Catalog, Config, FileFetcher, HttpFetcher, NavigationController, UrlResolver, load_catalog,
};
use show::{Links, Show};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read the operation directory page from a local file instead of the
    /// network
    #[arg(long, global = true, value_name = "PATH")]
    catalog_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(anyhow::Error::msg)?,
            None => Config::default(),
        };
        let session = Session {
            config,
            catalog_file: self.catalog_file,
        };

        self.command
            .unwrap_or_else(|| Command::Services(Services::default()))
            .run(&session)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries documents and JSON output
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List services in the catalog (default)
    Services(Services),

    /// List the operations of a service
    Operations(Operations),

    /// Print the sample and documentation URLs of an operation
    Links(Links),

    /// Fetch and display the highlighted sample request of an operation
    Show(Show),

    /// Interactively pick services and operations
    Browse(Browse),

    /// Highlight a local markup file, or standard input
    Highlight(Highlight),

    /// Show or write the effective configuration
    Config(config::Command),
}

impl Command {
    fn run(self, session: &Session) -> anyhow::Result<()> {
        match self {
            Self::Services(command) => command.run(session)?,
            Self::Operations(command) => command.run(session)?,
            Self::Links(command) => command.run(session)?,
            Self::Show(command) => command.run(session)?,
            Self::Browse(command) => command.run(session)?,
            Self::Highlight(command) => command.run(session)?,
            Self::Config(command) => command.run(session)?,
        }
        Ok(())
    }
}

/// Startup state shared by every command: the effective configuration and
/// where the catalog page comes from.
#[derive(Debug)]
pub struct Session {
    config: Config,
    catalog_file: Option<PathBuf>,
}

impl Session {
    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> UrlResolver {
        UrlResolver::new(&self.config.docs_base_url)
    }

    pub fn fetcher() -> anyhow::Result<HttpFetcher> {
        HttpFetcher::new().context("failed to initialise HTTP client")
    }

    /// Loads the catalog once. Any failure here is fatal for the command.
    #[instrument(level = "debug", skip(self))]
    pub fn catalog(&self) -> anyhow::Result<Catalog> {
        if let Some(path) = &self.catalog_file {
            let path = path
                .to_str()
                .with_context(|| format!("catalog page path {} is not UTF-8", path.display()))?;
            return load_catalog(&FileFetcher, path)
                .with_context(|| format!("failed to load catalog from {path}"));
        }

        let url = &self.config.catalog_url;
        let fetcher = Self::fetcher()?;
        let spinner = terminal::spinner(format!("Loading catalog from {url}"));
        let catalog = load_catalog(&fetcher, url);
        spinner.finish_and_clear();
        catalog.with_context(|| format!("failed to load catalog from {url}"))
    }

    /// Builds a navigation controller over `catalog`, fetching over HTTP.
    pub fn navigator<'a>(
        &self,
        catalog: &'a Catalog,
    ) -> anyhow::Result<NavigationController<'a, HttpFetcher>> {
        Ok(NavigationController::new(
            catalog,
            self.resolver(),
            Self::fetcher()?,
        ))
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}
