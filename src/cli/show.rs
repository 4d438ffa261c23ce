use std::path::PathBuf;

use clap::Parser;
use opbrowse::{Document, SelectionEvents, save_document};
use tracing::instrument;

use super::{
    Session,
    terminal::{self, Colorize},
};

#[derive(Debug, Parser)]
#[command(about = "Print the sample and documentation URLs of an operation")]
pub struct Links {
    /// The service exposing the operation
    service: String,

    /// The operation to resolve
    operation: String,
}

impl Links {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let catalog = session.catalog()?;
        let mut navigator = session.navigator(&catalog)?;

        navigator.on_service_selected(&self.service)?;
        let links = navigator.links(&self.operation)?;

        println!("sample: {}", links.sample_url);
        println!("docs:   {}", links.doc_url);
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "Fetch and display the highlighted sample request of an operation")]
pub struct Show {
    /// The service exposing the operation
    service: String,

    /// The operation whose sample request to display
    operation: String,

    /// Also save the sample document to this file
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Print the document without highlighting
    #[arg(long)]
    plain: bool,
}

impl Show {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let catalog = session.catalog()?;
        let mut navigator = session.navigator(&catalog)?;

        navigator.on_service_selected(&self.service)?;
        let spinner = terminal::spinner(format!("Fetching {}", self.operation));
        let result = navigator.on_operation_selected(&self.operation);
        spinner.finish_and_clear();
        let document = result?;

        print_document(session, document, self.plain);

        if let Some(path) = &self.save {
            save_document(path, &document.text)?;
            println!("{}", format!("Saved to {}", path.display()).success());
        }
        Ok(())
    }
}

/// Prints a highlighted document followed by its documentation link.
pub fn print_document(session: &Session, document: &Document, plain: bool) {
    let colored = !plain && terminal::supports_color();
    println!(
        "{}",
        terminal::paint(
            &document.text,
            &document.regions,
            &session.config().palette,
            colored
        )
    );
    println!();
    println!("{} {}", "Documentation:".dim(), document.links.doc_url.info());
}
