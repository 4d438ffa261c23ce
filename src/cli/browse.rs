use std::{fmt, path::PathBuf};

use clap::Parser;
use dialoguer::{Input, Select};
use opbrowse::{
    Document, HttpFetcher, NavigationController, NavigationError, OperationName,
    SelectionEvents, ServiceName, save_document,
};
use tracing::instrument;

use super::{
    Session,
    show::print_document,
    terminal::{self, Colorize},
};

/// Number of entries a picker shows at once, as in a dropdown.
const PICKER_HEIGHT: usize = 20;

#[derive(Debug, Parser)]
#[command(about = "Interactively pick a service and operation and view its sample request")]
pub struct Browse {
    /// Print documents without highlighting
    #[arg(long)]
    plain: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    AnotherOperation,
    Search,
    Save,
    AnotherService,
    Quit,
}

impl Action {
    const ALL: [Self; 5] = [
        Self::AnotherOperation,
        Self::Search,
        Self::Save,
        Self::AnotherService,
        Self::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AnotherOperation => "Choose another operation",
            Self::Search => "Fetch again",
            Self::Save => "Save document to a file",
            Self::AnotherService => "Choose another service",
            Self::Quit => "Quit",
        })
    }
}

/// What to do once the current service's operations are left.
enum Next {
    AnotherService,
    Quit,
}

impl Browse {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let catalog = session.catalog()?;
        if catalog.is_empty() {
            println!("The catalog lists no services.");
            return Ok(());
        }

        let mut navigator = session.navigator(&catalog)?;
        let services: Vec<&ServiceName> = catalog.services().collect();

        loop {
            let Some(index) = Select::new()
                .with_prompt(format!("Select web service ({})", catalog.version()))
                .items(&services)
                .default(0)
                .max_length(PICKER_HEIGHT)
                .interact_opt()?
            else {
                return Ok(());
            };

            let operations = navigator.on_service_selected(services[index])?.to_vec();
            match self.pick_operations(session, &mut navigator, &operations)? {
                Next::AnotherService => {}
                Next::Quit => return Ok(()),
            }
        }
    }

    fn pick_operations(
        &self,
        session: &Session,
        navigator: &mut NavigationController<'_, HttpFetcher>,
        operations: &[OperationName],
    ) -> anyhow::Result<Next> {
        loop {
            let Some(index) = Select::new()
                .with_prompt("Select operation")
                .items(operations)
                .default(0)
                .max_length(PICKER_HEIGHT)
                .interact_opt()?
            else {
                return Ok(Next::AnotherService);
            };

            let operation = &operations[index];
            let spinner = terminal::spinner(format!("Fetching {operation}"));
            let result = navigator.on_operation_selected(operation);
            spinner.finish_and_clear();
            if !self.report(session, result) {
                continue;
            }

            loop {
                let action = Select::new()
                    .with_prompt("Next")
                    .items(&Action::ALL)
                    .default(0)
                    .interact_opt()?
                    .map_or(Action::AnotherOperation, |i| Action::ALL[i]);

                match action {
                    Action::AnotherOperation => break,
                    Action::Search => {
                        let spinner = terminal::spinner(format!("Fetching {operation}"));
                        let result = navigator.on_search_requested();
                        spinner.finish_and_clear();
                        self.report(session, result);
                    }
                    Action::Save => save_current(navigator)?,
                    Action::AnotherService => return Ok(Next::AnotherService),
                    Action::Quit => return Ok(Next::Quit),
                }
            }
        }
    }

    /// Prints a fetched document, or a warning if the fetch failed. Returns
    /// whether a document was shown.
    fn report(&self, session: &Session, result: Result<&Document, NavigationError>) -> bool {
        match result {
            Ok(document) => {
                print_document(session, document, self.plain);
                true
            }
            Err(error) => {
                // Per-action failures leave the catalog and prior document intact.
                eprintln!("{}", format!("{:#}", anyhow::Error::from(error)).warning());
                false
            }
        }
    }
}

fn save_current(navigator: &NavigationController<'_, HttpFetcher>) -> anyhow::Result<()> {
    let Some(document) = navigator.document().filter(|document| document.has_content()) else {
        eprintln!("{}", "No content to save!".warning());
        return Ok(());
    };

    let default = format!("{}_Request.xml", document.operation);
    let path: String = Input::new()
        .with_prompt("Save to")
        .default(default)
        .interact_text()?;

    let path = PathBuf::from(path);
    match save_document(&path, &document.text) {
        Ok(()) => println!("{}", format!("Saved to {}", path.display()).success()),
        Err(error) => eprintln!(
            "{}",
            format!("Failed to save {}: {error}", path.display()).warning()
        ),
    }
    Ok(())
}
