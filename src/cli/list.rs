use clap::Parser;
use opbrowse::{Catalog, domain::InvalidSelectionError};
use serde_json::json;
use tracing::instrument;

use super::{OutputFormat, Session, terminal::Colorize};

#[derive(Debug, Parser, Default)]
#[command(about = "List services in the catalog with their operation counts")]
pub struct Services {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Services {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let catalog = session.catalog()?;

        match self.output {
            OutputFormat::Table => Self::output_table(&catalog),
            OutputFormat::Json => Self::output_json(&catalog)?,
        }
        Ok(())
    }

    fn output_table(catalog: &Catalog) {
        if catalog.is_empty() {
            println!("The catalog lists no services.");
            return;
        }

        let width = catalog.services().map(|s| s.len()).max().unwrap_or(0);
        println!(
            "{}",
            format!(
                "{} services, {} operations ({})",
                catalog.service_count(),
                catalog.operation_count(),
                catalog.version()
            )
            .dim()
        );
        for (service, operations) in catalog.iter() {
            println!("{service:<width$}  {}", operations.len());
        }
        if catalog.skipped_rows() > 0 {
            eprintln!(
                "{}",
                format!("{} malformed catalog rows skipped", catalog.skipped_rows()).warning()
            );
        }
    }

    fn output_json(catalog: &Catalog) -> anyhow::Result<()> {
        let services: Vec<_> = catalog
            .iter()
            .map(|(service, operations)| {
                json!({ "name": service.as_str(), "operations": operations.len() })
            })
            .collect();
        let output = json!({
            "version": catalog.version().as_str(),
            "services": services,
            "skipped_rows": catalog.skipped_rows(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "List the operations of a service in catalog order")]
pub struct Operations {
    /// The service to list operations for
    service: String,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Operations {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let catalog = session.catalog()?;
        let operations = catalog
            .operations(&self.service)
            .ok_or_else(|| InvalidSelectionError::UnknownService(self.service.clone()))?;

        match self.output {
            OutputFormat::Table => {
                for operation in operations {
                    println!("{operation}");
                }
            }
            OutputFormat::Json => {
                let names: Vec<&str> = operations.iter().map(|op| op.as_str()).collect();
                let output = json!({ "service": self.service, "operations": names });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }
}
