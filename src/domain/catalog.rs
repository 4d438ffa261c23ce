//! The parsed service → operations catalog.
//!
//! The catalog page is an HTML document whose first table lists one
//! operation per row. The first cell links to the operation and the third
//! cell links to the service that owns it.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::LazyLock,
};

use scraper::{ElementRef, Html, Selector};
use tracing::{instrument, warn};

use crate::domain::{
    name::{OperationName, ServiceName},
    version::{Version, VersionNotFoundError, extract_version},
};

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("table selector is valid"));
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("row selector is valid"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("cell selector is valid"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("link selector is valid"));

/// Column holding the operation link.
const OPERATION_CELL: usize = 0;
/// Column holding the service link.
const SERVICE_CELL: usize = 2;

/// Errors raised while building a [`Catalog`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The page carries no version anchor, so no URL can be resolved.
    #[error(transparent)]
    Version(#[from] VersionNotFoundError),

    /// The page contains no table to read operations from.
    #[error("Catalog page contains no table of operations")]
    Format,

    /// The catalog page could not be retrieved.
    #[error("Catalog source is unavailable")]
    SourceUnavailable(#[from] crate::storage::NetworkError),
}

/// An immutable mapping from service name to the operations it exposes,
/// together with the API version the catalog was published for.
///
/// Services iterate in lexicographic order. Operations within a service keep
/// the order in which they appeared in the source table, and every operation
/// belongs to exactly one service. Every service referenced by a well-formed
/// row has an entry, even when all of its rows repeat operations owned by an
/// earlier service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    version: Version,
    services: BTreeMap<ServiceName, Vec<OperationName>>,
    skipped_rows: usize,
}

impl Catalog {
    /// Builds a catalog from the raw catalog page.
    ///
    /// Rows that lack an operation or service link, or that repeat an
    /// operation already seen, are skipped and counted rather than failing
    /// the whole build. A service entry is created on first sight, before the
    /// duplicate check.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Version`] if the version anchor is missing
    /// - [`CatalogError::Format`] if the page contains no table
    #[instrument(level = "debug", skip_all)]
    pub fn from_page(page: &str) -> Result<Self, CatalogError> {
        let version = extract_version(page)?;

        let document = Html::parse_document(page);
        let table = document.select(&TABLE).next().ok_or(CatalogError::Format)?;

        let mut services: BTreeMap<ServiceName, Vec<OperationName>> = BTreeMap::new();
        let mut seen = BTreeSet::new();
        let mut skipped_rows = 0;

        // The first row is the header.
        for (index, row) in table.select(&ROW).enumerate().skip(1) {
            let Some((service, operation)) = parse_row(row) else {
                warn!(row = index, "skipping catalog row without operation and service links");
                skipped_rows += 1;
                continue;
            };

            let operations = services.entry(service).or_default();
            if !seen.insert(operation.clone()) {
                warn!(row = index, %operation, "skipping duplicate catalog operation");
                skipped_rows += 1;
                continue;
            }
            operations.push(operation);
        }

        Ok(Self {
            version,
            services,
            skipped_rows,
        })
    }

    /// The API version this catalog was published for.
    #[must_use]
    pub const fn version(&self) -> &Version {
        &self.version
    }

    /// Iterates over the service names in lexicographic order.
    pub fn services(&self) -> impl Iterator<Item = &ServiceName> {
        self.services.keys()
    }

    /// Iterates over each service with its operations, services sorted.
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceName, &[OperationName])> {
        self.services
            .iter()
            .map(|(service, operations)| (service, operations.as_slice()))
    }

    /// Looks up a service, returning the catalog's own name for it together
    /// with its operations.
    #[must_use]
    pub fn service(&self, service: &str) -> Option<(&ServiceName, &[OperationName])> {
        self.services
            .get_key_value(service)
            .map(|(name, operations)| (name, operations.as_slice()))
    }

    /// Returns the operations of a service, in source-table order.
    #[must_use]
    pub fn operations(&self, service: &str) -> Option<&[OperationName]> {
        self.services.get(service).map(Vec::as_slice)
    }

    /// Returns the service exposing the given operation.
    #[must_use]
    pub fn service_of(&self, operation: &str) -> Option<&ServiceName> {
        self.services
            .iter()
            .find(|(_, operations)| operations.iter().any(|op| op.as_str() == operation))
            .map(|(service, _)| service)
    }

    /// The number of distinct services.
    #[must_use]
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// The number of operations across all services.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.services.values().map(Vec::len).sum()
    }

    /// The number of table rows dropped as malformed or duplicated.
    #[must_use]
    pub const fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Returns `true` if the catalog lists no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

fn parse_row(row: ElementRef<'_>) -> Option<(ServiceName, OperationName)> {
    let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
    let operation = first_link_text(cells.get(OPERATION_CELL)?)?;
    let service = first_link_text(cells.get(SERVICE_CELL)?)?;
    Some((
        ServiceName::new(&service).ok()?,
        OperationName::new(&operation).ok()?,
    ))
}

fn first_link_text(cell: &ElementRef<'_>) -> Option<String> {
    cell.select(&LINK).next().map(|link| link.text().collect())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    const HEADING: &str = "<h1>Operation Directory: (v41.2 / Production)</h1>";

    fn row(operation: &str, service: &str) -> String {
        format!(
            "<tr><td><a href=\"op.html\">{operation}</a></td><td>desc</td>\
             <td><a href=\"svc.html\">{service}</a></td></tr>"
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body>{HEADING}<table>\
             <tr><th>Operation</th><th>Description</th><th>Service</th></tr>\
             {}</table></body></html>",
            rows.concat()
        )
    }

    fn names<T: AsRef<str>>(items: &[T]) -> Vec<&str> {
        items.iter().map(AsRef::as_ref).collect()
    }

    #[test]
    fn builds_services_and_operations() {
        let page = page(&[
            row("Hire_Employee", "Staffing"),
            row("Get_Workers", "Human_Resources"),
            row(" Terminate_Employee ", " Staffing "),
        ]);

        let catalog = Catalog::from_page(&page).unwrap();

        assert_eq!(catalog.version().as_str(), "v41.2");
        assert_eq!(catalog.service_count(), 2);
        assert_eq!(catalog.operation_count(), 3);
        assert_eq!(
            names(catalog.operations("Staffing").unwrap()),
            ["Hire_Employee", "Terminate_Employee"]
        );
        assert_eq!(catalog.skipped_rows(), 0);
    }

    #[test]
    fn services_sorted_but_operations_in_document_order() {
        let page = page(&[
            row("Put_Zebra", "Zoo"),
            row("Get_Apple", "Orchard"),
            row("Add_Aardvark", "Zoo"),
        ]);

        let catalog = Catalog::from_page(&page).unwrap();

        let services: Vec<&str> = catalog.services().map(ServiceName::as_str).collect();
        assert_eq!(services, ["Orchard", "Zoo"]);
        assert_eq!(
            names(catalog.operations("Zoo").unwrap()),
            ["Put_Zebra", "Add_Aardvark"]
        );
    }

    #[test]
    fn header_row_is_not_an_operation() {
        let page = format!(
            "{HEADING}<table>{}{}</table>",
            row("Header_Op", "Header_Service"),
            row("Real_Op", "Real_Service")
        );

        let catalog = Catalog::from_page(&page).unwrap();

        assert!(catalog.operations("Header_Service").is_none());
        assert_eq!(names(catalog.operations("Real_Service").unwrap()), ["Real_Op"]);
    }

    #[test_case("<tr><td>No_Link</td><td></td><td><a>Staffing</a></td></tr>" ; "missing operation link")]
    #[test_case("<tr><td><a>Hire</a></td><td></td><td>Staffing</td></tr>" ; "missing service link")]
    #[test_case("<tr><td><a>Hire</a></td><td></td></tr>" ; "missing third cell")]
    #[test_case("<tr><td><a>  </a></td><td></td><td><a>Staffing</a></td></tr>" ; "blank operation text")]
    fn malformed_rows_are_skipped(malformed: &str) {
        let page = page(&[row("Get_Workers", "Human_Resources"), malformed.to_string()]);

        let catalog = Catalog::from_page(&page).unwrap();

        assert_eq!(catalog.operation_count(), 1);
        assert_eq!(catalog.skipped_rows(), 1);
    }

    #[test]
    fn duplicate_operation_keeps_first_service() {
        let page = page(&[
            row("Get_Workers", "Human_Resources"),
            row("Get_Workers", "Staffing"),
        ]);

        let catalog = Catalog::from_page(&page).unwrap();

        assert_eq!(catalog.service_of("Get_Workers").unwrap().as_str(), "Human_Resources");
        assert_eq!(catalog.operation_count(), 1);
        assert_eq!(catalog.skipped_rows(), 1);
    }

    #[test]
    fn every_referenced_service_is_listed() {
        let page = page(&[
            row("Get_Workers", "Human_Resources"),
            row("Get_Workers", "Staffing"),
            row("Get_Workers", "Human_Resources"),
        ]);

        let catalog = Catalog::from_page(&page).unwrap();

        assert_eq!(catalog.service_count(), 2);
        let services: Vec<&str> = catalog.services().map(ServiceName::as_str).collect();
        assert_eq!(services, ["Human_Resources", "Staffing"]);
        assert_eq!(names(catalog.operations("Human_Resources").unwrap()), ["Get_Workers"]);
        assert!(catalog.operations("Staffing").unwrap().is_empty());
        assert_eq!(catalog.skipped_rows(), 2);
    }

    #[test]
    fn service_lookup_returns_catalog_name() {
        let page = page(&[row("Hire_Employee", "Staffing")]);

        let catalog = Catalog::from_page(&page).unwrap();

        let (name, operations) = catalog.service("Staffing").unwrap();
        assert_eq!(name.as_str(), "Staffing");
        assert_eq!(names(operations), ["Hire_Employee"]);
        assert!(catalog.service("Payroll").is_none());
    }

    #[test]
    fn operation_totals_never_exceed_rows() {
        let rows = vec![
            row("A", "One"),
            row("B", "Two"),
            row("C", "One"),
            "<tr><td>broken</td></tr>".to_string(),
            row("D", "Three"),
        ];
        let page = page(&rows);

        let catalog = Catalog::from_page(&page).unwrap();

        assert_eq!(catalog.service_count(), 3);
        assert!(catalog.operation_count() <= rows.len());
        assert_eq!(catalog.operation_count() + catalog.skipped_rows(), rows.len());
    }

    #[test]
    fn only_first_table_is_read() {
        let page = format!(
            "{HEADING}<table><tr><th>h</th></tr>{}</table>\
             <table><tr><th>h</th></tr>{}</table>",
            row("First", "Alpha"),
            row("Second", "Beta")
        );

        let catalog = Catalog::from_page(&page).unwrap();

        assert_eq!(catalog.service_count(), 1);
        assert!(catalog.operations("Beta").is_none());
    }

    #[test]
    fn missing_table_is_a_format_error() {
        let result = Catalog::from_page(&format!("<html>{HEADING}<p>nothing</p></html>"));
        assert!(matches!(result, Err(CatalogError::Format)));
    }

    #[test]
    fn missing_version_is_an_error() {
        let page = page(&[row("Hire_Employee", "Staffing")]).replace(HEADING, "");
        let result = Catalog::from_page(&page);
        assert!(matches!(result, Err(CatalogError::Version(_))));
    }

    #[test]
    fn empty_table_yields_empty_catalog() {
        let catalog = Catalog::from_page(&page(&[])).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.services().count(), 0);
    }
}
