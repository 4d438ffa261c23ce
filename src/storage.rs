//! Retrieval of the catalog and sample documents, and saving documents to
//! disk.

mod document;
mod file;
mod http;

pub use document::save_document;
pub use file::FileFetcher;
pub use http::{Fetch, HttpFetcher, NetworkError};
use tracing::{info, instrument};

use crate::domain::{Catalog, CatalogError};

/// Fetches the catalog page at `url` and builds a [`Catalog`] from it.
///
/// `url` is whatever location `fetcher` understands: an HTTP URL for
/// [`HttpFetcher`], a file path for [`FileFetcher`].
///
/// # Errors
///
/// - [`CatalogError::SourceUnavailable`] if the page cannot be fetched
/// - [`CatalogError::Version`] or [`CatalogError::Format`] if the page cannot
///   be interpreted
#[instrument(level = "debug", skip(fetcher))]
pub fn load_catalog<F: Fetch>(fetcher: &F, url: &str) -> Result<Catalog, CatalogError> {
    let page = fetcher.fetch_text(url)?;
    let catalog = Catalog::from_page(&page)?;
    info!(
        version = %catalog.version(),
        services = catalog.service_count(),
        operations = catalog.operation_count(),
        skipped_rows = catalog.skipped_rows(),
        "loaded catalog"
    );
    Ok(catalog)
}
