use tracing::debug;

/// Default root under which service samples and documentation are published.
pub const DEFAULT_DOCS_BASE_URL: &str =
    "https://community.workday.com/sites/default/files/file-hosting/productionapi";

/// The URLs associated with a selected operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLinks {
    /// Location of the sample request document.
    pub sample_url: String,
    /// Location of the human-readable documentation page.
    pub doc_url: String,
}

/// A selection that cannot be resolved into URLs or navigated to.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidSelectionError {
    /// One of the URL components was empty.
    #[error("Cannot resolve links: {0} is empty")]
    Empty(&'static str),

    /// The service is not listed in the catalog.
    #[error("Unknown service '{0}'")]
    UnknownService(String),

    /// The operation is not exposed by the selected service.
    #[error("Service '{service}' has no operation '{operation}'")]
    UnknownOperation {
        /// The selected service.
        service: String,
        /// The requested operation.
        operation: String,
    },

    /// An operation was requested before any service was selected.
    #[error("No service selected")]
    NoService,

    /// A fetch was requested before any operation was selected.
    #[error("No operation selected")]
    NoOperation,
}

/// Builds sample and documentation URLs from a version, service and
/// operation.
///
/// Resolution is pure string templating: no normalisation or escaping is
/// applied to the components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    base: String,
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DOCS_BASE_URL)
    }
}

impl UrlResolver {
    /// Creates a resolver rooted at `base`. A trailing `/` is ignored.
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// The root URL links are resolved against.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/{service}/{version}/samples/{operation}_Request.xml`
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSelectionError::Empty`] if any component is empty.
    pub fn sample_url(
        &self,
        version: &str,
        service: &str,
        operation: &str,
    ) -> Result<String, InvalidSelectionError> {
        require_components(version, service, operation)?;
        Ok(format!(
            "{}/{service}/{version}/samples/{operation}_Request.xml",
            self.base
        ))
    }

    /// `{base}/{service}/{version}/{operation}.html`
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSelectionError::Empty`] if any component is empty.
    pub fn doc_url(
        &self,
        version: &str,
        service: &str,
        operation: &str,
    ) -> Result<String, InvalidSelectionError> {
        require_components(version, service, operation)?;
        Ok(format!("{}/{service}/{version}/{operation}.html", self.base))
    }

    /// Resolves both links for a selection.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSelectionError::Empty`] if any component is empty.
    pub fn resolve(
        &self,
        version: &str,
        service: &str,
        operation: &str,
    ) -> Result<ResolvedLinks, InvalidSelectionError> {
        let links = ResolvedLinks {
            sample_url: self.sample_url(version, service, operation)?,
            doc_url: self.doc_url(version, service, operation)?,
        };
        debug!(sample = %links.sample_url, doc = %links.doc_url, "resolved links");
        Ok(links)
    }
}

fn require_components(
    version: &str,
    service: &str,
    operation: &str,
) -> Result<(), InvalidSelectionError> {
    if version.is_empty() {
        return Err(InvalidSelectionError::Empty("version"));
    }
    if service.is_empty() {
        return Err(InvalidSelectionError::Empty("service"));
    }
    if operation.is_empty() {
        return Err(InvalidSelectionError::Empty("operation"));
    }
    Ok(())
}
