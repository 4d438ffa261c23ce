use reqwest::blocking::{Client, Response};
use tracing::{debug, instrument};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A transport failure, non-success status or unreadable file while fetching
/// a location.
#[derive(Debug, thiserror::Error)]
#[error("Failed to fetch {url}")]
pub struct NetworkError {
    url: String,
    #[source]
    cause: BoxError,
}

impl NetworkError {
    /// Creates an error for `url` caused by `cause`.
    pub fn new(url: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self {
            url: url.into(),
            cause: cause.into(),
        }
    }

    /// The URL that could not be fetched.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Retrieves the text body of a URL.
pub trait Fetch {
    /// Fetches `url` and returns its body as text.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] on any transport failure or non-2xx status.
    fn fetch_text(&self, url: &str) -> Result<String, NetworkError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch_text(&self, url: &str) -> Result<String, NetworkError> {
        (**self).fetch_text(url)
    }
}

/// A blocking HTTP [`Fetch`] implementation.
///
/// No request timeout is applied, so a hung server blocks the caller until
/// the transport itself gives up.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a fresh HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    fn fetch_text(&self, url: &str) -> Result<String, NetworkError> {
        let body = self
            .client
            .get(url)
            .send()
            .and_then(Response::error_for_status)
            .and_then(Response::text)
            .map_err(|e| NetworkError::new(url, e))?;
        debug!(bytes = body.len(), "fetched");
        Ok(body)
    }
}
