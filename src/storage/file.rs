use tracing::{debug, instrument};

use super::{Fetch, NetworkError};

/// A [`Fetch`] implementation that treats each location as a local file
/// path, used to build a catalog from a saved copy of the directory page.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl Fetch for FileFetcher {
    #[instrument(level = "debug", skip(self))]
    fn fetch_text(&self, path: &str) -> Result<String, NetworkError> {
        let text = std::fs::read_to_string(path).map_err(|e| NetworkError::new(path, e))?;
        debug!(bytes = text.len(), "read local page");
        Ok(text)
    }
}
