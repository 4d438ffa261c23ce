use std::{fs, io, path::Path};

use tracing::{info, instrument};

/// Writes a fetched document to `path`.
///
/// Parent directories are created automatically if they don't exist. An
/// existing file is overwritten.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be written.
#[instrument(level = "debug", skip(text))]
pub fn save_document(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    info!(bytes = text.len(), path = %path.display(), "saved document");
    Ok(())
}
