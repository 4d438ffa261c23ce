use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{links::DEFAULT_DOCS_BASE_URL, palette::Palette};

/// Default location of the operation directory page.
pub const DEFAULT_CATALOG_URL: &str = "https://community.workday.com/sites/default/files/file-hosting/productionapi/operations/index.html";

/// Configuration for catalog browsing.
///
/// This struct holds the endpoints the catalog and sample documents are
/// retrieved from, and the colours used when rendering highlighted markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The page listing every operation, and the source of the API version.
    pub catalog_url: String,

    /// The root that sample and documentation URLs are built under.
    ///
    /// For example, a base of `https://host/api` resolves the sample for
    /// `Staffing/Hire_Employee` at version `v41.2` to
    /// `https://host/api/Staffing/v41.2/samples/Hire_Employee_Request.xml`.
    pub docs_base_url: String,

    /// Foreground colours for tags, attributes and comments.
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            docs_base_url: default_docs_base_url(),
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))
    }
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_docs_base_url() -> String {
    DEFAULT_DOCS_BASE_URL.to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_catalog_url")]
        catalog_url: String,

        #[serde(default = "default_docs_base_url")]
        docs_base_url: String,

        #[serde(default)]
        palette: Palette,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                catalog_url,
                docs_base_url,
                palette,
            } => Self {
                catalog_url,
                docs_base_url,
                palette,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            catalog_url: config.catalog_url,
            docs_base_url: config.docs_base_url,
            palette: config.palette,
        }
    }
}
