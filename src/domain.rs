//! Domain models for catalog browsing.
//!
//! This module contains the core domain types: the service catalog and its
//! version, URL resolution for a selected operation, and markup highlighting.

/// Service catalog parsed from the operation directory page.
pub mod catalog;
pub use catalog::{Catalog, CatalogError};

mod config;
pub use config::{Config, DEFAULT_CATALOG_URL};

/// Structural highlighting of markup text.
pub mod highlight;
pub use highlight::{Segment, StyleKind, StyleRegion, highlight, layer};

mod links;
pub use links::{DEFAULT_DOCS_BASE_URL, InvalidSelectionError, ResolvedLinks, UrlResolver};

/// Validated service and operation names.
pub mod name;
pub use name::{InvalidNameError, OperationName, ServiceName};

mod palette;
pub use palette::{InvalidColorError, Palette, Rgb};

/// API version extraction.
pub mod version;
pub use version::{InvalidVersionError, Version, VersionNotFoundError, extract_version};
