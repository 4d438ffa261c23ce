//! Web-service Operation Catalog Browser
//!
//! Parses an operation directory page into a catalog of services and their
//! operations, resolves sample and documentation URLs for a selection, and
//! highlights fetched sample documents.

pub mod domain;
pub use domain::{
    Catalog, CatalogError, Config, OperationName, ResolvedLinks, ServiceName, StyleKind,
    StyleRegion, UrlResolver, Version, highlight,
};

/// Selection-driven navigation of a catalog.
pub mod navigation;
pub use navigation::{Document, NavigationController, NavigationError, SelectionEvents};

/// Retrieval of remote documents and saving them to disk.
pub mod storage;
pub use storage::{Fetch, FileFetcher, HttpFetcher, NetworkError, load_catalog, save_document};
