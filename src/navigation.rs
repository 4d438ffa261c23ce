//! Selection-driven navigation of a [`Catalog`].
//!
//! The [`NavigationController`] is driven by a front end through the
//! [`SelectionEvents`] interface. Every event runs synchronously to
//! completion: selecting an operation resolves its links, fetches the sample
//! document and highlights it before returning.

use tracing::{debug, instrument, warn};

use crate::{
    domain::{
        Catalog, InvalidSelectionError, OperationName, ResolvedLinks, ServiceName, StyleRegion,
        UrlResolver, highlight,
    },
    storage::{Fetch, NetworkError},
};

/// A failed selection event. The controller's state is left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The selection does not name something in the catalog.
    #[error(transparent)]
    InvalidSelection(#[from] InvalidSelectionError),

    /// The sample document could not be retrieved.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// A fetched sample document with its highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The service the document belongs to.
    pub service: ServiceName,
    /// The operation the document is a sample request for.
    pub operation: OperationName,
    /// Where the document and its documentation live.
    pub links: ResolvedLinks,
    /// The raw markup.
    pub text: String,
    /// Style regions of `text`, in apply order.
    pub regions: Vec<StyleRegion>,
}

impl Document {
    /// Returns `false` if the fetched body is empty or only whitespace.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Callbacks a front end dispatches in response to user actions.
pub trait SelectionEvents {
    /// A service was picked. Clears any operation selection and returns the
    /// service's operations in catalog order.
    ///
    /// # Errors
    ///
    /// Fails if the service is not in the catalog.
    fn on_service_selected(&mut self, service: &str) -> Result<&[OperationName], NavigationError>;

    /// An operation of the selected service was picked. Fetches and
    /// highlights its sample document.
    ///
    /// # Errors
    ///
    /// Fails if no service is selected, the operation is unknown, or the
    /// fetch fails.
    fn on_operation_selected(&mut self, operation: &str) -> Result<&Document, NavigationError>;

    /// The user asked to (re)load the document for the current selection.
    ///
    /// # Errors
    ///
    /// Fails if no operation is selected or the fetch fails.
    fn on_search_requested(&mut self) -> Result<&Document, NavigationError>;
}

/// Holds the current selection and document for a borrowed, immutable
/// [`Catalog`].
#[derive(Debug)]
pub struct NavigationController<'a, F> {
    catalog: &'a Catalog,
    resolver: UrlResolver,
    fetcher: F,
    service: Option<ServiceName>,
    operation: Option<OperationName>,
    document: Option<Document>,
}

impl<'a, F: Fetch> NavigationController<'a, F> {
    /// Creates a controller with nothing selected.
    #[must_use]
    pub const fn new(catalog: &'a Catalog, resolver: UrlResolver, fetcher: F) -> Self {
        Self {
            catalog,
            resolver,
            fetcher,
            service: None,
            operation: None,
            document: None,
        }
    }

    /// The catalog being navigated.
    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// The selected service, if any.
    #[must_use]
    pub const fn selected_service(&self) -> Option<&ServiceName> {
        self.service.as_ref()
    }

    /// The selected operation, if any.
    #[must_use]
    pub const fn selected_operation(&self) -> Option<&OperationName> {
        self.operation.as_ref()
    }

    /// The most recently fetched document, if any.
    #[must_use]
    pub const fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Resolves the links for an operation of the selected service without
    /// fetching anything.
    ///
    /// # Errors
    ///
    /// Fails if no service is selected or the operation is unknown.
    pub fn links(&self, operation: &str) -> Result<ResolvedLinks, InvalidSelectionError> {
        let (service, operation) = self.lookup_operation(operation)?;
        self.resolver.resolve(
            self.catalog.version().as_str(),
            service.as_str(),
            operation.as_str(),
        )
    }

    fn lookup_operation(
        &self,
        operation: &str,
    ) -> Result<(&ServiceName, &'a OperationName), InvalidSelectionError> {
        let service = self.service.as_ref().ok_or(InvalidSelectionError::NoService)?;
        self.catalog
            .operations(service)
            .and_then(|operations| operations.iter().find(|op| op.as_str() == operation))
            .map(|operation| (service, operation))
            .ok_or_else(|| InvalidSelectionError::UnknownOperation {
                service: service.to_string(),
                operation: operation.to_string(),
            })
    }

    /// Fetches and highlights the sample for `operation`, committing the
    /// selection and document only on success.
    fn load(&mut self, operation: &str) -> Result<&Document, NavigationError> {
        let (service, operation) = self.lookup_operation(operation)?;
        let (service, operation) = (service.clone(), operation.clone());
        let links = self
            .resolver
            .resolve(self.catalog.version().as_str(), &service, &operation)?;

        let text = self.fetcher.fetch_text(&links.sample_url).inspect_err(|e| {
            warn!(url = e.url(), "failed to fetch sample document");
        })?;
        let regions = highlight(&text);
        debug!(regions = regions.len(), "loaded sample document");

        self.operation = Some(operation.clone());
        Ok(&*self.document.insert(Document {
            service,
            operation,
            links,
            text,
            regions,
        }))
    }
}

impl<F: Fetch> SelectionEvents for NavigationController<'_, F> {
    #[instrument(level = "debug", skip(self))]
    fn on_service_selected(&mut self, service: &str) -> Result<&[OperationName], NavigationError> {
        let (name, operations) = self
            .catalog
            .service(service)
            .ok_or_else(|| InvalidSelectionError::UnknownService(service.to_string()))?;

        self.service = Some(name.clone());
        self.operation = None;
        Ok(operations)
    }

    #[instrument(level = "debug", skip(self))]
    fn on_operation_selected(&mut self, operation: &str) -> Result<&Document, NavigationError> {
        self.load(operation)
    }

    #[instrument(level = "debug", skip(self))]
    fn on_search_requested(&mut self) -> Result<&Document, NavigationError> {
        let operation = self
            .operation
            .clone()
            .ok_or(InvalidSelectionError::NoOperation)?;
        self.load(&operation)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::domain::StyleKind;

    const PAGE: &str = "<h1>Operation Directory: (v41.2 / Production)</h1><table>\
        <tr><th>Operation</th><th>Description</th><th>Service</th></tr>\
        <tr><td><a>Hire_Employee</a></td><td></td><td><a>Staffing</a></td></tr>\
        <tr><td><a>Terminate_Employee</a></td><td></td><td><a>Staffing</a></td></tr>\
        <tr><td><a>Get_Workers</a></td><td></td><td><a>Human_Resources</a></td></tr>\
        </table>";

    const SAMPLE: &str = r#"<!-- sample --><wd:Hire wd:version="v41.2"/>"#;

    /// Records every requested URL and answers with [`SAMPLE`], or fails while
    /// `offline` is set.
    #[derive(Default)]
    struct Recorder {
        requests: RefCell<Vec<String>>,
        offline: Cell<bool>,
    }

    impl Fetch for Recorder {
        fn fetch_text(&self, url: &str) -> Result<String, NetworkError> {
            self.requests.borrow_mut().push(url.to_string());
            if self.offline.get() {
                Err(NetworkError::new(url, "offline"))
            } else {
                Ok(SAMPLE.to_string())
            }
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_page(PAGE).unwrap()
    }

    fn controller<'a>(
        catalog: &'a Catalog,
        fetcher: &'a Recorder,
    ) -> NavigationController<'a, &'a Recorder> {
        NavigationController::new(catalog, UrlResolver::new("http://docs"), fetcher)
    }

    #[test]
    fn service_selection_lists_operations_in_order() {
        let catalog = catalog();
        let fetcher = Recorder::default();
        let mut nav = controller(&catalog, &fetcher);

        let operations: Vec<String> = nav
            .on_service_selected("Staffing")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(operations, ["Hire_Employee", "Terminate_Employee"]);
        assert!(fetcher.requests.borrow().is_empty());
    }

    #[test]
    fn operation_selection_fetches_exactly_once() {
        let catalog = catalog();
        let fetcher = Recorder::default();
        let mut nav = controller(&catalog, &fetcher);

        nav.on_service_selected("Staffing").unwrap();
        let document = nav.on_operation_selected("Hire_Employee").unwrap();

        assert_eq!(
            document.links.doc_url,
            "http://docs/Staffing/v41.2/Hire_Employee.html"
        );
        assert_eq!(document.text, SAMPLE);
        assert!(document.regions.iter().any(|r| r.kind == StyleKind::Comment));

        let requests = fetcher.requests.borrow();
        assert_eq!(requests.len(), 1);
        let url = &requests[0];
        assert_eq!(url, "http://docs/Staffing/v41.2/samples/Hire_Employee_Request.xml");
        for component in ["Staffing", "v41.2", "Hire_Employee"] {
            assert_eq!(url.matches(component).count(), 1, "{component} in {url}");
        }
    }

    #[test]
    fn unknown_service_is_rejected() {
        let catalog = catalog();
        let fetcher = Recorder::default();
        let mut nav = controller(&catalog, &fetcher);

        let error = nav.on_service_selected("Payroll").unwrap_err();

        assert!(matches!(
            error,
            NavigationError::InvalidSelection(InvalidSelectionError::UnknownService(_))
        ));
        assert!(nav.selected_service().is_none());
    }

    #[test]
    fn operation_requires_a_service() {
        let catalog = catalog();
        let fetcher = Recorder::default();
        let mut nav = controller(&catalog, &fetcher);

        let error = nav.on_operation_selected("Hire_Employee").unwrap_err();

        assert!(matches!(
            error,
            NavigationError::InvalidSelection(InvalidSelectionError::NoService)
        ));
        assert!(fetcher.requests.borrow().is_empty());
    }

    #[test]
    fn operation_must_belong_to_selected_service() {
        let catalog = catalog();
        let fetcher = Recorder::default();
        let mut nav = controller(&catalog, &fetcher);

        nav.on_service_selected("Human_Resources").unwrap();
        let error = nav.on_operation_selected("Hire_Employee").unwrap_err();

        assert!(matches!(
            error,
            NavigationError::InvalidSelection(InvalidSelectionError::UnknownOperation { .. })
        ));
        assert!(fetcher.requests.borrow().is_empty());
    }

    #[test]
    fn service_change_resets_operation() {
        let catalog = catalog();
        let fetcher = Recorder::default();
        let mut nav = controller(&catalog, &fetcher);

        nav.on_service_selected("Staffing").unwrap();
        nav.on_operation_selected("Hire_Employee").unwrap();
        nav.on_service_selected("Human_Resources").unwrap();

        assert!(nav.selected_operation().is_none());
        assert!(matches!(
            nav.on_search_requested(),
            Err(NavigationError::InvalidSelection(InvalidSelectionError::NoOperation))
        ));
    }

    #[test]
    fn search_refetches_current_selection() {
        let catalog = catalog();
        let fetcher = Recorder::default();
        let mut nav = controller(&catalog, &fetcher);

        nav.on_service_selected("Staffing").unwrap();
        nav.on_operation_selected("Terminate_Employee").unwrap();
        let document = nav.on_search_requested().unwrap();

        assert_eq!(document.operation.as_str(), "Terminate_Employee");
        let requests = fetcher.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
    }

    #[test]
    fn failed_fetch_keeps_prior_state() {
        let catalog = catalog();
        let fetcher = Recorder::default();
        let mut nav = controller(&catalog, &fetcher);
        nav.on_service_selected("Staffing").unwrap();
        nav.on_operation_selected("Hire_Employee").unwrap();

        fetcher.offline.set(true);
        let error = nav.on_operation_selected("Terminate_Employee").unwrap_err();

        assert!(matches!(error, NavigationError::Network(_)));
        assert_eq!(nav.selected_operation().unwrap().as_str(), "Hire_Employee");
        assert_eq!(nav.document().unwrap().operation.as_str(), "Hire_Employee");
        assert_eq!(nav.catalog().version().as_str(), "v41.2");
    }

    #[test]
    fn links_do_not_fetch() {
        let catalog = catalog();
        let fetcher = Recorder::default();
        let mut nav = controller(&catalog, &fetcher);
        nav.on_service_selected("Human_Resources").unwrap();

        let links = nav.links("Get_Workers").unwrap();

        assert_eq!(
            links.sample_url,
            "http://docs/Human_Resources/v41.2/samples/Get_Workers_Request.xml"
        );
        assert!(fetcher.requests.borrow().is_empty());
    }

    #[test]
    fn blank_body_has_no_content() {
        struct Blank;

        impl Fetch for Blank {
            fn fetch_text(&self, _url: &str) -> Result<String, NetworkError> {
                Ok(" \n\t ".to_string())
            }
        }

        let catalog = catalog();
        let mut nav = NavigationController::new(&catalog, UrlResolver::new("http://docs"), Blank);
        nav.on_service_selected("Staffing").unwrap();

        let document = nav.on_operation_selected("Hire_Employee").unwrap();

        assert!(!document.has_content());
        assert!(document.regions.is_empty());
    }

    #[test]
    fn fetched_sample_has_content() {
        let catalog = catalog();
        let fetcher = Recorder::default();
        let mut nav = controller(&catalog, &fetcher);
        nav.on_service_selected("Staffing").unwrap();

        assert!(nav.on_operation_selected("Hire_Employee").unwrap().has_content());
    }
}
