//! Client-side [`Navigator`] abstractions.

use std::cell::RefCell;

use tracing as log;

/// Client-side navigation.
pub trait Navigator {
    /// Returns the path (with the query string, if any) currently shown.
    fn current_path(&self) -> String;

    /// Navigates to the provided path within the application.
    fn navigate(&self, path: &str);

    /// Leaves the application for the provided URL (e.g. BFF login).
    fn redirect(&self, url: &str);
}

/// In-memory navigation [`History`].
#[derive(Debug)]
pub struct History {
    /// Visited paths, the last one being the current.
    entries: RefCell<Vec<String>>,

    /// URL the application has been redirected to, if any.
    redirect: RefCell<Option<String>>,
}

impl History {
    /// Creates a new [`History`] starting at the provided path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            entries: RefCell::new(vec![path.into()]),
            redirect: RefCell::new(None),
        }
    }

    /// Returns all the visited paths, in order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Returns the URL the application has been redirected to, if any.
    #[must_use]
    pub fn redirected_to(&self) -> Option<String> {
        self.redirect.borrow().clone()
    }
}

impl Navigator for History {
    fn current_path(&self) -> String {
        self.entries.borrow().last().cloned().unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        log::debug!("navigating to `{path}`");
        self.entries.borrow_mut().push(path.to_owned());
    }

    fn redirect(&self, url: &str) {
        log::debug!("redirecting to `{url}`");
        *self.redirect.borrow_mut() = Some(url.to_owned());
    }
}
