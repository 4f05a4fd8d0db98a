//! [`Feed`] of worklist pages.

use std::{cell::RefCell, rc::Rc};

use common::Loadable;
use tracerr::Traced;
use tracing as log;

use crate::{
    cache::{key::ACCESSIONS, QueryKey, Subscription},
    infra::api,
    query::{self, Query},
    read::accession,
    Service,
};

use super::Store;

/// Loading state of a worklist page.
pub type PageState = Loadable<Rc<accession::list::Page>, api::Error>;

/// Fetcher of the worklist pages described by a [`Store`].
///
/// Every fetch is tagged with the [`QueryKey`] it was issued for, and its
/// result is discarded if the [`Store`] has moved on to another query
/// meanwhile.
#[derive(Debug)]
pub struct Feed<Api> {
    /// [`Service`] to fetch pages with.
    service: Service<Api>,

    /// [`Store`] describing the pages to fetch.
    store: Rc<Store>,

    /// Latest applied fetch.
    latest: RefCell<Latest>,
}

/// Latest fetch applied to a [`Feed`].
#[derive(Debug, Default)]
struct Latest {
    /// [`Subscription`] keeping the shown page cached.
    subscription: Option<Subscription>,

    /// [`PageState`] of the shown page.
    state: PageState,
}

impl<Api> Feed<Api> {
    /// Creates a new [`Feed`] of the pages described by the provided
    /// [`Store`].
    #[must_use]
    pub fn new(service: Service<Api>, store: Rc<Store>) -> Self {
        Self {
            service,
            store,
            latest: RefCell::default(),
        }
    }

    /// Returns the [`Store`] of this [`Feed`].
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the [`PageState`] of the latest applied fetch.
    #[must_use]
    pub fn state(&self) -> PageState {
        self.latest.borrow().state.clone()
    }

    /// Returns the [`QueryKey`] of the currently shown page, if any.
    #[must_use]
    pub fn key(&self) -> Option<QueryKey> {
        self.latest
            .borrow()
            .subscription
            .as_ref()
            .map(|s| s.key().clone())
    }
}

impl<Api> Feed<Api>
where
    Service<Api>: Query<
        query::accessions::List,
        Ok = Rc<accession::list::Page>,
        Err = Traced<api::Error>,
    >,
{
    /// Fetches the page of the current [`Store`] query.
    ///
    /// Returns `false` if the fetched result was discarded, because the
    /// [`Store`] query has changed while fetching.
    pub async fn refresh(&self) -> bool {
        let params = self.store.effective_query();
        let key = ACCESSIONS.list(&params);
        {
            let mut latest = self.latest.borrow_mut();
            let subscription = self.service.cache().subscribe(key.clone());
            latest.subscription = Some(subscription);
            latest.state = Loadable::Loading;
        }

        let result = self
            .service
            .execute(query::accessions::List(params))
            .await
            .map_err(|e| AsRef::<api::Error>::as_ref(&e).clone());

        if ACCESSIONS.list(&self.store.effective_query()) != key {
            log::debug!("discarding stale worklist page {key}");
            return false;
        }
        let mut latest = self.latest.borrow_mut();
        if latest.subscription.as_ref().map(Subscription::key) != Some(&key) {
            log::debug!("discarding superseded worklist page {key}");
            return false;
        }
        latest.state = Loadable::from_result(result);
        true
    }
}
