//! In-memory [`QueryCache`].
//!
//! The cache is shared by every clone of a [`Service`] and is only mutated
//! through its own operations:
//! - [`QueryCache::fetch()`] stores successful results and deduplicates
//!   concurrent requests of the same [`QueryKey`];
//! - [`QueryCache::invalidate()`] evicts everything under a [`QueryKey`]
//!   prefix;
//! - [`Subscription`]s keep entries alive while somebody shows them.
//!
//! [`Service`]: crate::Service

pub mod key;

use std::{
    any::Any,
    cell::RefCell,
    collections::HashMap,
    future::Future,
    rc::{Rc, Weak},
};

use derive_more::Debug;
use futures::{
    future::{LocalBoxFuture, Shared},
    FutureExt as _,
};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::infra::api;

pub use self::key::{Keys, QueryKey};

/// Type-erased outcome of a query, shareable between its waiters.
type Outcome = Result<Rc<dyn Any>, api::Error>;

/// In-flight query request, shareable between its waiters.
type Request = Shared<LocalBoxFuture<'static, Outcome>>;

/// Default number of values kept for [`QueryKey`]s nobody subscribed to.
pub const UNOBSERVED_CAPACITY: usize = 64;

/// In-memory cache of query results.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    /// Shared state of this [`QueryCache`].
    inner: Rc<RefCell<Inner>>,
}

/// Shared state of a [`QueryCache`].
#[derive(Debug, SmartDefault)]
struct Inner {
    /// Cached entries.
    entries: HashMap<QueryKey, Entry>,

    /// Counter of started requests, identifying them.
    requests: u64,

    /// Maximum number of values kept without any [`Subscription`].
    #[default(UNOBSERVED_CAPACITY)]
    capacity: usize,
}

/// Entry of a [`QueryCache`].
#[derive(Debug, Default)]
struct Entry {
    /// [`Slot`] of this [`Entry`], if anything was requested.
    slot: Option<Slot>,

    /// Number of active [`Subscription`]s to this [`Entry`].
    subscribers: usize,

    /// Indicator whether the last [`Subscription`] of this [`Entry`] was
    /// dropped while its request was in flight.
    released: bool,
}

/// Contents of an [`Entry`].
#[derive(Debug)]
enum Slot {
    /// Request is in flight.
    Pending {
        /// Number of the request.
        id: u64,

        /// The request itself.
        #[debug(skip)]
        request: Request,
    },

    /// Request has succeeded.
    Ready {
        /// Number of the request the value was obtained by.
        id: u64,

        /// The obtained value.
        #[debug(skip)]
        value: Rc<dyn Any>,
    },
}

impl QueryCache {
    /// Creates a new empty [`QueryCache`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty [`QueryCache`] keeping at most `capacity` values
    /// nobody is subscribed to.
    ///
    /// Once exceeded, the least recently requested of such values are
    /// evicted.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                capacity,
                ..Inner::default()
            })),
        }
    }

    /// Returns the value cached under the provided [`QueryKey`], or runs the
    /// provided `producer` to obtain it.
    ///
    /// If a request of the same [`QueryKey`] is already in flight, it's
    /// awaited instead of running the `producer`. Failed requests are not
    /// cached.
    ///
    /// # Errors
    ///
    /// If the request fails.
    ///
    /// # Panics
    ///
    /// If the same [`QueryKey`] is used for values of different types.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: QueryKey,
        producer: F,
    ) -> Result<Rc<T>, Traced<api::Error>>
    where
        T: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, Traced<api::Error>>> + 'static,
    {
        let existing = self.inner.borrow().slot(&key).map(|slot| match slot {
            Slot::Pending { request, .. } => Err(request.clone()),
            Slot::Ready { value, .. } => Ok(Rc::clone(value)),
        });

        let request = match existing {
            Some(Ok(value)) => {
                log::trace!("query {key} served from cache");
                return Ok(downcast(&key, value));
            }
            Some(Err(request)) => {
                log::debug!("query {key} joined in-flight request");
                request
            }
            None => {
                log::debug!("query {key} requested");
                self.start(key.clone(), producer())
            }
        };

        request
            .await
            .map(|value| downcast(&key, value))
            .map_err(|e| tracerr::new!(e))
    }

    /// Starts a new request of the provided [`QueryKey`].
    fn start<T, Fut>(&self, key: QueryKey, fut: Fut) -> Request
    where
        T: 'static,
        Fut: Future<Output = Result<T, Traced<api::Error>>> + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.requests += 1;
        let id = inner.requests;

        let cache = Rc::downgrade(&self.inner);
        let settle_key = key.clone();
        let request = async move {
            let outcome: Outcome = fut
                .await
                .map(|v| -> Rc<dyn Any> { Rc::new(v) })
                .map_err(|e| AsRef::<api::Error>::as_ref(&e).clone());
            settle(&cache, &settle_key, id, &outcome);
            outcome
        }
        .boxed_local()
        .shared();

        inner.entries.entry(key).or_default().slot = Some(Slot::Pending {
            id,
            request: request.clone(),
        });
        request
    }

    /// Evicts every entry equal to or under the provided `prefix`, returning
    /// the number of evicted entries.
    ///
    /// Requests in flight still resolve for their waiters, but their results
    /// are not stored.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut evicted = 0;
        self.inner.borrow_mut().entries.retain(|key, entry| {
            if !key.starts_with(prefix) || entry.slot.is_none() {
                return true;
            }
            evicted += 1;
            entry.slot = None;
            entry.subscribers > 0
        });
        log::debug!("invalidated {evicted} queries under {prefix}");
        evicted
    }

    /// Returns the value cached under the provided [`QueryKey`], if any.
    ///
    /// [`None`] is returned for requests still in flight and for values of
    /// other types.
    #[must_use]
    pub fn get<T: 'static>(&self, key: &QueryKey) -> Option<Rc<T>> {
        match self.inner.borrow().slot(key)? {
            Slot::Ready { value, .. } => Rc::clone(value).downcast().ok(),
            Slot::Pending { .. } => None,
        }
    }

    /// Indicates whether a request of the provided [`QueryKey`] is in flight.
    #[must_use]
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        matches!(self.inner.borrow().slot(key), Some(Slot::Pending { .. }))
    }

    /// Returns the number of entries holding a value or a request.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .borrow()
            .entries
            .values()
            .filter(|e| e.slot.is_some())
            .count()
    }

    /// Indicates whether this [`QueryCache`] holds no values or requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribes to the entry of the provided [`QueryKey`], keeping it
    /// alive until the returned [`Subscription`] is dropped.
    ///
    /// Once the last [`Subscription`] of an entry is dropped, the entry is
    /// evicted. An entry whose request is still in flight is evicted once the
    /// request settles, so it's still shared by concurrent fetches meanwhile.
    #[must_use]
    pub fn subscribe(&self, key: QueryKey) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let entry = inner.entries.entry(key.clone()).or_default();
        entry.subscribers += 1;
        entry.released = false;
        drop(inner);
        Subscription {
            cache: Rc::downgrade(&self.inner),
            key,
        }
    }
}

impl Inner {
    /// Returns the [`Slot`] of the provided [`QueryKey`], if any.
    fn slot(&self, key: &QueryKey) -> Option<&Slot> {
        self.entries.get(key)?.slot.as_ref()
    }

    /// Evicts the least recently requested values nobody is subscribed to,
    /// so at most `capacity` of them are kept.
    fn trim(&mut self) {
        let mut unobserved = self
            .entries
            .iter()
            .filter_map(|(key, entry)| match entry.slot {
                Some(Slot::Ready { id, .. }) if entry.subscribers == 0 => {
                    Some((id, key.clone()))
                }
                Some(Slot::Ready { .. } | Slot::Pending { .. }) | None => None,
            })
            .collect::<Vec<_>>();
        let excess = unobserved.len().saturating_sub(self.capacity);
        if excess == 0 {
            return;
        }
        unobserved.sort_unstable_by_key(|(id, _)| *id);
        for (_, key) in unobserved.into_iter().take(excess) {
            log::trace!("query {key} evicted: capacity exceeded");
            _ = self.entries.remove(&key);
        }
    }
}

/// Stores the `outcome` of the request `id`, unless it was invalidated or
/// superseded meanwhile.
fn settle(
    cache: &Weak<RefCell<Inner>>,
    key: &QueryKey,
    id: u64,
    outcome: &Outcome,
) {
    let Some(cache) = cache.upgrade() else {
        return;
    };
    let mut inner = cache.borrow_mut();
    let Some(entry) = inner.entries.get_mut(key) else {
        log::debug!("query {key} invalidated while in flight");
        return;
    };
    let is_current = matches!(
        entry.slot,
        Some(Slot::Pending { id: pending, .. }) if pending == id,
    );
    if !is_current {
        log::debug!("query {key} invalidated while in flight");
        return;
    }
    match outcome {
        Ok(_) if entry.released && entry.subscribers == 0 => {
            log::trace!("query {key} evicted: no subscribers left");
            _ = inner.entries.remove(key);
        }
        Ok(value) => {
            entry.slot = Some(Slot::Ready {
                id,
                value: Rc::clone(value),
            });
            inner.trim();
        }
        Err(e) => {
            log::debug!("query {key} failed: {e}");
            entry.slot = None;
            if entry.subscribers == 0 {
                _ = inner.entries.remove(key);
            }
        }
    }
}

/// Downcasts the provided cached `value` of the provided [`QueryKey`].
fn downcast<T: 'static>(key: &QueryKey, value: Rc<dyn Any>) -> Rc<T> {
    value.downcast().unwrap_or_else(|_| {
        panic!("query {key} is cached with a different value type")
    })
}

/// Subscription to a [`QueryCache`] entry.
#[derive(Debug)]
pub struct Subscription {
    /// [`QueryCache`] the entry belongs to.
    #[debug(skip)]
    cache: Weak<RefCell<Inner>>,

    /// [`QueryKey`] of the entry.
    key: QueryKey,
}

impl Subscription {
    /// Returns the [`QueryKey`] of this [`Subscription`].
    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(cache) = self.cache.upgrade() else {
            return;
        };
        let mut inner = cache.borrow_mut();
        let Some(entry) = inner.entries.get_mut(&self.key) else {
            return;
        };
        entry.subscribers = entry.subscribers.saturating_sub(1);
        if entry.subscribers > 0 {
            return;
        }
        if matches!(entry.slot, Some(Slot::Pending { .. })) {
            log::trace!("query {} released while in flight", self.key);
            entry.released = true;
        } else {
            log::trace!("query {} evicted: no subscribers left", self.key);
            _ = inner.entries.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{cell::Cell, rc::Rc};

    use futures::future;
    use tracerr::Traced;

    use super::{key::ACCESSIONS, QueryCache, QueryKey};
    use crate::{infra::api, read::list};

    fn key(page: u32) -> QueryKey {
        ACCESSIONS.list(&list::Params {
            page_number: Some(page),
            ..list::Params::default()
        })
    }

    async fn fetch(
        cache: &QueryCache,
        key: QueryKey,
        calls: &Rc<Cell<u32>>,
        value: u32,
    ) -> Result<Rc<u32>, Traced<api::Error>> {
        let calls = Rc::clone(calls);
        cache
            .fetch(key, move || async move {
                calls.set(calls.get() + 1);
                tokio::task::yield_now().await;
                Ok(value)
            })
            .await
    }

    #[tokio::test]
    async fn deduplicates_concurrent_requests() {
        let cache = QueryCache::new();
        let calls = Rc::new(Cell::new(0));

        let (a, b) = future::join(
            fetch(&cache, key(1), &calls, 1),
            fetch(&cache, key(1), &calls, 2),
        )
        .await;

        assert_eq!(*a.unwrap(), 1);
        assert_eq!(*b.unwrap(), 1);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn serves_cached_values() {
        let cache = QueryCache::new();
        let calls = Rc::new(Cell::new(0));

        _ = fetch(&cache, key(1), &calls, 1).await.unwrap();
        let again = fetch(&cache, key(1), &calls, 2).await.unwrap();

        assert_eq!(*again, 1);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.get::<u32>(&key(1)).as_deref(), Some(&1));
    }

    #[tokio::test]
    async fn invalidates_by_prefix() {
        let cache = QueryCache::new();
        let calls = Rc::new(Cell::new(0));

        _ = fetch(&cache, key(1), &calls, 1).await.unwrap();
        _ = fetch(&cache, key(2), &calls, 2).await.unwrap();
        _ = fetch(&cache, ACCESSIONS.detail("a"), &calls, 3).await.unwrap();

        assert_eq!(cache.invalidate(&ACCESSIONS.lists()), 2);
        assert!(cache.get::<u32>(&key(1)).is_none());
        assert!(cache.get::<u32>(&key(2)).is_none());
        assert!(cache.get::<u32>(&ACCESSIONS.detail("a")).is_some());

        let refetched = fetch(&cache, key(1), &calls, 10).await.unwrap();
        assert_eq!(*refetched, 10);
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn drops_results_of_invalidated_requests() {
        let cache = QueryCache::new();
        let calls = Rc::new(Cell::new(0));

        let (value, ()) =
            future::join(fetch(&cache, key(1), &calls, 1), async {
                assert!(cache.is_fetching(&key(1)));
                _ = cache.invalidate(&ACCESSIONS.all());
            })
            .await;

        assert_eq!(*value.unwrap(), 1);
        assert!(cache.get::<u32>(&key(1)).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn does_not_cache_failures() {
        let cache = QueryCache::new();

        let failed = cache
            .fetch(key(1), || async {
                Err::<u32, _>(tracerr::new!(api::Error::Unauthorized))
            })
            .await;
        assert!(matches!(
            failed.map_err(|e| AsRef::<api::Error>::as_ref(&e).clone()),
            Err(api::Error::Unauthorized),
        ));
        assert!(cache.is_empty());

        let calls = Rc::new(Cell::new(0));
        assert_eq!(*fetch(&cache, key(1), &calls, 5).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn evicts_when_last_subscriber_leaves() {
        let cache = QueryCache::new();
        let calls = Rc::new(Cell::new(0));

        let first = cache.subscribe(key(1));
        let second = cache.subscribe(key(1));
        _ = fetch(&cache, key(1), &calls, 1).await.unwrap();

        drop(first);
        assert!(cache.get::<u32>(&key(1)).is_some());

        drop(second);
        assert!(cache.get::<u32>(&key(1)).is_none());
    }

    #[tokio::test]
    async fn shares_request_released_while_in_flight() {
        let cache = QueryCache::new();
        let calls = Rc::new(Cell::new(0));

        let subscription = cache.subscribe(key(1));
        let (first, second) =
            future::join(fetch(&cache, key(1), &calls, 1), async {
                drop(subscription);
                assert!(cache.is_fetching(&key(1)));
                fetch(&cache, key(1), &calls, 2).await
            })
            .await;

        assert_eq!(*first.unwrap(), 1);
        assert_eq!(*second.unwrap(), 1);
        assert_eq!(calls.get(), 1);
        assert!(cache.is_empty(), "released entry is evicted once settled");
    }

    #[tokio::test]
    async fn resubscribing_while_in_flight_keeps_result() {
        let cache = QueryCache::new();
        let calls = Rc::new(Cell::new(0));

        let first = cache.subscribe(key(1));
        let (value, second) =
            future::join(fetch(&cache, key(1), &calls, 1), async {
                drop(first);
                cache.subscribe(key(1))
            })
            .await;

        assert_eq!(*value.unwrap(), 1);
        assert_eq!(cache.get::<u32>(second.key()).as_deref(), Some(&1));
    }

    #[tokio::test]
    async fn evicts_least_recently_requested_unobserved_values() {
        let cache = QueryCache::with_capacity(2);
        let calls = Rc::new(Cell::new(0));

        let subscription = cache.subscribe(key(1));
        for page in 1..=4 {
            _ = fetch(&cache, key(page), &calls, page).await.unwrap();
        }

        assert_eq!(cache.len(), 3);
        assert!(cache.get::<u32>(subscription.key()).is_some());
        assert!(cache.get::<u32>(&key(2)).is_none());
        assert!(cache.get::<u32>(&key(3)).is_some());
        assert!(cache.get::<u32>(&key(4)).is_some());
    }

    #[tokio::test]
    async fn keeps_subscribed_entries_on_invalidation() {
        let cache = QueryCache::new();
        let calls = Rc::new(Cell::new(0));

        let subscription = cache.subscribe(key(1));
        _ = fetch(&cache, key(1), &calls, 1).await.unwrap();
        _ = cache.invalidate(&ACCESSIONS.lists());

        assert!(cache.get::<u32>(&key(1)).is_none());
        _ = fetch(&cache, key(1), &calls, 2).await.unwrap();
        assert_eq!(cache.get::<u32>(subscription.key()).as_deref(), Some(&2));
    }
}
