//! Observable [`Store`] of the worklist [`State`].

use std::{sync::Arc, time::Duration};

use tokio::sync::watch;
use tracing as log;

use crate::{domain::accession, read::list};

use super::{Column, Debounce, InvalidPage, Sort, State};

/// Observable [`State`] of the accession worklist shared by all its views.
///
/// Typing into the free-text filter goes through a [`Debounce`], so only the
/// last value of a typing burst is committed into the [`State`].
#[derive(Debug)]
pub struct Store {
    /// Channel holding the current [`State`].
    state: Arc<watch::Sender<State>>,

    /// [`Debounce`] committing the free-text filter.
    filter: Debounce<String>,
}

impl Store {
    /// Creates a new [`Store`] starting from the provided [`State`] and
    /// committing the free-text filter after the provided `debounce` delay.
    ///
    /// # Panics
    ///
    /// If called outside of a [Tokio] runtime.
    ///
    /// [Tokio]: https://tokio.rs
    #[must_use]
    pub fn new(initial: State, debounce: Duration) -> Self {
        let state = Arc::new(watch::Sender::new(initial));
        let filter = Debounce::new(debounce, {
            let state = Arc::clone(&state);
            move |value: String| {
                log::debug!("committing worklist filter `{value}`");
                modify(&state, |s| s.commit_free_text_filter(value));
            }
        });
        Self { state, filter }
    }

    /// Returns a copy of the current [`State`].
    #[must_use]
    pub fn snapshot(&self) -> State {
        self.state.borrow().clone()
    }

    /// Returns [`State::effective_query()`] of the current [`State`].
    #[must_use]
    pub fn effective_query(&self) -> list::Params {
        self.state.borrow().effective_query()
    }

    /// Subscribes to changes of the [`State`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<State> {
        self.state.subscribe()
    }

    /// Stores the typed free-text filter and schedules its commit.
    pub fn set_free_text_filter(&self, raw: impl Into<String>) {
        let raw = raw.into();
        modify(&self.state, |s| s.set_free_text_filter(raw.clone()));
        self.filter.push(raw);
    }

    /// Commits the free-text filter right away, discarding the pending one.
    pub fn commit_free_text_filter(&self, value: impl Into<String>) {
        let value = value.into();
        self.filter.cancel();
        modify(&self.state, |s| {
            s.set_free_text_filter(value.clone());
            s.commit_free_text_filter(value);
        });
    }

    /// See [`State::add_status_filter()`].
    pub fn add_status_filter(&self, status: accession::Status) {
        modify(&self.state, |s| s.add_status_filter(status));
    }

    /// See [`State::remove_status_filter()`].
    pub fn remove_status_filter(&self, status: accession::Status) {
        modify(&self.state, |s| s.remove_status_filter(status));
    }

    /// See [`State::clear_all_filters()`].
    ///
    /// The pending free-text filter is discarded too.
    pub fn clear_all_filters(&self) {
        self.filter.cancel();
        modify(&self.state, State::clear_all_filters);
    }

    /// See [`State::set_sort()`].
    pub fn set_sort(&self, sort: Option<Sort>) {
        modify(&self.state, |s| s.set_sort(sort));
    }

    /// See [`State::toggle_sort()`].
    pub fn toggle_sort(&self, column: Column) {
        modify(&self.state, |s| s.toggle_sort(column));
    }

    /// See [`State::set_page()`].
    ///
    /// # Errors
    ///
    /// If the provided `page_number` is zero.
    pub fn set_page(&self, page_number: u32) -> Result<(), InvalidPage> {
        try_modify(&self.state, |s| s.set_page(page_number))
    }

    /// See [`State::set_page_size()`].
    ///
    /// # Errors
    ///
    /// If the provided `page_size` is zero.
    pub fn set_page_size(&self, page_size: u32) -> Result<(), InvalidPage> {
        try_modify(&self.state, |s| s.set_page_size(page_size))
    }

    /// See [`State::reset()`].
    ///
    /// The pending free-text filter is discarded too.
    pub fn reset(&self) {
        self.filter.cancel();
        modify(&self.state, State::reset);
    }
}

/// Applies the provided `change` to the [`State`], notifying subscribers only
/// if it has actually changed.
fn modify(state: &watch::Sender<State>, change: impl FnOnce(&mut State)) {
    _ = state.send_if_modified(|s| {
        let before = s.clone();
        change(s);
        *s != before
    });
}

/// Applies the provided fallible `change` to the [`State`], notifying
/// subscribers only if it has succeeded and actually changed the [`State`].
fn try_modify(
    state: &watch::Sender<State>,
    change: impl FnOnce(&mut State) -> Result<(), InvalidPage>,
) -> Result<(), InvalidPage> {
    let mut result = Ok(());
    _ = state.send_if_modified(|s| {
        let before = s.clone();
        result = change(s);
        *s != before
    });
    result
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use tokio::time;

    use super::{State, Store};
    use crate::domain::accession::Status;

    const DEBOUNCE: Duration = Duration::from_millis(400);

    #[tokio::test(start_paused = true)]
    async fn commits_only_last_typed_value() {
        let store = Store::new(State::default(), DEBOUNCE);
        let mut changes = store.subscribe();

        for raw in ["s", "sm", "smi", "smit", "smith"] {
            store.set_free_text_filter(raw);
            time::sleep(Duration::from_millis(150)).await;
            assert_eq!(store.snapshot().raw_filter(), raw);
            assert_eq!(store.effective_query().filters, None);
        }

        time::sleep(DEBOUNCE).await;
        let state = store.snapshot();
        assert_eq!(state.filter(), "smith");
        assert_eq!(
            store.effective_query().filters.as_deref(),
            Some(
                "accessionNumber|patientFirstName|patientLastName|\
                 organizationName@=*smith",
            ),
        );
        assert!(changes.has_changed().unwrap());
        assert_eq!(changes.borrow_and_update().filter(), "smith");
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_discards_pending_filter() {
        let store = Store::new(State::default(), DEBOUNCE);
        store.add_status_filter(Status::Completed);
        store.set_free_text_filter("smith");
        store.clear_all_filters();

        time::sleep(DEBOUNCE * 2).await;

        assert_eq!(store.snapshot(), State::default());
    }

    #[tokio::test]
    async fn unchanged_state_is_not_broadcast() {
        let store = Store::new(State::default(), DEBOUNCE);
        let mut changes = store.subscribe();
        _ = changes.borrow_and_update();

        store.remove_status_filter(Status::Draft);
        store.set_page(1).unwrap();
        assert!(store.set_page(0).is_err());
        assert!(!changes.has_changed().unwrap());

        store.set_page(2).unwrap();
        assert!(changes.has_changed().unwrap());
    }
}
