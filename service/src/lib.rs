//! Service is the LIMS client: typed queries and commands over the LIMS API,
//! backed by a shared in-memory query cache, plus the worklist state
//! coordinator driving the accession worklist.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod cache;
pub mod command;
pub mod domain;
pub mod infra;
pub mod navigate;
pub mod notify;
pub mod query;
pub mod read;
pub mod worklist;

use std::{rc::Rc, time};

use derive_more::Debug;
use smart_default::SmartDefault;

#[cfg(doc)]
use infra::Api;

pub use self::{
    cache::QueryCache, command::Command, navigate::Navigator,
    notify::Notifier, query::Query,
};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Artificial delay applied to worklist fetches, to exercise loading
    /// states.
    pub artificial_delay: Option<time::Duration>,

    /// Interval between simulated upload progress ticks.
    #[default(time::Duration::from_millis(200))]
    pub upload_progress_interval: time::Duration,
}

/// LIMS client service.
#[derive(Clone, Debug)]
pub struct Service<Api> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Api`] of this [`Service`].
    api: Api,

    /// [`QueryCache`] shared by all clones of this [`Service`].
    cache: QueryCache,

    /// [`Navigator`] of this [`Service`].
    #[debug(skip)]
    navigator: Rc<dyn Navigator>,
}

impl<Api> Service<Api> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, api: Api, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            config,
            api,
            cache: QueryCache::new(),
            navigator,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Api`] of this [`Service`].
    #[must_use]
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Returns [`QueryCache`] of this [`Service`].
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Returns [`Navigator`] of this [`Service`].
    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        &*self.navigator
    }
}
