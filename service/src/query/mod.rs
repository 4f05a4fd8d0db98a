//! [`Query`] definition.
//!
//! Every [`Query`] is served through the [`QueryCache`], keyed by the
//! [`cache::key`] registry, so concurrent identical queries share a single
//! request and a single cached result.
//!
//! [`QueryCache`]: crate::QueryCache

pub mod accession;
pub mod accessions;
pub mod containers;
pub mod organization;
pub mod organizations;
pub mod user;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;

#[cfg(doc)]
use crate::cache;
