//! [`Api`] implementations of the [`Rest`] client.
//!
//! [`Api`]: crate::infra::Api
//! [`Rest`]: super::Rest

mod accession;
mod container;
mod organization;
mod user;
