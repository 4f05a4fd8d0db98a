//! Domain definitions.
//!
//! These mirror the DTOs exposed by the LIMS API; the server owns them and the
//! client never changes them locally.

pub mod accession;
pub mod container;
pub mod organization;
pub mod patient;
pub mod user;

pub use self::{
    accession::Accession, container::Container, organization::Organization,
    patient::Patient,
};

/// Defines a UUID-backed ID type.
macro_rules! define_id {
    ($(#[doc = $doc:literal])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Clone,
            Copy,
            Debug,
            ::serde::Deserialize,
            ::derive_more::Display,
            Eq,
            ::derive_more::From,
            ::derive_more::FromStr,
            Hash,
            ::derive_more::Into,
            Ord,
            PartialEq,
            PartialOrd,
            ::serde::Serialize,
        )]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Creates a new random ID.
            #[must_use]
            pub fn new() -> Self {
                Self(::uuid::Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

pub(crate) use define_id;
