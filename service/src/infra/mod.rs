//! Infrastructure layer.

pub mod api;

pub use self::api::Api;
#[cfg(feature = "reqwest")]
pub use self::api::rest::Reqwest;
pub use self::api::rest::{self as rest, Rest};
