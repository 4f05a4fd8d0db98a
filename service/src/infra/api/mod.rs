//! [`Api`]-related implementations.

pub mod rest;

use std::{error, sync::Arc};

use derive_more::{Display, Error as StdError};

pub use self::rest::Rest;

/// Remote LIMS API operation.
pub use common::Handler as Api;

/// [`Api`] error.
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// Session is missing or expired, and the user is being redirected to
    /// login.
    #[display("authentication required")]
    Unauthorized,

    /// Server responded with an unsuccessful status.
    #[display(
        "request failed with `{status}`{}",
        detail_suffix(detail.as_deref())
    )]
    Status {
        /// Status of the response.
        status: http::StatusCode,

        /// Detail message provided by the server, if any.
        detail: Option<String>,
    },

    /// `x-pagination` response header is missing or malformed.
    #[display("invalid pagination metadata: {_0}")]
    Pagination(PaginationError),

    /// Failed to encode a request body or decode a response body.
    #[display("JSON error: {_0}")]
    Json(Arc<serde_json::Error>),

    /// Failed to perform the request at all.
    #[display("transport error: {_0}")]
    Transport(Arc<dyn error::Error + Send + Sync>),
}

impl Error {
    /// Creates a new [`Error::Transport`] out of the provided error.
    pub fn transport(err: impl error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the message to show the user about this [`Error`].
    ///
    /// [`None`] is returned for [`Error::Unauthorized`], since it's handled by
    /// redirecting to login instead.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        Some(match self {
            Self::Unauthorized => return None,
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Status {
                status,
                detail: None,
            } => format!("Request failed with status {}", status.as_u16()),
            Self::Pagination(_) => {
                "Received invalid paging information from the server".into()
            }
            Self::Json(_) => "Received an unreadable response".into(),
            Self::Transport(_) => {
                "Unable to reach the server, please try again".into()
            }
        })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(Arc::new(err))
    }
}

/// Formats the optional server detail for [`Error::Status`].
fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(": {d}")).unwrap_or_default()
}

/// Error of reading the `x-pagination` response header.
#[derive(Clone, Debug, Display, StdError)]
pub enum PaginationError {
    /// Header is absent.
    #[display("`x-pagination` header is missing")]
    Missing,

    /// Header value is not a visible ASCII string.
    #[display("`x-pagination` header is not a string")]
    NotText,

    /// Header value is not a consistent pagination JSON object.
    #[display("`x-pagination` header is malformed: {_0}")]
    Malformed(Arc<serde_json::Error>),
}

impl From<PaginationError> for Error {
    fn from(err: PaginationError) -> Self {
        Self::Pagination(err)
    }
}
