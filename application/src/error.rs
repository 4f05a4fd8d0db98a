//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{infra::api, worklist::InvalidPage};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Application [`Error`] shown to the user.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for api::Error {
    fn try_as_error(&self) -> Option<Error> {
        let (code, message) = match self {
            Self::Unauthorized => ("UNAUTHORIZED", self.to_string()),
            Self::Status { status, detail } => (
                match *status {
                    http::StatusCode::NOT_FOUND => "NOT_FOUND",
                    http::StatusCode::FORBIDDEN => "FORBIDDEN",
                    s if s.is_client_error() => "BAD_REQUEST",
                    _ => "SERVER_ERROR",
                },
                detail.clone().unwrap_or_else(|| self.to_string()),
            ),
            Self::Pagination(_) | Self::Json(_) | Self::Transport(_) => {
                return None;
            }
        };
        Some(Error {
            code,
            message,
            backtrace: None,
        })
    }
}

impl AsError for InvalidPage {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "INVALID_PAGE",
            message: self.to_string(),
            backtrace: None,
        })
    }
}

#[cfg(test)]
mod spec {
    use service::{infra::api, worklist::InvalidPage};

    use super::AsError as _;

    #[test]
    fn maps_api_errors() {
        let err = api::Error::Status {
            status: http::StatusCode::UNPROCESSABLE_ENTITY,
            detail: Some("Name is required".into()),
        }
        .as_error();
        assert_eq!(err.code, "BAD_REQUEST");
        assert_eq!(err.to_string(), "[BAD_REQUEST]: Name is required");

        let err = api::Error::Status {
            status: http::StatusCode::NOT_FOUND,
            detail: None,
        }
        .as_error();
        assert_eq!(err.code, "NOT_FOUND");

        let err = api::Error::Pagination(api::PaginationError::Missing)
            .as_error();
        assert_eq!(err.code, "INTERNAL_ERROR");
    }

    #[test]
    fn maps_invalid_page() {
        assert_eq!(InvalidPage::ZeroPageSize.as_error().code, "INVALID_PAGE");
    }
}
