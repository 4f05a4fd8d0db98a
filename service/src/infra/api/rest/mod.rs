//! REST [`Api`] implementation.
//!
//! [`Rest`] is the HTTP client wrapper every API call goes through. It owns
//! the cross-cutting response handling:
//! - `401` redirects the user to the BFF login (once until a request
//!   succeeds again);
//! - other unsuccessful responses are surfaced to the user as [`Notification`]s
//!   carrying the server-provided detail message, and then rejected.
//!
//! [`Api`]: crate::infra::Api

#[cfg(feature = "reqwest")]
mod client;
mod impls;
pub mod transport;

use std::{cell::Cell, rc::Rc};

use common::pagination::{Page, Pagination};
use derive_more::Debug;
use serde::{de::DeserializeOwned, Deserialize};
use tracerr::Traced;
use tracing as log;
use url::form_urlencoded;

use crate::{
    infra::api::{self, PaginationError},
    navigate::Navigator,
    notify::{Notification, Notifier},
};

#[cfg(feature = "reqwest")]
pub use self::client::{Config, Reqwest};
pub use self::transport::{Body, File, Request, Response, Transport};

/// Base path of the BFF session endpoints.
pub const BFF_PATH: &str = "/bff";

/// Base path of the domain API endpoints.
pub const API_PATH: &str = "/api";

/// Name of the response header carrying [`Pagination`] metadata.
pub const PAGINATION_HEADER: &str = "x-pagination";

/// REST [`Api`] client over a [`Transport`].
///
/// Cloning is cheap: clones share the [`Transport`] and the login redirect
/// state.
///
/// [`Api`]: crate::infra::Api
#[derive(Debug)]
pub struct Rest<T> {
    /// Shared state of this [`Rest`] client.
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Rest<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Shared state of a [`Rest`] client.
#[derive(Debug)]
struct Inner<T> {
    /// [`Transport`] requests are sent through.
    transport: T,

    /// [`Notifier`] showing failures to the user.
    #[debug(skip)]
    notifier: Rc<dyn Notifier>,

    /// [`Navigator`] performing the login redirect.
    #[debug(skip)]
    navigator: Rc<dyn Navigator>,

    /// Indicator whether the login redirect has been performed since the
    /// last successful response.
    redirected: Cell<bool>,
}

impl<T> Rest<T> {
    /// Creates a new [`Rest`] client.
    #[must_use]
    pub fn new(
        transport: T,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                transport,
                notifier,
                navigator,
                redirected: Cell::new(false),
            }),
        }
    }

    /// Returns the [`Transport`] of this [`Rest`] client.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Redirects the user to login, unless already redirected.
    fn redirect_to_login(&self) {
        if self.inner.redirected.replace(true) {
            log::debug!("login redirect already performed");
            return;
        }
        let url = login_url(&self.inner.navigator.current_path());
        log::info!("session is missing or expired, redirecting to `{url}`");
        self.inner.navigator.redirect(&url);
    }

    /// Shows the provided [`api::Error`] to the user, if it should be shown.
    fn report(&self, err: &api::Error) {
        if let Some(message) = err.user_message() {
            log::warn!("API request failed: {err}");
            self.inner.notifier.notify(Notification::error(message));
        }
    }

    /// Reports the provided [`api::Error`] and wraps it into [`Traced`].
    fn fail(&self, err: api::Error) -> Traced<api::Error> {
        self.report(&err);
        tracerr::new!(err)
    }
}

impl<T: Transport> Rest<T> {
    /// Sends the provided [`Request`] and returns its successful [`Response`].
    ///
    /// # Errors
    ///
    /// If the [`Request`] fails or its [`Response`] is unsuccessful.
    pub async fn send(
        &self,
        request: Request,
    ) -> Result<Response, Traced<api::Error>> {
        let method = request.method.clone();
        let path = request.path.clone();
        log::debug!("`{method} {path}` sending");

        let response = self
            .inner
            .transport
            .send(request)
            .await
            .inspect_err(|e| self.report(e.as_ref()))
            .map_err(tracerr::wrap!())?;
        log::debug!("`{method} {path}` responded with `{}`", response.status);

        let status = response.status;
        if status.is_success() {
            self.inner.redirected.set(false);
            return Ok(response);
        }
        if status == http::StatusCode::UNAUTHORIZED {
            self.redirect_to_login();
            return Err(tracerr::new!(api::Error::Unauthorized));
        }
        Err(self.fail(api::Error::Status {
            status,
            detail: problem_detail(&response.body),
        }))
    }

    /// Sends the provided [`Request`] discarding the [`Response`] body.
    ///
    /// # Errors
    ///
    /// See [`Rest::send()`].
    pub async fn send_empty(
        &self,
        request: Request,
    ) -> Result<(), Traced<api::Error>> {
        self.send(request)
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }

    /// Sends the provided [`Request`] and decodes its JSON [`Response`] body.
    ///
    /// # Errors
    ///
    /// See [`Rest::send()`]. Also errors if the body cannot be decoded.
    pub async fn send_json<R: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<R, Traced<api::Error>> {
        let response = self.send(request).await.map_err(tracerr::wrap!())?;
        self.decode(&response.body)
    }

    /// Sends the provided [`Request`] and decodes a [`Page`] out of its
    /// [`Response`].
    ///
    /// [`Pagination`] is read from the [`PAGINATION_HEADER`], which must be
    /// present and consistent.
    ///
    /// # Errors
    ///
    /// See [`Rest::send_json()`]. Also errors if the [`PAGINATION_HEADER`] is
    /// missing or malformed.
    pub async fn send_page<R: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<Page<R>, Traced<api::Error>> {
        let response = self.send(request).await.map_err(tracerr::wrap!())?;
        let pagination =
            pagination(&response.headers).map_err(|e| self.fail(e.into()))?;
        let items = self.decode(&response.body)?;
        Ok(Page::new(items, pagination))
    }

    /// Decodes the provided JSON `body`.
    fn decode<R: DeserializeOwned>(
        &self,
        body: &[u8],
    ) -> Result<R, Traced<api::Error>> {
        serde_json::from_slice(body).map_err(|e| self.fail(e.into()))
    }
}

/// Returns the BFF login URL returning the user to the provided `path` after
/// login.
#[must_use]
pub fn login_url(path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("returnUrl", path)
        .finish();
    format!("{BFF_PATH}/login?{query}")
}

/// Reads [`Pagination`] out of the provided response headers.
///
/// # Errors
///
/// If the [`PAGINATION_HEADER`] is missing or malformed.
pub fn pagination(
    headers: &http::HeaderMap,
) -> Result<Pagination, PaginationError> {
    let value = headers
        .get(PAGINATION_HEADER)
        .ok_or(PaginationError::Missing)?
        .to_str()
        .map_err(|_| PaginationError::NotText)?;
    serde_json::from_str(value)
        .map_err(|e| PaginationError::Malformed(e.into()))
}

/// Extracts the `detail` of a problem details response body, if any.
fn problem_detail(body: &[u8]) -> Option<String> {
    /// Error envelope of the LIMS API.
    #[derive(Deserialize)]
    struct Problem {
        /// Human-readable explanation of the problem.
        detail: Option<String>,
    }

    serde_json::from_slice::<Problem>(body)
        .ok()
        .and_then(|p| p.detail)
        .filter(|d| !d.trim().is_empty())
}

#[cfg(test)]
mod spec {
    use common::pagination::Pagination;

    use super::{login_url, pagination, problem_detail, PAGINATION_HEADER};
    use crate::infra::api::PaginationError;

    fn headers(value: &'static str) -> http::HeaderMap {
        let mut headers = http::HeaderMap::new();
        _ = headers.insert(
            PAGINATION_HEADER,
            http::HeaderValue::from_static(value),
        );
        headers
    }

    #[test]
    fn reads_pagination_header() {
        assert_eq!(
            pagination(&headers(
                r#"{"pageNumber":2,"pageSize":10,"totalCount":25,"totalPages":3}"#,
            ))
            .unwrap(),
            Pagination::new(2, 10, 25).unwrap(),
        );
    }

    #[test]
    fn rejects_bad_pagination_header() {
        assert!(matches!(
            pagination(&http::HeaderMap::new()),
            Err(PaginationError::Missing),
        ));
        assert!(matches!(
            pagination(&headers("nope")),
            Err(PaginationError::Malformed(_)),
        ));
        assert!(matches!(
            pagination(&headers(r#"{"pageNumber":2,"pageSize":10}"#)),
            Err(PaginationError::Malformed(_)),
        ));
        assert!(matches!(
            pagination(&headers(
                r#"{"pageNumber":2,"pageSize":10,"totalCount":25,"totalPages":7}"#,
            )),
            Err(PaginationError::Malformed(_)),
        ));
    }

    #[test]
    fn builds_login_url() {
        assert_eq!(
            login_url("/accessions/1"),
            "/bff/login?returnUrl=%2Faccessions%2F1",
        );
    }

    #[test]
    fn extracts_problem_detail() {
        assert_eq!(
            problem_detail(br#"{"title":"Bad","detail":"Name is required"}"#),
            Some("Name is required".into()),
        );
        assert_eq!(problem_detail(br#"{"detail":"  "}"#), None);
        assert_eq!(problem_detail(b"<html>"), None);
    }
}
