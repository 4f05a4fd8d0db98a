//! [`Transport`] definitions.

use std::future::Future;

use serde::Serialize;
use tracerr::Traced;

use crate::infra::api;

/// Generic HTTP transport the [`Rest`] client sends its requests through.
///
/// [`Rest`]: super::Rest
pub trait Transport {
    /// Sends the provided [`Request`] and returns the raw [`Response`],
    /// whatever its status is.
    ///
    /// # Errors
    ///
    /// If the request couldn't be performed at all.
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, Traced<api::Error>>>;
}

/// HTTP request to the LIMS backend.
#[derive(Clone, Debug)]
pub struct Request {
    /// HTTP method of this [`Request`].
    pub method: http::Method,

    /// Absolute path (with an optional query string) of this [`Request`],
    /// e.g. `/api/accessions?pageNumber=2`.
    pub path: String,

    /// [`Body`] of this [`Request`].
    pub body: Body,
}

impl Request {
    /// Creates a new bodiless [`Request`].
    #[must_use]
    pub fn new(method: http::Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: Body::Empty,
        }
    }

    /// Creates a new `GET` [`Request`].
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(http::Method::GET, path)
    }

    /// Creates a new `POST` [`Request`].
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(http::Method::POST, path)
    }

    /// Creates a new `PUT` [`Request`].
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(http::Method::PUT, path)
    }

    /// Creates a new `DELETE` [`Request`].
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(http::Method::DELETE, path)
    }

    /// Sets the JSON [`Body`] of this [`Request`].
    ///
    /// # Errors
    ///
    /// If the provided `body` cannot be serialized into JSON.
    pub fn json(
        mut self,
        body: &impl Serialize,
    ) -> Result<Self, Traced<api::Error>> {
        self.body = Body::Json(
            serde_json::to_value(body)
                .map_err(api::Error::from)
                .map_err(tracerr::wrap!())?,
        );
        Ok(self)
    }

    /// Sets the multipart [`Body`] of this [`Request`] to the provided file.
    #[must_use]
    pub fn file(mut self, file: File) -> Self {
        self.body = Body::File(file);
        self
    }
}

/// Body of a [`Request`].
#[derive(Clone, Debug, Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,

    /// JSON body.
    Json(serde_json::Value),

    /// Multipart form with a single `file` field.
    File(File),
}

/// File being uploaded.
#[derive(Clone, derive_more::Debug)]
pub struct File {
    /// Name of this [`File`].
    pub name: String,

    /// MIME type of this [`File`].
    pub content_type: String,

    /// Contents of this [`File`].
    #[debug("{} bytes", bytes.len())]
    pub bytes: Vec<u8>,
}

/// Raw HTTP response of the LIMS backend.
#[derive(Clone, Debug)]
pub struct Response {
    /// Status of this [`Response`].
    pub status: http::StatusCode,

    /// Headers of this [`Response`].
    pub headers: http::HeaderMap,

    /// Body of this [`Response`].
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a new [`Response`] with the provided status and body, and no
    /// headers.
    #[must_use]
    pub fn new(status: http::StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: http::HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Adds the provided header to this [`Response`].
    #[must_use]
    pub fn with_header(
        mut self,
        name: &'static str,
        value: http::HeaderValue,
    ) -> Self {
        _ = self.headers.insert(name, value);
        self
    }
}
