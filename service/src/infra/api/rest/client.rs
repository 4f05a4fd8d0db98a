//! [`Reqwest`] [`Transport`] implementation.

use std::time;

use secrecy::{ExposeSecret as _, SecretString};
use tracerr::Traced;
use url::Url;

use crate::infra::api;

use super::{Body, Request, Response, Transport};

/// Header the BFF requires on every API call as CSRF protection.
const CSRF_HEADER: &str = "X-CSRF";

/// [`Reqwest`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// URL the `/bff` and `/api` paths are resolved against.
    pub base_url: Url,

    /// Session cookie issued by the BFF (`name=value`), if any.
    pub cookie: Option<SecretString>,

    /// Timeout of a single request.
    pub timeout: time::Duration,
}

/// HTTP [`Transport`] backed by [`reqwest`].
#[derive(Clone, Debug)]
pub struct Reqwest {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// URL request paths are resolved against.
    base_url: Url,

    /// Session cookie sent with every request.
    cookie: Option<SecretString>,
}

impl Reqwest {
    /// Creates a new [`Reqwest`] transport with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the HTTP client cannot be initialized.
    pub fn new(config: Config) -> Result<Self, Traced<api::Error>> {
        let Config {
            base_url,
            cookie,
            timeout,
        } = config;

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(api::Error::transport)
            .map_err(tracerr::wrap!())?;

        Ok(Self {
            client,
            base_url,
            cookie,
        })
    }
}

impl Transport for Reqwest {
    async fn send(
        &self,
        request: Request,
    ) -> Result<Response, Traced<api::Error>> {
        let Request { method, path, body } = request;

        let url = self
            .base_url
            .join(&path)
            .map_err(api::Error::transport)
            .map_err(tracerr::wrap!())?;

        let mut builder =
            self.client.request(method, url).header(CSRF_HEADER, "1");
        if let Some(cookie) = &self.cookie {
            builder =
                builder.header(http::header::COOKIE, cookie.expose_secret());
        }
        builder = match body {
            Body::Empty => builder,
            Body::Json(json) => builder.json(&json),
            Body::File(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.name)
                    .mime_str(&file.content_type)
                    .map_err(api::Error::transport)
                    .map_err(tracerr::wrap!())?;
                builder.multipart(
                    reqwest::multipart::Form::new().part("file", part),
                )
            }
        };

        let response = builder
            .send()
            .await
            .map_err(api::Error::transport)
            .map_err(tracerr::wrap!())?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(api::Error::transport)
            .map_err(tracerr::wrap!())?;

        Ok(Response {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
