//! In-memory doubles of the LIMS backend and the UI.

#![allow(dead_code, reason = "not every test uses every double")]

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    io,
    rc::Rc,
    time::Duration,
};

use service::{
    infra::{
        api,
        rest::{Request, Response, Transport, PAGINATION_HEADER},
        Rest,
    },
    navigate::History,
    notify::{Notification, Notifier},
    Config, Service,
};
use tracerr::Traced;

/// [`Transport`] serving canned [`Response`]s by `"METHOD path"`.
#[derive(Clone, Debug, Default)]
pub struct Backend(Rc<BackendState>);

#[derive(Debug, Default)]
pub struct BackendState {
    routes: RefCell<HashMap<String, Response>>,
    unreachable: RefCell<HashSet<String>>,
    requests: RefCell<Vec<Request>>,
    latency: Cell<Option<Duration>>,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves the provided `response` on `route` (e.g. `GET /bff/user`).
    pub fn on(&self, route: &str, response: Response) -> &Self {
        _ = self.0.routes.borrow_mut().insert(route.to_owned(), response);
        self
    }

    /// Fails every request to `route` as if the server were unreachable.
    pub fn fail(&self, route: &str) -> &Self {
        _ = self.0.unreachable.borrow_mut().insert(route.to_owned());
        self
    }

    /// Delays every response by the provided `latency`.
    pub fn with_latency(&self, latency: Duration) -> &Self {
        self.0.latency.set(Some(latency));
        self
    }

    /// Returns all the requests received so far, as `"METHOD path"`.
    pub fn requests(&self) -> Vec<String> {
        self.0
            .requests
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Returns the last request received.
    pub fn last_request(&self) -> Option<Request> {
        self.0.requests.borrow().last().cloned()
    }
}

impl Transport for Backend {
    async fn send(
        &self,
        request: Request,
    ) -> Result<Response, Traced<api::Error>> {
        let route = format!("{} {}", request.method, request.path);
        self.0.requests.borrow_mut().push(request);
        if let Some(latency) = self.0.latency.get() {
            tokio::time::sleep(latency).await;
        }
        if self.0.unreachable.borrow().contains(&route) {
            return Err(tracerr::new!(api::Error::transport(io::Error::other(
                "connection refused",
            ))));
        }
        Ok(self
            .0
            .routes
            .borrow()
            .get(&route)
            .cloned()
            .unwrap_or_else(|| Response::new(http::StatusCode::NOT_FOUND, "")))
    }
}

/// [`Notifier`] recording every [`Notification`].
#[derive(Debug, Default)]
pub struct Toasts(RefCell<Vec<Notification>>);

impl Toasts {
    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().iter().map(|n| n.message.clone()).collect()
    }
}

impl Notifier for Toasts {
    fn notify(&self, notification: Notification) {
        self.0.borrow_mut().push(notification);
    }
}

/// Wired [`Service`] along with its doubles.
pub struct Harness {
    pub backend: Backend,
    pub toasts: Rc<Toasts>,
    pub history: Rc<History>,
    pub service: Service<Rest<Backend>>,
}

impl Harness {
    pub fn new(path: &str) -> Self {
        Self::with_config(path, Config::default())
    }

    pub fn with_config(path: &str, config: Config) -> Self {
        let backend = Backend::new();
        let toasts = Rc::new(Toasts::default());
        let history = Rc::new(History::new(path));
        let api = Rest::new(backend.clone(), toasts.clone(), history.clone());
        let service = Service::new(config, api, history.clone());
        Self {
            backend,
            toasts,
            history,
            service,
        }
    }
}

/// Builds a successful JSON [`Response`].
pub fn json(body: &serde_json::Value) -> Response {
    Response::new(http::StatusCode::OK, body.to_string())
}

/// Builds a successful JSON [`Response`] of a page.
pub fn page(body: &serde_json::Value, pagination: &'static str) -> Response {
    json(body).with_header(
        PAGINATION_HEADER,
        http::HeaderValue::from_static(pagination),
    )
}

/// Builds an unsuccessful problem details [`Response`].
pub fn problem(status: u16, detail: &str) -> Response {
    Response::new(
        http::StatusCode::from_u16(status).unwrap(),
        serde_json::json!({"title": "Error", "detail": detail}).to_string(),
    )
}
