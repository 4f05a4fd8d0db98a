//! [`Route`] table of the application.

use service::domain::{accession, organization};

/// Page of the application a path leads to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Route {
    /// Landing page showing the current user.
    Home,

    /// Accession worklist.
    Accessions,

    /// Creates a new accession and leads to it.
    NewAccession,

    /// Single accession.
    Accession(accession::Id),

    /// List of organizations.
    Organizations,

    /// Single organization.
    Organization(organization::Id),

    /// List of containers.
    Containers,

    /// Unknown path.
    NotFound(String),
}

/// Constructor of a [`Route`] out of the captured path parameters.
///
/// [`None`] means the parameters are invalid, so the path isn't found.
type Constructor = fn(&[&str]) -> Option<Route>;

/// Routing table, tried in order.
///
/// Segments starting with `:` capture a path parameter.
const ROUTES: &[(&str, Constructor)] = &[
    ("/", |_| Some(Route::Home)),
    ("/accessions", |_| Some(Route::Accessions)),
    ("/accessions/new", |_| Some(Route::NewAccession)),
    ("/accessions/:id", |p| p[0].parse().ok().map(Route::Accession)),
    ("/settings/organizations", |_| Some(Route::Organizations)),
    ("/settings/organizations/:id", |p| {
        p[0].parse().ok().map(Route::Organization)
    }),
    ("/settings/containers", |_| Some(Route::Containers)),
];

impl Route {
    /// Resolves the provided `path` (with an optional query string) into a
    /// [`Route`].
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        ROUTES
            .iter()
            .find_map(|(pattern, construct)| {
                construct(&capture(pattern, path)?)
            })
            .unwrap_or_else(|| Self::NotFound(path.to_owned()))
    }
}

/// Matches the provided `path` against the provided `pattern`, returning the
/// captured parameters on success.
fn capture<'p>(pattern: &str, path: &'p str) -> Option<Vec<&'p str>> {
    let mut expected = segments(pattern);
    let mut actual = segments(path);
    let mut params = vec![];
    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return Some(params),
            (Some(e), Some(a)) if e.starts_with(':') => params.push(a),
            (Some(e), Some(a)) if e == a => {}
            (Some(_) | None, Some(_)) | (Some(_), None) => return None,
        }
    }
}

/// Splits the provided `path` into its non-empty segments.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod spec {
    use service::domain::{accession, organization};

    use super::Route;

    #[test]
    fn resolves_static_routes() {
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve(""), Route::Home);
        assert_eq!(Route::resolve("/accessions"), Route::Accessions);
        assert_eq!(Route::resolve("/accessions/"), Route::Accessions);
        assert_eq!(Route::resolve("/accessions/new"), Route::NewAccession);
        assert_eq!(
            Route::resolve("/settings/organizations?pageNumber=2"),
            Route::Organizations,
        );
        assert_eq!(Route::resolve("/settings/containers"), Route::Containers);
    }

    #[test]
    fn captures_ids() {
        let id = accession::Id::new();
        assert_eq!(
            Route::resolve(&format!("/accessions/{id}")),
            Route::Accession(id),
        );

        let id = organization::Id::new();
        assert_eq!(
            Route::resolve(&format!("/settings/organizations/{id}")),
            Route::Organization(id),
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        for path in ["/accessions/42", "/settings", "/accessions/new/x"] {
            assert_eq!(Route::resolve(path), Route::NotFound(path.into()));
        }
    }
}
