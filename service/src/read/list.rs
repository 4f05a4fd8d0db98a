//! Parameters of paginated list requests.

use url::form_urlencoded;

/// Parameters of a paginated list request.
///
/// Serialized into a query string with a fixed key order, so equal
/// [`Params`] always produce equal query strings.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Params {
    /// Number of the requested page (starting from `1`).
    pub page_number: Option<u32>,

    /// Maximum number of items on the requested page.
    pub page_size: Option<u32>,

    /// Filtering expression, in the API's Sieve grammar.
    pub filters: Option<String>,

    /// Sorting expression (`column` or `-column` for descending).
    pub sort_order: Option<String>,
}

impl Params {
    /// Serializes these [`Params`] into a form-urlencoded query string,
    /// omitting absent keys.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(n) = self.page_number {
            _ = query.append_pair("pageNumber", &n.to_string());
        }
        if let Some(n) = self.page_size {
            _ = query.append_pair("pageSize", &n.to_string());
        }
        if let Some(filters) = self.filters.as_deref() {
            _ = query.append_pair("filters", filters);
        }
        if let Some(sort) = self.sort_order.as_deref() {
            _ = query.append_pair("sortOrder", sort);
        }
        query.finish()
    }

    /// Appends these [`Params`] to the provided `path` as a query string.
    ///
    /// No `?` is appended if there is nothing to serialize.
    #[must_use]
    pub fn append_to(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{query}")
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Params;

    #[test]
    fn omits_absent_keys() {
        assert_eq!(Params::default().to_query_string(), "");
        assert_eq!(
            Params::default().append_to("/api/accessions"),
            "/api/accessions",
        );

        let params = Params {
            page_number: Some(2),
            ..Params::default()
        };
        assert_eq!(
            params.append_to("/api/accessions"),
            "/api/accessions?pageNumber=2",
        );
    }

    #[test]
    fn serializes_in_fixed_order() {
        let params = Params {
            sort_order: Some("-accessionNumber".into()),
            filters: Some("status==Draft".into()),
            page_size: Some(25),
            page_number: Some(1),
        };

        assert_eq!(
            params.to_query_string(),
            "pageNumber=1&pageSize=25&filters=status%3D%3DDraft\
             &sortOrder=-accessionNumber",
        );
    }
}
