//! Authenticated user definitions.

use serde::{Deserialize, Serialize};

/// Claim type carrying the display name of a user.
pub const NAME: &str = "name";

/// Claim type carrying the subject identifier of a user.
pub const SUBJECT: &str = "sub";

/// Claim type carrying the session-bound logout URL issued by the BFF.
pub const LOGOUT_URL: &str = "bff:logout_url";

/// Logout URL used when the BFF didn't issue a session-bound one.
pub const DEFAULT_LOGOUT_URL: &str = "/bff/logout";

/// Single `(type, value)` assertion about the authenticated user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Claim {
    /// Type of this [`Claim`] (e.g. `email`).
    #[serde(rename = "type")]
    pub kind: String,

    /// Value of this [`Claim`].
    ///
    /// Mostly strings, but the BFF emits numbers for its own claims (e.g.
    /// `bff:session_expires_in`).
    pub value: serde_json::Value,
}

impl Claim {
    /// Returns the value of this [`Claim`] if it's a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// Ordered [`Claim`]s of the authenticated user.
///
/// Claims are not deduplicated by type: the same type may occur several times
/// (e.g. `role`).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClaimSet(Vec<Claim>);

impl ClaimSet {
    /// Creates a new [`ClaimSet`] out of the provided [`Claim`]s.
    #[must_use]
    pub fn new(claims: Vec<Claim>) -> Self {
        Self(claims)
    }

    /// Returns the first string value of the [`Claim`] with the provided type.
    #[must_use]
    pub fn first<'a>(&'a self, kind: &'a str) -> Option<&'a str> {
        self.all(kind).next()
    }

    /// Iterates over string values of all the [`Claim`]s with the provided
    /// type, in their original order.
    pub fn all<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a str> {
        self.0
            .iter()
            .filter(move |c| c.kind == kind)
            .filter_map(Claim::as_str)
    }

    /// Iterates over all the [`Claim`]s.
    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.0.iter()
    }

    /// Indicates whether these claims describe a logged-in user.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.first(NAME).is_some() || self.first(SUBJECT).is_some()
    }

    /// Returns the name to display for the user, falling back to its subject.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.first(NAME).or_else(|| self.first(SUBJECT))
    }

    /// Returns the URL logging the user out.
    #[must_use]
    pub fn logout_url(&self) -> &str {
        self.first(LOGOUT_URL).unwrap_or(DEFAULT_LOGOUT_URL)
    }
}

/// Derived state of the current user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurrentUser {
    /// Indicator whether the user is logged in.
    pub is_logged_in: bool,

    /// Name to display for the user, if logged in.
    pub username: Option<String>,

    /// URL logging the user out.
    pub logout_url: String,
}

impl From<&ClaimSet> for CurrentUser {
    fn from(claims: &ClaimSet) -> Self {
        Self {
            is_logged_in: claims.is_logged_in(),
            username: claims.username().map(ToOwned::to_owned),
            logout_url: claims.logout_url().to_owned(),
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{ClaimSet, CurrentUser};

    fn claims(json: &str) -> ClaimSet {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn derives_logged_in_user() {
        let claims = claims(
            r#"[
                {"type": "sub", "value": "8f1c"},
                {"type": "name", "value": "Bob Smith"},
                {"type": "role", "value": "lab"},
                {"type": "role", "value": "admin"},
                {"type": "bff:logout_url", "value": "/bff/logout?sid=42"},
                {"type": "bff:session_expires_in", "value": 3600}
            ]"#,
        );

        assert!(claims.is_logged_in());
        assert_eq!(claims.username(), Some("Bob Smith"));
        assert_eq!(claims.logout_url(), "/bff/logout?sid=42");
        assert_eq!(claims.all("role").collect::<Vec<_>>(), ["lab", "admin"]);
        assert_eq!(claims.iter().count(), 6);
    }

    #[test]
    fn reads_first_claim_of_type() {
        let claims = claims(
            r#"[
                {"type": "role", "value": "lab"},
                {"type": "role", "value": "admin"}
            ]"#,
        );
        let kind = String::from("role");

        assert_eq!(claims.first(&kind), Some("lab"));
        assert_eq!(claims.first("email"), None);
    }

    #[test]
    fn falls_back_to_subject() {
        let claims = claims(r#"[{"type": "sub", "value": "8f1c"}]"#);

        assert_eq!(
            CurrentUser::from(&claims),
            CurrentUser {
                is_logged_in: true,
                username: Some("8f1c".into()),
                logout_url: "/bff/logout".into(),
            },
        );
    }

    #[test]
    fn no_identity_claims_means_logged_out() {
        let claims = claims(r#"[{"type": "email", "value": "a@b.com"}]"#);

        assert!(!claims.is_logged_in());
        assert_eq!(claims.username(), None);
        assert!(!CurrentUser::from(&ClaimSet::default()).is_logged_in);
    }
}
