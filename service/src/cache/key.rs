//! [`QueryKey`] registry.

use std::fmt;

use itertools::Itertools as _;

use crate::read::list;

/// Hierarchical identity of a cached query.
///
/// Keys are compared segment-wise, and a key is "under" another one if the
/// latter is its prefix.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Creates a new root [`QueryKey`].
    #[must_use]
    pub fn root(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Creates a new [`QueryKey`] under this one.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Returns segments of this [`QueryKey`].
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Indicates whether this [`QueryKey`] equals to or is under the provided
    /// `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().format(", "))
    }
}

/// [`QueryKey`] factory of a single entity type.
///
/// ```text
/// all ─┬─ lists ─── list(params) / unpaged
///      └─ details ─ detail(id)
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Keys {
    /// Tag of the entity type.
    entity: &'static str,
}

impl Keys {
    /// Creates new [`Keys`] of the provided entity type.
    #[must_use]
    pub const fn new(entity: &'static str) -> Self {
        Self { entity }
    }

    /// Returns the key covering every query of the entity type.
    #[must_use]
    pub fn all(self) -> QueryKey {
        QueryKey::root(self.entity)
    }

    /// Returns the key covering every list query of the entity type.
    #[must_use]
    pub fn lists(self) -> QueryKey {
        self.all().child("list")
    }

    /// Returns the key of a paginated list query with the provided
    /// [`list::Params`].
    #[must_use]
    pub fn list(self, params: &list::Params) -> QueryKey {
        self.lists().child(params.to_query_string())
    }

    /// Returns the key of the unpaginated list query.
    #[must_use]
    pub fn unpaged(self) -> QueryKey {
        self.lists().child("unpaged")
    }

    /// Returns the key covering every detail query of the entity type.
    #[must_use]
    pub fn details(self) -> QueryKey {
        self.all().child("detail")
    }

    /// Returns the key of the detail query of the provided entity.
    #[must_use]
    pub fn detail(self, id: impl fmt::Display) -> QueryKey {
        self.details().child(id.to_string())
    }
}

/// [`Keys`] of accessions.
pub const ACCESSIONS: Keys = Keys::new("accessions");

/// [`Keys`] of organizations.
pub const ORGANIZATIONS: Keys = Keys::new("organizations");

/// [`Keys`] of containers.
pub const CONTAINERS: Keys = Keys::new("containers");

/// [`Keys`] of the current user.
pub const USER: Keys = Keys::new("user");
