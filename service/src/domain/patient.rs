//! [`Patient`] definitions.

use common::define_kind;
use serde::{Deserialize, Serialize};

use crate::domain::define_id;

/// Patient an accession is collected from.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// ID of this [`Patient`].
    pub id: Id,

    /// First name of this [`Patient`].
    #[serde(default)]
    pub first_name: Option<String>,

    /// Last name of this [`Patient`].
    #[serde(default)]
    pub last_name: Option<String>,

    /// [`Sex`] of this [`Patient`], if known.
    #[serde(default)]
    pub sex: Option<Sex>,

    /// Lab-internal identifier of this [`Patient`].
    #[serde(default)]
    pub internal_id: Option<String>,
}

impl Patient {
    /// Returns the full name of this [`Patient`] (`First Last`), skipping the
    /// missing parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

define_id! {
    /// ID of a [`Patient`].
    Id
}

define_kind! {
    #[doc = "Sex of a [`Patient`]."]
    enum Sex {
        #[doc = "Female."]
        Female = "Female",

        #[doc = "Male."]
        Male = "Male",

        #[doc = "Not known or not disclosed."]
        Unknown = "Unknown",
    }
}

/// Data for registering a new [`Patient`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    /// First name of the new [`Patient`].
    pub first_name: String,

    /// Last name of the new [`Patient`].
    pub last_name: String,

    /// Birth date of the new [`Patient`] (`YYYY-MM-DD`), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    /// [`Sex`] of the new [`Patient`].
    pub sex: Sex,
}
