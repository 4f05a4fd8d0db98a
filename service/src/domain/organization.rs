//! [`Organization`] definitions.

use common::define_kind;
use serde::{Deserialize, Serialize};

use crate::domain::define_id;

/// Healthcare organization sending accessions to the lab.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// ID of this [`Organization`].
    pub id: Id,

    /// Name of this [`Organization`].
    pub name: String,

    /// [`Status`] of this [`Organization`].
    pub status: Status,
}

define_id! {
    /// ID of an [`Organization`].
    Id
}

define_kind! {
    #[doc = "Status of an [`Organization`]."]
    enum Status {
        #[doc = "May be assigned to accessions."]
        Active = "Active",

        #[doc = "Kept for history only."]
        Inactive = "Inactive",
    }
}

/// Data for creating a new [`Organization`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    /// Name of the new [`Organization`].
    pub name: String,
}

/// Data for updating an existing [`Organization`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
    /// ID of the [`Organization`] to update.
    #[serde(skip)]
    pub id: Id,

    /// New name of the [`Organization`].
    pub name: String,

    /// New [`Status`] of the [`Organization`].
    pub status: Status,
}
