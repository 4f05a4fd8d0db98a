//! [`Container`] definitions.

use common::define_kind;
use serde::{Deserialize, Serialize};

use crate::domain::define_id;

/// Specimen container type the lab accepts.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// ID of this [`Container`].
    pub id: Id,

    /// Number of this [`Container`], assigned by the server.
    #[serde(default)]
    pub container_number: Option<String>,

    /// Kind of this [`Container`] (e.g. `Vacutainer`).
    #[serde(rename = "type")]
    pub kind: String,

    /// Specimen this [`Container`] is used for (e.g. `Blood`).
    pub used_for: String,

    /// [`Status`] of this [`Container`].
    pub status: Status,
}

define_id! {
    /// ID of a [`Container`].
    Id
}

define_kind! {
    #[doc = "Status of a [`Container`]."]
    enum Status {
        #[doc = "Accepted for new specimens."]
        Active = "Active",

        #[doc = "No longer accepted."]
        Inactive = "Inactive",
    }
}

/// Data for creating a new [`Container`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    /// Kind of the new [`Container`].
    #[serde(rename = "type")]
    pub kind: String,

    /// Specimen the new [`Container`] is used for.
    pub used_for: String,
}
