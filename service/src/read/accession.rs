//! [`Accession`]-related read definitions.

#[cfg(doc)]
use crate::domain::Accession;

pub mod list {
    //! [`Accession`] worklist definitions.

    use common::pagination;
    use serde::{Deserialize, Serialize};

    use crate::domain::accession;
    #[cfg(doc)]
    use crate::domain::Accession;

    /// Row of the [`Accession`] worklist.
    #[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Item {
        /// ID of the [`Accession`].
        pub id: accession::Id,

        /// Number of the [`Accession`], if assigned.
        #[serde(default)]
        pub accession_number: Option<String>,

        /// [`accession::Status`] of the [`Accession`].
        pub status: accession::Status,

        /// First name of the patient, if set.
        #[serde(default)]
        pub patient_first_name: Option<String>,

        /// Last name of the patient, if set.
        #[serde(default)]
        pub patient_last_name: Option<String>,

        /// Name of the requesting organization, if set.
        #[serde(default)]
        pub organization_name: Option<String>,
    }

    /// A [`pagination::Page`] of worklist [`Item`]s.
    pub type Page = pagination::Page<Item>;
}
