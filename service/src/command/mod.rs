//! [`Command`] definition.
//!
//! Every [`Command`] performs a single write request and, on success,
//! invalidates the [`QueryCache`] scopes it could have made stale.
//!
//! [`QueryCache`]: crate::QueryCache

pub mod create_accession;
pub mod create_container;
pub mod create_organization;
pub mod delete_container;
pub mod remove_accession_organization;
pub mod set_accession_organization;
pub mod set_accession_patient;
pub mod update_organization;
pub mod upload_attachment;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_accession::CreateAccession, create_container::CreateContainer,
    create_organization::CreateOrganization,
    delete_container::DeleteContainer,
    remove_accession_organization::RemoveAccessionOrganization,
    set_accession_organization::SetAccessionOrganization,
    set_accession_patient::SetAccessionPatient,
    update_organization::UpdateOrganization,
    upload_attachment::UploadAttachment,
};
