//! [`Command`] for clearing the [`Organization`] of an [`Accession`].

use common::operations::Update;
use tracerr::Traced;
use tracing as log;

use crate::{
    cache::key::ACCESSIONS,
    domain::accession,
    infra::{api, Api},
    Service,
};
#[cfg(doc)]
use crate::domain::{Accession, Organization};

use super::Command;

/// [`Command`] for clearing the [`Organization`] of an [`Accession`].
#[derive(Clone, Copy, Debug)]
pub struct RemoveAccessionOrganization {
    /// ID of the [`Accession`] to change.
    pub accession_id: accession::Id,
}

impl<A> Command<RemoveAccessionOrganization> for Service<A>
where
    A: Api<
        Update<accession::OrganizationAssignment>,
        Ok = (),
        Err = Traced<api::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RemoveAccessionOrganization,
    ) -> Result<Self::Ok, Self::Err> {
        let RemoveAccessionOrganization { accession_id } = cmd;

        self.api()
            .execute(Update(accession::OrganizationAssignment {
                accession_id,
                organization_id: None,
            }))
            .await
            .map_err(tracerr::wrap!())?;
        log::info!("removed organization of `Accession(id: {accession_id})`");

        _ = self.cache().invalidate(&ACCESSIONS.lists());
        _ = self.cache().invalidate(&ACCESSIONS.detail(accession_id));

        Ok(())
    }
}

/// Error of [`RemoveAccessionOrganization`] [`Command`] execution.
pub type ExecutionError = api::Error;
