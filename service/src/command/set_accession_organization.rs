//! [`Command`] for assigning an [`Organization`] to an [`Accession`].

use common::operations::Update;
use tracerr::Traced;
use tracing as log;

use crate::{
    cache::key::ACCESSIONS,
    domain::{accession, organization},
    infra::{api, Api},
    Service,
};
#[cfg(doc)]
use crate::domain::{Accession, Organization};

use super::Command;

/// [`Command`] for assigning an [`Organization`] to an [`Accession`].
#[derive(Clone, Copy, Debug)]
pub struct SetAccessionOrganization {
    /// ID of the [`Accession`] to change.
    pub accession_id: accession::Id,

    /// ID of the [`Organization`] to assign.
    pub organization_id: organization::Id,
}

impl<A> Command<SetAccessionOrganization> for Service<A>
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
        cmd: SetAccessionOrganization,
    ) -> Result<Self::Ok, Self::Err> {
        let SetAccessionOrganization {
            accession_id,
            organization_id,
        } = cmd;

        self.api()
            .execute(Update(accession::OrganizationAssignment {
                accession_id,
                organization_id: Some(organization_id),
            }))
            .await
            .map_err(tracerr::wrap!())?;
        log::info!(
            "set `Organization(id: {organization_id})` of \
             `Accession(id: {accession_id})`",
        );

        _ = self.cache().invalidate(&ACCESSIONS.lists());
        _ = self.cache().invalidate(&ACCESSIONS.detail(accession_id));

        Ok(())
    }
}

/// Error of [`SetAccessionOrganization`] [`Command`] execution.
pub type ExecutionError = api::Error;
