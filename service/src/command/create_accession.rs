//! [`Command`] for creating a new [`Accession`].

use common::operations::Insert;
use tracerr::Traced;
use tracing as log;

use crate::{
    cache::key::ACCESSIONS,
    domain::{accession, organization, Accession},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Accession`].
///
/// Once created, the user is navigated to the new [`Accession`] page.
#[derive(Clone, Copy, Debug, Default)]
pub struct CreateAccession {
    /// [`Organization`] requesting the new [`Accession`], if known upfront.
    ///
    /// [`Organization`]: crate::domain::Organization
    pub organization_id: Option<organization::Id>,
}

impl<A> Command<CreateAccession> for Service<A>
where
    A: Api<Insert<accession::New>, Ok = Accession, Err = Traced<api::Error>>,
{
    type Ok = Accession;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateAccession,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateAccession { organization_id } = cmd;

        let accession = self
            .api()
            .execute(Insert(accession::New { organization_id }))
            .await
            .map_err(tracerr::wrap!())?;
        log::info!("created `Accession(id: {})`", accession.id);

        _ = self.cache().invalidate(&ACCESSIONS.lists());
        // Navigate only after the lists are invalidated.
        self.navigator()
            .navigate(&format!("/accessions/{}", accession.id));

        Ok(accession)
    }
}

/// Error of [`CreateAccession`] [`Command`] execution.
pub type ExecutionError = api::Error;
