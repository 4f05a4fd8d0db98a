//! [`Command`] for creating a new [`Organization`].

use common::operations::Insert;
use tracerr::Traced;
use tracing as log;

use crate::{
    cache::key::ORGANIZATIONS,
    domain::{organization, Organization},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Organization`].
#[derive(Clone, Debug)]
pub struct CreateOrganization {
    /// Name of the new [`Organization`].
    pub name: String,
}

impl<A> Command<CreateOrganization> for Service<A>
where
    A: Api<
        Insert<organization::New>,
        Ok = Organization,
        Err = Traced<api::Error>,
    >,
{
    type Ok = Organization;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateOrganization,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateOrganization { name } = cmd;

        let organization = self
            .api()
            .execute(Insert(organization::New { name }))
            .await
            .map_err(tracerr::wrap!())?;
        log::info!("created `Organization(id: {})`", organization.id);

        // Also covers the unpaged list read by pickers.
        _ = self.cache().invalidate(&ORGANIZATIONS.lists());

        Ok(organization)
    }
}

/// Error of [`CreateOrganization`] [`Command`] execution.
pub type ExecutionError = api::Error;
