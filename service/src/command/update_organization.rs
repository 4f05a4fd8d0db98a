//! [`Command`] for updating an existing [`Organization`].

use common::operations::Update;
use tracerr::Traced;
use tracing as log;

use crate::{
    cache::key::ORGANIZATIONS,
    domain::organization,
    infra::{api, Api},
    Service,
};
#[cfg(doc)]
use crate::domain::Organization;

use super::Command;

/// [`Command`] for updating an existing [`Organization`].
#[derive(Clone, Debug)]
pub struct UpdateOrganization {
    /// ID of the [`Organization`] to update.
    pub id: organization::Id,

    /// New name of the [`Organization`].
    pub name: String,

    /// New [`organization::Status`] of the [`Organization`].
    pub status: organization::Status,
}

impl<A> Command<UpdateOrganization> for Service<A>
where
    A: Api<Update<organization::Changes>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateOrganization,
    ) -> Result<Self::Ok, Self::Err> {
        let UpdateOrganization { id, name, status } = cmd;

        self.api()
            .execute(Update(organization::Changes { id, name, status }))
            .await
            .map_err(tracerr::wrap!())?;
        log::info!("updated `Organization(id: {id})`");

        // Also covers the unpaged list read by pickers.
        _ = self.cache().invalidate(&ORGANIZATIONS.lists());
        _ = self.cache().invalidate(&ORGANIZATIONS.detail(id));

        Ok(())
    }
}

/// Error of [`UpdateOrganization`] [`Command`] execution.
pub type ExecutionError = api::Error;
