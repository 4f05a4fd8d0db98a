//! [`Command`] for deleting a [`Container`].

use common::operations::{By, Delete};
use tracerr::Traced;
use tracing as log;

use crate::{
    cache::key::CONTAINERS,
    domain::{container, Container},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Container`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteContainer {
    /// ID of the [`Container`] to delete.
    pub id: container::Id,
}

impl<A> Command<DeleteContainer> for Service<A>
where
    A: Api<
        Delete<By<Container, container::Id>>,
        Ok = (),
        Err = Traced<api::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteContainer,
    ) -> Result<Self::Ok, Self::Err> {
        let DeleteContainer { id } = cmd;

        self.api()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::wrap!())?;
        log::info!("deleted `Container(id: {id})`");

        _ = self.cache().invalidate(&CONTAINERS.lists());
        _ = self.cache().invalidate(&CONTAINERS.detail(id));

        Ok(())
    }
}

/// Error of [`DeleteContainer`] [`Command`] execution.
pub type ExecutionError = api::Error;
