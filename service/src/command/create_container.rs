//! [`Command`] for creating a new [`Container`].

use common::operations::Insert;
use tracerr::Traced;
use tracing as log;

use crate::{
    cache::key::CONTAINERS,
    domain::{container, Container},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Container`].
#[derive(Clone, Debug)]
pub struct CreateContainer {
    /// Kind of the new [`Container`] (e.g. `Vacutainer`).
    pub kind: String,

    /// Specimen the new [`Container`] is used for (e.g. `Blood`).
    pub used_for: String,
}

impl<A> Command<CreateContainer> for Service<A>
where
    A: Api<Insert<container::New>, Ok = Container, Err = Traced<api::Error>>,
{
    type Ok = Container;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateContainer,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateContainer { kind, used_for } = cmd;

        let container = self
            .api()
            .execute(Insert(container::New { kind, used_for }))
            .await
            .map_err(tracerr::wrap!())?;
        log::info!("created `Container(id: {})`", container.id);

        _ = self.cache().invalidate(&CONTAINERS.lists());

        Ok(container)
    }
}

/// Error of [`CreateContainer`] [`Command`] execution.
pub type ExecutionError = api::Error;
