//! [`Query`] collection related to a single [`Accession`].

use std::rc::Rc;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    cache::key::ACCESSIONS,
    domain::{accession, Accession},
    infra::{api, Api},
    Service,
};

use super::Query;

/// Queries an [`Accession`] in the shape used for editing it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ForEdit(pub accession::Id);

impl<A> Query<ForEdit> for Service<A>
where
    A: Api<
            Select<By<Accession, accession::Id>>,
            Ok = Accession,
            Err = Traced<api::Error>,
        > + Clone
        + 'static,
{
    type Ok = Rc<Accession>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        ForEdit(id): ForEdit,
    ) -> Result<Self::Ok, Self::Err> {
        let api = self.api().clone();
        self.cache()
            .fetch(ACCESSIONS.detail(id), move || async move {
                api.execute(Select(By::new(id)))
                    .await
                    .map_err(tracerr::wrap!())
            })
            .await
            .map_err(tracerr::wrap!())
    }
}
