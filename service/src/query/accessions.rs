//! [`Query`] collection related to multiple [`Accession`]s.

use std::rc::Rc;

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Accession;
use crate::{
    cache::key::ACCESSIONS,
    infra::{api, Api},
    read::{accession, list},
    Service,
};

use super::Query;

/// Queries a page of the [`Accession`] worklist.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct List(pub list::Params);

impl<A> Query<List> for Service<A>
where
    A: Api<
            Select<By<accession::list::Page, list::Params>>,
            Ok = accession::list::Page,
            Err = Traced<api::Error>,
        > + Clone
        + 'static,
{
    type Ok = Rc<accession::list::Page>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        List(params): List,
    ) -> Result<Self::Ok, Self::Err> {
        let api = self.api().clone();
        let delay = self.config().artificial_delay;
        self.cache()
            .fetch(ACCESSIONS.list(&params), move || async move {
                if let Some(delay) = delay {
                    log::debug!("delaying worklist fetch by {delay:?}");
                    tokio::time::sleep(delay).await;
                }
                api.execute(Select(By::new(params)))
                    .await
                    .map_err(tracerr::wrap!())
            })
            .await
            .map_err(tracerr::wrap!())
    }
}
