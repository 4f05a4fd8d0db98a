//! [`Query`] collection related to multiple [`Container`]s.

use std::rc::Rc;

use common::{
    operations::{By, Select},
    pagination::Page,
};
use tracerr::Traced;

use crate::{
    cache::key::CONTAINERS,
    domain::Container,
    infra::{api, Api},
    read::list,
    Service,
};

use super::Query;

/// Queries a page of [`Container`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct List(pub list::Params);

impl<A> Query<List> for Service<A>
where
    A: Api<
            Select<By<Page<Container>, list::Params>>,
            Ok = Page<Container>,
            Err = Traced<api::Error>,
        > + Clone
        + 'static,
{
    type Ok = Rc<Page<Container>>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        List(params): List,
    ) -> Result<Self::Ok, Self::Err> {
        let api = self.api().clone();
        self.cache()
            .fetch(CONTAINERS.list(&params), move || async move {
                api.execute(Select(By::new(params)))
                    .await
                    .map_err(tracerr::wrap!())
            })
            .await
            .map_err(tracerr::wrap!())
    }
}
