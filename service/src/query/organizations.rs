//! [`Query`] collection related to multiple [`Organization`]s.

use std::rc::Rc;

use common::{
    operations::{By, Select},
    pagination::Page,
};
use tracerr::Traced;

use crate::{
    cache::key::ORGANIZATIONS,
    domain::Organization,
    infra::{api, Api},
    read::list,
    Service,
};

use super::Query;

/// Queries a page of [`Organization`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct List(pub list::Params);

/// Queries all the [`Organization`]s at once, e.g. for a picker.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct All;

impl<A> Query<List> for Service<A>
where
    A: Api<
            Select<By<Page<Organization>, list::Params>>,
            Ok = Page<Organization>,
            Err = Traced<api::Error>,
        > + Clone
        + 'static,
{
    type Ok = Rc<Page<Organization>>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        List(params): List,
    ) -> Result<Self::Ok, Self::Err> {
        let api = self.api().clone();
        self.cache()
            .fetch(ORGANIZATIONS.list(&params), move || async move {
                api.execute(Select(By::new(params)))
                    .await
                    .map_err(tracerr::wrap!())
            })
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<A> Query<All> for Service<A>
where
    A: Api<
            Select<By<Vec<Organization>, ()>>,
            Ok = Vec<Organization>,
            Err = Traced<api::Error>,
        > + Clone
        + 'static,
{
    type Ok = Rc<Vec<Organization>>;
    type Err = Traced<api::Error>;

    async fn execute(&self, _: All) -> Result<Self::Ok, Self::Err> {
        let api = self.api().clone();
        self.cache()
            .fetch(ORGANIZATIONS.unpaged(), move || async move {
                api.execute(Select(By::new(())))
                    .await
                    .map_err(tracerr::wrap!())
            })
            .await
            .map_err(tracerr::wrap!())
    }
}
