//! [`Query`] collection related to a single [`Organization`].

use std::rc::Rc;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    cache::key::ORGANIZATIONS,
    domain::{organization, Organization},
    infra::{api, Api},
    Service,
};

use super::Query;

/// Queries an [`Organization`] by its ID.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ById(pub organization::Id);

impl<A> Query<ById> for Service<A>
where
    A: Api<
            Select<By<Organization, organization::Id>>,
            Ok = Organization,
            Err = Traced<api::Error>,
        > + Clone
        + 'static,
{
    type Ok = Rc<Organization>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        ById(id): ById,
    ) -> Result<Self::Ok, Self::Err> {
        let api = self.api().clone();
        self.cache()
            .fetch(ORGANIZATIONS.detail(id), move || async move {
                api.execute(Select(By::new(id)))
                    .await
                    .map_err(tracerr::wrap!())
            })
            .await
            .map_err(tracerr::wrap!())
    }
}
