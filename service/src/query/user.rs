//! [`Query`] collection related to the authenticated user.

use std::rc::Rc;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    cache::key::USER,
    domain::user::{ClaimSet, CurrentUser},
    infra::{api, Api},
    Service,
};

use super::Query;

/// Queries [`ClaimSet`] of the current session.
///
/// Claims are fetched once and then served from the cache until the
/// [`USER`] scope is invalidated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Claims;

/// Queries [`CurrentUser`] derived from the session [`Claims`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Current;

impl<A> Query<Claims> for Service<A>
where
    A: Api<Select<By<ClaimSet, ()>>, Ok = ClaimSet, Err = Traced<api::Error>>
        + Clone
        + 'static,
{
    type Ok = Rc<ClaimSet>;
    type Err = Traced<api::Error>;

    async fn execute(&self, _: Claims) -> Result<Self::Ok, Self::Err> {
        let api = self.api().clone();
        self.cache()
            .fetch(USER.all(), move || async move {
                api.execute(Select(By::new(())))
                    .await
                    .map_err(tracerr::wrap!())
            })
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<A> Query<Current> for Service<A>
where
    Self: Query<Claims, Ok = Rc<ClaimSet>, Err = Traced<api::Error>>,
{
    type Ok = CurrentUser;
    type Err = Traced<api::Error>;

    async fn execute(&self, _: Current) -> Result<Self::Ok, Self::Err> {
        let claims = self.execute(Claims).await.map_err(tracerr::wrap!())?;
        Ok(CurrentUser::from(&*claims))
    }
}
