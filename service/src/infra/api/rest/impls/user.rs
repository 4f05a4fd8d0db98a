//! [`ClaimSet`]-related [`Api`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::user::ClaimSet,
    infra::{
        api::{
            self,
            rest::{Request, Transport, BFF_PATH},
        },
        Api, Rest,
    },
};

impl<T: Transport> Api<Select<By<ClaimSet, ()>>> for Rest<T> {
    type Ok = ClaimSet;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<ClaimSet, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send_json(Request::get(format!("{BFF_PATH}/user")))
            .await
            .map_err(tracerr::wrap!())
    }
}
