//! [`Organization`]-related [`Api`] implementations.

use common::{
    operations::{By, Insert, Select, Update},
    pagination::Page,
};
use tracerr::Traced;

use crate::{
    domain::{organization, Organization},
    infra::{
        api::{
            self,
            rest::{Request, Transport, API_PATH},
        },
        Api, Rest,
    },
    read::list,
};

impl<T: Transport> Api<Select<By<Page<Organization>, list::Params>>>
    for Rest<T>
{
    type Ok = Page<Organization>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page<Organization>, list::Params>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path =
            by.into_inner().append_to(&format!("{API_PATH}/organizations"));
        self.send_page(Request::get(path))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Select<By<Vec<Organization>, ()>>> for Rest<T> {
    type Ok = Vec<Organization>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Organization>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send_json(Request::get(format!("{API_PATH}/organizations/all")))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Select<By<Organization, organization::Id>>>
    for Rest<T>
{
    type Ok = Organization;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Organization, organization::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.send_json(Request::get(format!("{API_PATH}/organizations/{id}")))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Insert<organization::New>> for Rest<T> {
    type Ok = Organization;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<organization::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = Request::post(format!("{API_PATH}/organizations"))
            .json(&new)
            .map_err(tracerr::wrap!())?;
        self.send_json(request).await.map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Update<organization::Changes>> for Rest<T> {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Update(changes): Update<organization::Changes>,
    ) -> Result<Self::Ok, Self::Err> {
        let request =
            Request::put(format!("{API_PATH}/organizations/{}", changes.id))
                .json(&changes)
                .map_err(tracerr::wrap!())?;
        self.send_empty(request).await.map_err(tracerr::wrap!())
    }
}
