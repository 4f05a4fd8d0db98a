//! [`Container`]-related [`Api`] implementations.

use common::{
    operations::{By, Delete, Insert, Select},
    pagination::Page,
};
use tracerr::Traced;

use crate::{
    domain::{container, Container},
    infra::{
        api::{
            self,
            rest::{Request, Transport, API_PATH},
        },
        Api, Rest,
    },
    read::list,
};

impl<T: Transport> Api<Select<By<Page<Container>, list::Params>>> for Rest<T> {
    type Ok = Page<Container>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page<Container>, list::Params>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = by.into_inner().append_to(&format!("{API_PATH}/containers"));
        self.send_page(Request::get(path))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Insert<container::New>> for Rest<T> {
    type Ok = Container;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<container::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = Request::post(format!("{API_PATH}/containers"))
            .json(&new)
            .map_err(tracerr::wrap!())?;
        self.send_json(request).await.map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Delete<By<Container, container::Id>>> for Rest<T> {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Container, container::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.send_empty(Request::delete(format!("{API_PATH}/containers/{id}")))
            .await
            .map_err(tracerr::wrap!())
    }
}
