//! [`Accession`]-related [`Api`] implementations.

use common::operations::{By, Insert, Select, Update, Upload};
use tracerr::Traced;

use crate::{
    domain::{accession, Accession},
    infra::{
        api::{
            self,
            rest::{File, Request, Transport, API_PATH},
        },
        Api, Rest,
    },
    read::{self, list},
};

impl<T: Transport> Api<Select<By<read::accession::list::Page, list::Params>>>
    for Rest<T>
{
    type Ok = read::accession::list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::accession::list::Page, list::Params>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = by.into_inner().append_to(&format!("{API_PATH}/accessions"));
        self.send_page(Request::get(path))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Select<By<Accession, accession::Id>>> for Rest<T> {
    type Ok = Accession;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Accession, accession::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.send_json(Request::get(format!(
            "{API_PATH}/accessions/{id}/forAggregateEdit",
        )))
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Insert<accession::New>> for Rest<T> {
    type Ok = Accession;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<accession::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = Request::post(format!("{API_PATH}/accessions"))
            .json(&new)
            .map_err(tracerr::wrap!())?;
        self.send_json(request).await.map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Update<accession::PatientAssignment>> for Rest<T> {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Update(assignment): Update<accession::PatientAssignment>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = Request::put(format!("{API_PATH}/accessions/setPatient"))
            .json(&assignment)
            .map_err(tracerr::wrap!())?;
        self.send_empty(request).await.map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Update<accession::OrganizationAssignment>> for Rest<T> {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Update(assignment): Update<accession::OrganizationAssignment>,
    ) -> Result<Self::Ok, Self::Err> {
        let accession::OrganizationAssignment {
            accession_id,
            organization_id,
        } = assignment;
        let path = match organization_id {
            Some(org_id) => format!(
                "{API_PATH}/accessions/{accession_id}/setOrganization/{org_id}",
            ),
            None => format!(
                "{API_PATH}/accessions/{accession_id}/removeOrganization",
            ),
        };
        self.send_empty(Request::put(path))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Api<Upload<accession::NewAttachment>> for Rest<T> {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Upload(attachment): Upload<accession::NewAttachment>,
    ) -> Result<Self::Ok, Self::Err> {
        let accession::NewAttachment {
            accession_id,
            file_name,
            content_type,
            bytes,
        } = attachment;
        let request = Request::post(format!(
            "{API_PATH}/accessions/{accession_id}/attachments",
        ))
        .file(File {
            name: file_name,
            content_type,
            bytes,
        });
        self.send_empty(request).await.map_err(tracerr::wrap!())
    }
}
