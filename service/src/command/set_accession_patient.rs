//! [`Command`] for assigning a [`Patient`] to an [`Accession`].

use common::operations::Update;
use tracerr::Traced;
use tracing as log;

use crate::{
    cache::key::ACCESSIONS,
    domain::{accession, patient},
    infra::{api, Api},
    Service,
};
#[cfg(doc)]
use crate::domain::{Accession, Patient};

use super::Command;

/// [`Command`] for assigning a [`Patient`] to an [`Accession`].
#[derive(Clone, Debug)]
pub struct SetAccessionPatient {
    /// ID of the [`Accession`] to assign the [`Patient`] to.
    pub accession_id: accession::Id,

    /// [`Patient`] to assign.
    pub patient: PatientRef,
}

/// Reference to a [`Patient`] being assigned.
#[derive(Clone, Debug)]
pub enum PatientRef {
    /// Already registered [`Patient`].
    Existing(patient::Id),

    /// [`Patient`] to be registered along with the assignment.
    New(patient::New),
}

impl<A> Command<SetAccessionPatient> for Service<A>
where
    A: Api<
        Update<accession::PatientAssignment>,
        Ok = (),
        Err = Traced<api::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SetAccessionPatient,
    ) -> Result<Self::Ok, Self::Err> {
        let SetAccessionPatient {
            accession_id,
            patient,
        } = cmd;

        let (patient_id, patient) = match patient {
            PatientRef::Existing(id) => (Some(id), None),
            PatientRef::New(new) => (None, Some(new)),
        };
        self.api()
            .execute(Update(accession::PatientAssignment {
                accession_id,
                patient_id,
                patient,
            }))
            .await
            .map_err(tracerr::wrap!())?;
        log::info!("set patient of `Accession(id: {accession_id})`");

        _ = self.cache().invalidate(&ACCESSIONS.lists());
        _ = self.cache().invalidate(&ACCESSIONS.detail(accession_id));

        Ok(())
    }
}

/// Error of [`SetAccessionPatient`] [`Command`] execution.
pub type ExecutionError = api::Error;
