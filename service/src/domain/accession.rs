//! [`Accession`] definitions.

use common::define_kind;
use serde::{Deserialize, Serialize};

use crate::domain::{define_id, organization, patient, Patient};

/// Lab case being tracked through intake, testing and reporting.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accession {
    /// ID of this [`Accession`].
    pub id: Id,

    /// Human-readable number of this [`Accession`], assigned by the server.
    #[serde(default)]
    pub accession_number: Option<String>,

    /// [`Status`] of this [`Accession`].
    pub status: Status,

    /// [`Patient`] this [`Accession`] is for, if set.
    #[serde(default)]
    pub patient: Option<Patient>,

    /// ID of the [`Organization`] that requested this [`Accession`], if set.
    ///
    /// [`Organization`]: crate::domain::Organization
    #[serde(default)]
    pub organization_id: Option<organization::Id>,

    /// [`Attachment`]s of this [`Accession`].
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

define_id! {
    /// ID of an [`Accession`].
    Id
}

define_kind! {
    #[doc = "Status of an [`Accession`]."]
    enum Status {
        #[doc = "Being filled in, not yet submitted."]
        Draft = "Draft",

        #[doc = "Submitted and waiting for testing."]
        ReadyForTesting = "Ready For Testing",

        #[doc = "Tests are in progress."]
        Testing = "Testing",

        #[doc = "All tests are complete."]
        TestComplete = "Test Complete",

        #[doc = "Abandoned before completion."]
        Abandoned = "Abandoned",

        #[doc = "Cancelled by the requester."]
        Cancelled = "Cancelled",

        #[doc = "Results are under quality review."]
        QaReview = "QA Review",

        #[doc = "Reported and closed."]
        Completed = "Completed",
    }
}

/// File attached to an [`Accession`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// ID of this [`Attachment`].
    pub id: AttachmentId,

    /// Original file name of this [`Attachment`].
    pub filename: String,

    /// Optional comment left with this [`Attachment`].
    #[serde(default)]
    pub comments: Option<String>,
}

define_id! {
    /// ID of an [`Attachment`].
    AttachmentId
}

/// Data for creating a new [`Accession`].
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    /// [`Organization`] requesting the new [`Accession`], if known upfront.
    ///
    /// [`Organization`]: crate::domain::Organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<organization::Id>,
}

/// Assignment of a [`Patient`] to an [`Accession`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAssignment {
    /// ID of the [`Accession`] to assign the [`Patient`] to.
    pub accession_id: Id,

    /// ID of an existing [`Patient`] to assign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<patient::Id>,

    /// New [`Patient`] to register and assign.
    #[serde(rename = "patientForCreation")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<patient::New>,
}

/// Assignment of an [`Organization`] to an [`Accession`].
///
/// [`None`] `organization_id` removes the current assignment.
///
/// [`Organization`]: crate::domain::Organization
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrganizationAssignment {
    /// ID of the [`Accession`] to change.
    pub accession_id: Id,

    /// ID of the [`Organization`] to assign, if any.
    ///
    /// [`Organization`]: crate::domain::Organization
    pub organization_id: Option<organization::Id>,
}

/// File to be attached to an [`Accession`].
#[derive(Clone, Debug)]
pub struct NewAttachment {
    /// ID of the [`Accession`] to attach the file to.
    pub accession_id: Id,

    /// Name of the file.
    pub file_name: String,

    /// MIME type of the file.
    pub content_type: String,

    /// Contents of the file.
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod spec {
    use super::{patient, Accession, Id, PatientAssignment, Status};

    #[test]
    fn status_uses_wire_names() {
        assert_eq!(Status::ReadyForTesting.to_string(), "Ready For Testing");
        assert_eq!("QA Review".parse::<Status>().unwrap(), Status::QaReview);
        assert_eq!(
            serde_json::to_string(&Status::TestComplete).unwrap(),
            r#""Test Complete""#,
        );
        assert_eq!(Status::ALL.len(), 8);
    }

    #[test]
    fn deserializes_minimal_accession() {
        let accession: Accession = serde_json::from_str(
            r#"{
                "id": "6b0b8e1c-54f5-4b79-9d4c-1b1a3a6f2a10",
                "status": "Draft"
            }"#,
        )
        .unwrap();

        assert_eq!(accession.status, Status::Draft);
        assert!(accession.accession_number.is_none());
        assert!(accession.patient.is_none());
        assert!(accession.attachments.is_empty());
    }

    #[test]
    fn serializes_patient_assignment() {
        let accession_id = Id::new();
        let patient_id = patient::Id::new();

        let existing = PatientAssignment {
            accession_id,
            patient_id: Some(patient_id),
            patient: None,
        };
        assert_eq!(
            serde_json::to_value(&existing).unwrap(),
            serde_json::json!({
                "accessionId": accession_id.to_string(),
                "patientId": patient_id.to_string(),
            }),
        );

        let new = PatientAssignment {
            accession_id,
            patient_id: None,
            patient: Some(patient::New {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                birth_date: None,
                sex: patient::Sex::Female,
            }),
        };
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            serde_json::json!({
                "accessionId": accession_id.to_string(),
                "patientForCreation": {
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "sex": "Female",
                },
            }),
        );
    }
}
