//! Single accession page.

use std::fmt::Write as _;

use service::{
    domain::{accession, Accession, Organization, Patient},
    query, Query as _,
};

use crate::{AsError, Error};

use super::Context;

/// Renders the page of the [`Accession`] with the provided ID.
///
/// # Errors
///
/// If the [`Accession`] or the [`Organization`]s cannot be fetched.
pub async fn render(
    ctx: &Context,
    id: accession::Id,
) -> Result<String, Error> {
    let accession = ctx
        .service()
        .execute(query::accession::ForEdit(id))
        .await
        .map_err(AsError::into_error)?;
    let organizations = ctx
        .service()
        .execute(query::organizations::All)
        .await
        .map_err(AsError::into_error)?;
    Ok(details(&accession, &organizations))
}

/// Renders the details of the provided [`Accession`].
#[must_use]
pub fn details(
    accession: &Accession,
    organizations: &[Organization],
) -> String {
    let mut out = format!(
        "Accession {}\nStatus: {}\n",
        accession.accession_number.as_deref().unwrap_or("(unassigned)"),
        accession.status,
    );
    let patient = accession
        .patient
        .as_ref()
        .map_or_else(|| "(none)".to_owned(), Patient::full_name);
    _ = writeln!(out, "Patient: {patient}");
    let organization = accession.organization_id.map_or("(none)", |id| {
        organizations
            .iter()
            .find(|o| o.id == id)
            .map_or("(unknown)", |o| o.name.as_str())
    });
    _ = writeln!(out, "Organization: {organization}");
    if accession.attachments.is_empty() {
        out.push_str("No attachments\n");
    } else {
        out.push_str("Attachments:\n");
        for a in &accession.attachments {
            _ = write!(out, "  {}", a.filename);
            if let Some(comments) = &a.comments {
                _ = write!(out, " ({comments})");
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod spec {
    use service::domain::{
        accession::{self, Attachment, AttachmentId},
        organization, Accession, Organization, Patient,
    };

    use super::details;

    #[test]
    fn renders_accession_details() {
        let clinic = Organization {
            id: organization::Id::new(),
            name: "Clinic".into(),
            status: organization::Status::Active,
        };
        let accession = Accession {
            id: accession::Id::new(),
            accession_number: Some("ACC-7".into()),
            status: accession::Status::ReadyForTesting,
            patient: Some(Patient {
                id: service::domain::patient::Id::new(),
                first_name: Some("Ada".into()),
                last_name: Some("Lovelace".into()),
                sex: None,
                internal_id: None,
            }),
            organization_id: Some(clinic.id),
            attachments: vec![Attachment {
                id: AttachmentId::new(),
                filename: "req.pdf".into(),
                comments: Some("signed".into()),
            }],
        };

        assert_eq!(
            details(&accession, &[clinic]),
            "Accession ACC-7\n\
             Status: Ready For Testing\n\
             Patient: Ada Lovelace\n\
             Organization: Clinic\n\
             Attachments:\n  req.pdf (signed)\n",
        );
    }

    #[test]
    fn renders_missing_parts() {
        let accession = Accession {
            id: accession::Id::new(),
            accession_number: None,
            status: accession::Status::Draft,
            patient: None,
            organization_id: Some(organization::Id::new()),
            attachments: vec![],
        };

        assert_eq!(
            details(&accession, &[]),
            "Accession (unassigned)\n\
             Status: Draft\n\
             Patient: (none)\n\
             Organization: (unknown)\n\
             No attachments\n",
        );
    }
}
