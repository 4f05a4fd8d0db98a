//! Page creating a new accession.

use service::{command::CreateAccession, Command as _};

use crate::{AsError, Error};

use super::Context;

/// Creates a new accession, which navigates to it.
///
/// # Errors
///
/// If the accession cannot be created.
pub async fn render(ctx: &Context) -> Result<String, Error> {
    let accession = ctx
        .service()
        .execute(CreateAccession::default())
        .await
        .map_err(AsError::into_error)?;
    Ok(format!("Created accession {}\n", accession.id))
}
