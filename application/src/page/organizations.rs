//! Organization settings pages.

use service::{
    domain::{organization, Organization},
    query, Query as _,
};

use crate::{
    table::{Column, Table},
    AsError, Error,
};

use super::Context;

/// [`Column`]s of the organizations list.
const COLUMNS: &[Column<Organization, ()>] = &[
    Column {
        title: "Name",
        sort: None,
        cell: |o| o.name.clone(),
    },
    Column {
        title: "Status",
        sort: None,
        cell: |o| o.status.to_string(),
    },
];

/// Renders a page of [`Organization`]s.
///
/// # Errors
///
/// If the [`Organization`]s cannot be fetched.
pub async fn render_list(ctx: &Context) -> Result<String, Error> {
    let page = ctx
        .service()
        .execute(query::organizations::List(ctx.settings_page().clone()))
        .await
        .map_err(AsError::into_error)?;
    Ok(format!(
        "Organizations\n{}",
        Table::new(COLUMNS).render(&page.items, Some(&page.pagination)),
    ))
}

/// Renders the [`Organization`] with the provided ID.
///
/// # Errors
///
/// If the [`Organization`] cannot be fetched.
pub async fn render_one(
    ctx: &Context,
    id: organization::Id,
) -> Result<String, Error> {
    let organization = ctx
        .service()
        .execute(query::organization::ById(id))
        .await
        .map_err(AsError::into_error)?;
    Ok(format!(
        "Organization {}\nStatus: {}\n",
        organization.name, organization.status,
    ))
}
