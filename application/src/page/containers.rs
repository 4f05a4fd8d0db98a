//! Container settings page.

use service::{domain::Container, query, Query as _};

use crate::{
    table::{Column, Table},
    AsError, Error,
};

use super::Context;

/// [`Column`]s of the containers list.
const COLUMNS: &[Column<Container, ()>] = &[
    Column {
        title: "Number",
        sort: None,
        cell: |c| c.container_number.clone().unwrap_or_default(),
    },
    Column {
        title: "Type",
        sort: None,
        cell: |c| c.kind.clone(),
    },
    Column {
        title: "Used for",
        sort: None,
        cell: |c| c.used_for.clone(),
    },
    Column {
        title: "Status",
        sort: None,
        cell: |c| c.status.to_string(),
    },
];

/// Renders a page of [`Container`]s.
///
/// # Errors
///
/// If the [`Container`]s cannot be fetched.
pub async fn render(ctx: &Context) -> Result<String, Error> {
    let page = ctx
        .service()
        .execute(query::containers::List(ctx.settings_page().clone()))
        .await
        .map_err(AsError::into_error)?;
    Ok(format!(
        "Containers\n{}",
        Table::new(COLUMNS).render(&page.items, Some(&page.pagination)),
    ))
}
