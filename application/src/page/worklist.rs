//! Accession worklist page.

use std::{fmt::Write as _, rc::Rc};

use common::Loadable;
use itertools::Itertools as _;
use service::{
    read::accession::list::Item,
    worklist::{self, Feed, State},
};

use crate::{
    table::{Column, Table},
    AsError as _, Error,
};

use super::Context;

/// [`Column`]s of the worklist.
const COLUMNS: &[Column<Item, worklist::Column>] = &[
    Column {
        title: "Accession",
        sort: Some(worklist::Column::AccessionNumber),
        cell: |i| i.accession_number.clone().unwrap_or_default(),
    },
    Column {
        title: "Status",
        sort: Some(worklist::Column::Status),
        cell: |i| i.status.to_string(),
    },
    Column {
        title: "First name",
        sort: Some(worklist::Column::PatientFirstName),
        cell: |i| i.patient_first_name.clone().unwrap_or_default(),
    },
    Column {
        title: "Last name",
        sort: Some(worklist::Column::PatientLastName),
        cell: |i| i.patient_last_name.clone().unwrap_or_default(),
    },
    Column {
        title: "Organization",
        sort: Some(worklist::Column::OrganizationName),
        cell: |i| i.organization_name.clone().unwrap_or_default(),
    },
];

/// Renders the worklist page of the current [`State`].
///
/// # Errors
///
/// If the page cannot be fetched.
pub async fn render(ctx: &Context) -> Result<String, Error> {
    let feed = Feed::new(ctx.service().clone(), Rc::clone(ctx.store()));
    _ = feed.refresh().await;

    let state = ctx.store().snapshot();
    let mut out = summary(&state);
    match feed.state() {
        Loadable::Loaded(page) => out.push_str(
            &Table::new(COLUMNS)
                .sorted(state.sort().map(|s| (s.column, s.order)))
                .render(&page.items, Some(&page.pagination)),
        ),
        Loadable::Failed(e) => return Err(e.as_error()),
        Loadable::Idle | Loadable::Loading => out.push_str("Loading...\n"),
    }
    Ok(out)
}

/// Renders the filters applied to the worklist.
#[must_use]
pub fn summary(state: &State) -> String {
    if !state.is_filtered() {
        return "Accessions\n".into();
    }
    let mut out = String::from("Accessions (filtered");
    if !state.filter().is_empty() {
        _ = write!(out, "; search: \"{}\"", state.filter());
    }
    if !state.statuses().is_empty() {
        _ = write!(out, "; status: {}", state.statuses().iter().join(", "));
    }
    if let Some(sort) = state.sort() {
        _ = write!(out, "; sort: {}", sort.to_sort_order());
    }
    out.push_str(")\n");
    out
}

#[cfg(test)]
mod spec {
    use service::{
        domain::accession::Status,
        worklist::{Column, State},
    };

    use super::summary;

    #[test]
    fn summarizes_filters() {
        let mut state = State::default();
        assert_eq!(summary(&state), "Accessions\n");

        state.commit_free_text_filter("smith");
        state.add_status_filter(Status::QaReview);
        state.add_status_filter(Status::Draft);
        state.toggle_sort(Column::PatientLastName);
        state.toggle_sort(Column::PatientLastName);

        assert_eq!(
            summary(&state),
            "Accessions (filtered; search: \"smith\"; \
             status: Draft, QA Review; sort: -patientLastName)\n",
        );
    }
}
