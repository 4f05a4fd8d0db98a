//! Landing page.

use common::Loadable;
use service::{domain::user::CurrentUser, query, Query as _};

use crate::{AsError, Error};

use super::Context;

/// Renders the landing page.
pub async fn render(ctx: &Context) -> String {
    let user = ctx
        .service()
        .execute(query::user::Current)
        .await
        .map_err(AsError::into_error);
    user_bar(&Loadable::from_result(user))
}

/// Renders the [`CurrentUser`] state.
#[must_use]
pub fn user_bar(user: &Loadable<CurrentUser, Error>) -> String {
    match user {
        Loadable::Idle | Loadable::Loading => "Loading user...\n".into(),
        Loadable::Failed(e) => format!("Failed to load user: {}\n", e.message),
        Loadable::Loaded(CurrentUser {
            is_logged_in: true,
            username,
            logout_url,
        }) => format!(
            "Signed in as {}\nLog out: {logout_url}\n",
            username.as_deref().unwrap_or("unknown user"),
        ),
        Loadable::Loaded(CurrentUser {
            is_logged_in: false,
            ..
        }) => "Not signed in\n".into(),
    }
}
