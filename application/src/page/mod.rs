//! Pages of the application, rendered as text.

pub mod accession;
pub mod containers;
pub mod home;
pub mod new_accession;
pub mod organizations;
pub mod worklist;

use std::rc::Rc;

use derive_more::Debug;
use service::{read::list, worklist::Store};

use crate::{router::Route, Error, Service};

/// Shared dependencies of the pages.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] the pages read and write through.
    service: Service,

    /// Worklist [`Store`].
    store: Rc<Store>,

    /// [`list::Params`] of the settings lists.
    settings_page: list::Params,
}

impl Context {
    /// Creates a new [`Context`] with the provided parameters.
    #[must_use]
    pub fn new(
        service: Service,
        store: Rc<Store>,
        settings_page: list::Params,
    ) -> Self {
        Self {
            service,
            store,
            settings_page,
        }
    }

    /// Returns [`Service`] of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns worklist [`Store`] of this [`Context`].
    #[must_use]
    pub fn store(&self) -> &Rc<Store> {
        &self.store
    }

    /// Returns [`list::Params`] of the settings lists.
    #[must_use]
    pub fn settings_page(&self) -> &list::Params {
        &self.settings_page
    }
}

/// Renders the page of the provided [`Route`].
///
/// # Errors
///
/// If the page data cannot be loaded or changed.
pub async fn render(ctx: &Context, route: &Route) -> Result<String, Error> {
    match route {
        Route::Home => Ok(home::render(ctx).await),
        Route::Accessions => worklist::render(ctx).await,
        Route::NewAccession => new_accession::render(ctx).await,
        Route::Accession(id) => accession::render(ctx, *id).await,
        Route::Organizations => organizations::render_list(ctx).await,
        Route::Organization(id) => organizations::render_one(ctx, *id).await,
        Route::Containers => containers::render(ctx).await,
        Route::NotFound(path) => Ok(format!("Page `{path}` not found\n")),
    }
}
