use std::{io, process::ExitCode, rc::Rc, sync::OnceLock};

use application::{
    page::{self, Context},
    Args, Config, Route, Service,
};
use service::{
    infra::{rest, Reqwest, Rest},
    navigate::{History, Navigator as _},
    notify,
    read::list,
    worklist::{State, Store},
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

/// Maximum number of client-side navigations followed in a single run.
const MAX_NAVIGATIONS: usize = 5;

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

async fn start() -> Result<(), ()> {
    let Args {
        config,
        path,
        search,
        statuses,
        sort,
        page,
        page_size,
    } = Args::parse().unwrap_or_else(|e| e.exit());

    let config = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(config.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let rest_config = rest::Config::try_from(config.api.clone())
        .map_err(|e| log::error!("invalid `api.base_url`: {e}"))?;
    let transport = Reqwest::new(rest_config).map_err(|e| {
        log::error!("failed to initialize HTTP client: {e}");
    })?;
    let history = Rc::new(History::new(path));
    let api = Rest::new(transport, Rc::new(notify::Log), history.clone());
    let service = Service::new((&config).into(), api, history.clone());

    let mut state = State::new(config.worklist.page_size).map_err(|e| {
        log::error!("invalid `worklist.page_size`: {e}");
    })?;
    if let Some(search) = search {
        state.set_free_text_filter(search.clone());
        state.commit_free_text_filter(search);
    }
    for status in statuses {
        state.add_status_filter(status);
    }
    state.set_sort(sort);
    if let Some(size) = page_size {
        state.set_page_size(size).map_err(|e| log::error!("{e}"))?;
    }
    if let Some(number) = page {
        state.set_page(number).map_err(|e| log::error!("{e}"))?;
    }
    let settings_page = list::Params {
        page_number: Some(state.page_number()),
        page_size: Some(state.page_size()),
        ..list::Params::default()
    };
    let store = Rc::new(Store::new(state, config.worklist.debounce));
    let ctx = Context::new(service, store, settings_page);

    let mut current = history.current_path();
    for _ in 0..=MAX_NAVIGATIONS {
        let route = Route::resolve(&current);
        log::debug!("rendering `{current}` as `{route:?}`");
        let rendered = page::render(&ctx, &route).await;

        if let Some(url) = history.redirected_to() {
            println!("Login required: {url}");
            return Err(());
        }
        let output = rendered.map_err(|e| log::error!("{e}"))?;
        print!("{output}");

        let next = history.current_path();
        if next == current {
            return Ok(());
        }
        current = next;
    }
    log::error!("too many navigations, stopped at `{current}`");
    Err(())
}
