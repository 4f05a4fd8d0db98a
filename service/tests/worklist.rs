//! Worklist fetching driven by the `Store`.

mod support;

use std::{rc::Rc, time::Duration};

use futures::future;
use service::worklist::{Feed, State, Store};

use self::support::{page, Harness};

const DEBOUNCE: Duration = Duration::from_millis(400);

fn rows(numbers: &[&str]) -> serde_json::Value {
    numbers
        .iter()
        .map(|n| {
            serde_json::json!({
                "id": uuid::Uuid::new_v4().to_string(),
                "accessionNumber": n,
                "status": "Testing",
            })
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn fetches_current_page() {
    let h = Harness::new("/accessions");
    _ = h.backend.on(
        "GET /api/accessions?pageNumber=1&pageSize=10",
        page(
            &rows(&["ACC-1", "ACC-2"]),
            r#"{"pageNumber":1,"pageSize":10,"totalCount":2,"totalPages":1}"#,
        ),
    );
    let store = Rc::new(Store::new(State::default(), DEBOUNCE));
    let feed = Feed::new(h.service.clone(), Rc::clone(&store));

    assert!(feed.refresh().await);

    let state = feed.state();
    let page = state.value().unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].accession_number.as_deref(), Some("ACC-1"));
    assert_eq!(
        feed.key(),
        Some(service::cache::key::ACCESSIONS.list(&store.effective_query())),
    );
}

#[tokio::test(start_paused = true)]
async fn discards_stale_results() {
    let h = Harness::new("/accessions");
    _ = h
        .backend
        .with_latency(Duration::from_millis(100))
        .on(
            "GET /api/accessions?pageNumber=1&pageSize=10",
            page(
                &rows(&["ACC-1"]),
                r#"{"pageNumber":1,"pageSize":10,"totalCount":11,"totalPages":2}"#,
            ),
        )
        .on(
            "GET /api/accessions?pageNumber=2&pageSize=10",
            page(
                &rows(&["ACC-11"]),
                r#"{"pageNumber":2,"pageSize":10,"totalCount":11,"totalPages":2}"#,
            ),
        );
    let store = Rc::new(Store::new(State::default(), DEBOUNCE));
    let feed = Feed::new(h.service.clone(), Rc::clone(&store));

    let first = feed.refresh();
    let second = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        store.set_page(2).unwrap();
        feed.refresh().await
    };
    let (first, second) = future::join(first, second).await;

    assert!(!first, "page 1 arrived after moving to page 2");
    assert!(second);
    let state = feed.state();
    let page = state.value().unwrap();
    assert_eq!(page.pagination.page_number(), 2);
    assert_eq!(page.items[0].accession_number.as_deref(), Some("ACC-11"));
}

#[tokio::test(start_paused = true)]
async fn refetches_after_debounced_search() {
    let h = Harness::new("/accessions");
    _ = h.backend.on(
        "GET /api/accessions?pageNumber=1&pageSize=10",
        page(
            &rows(&[]),
            r#"{"pageNumber":1,"pageSize":10,"totalCount":0,"totalPages":0}"#,
        ),
    );
    let store = Rc::new(Store::new(State::default(), DEBOUNCE));
    let feed = Feed::new(h.service.clone(), Rc::clone(&store));
    assert!(feed.refresh().await);

    store.set_free_text_filter("ACC");
    assert!(feed.refresh().await, "raw input doesn't change the query");
    assert_eq!(h.backend.requests().len(), 1);

    tokio::time::sleep(DEBOUNCE * 2).await;
    _ = feed.refresh().await;

    assert_eq!(
        h.backend.requests().last().map(String::as_str),
        Some(
            "GET /api/accessions?pageNumber=1&pageSize=10&filters=\
             accessionNumber%7CpatientFirstName%7CpatientLastName%7C\
             organizationName%40%3D*ACC",
        ),
    );
    assert!(feed.state().error().is_some(), "unknown route is a 404");
}

#[tokio::test(start_paused = true)]
async fn shares_page_left_while_in_flight() {
    let h = Harness::new("/accessions");
    _ = h
        .backend
        .with_latency(Duration::from_millis(100))
        .on(
            "GET /api/accessions?pageNumber=1&pageSize=10",
            page(
                &rows(&["ACC-1"]),
                r#"{"pageNumber":1,"pageSize":10,"totalCount":11,"totalPages":2}"#,
            ),
        )
        .on(
            "GET /api/accessions?pageNumber=2&pageSize=10",
            page(
                &rows(&["ACC-11"]),
                r#"{"pageNumber":2,"pageSize":10,"totalCount":11,"totalPages":2}"#,
            ),
        );
    let paging = Rc::new(Store::new(State::default(), DEBOUNCE));
    let paging_feed = Feed::new(h.service.clone(), Rc::clone(&paging));
    let other = Feed::new(
        h.service.clone(),
        Rc::new(Store::new(State::default(), DEBOUNCE)),
    );

    let (_, moved, shown) = future::join3(
        paging_feed.refresh(),
        async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            paging.set_page(2).unwrap();
            paging_feed.refresh().await
        },
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            other.refresh().await
        },
    )
    .await;

    assert!(moved);
    assert!(shown);
    assert_eq!(
        h.backend.requests(),
        [
            "GET /api/accessions?pageNumber=1&pageSize=10",
            "GET /api/accessions?pageNumber=2&pageSize=10",
        ],
    );
    let state = other.state();
    let page = state.value().unwrap();
    assert_eq!(page.items[0].accession_number.as_deref(), Some("ACC-1"));
}
