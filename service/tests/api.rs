//! Response handling of the REST client.

mod support;

use common::{
    operations::{By, Select},
    pagination::Pagination,
};
use futures::future;
use service::{
    domain::{user::ClaimSet, Organization},
    infra::{api, rest::Response, Api as _},
    navigate::Navigator as _,
    read::{accession, list},
};

use self::support::{json, page, problem, Harness};

#[tokio::test]
async fn lists_accessions_without_query_string() {
    let h = Harness::new("/accessions");
    _ = h.backend.on(
        "GET /api/accessions",
        page(
            &serde_json::json!([]),
            r#"{"pageNumber":1,"pageSize":10,"totalCount":0,"totalPages":0}"#,
        ),
    );

    let page: accession::list::Page = h
        .service
        .api()
        .execute(Select(By::<accession::list::Page, _>::new(
            list::Params::default(),
        )))
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(h.backend.requests(), ["GET /api/accessions"]);
}

#[tokio::test]
async fn parses_pagination_header() {
    let h = Harness::new("/accessions");
    _ = h.backend.on(
        "GET /api/accessions?pageNumber=2",
        page(
            &serde_json::json!([]),
            r#"{"pageNumber":2,"pageSize":10,"totalCount":25,"totalPages":3}"#,
        ),
    );

    let page: accession::list::Page = h
        .service
        .api()
        .execute(Select(By::<accession::list::Page, _>::new(list::Params {
            page_number: Some(2),
            ..list::Params::default()
        })))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.pagination, Pagination::new(2, 10, 25).unwrap());
    assert_eq!(page.pagination.total_pages(), 3);
    assert!(page.pagination.has_previous_page());
    assert!(page.pagination.has_next_page());
}

#[tokio::test]
async fn rejects_missing_pagination_header() {
    let h = Harness::new("/accessions");
    _ = h
        .backend
        .on("GET /api/accessions", json(&serde_json::json!([])));

    let err = h
        .service
        .api()
        .execute(Select(By::<accession::list::Page, _>::new(
            list::Params::default(),
        )))
        .await
        .unwrap_err();

    assert!(matches!(err.as_ref(), api::Error::Pagination(_)));
    assert_eq!(h.toasts.messages().len(), 1);
}

#[tokio::test]
async fn concurrent_unauthorized_redirect_once() {
    let h = Harness::new("/accessions/new");
    _ = h.backend.on("GET /bff/user", problem(401, "expired"));
    _ = h.backend.on("GET /api/accessions", problem(401, "expired"));

    let api = h.service.api();
    let (user, list) = future::join(
        api.execute(Select(By::<ClaimSet, _>::new(()))),
        api.execute(Select(By::<accession::list::Page, _>::new(
            list::Params::default(),
        ))),
    )
    .await;

    assert!(matches!(user.unwrap_err().as_ref(), api::Error::Unauthorized));
    assert!(matches!(list.unwrap_err().as_ref(), api::Error::Unauthorized));
    assert_eq!(
        h.history.redirected_to().as_deref(),
        Some("/bff/login?returnUrl=%2Faccessions%2Fnew"),
    );
    assert!(h.toasts.messages().is_empty(), "no toast on 401");

}

#[tokio::test]
async fn redirects_again_after_successful_response() {
    let h = Harness::new("/accessions");
    _ = h.backend.on("GET /bff/user", problem(401, "expired"));
    let api = h.service.api();

    _ = api
        .execute(Select(By::<ClaimSet, _>::new(())))
        .await
        .unwrap_err();
    h.history.navigate("/settings/containers");
    _ = api
        .execute(Select(By::<ClaimSet, _>::new(())))
        .await
        .unwrap_err();
    assert_eq!(
        h.history.redirected_to().as_deref(),
        Some("/bff/login?returnUrl=%2Faccessions"),
        "no redirect until a request succeeds",
    );

    _ = h.backend.on("GET /bff/user", json(&serde_json::json!([])));
    _ = api.execute(Select(By::<ClaimSet, _>::new(()))).await.unwrap();
    _ = h.backend.on("GET /bff/user", problem(401, "expired"));
    _ = api
        .execute(Select(By::<ClaimSet, _>::new(())))
        .await
        .unwrap_err();

    assert_eq!(
        h.history.redirected_to().as_deref(),
        Some("/bff/login?returnUrl=%2Fsettings%2Fcontainers"),
    );
    assert!(h.toasts.messages().is_empty());
}

#[tokio::test]
async fn surfaces_unreachable_server_as_notification() {
    let h = Harness::new("/settings/organizations");
    _ = h.backend.fail("GET /api/organizations/all");

    let err = h
        .service
        .api()
        .execute(Select(By::<Vec<Organization>, _>::new(())))
        .await
        .unwrap_err();

    assert!(
        matches!(err.as_ref(), api::Error::Transport(_)),
        "unexpected error: {err}",
    );
    assert_eq!(
        h.toasts.messages(),
        ["Unable to reach the server, please try again"],
    );
    assert_eq!(h.history.redirected_to(), None);
}

#[tokio::test]
async fn surfaces_unreadable_body_as_notification() {
    let h = Harness::new("/");
    _ = h.backend.on(
        "GET /bff/user",
        Response::new(http::StatusCode::OK, "<html>login</html>"),
    );

    let err = h
        .service
        .api()
        .execute(Select(By::<ClaimSet, _>::new(())))
        .await
        .unwrap_err();

    assert!(
        matches!(err.as_ref(), api::Error::Json(_)),
        "unexpected error: {err}",
    );
    assert_eq!(h.toasts.messages(), ["Received an unreadable response"]);
}

#[tokio::test]
async fn surfaces_server_detail_as_notification() {
    for status in [400, 422, 500] {
        let h = Harness::new("/settings/organizations");
        _ = h
            .backend
            .on("GET /api/organizations/all", problem(status, "Boom"));

        let err = h
            .service
            .api()
            .execute(Select(By::<Vec<Organization>, _>::new(())))
            .await
            .unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                api::Error::Status { status: s, detail: Some(d) }
                    if s.as_u16() == status && d == "Boom",
            ),
            "unexpected error: {err}",
        );
        assert_eq!(h.toasts.messages(), ["Boom"]);
        assert_eq!(h.history.redirected_to(), None);
    }
}

#[tokio::test]
async fn decodes_user_claims() {
    let h = Harness::new("/");
    _ = h.backend.on(
        "GET /bff/user",
        json(&serde_json::json!([
            {"type": "name", "value": "ada"},
            {"type": "role", "value": "lab"},
            {"type": "role", "value": "admin"},
        ])),
    );

    let claims: ClaimSet = h
        .service
        .api()
        .execute(Select(By::<ClaimSet, _>::new(())))
        .await
        .unwrap();

    assert_eq!(claims.username(), Some("ada"));
    assert_eq!(claims.all("role").collect::<Vec<_>>(), ["lab", "admin"]);
    assert_eq!(claims.logout_url(), "/bff/logout");
}
