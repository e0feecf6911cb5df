mod common;

use axum::http::StatusCode;
use common::{body_json, send, setup_app};
use notebook_pages::{list_pages, seed_example_pages};
use serde_json::{json, Value};

fn titles(pages: &Value) -> Vec<&str> {
    pages
        .as_array()
        .expect("expected an array of pages")
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn create_then_get_returns_same_page() {
    let (app, _pool) = setup_app();

    let response = send(
        &app,
        "POST",
        "/pages/",
        Some(json!({"title": "Ideas", "content": "build a notebook"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().expect("id should be a string");
    assert!(!id.is_empty());

    let response = send(&app, "GET", &format!("/pages/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched["title"], "Ideas");
    assert_eq!(fetched["content"], "build a notebook");
}

#[tokio::test]
async fn get_unknown_page_is_not_found() {
    let (app, _pool) = setup_app();

    let response = send(&app, "GET", "/pages/no-such-page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Page not found");
}

#[tokio::test]
async fn list_is_sorted_case_insensitively() {
    let (app, _pool) = setup_app();

    for title in ["banana", "Apple", "cherry"] {
        let response = send(
            &app,
            "POST",
            "/pages/",
            Some(json!({"title": title, "content": ""})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = send(&app, "GET", "/pages/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(titles(&body_json(response).await), vec!["Apple", "banana", "cherry"]);
}

#[tokio::test]
async fn list_on_empty_store_is_empty_array() {
    let (app, _pool) = setup_app();

    let response = send(&app, "GET", "/pages/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let (app, _pool) = setup_app();

    let created = body_json(
        send(
            &app,
            "POST",
            "/pages/",
            Some(json!({"title": "Draft", "content": "v1"})),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/pages/{id}"),
        Some(json!({"title": "Final", "content": "v2"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": id, "title": "Final", "content": "v2"})
    );

    let fetched = body_json(send(&app, "GET", &format!("/pages/{id}"), None).await).await;
    assert_eq!(fetched["title"], "Final");
}

#[tokio::test]
async fn update_unknown_page_is_not_found_and_changes_nothing() {
    let (app, pool) = setup_app();
    seed_example_pages(&pool.get().unwrap()).unwrap();
    let before = list_pages(&pool.get().unwrap()).unwrap();

    let response = send(
        &app,
        "PUT",
        "/pages/missing",
        Some(json!({"title": "X", "content": "Y"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let after = list_pages(&pool.get().unwrap()).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn delete_returns_no_content_then_not_found() {
    let (app, _pool) = setup_app();

    let created = body_json(
        send(
            &app,
            "POST",
            "/pages/",
            Some(json!({"title": "Temp", "content": "bye"})),
        )
        .await,
    )
    .await;
    let uri = format!("/pages/{}", created["id"].as_str().unwrap());

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());

    for _ in 0..2 {
        let response = send(&app, "DELETE", &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_title_is_rejected_on_create() {
    let (app, pool) = setup_app();

    let response = send(
        &app,
        "POST",
        "/pages/",
        Some(json!({"title": "", "content": "body"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "title must not be empty");
    assert!(list_pages(&pool.get().unwrap()).unwrap().is_empty());
}

#[tokio::test]
async fn empty_title_is_rejected_on_update() {
    let (app, _pool) = setup_app();

    let created = body_json(
        send(
            &app,
            "POST",
            "/pages/",
            Some(json!({"title": "Keep me", "content": "body"})),
        )
        .await,
    )
    .await;
    let uri = format!("/pages/{}", created["id"].as_str().unwrap());

    let response = send(&app, "PUT", &uri, Some(json!({"title": "", "content": "new"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched = body_json(send(&app, "GET", &uri, None).await).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn whitespace_title_is_accepted() {
    let (app, _pool) = setup_app();

    let response = send(
        &app,
        "POST",
        "/pages/",
        Some(json!({"title": " ", "content": "x"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["title"], " ");
}

#[tokio::test]
async fn missing_fields_are_rejected_before_storage() {
    let (app, pool) = setup_app();

    let response = send(&app, "POST", "/pages/", Some(json!({"title": "No body"}))).await;
    assert!(
        response.status().is_client_error(),
        "unexpected status {}",
        response.status()
    );

    let response = send(&app, "POST", "/pages/", None).await;
    assert!(response.status().is_client_error());

    assert!(list_pages(&pool.get().unwrap()).unwrap().is_empty());
}

#[tokio::test]
async fn seeded_store_can_be_replaced_with_user_pages() {
    let (app, pool) = setup_app();
    assert_eq!(seed_example_pages(&pool.get().unwrap()).unwrap(), 3);

    let pages = body_json(send(&app, "GET", "/pages/", None).await).await;
    let pages = pages.as_array().unwrap().clone();
    assert_eq!(pages.len(), 3);

    for page in &pages {
        let uri = format!("/pages/{}", page["id"].as_str().unwrap());
        assert_eq!(send(&app, "DELETE", &uri, None).await.status(), StatusCode::NO_CONTENT);
    }

    for title in ["Zebra", "apple"] {
        let response = send(
            &app,
            "POST",
            "/pages/",
            Some(json!({"title": title, "content": "x"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed = body_json(send(&app, "GET", "/pages/", None).await).await;
    assert_eq!(titles(&listed), vec!["apple", "Zebra"]);
}

#[tokio::test]
async fn health_reports_page_count_and_classifier() {
    let (app, pool) = setup_app();
    seed_example_pages(&pool.get().unwrap()).unwrap();

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["pages"], 3);
    assert_eq!(json["classifier"], "fake");
}
