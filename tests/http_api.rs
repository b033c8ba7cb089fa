use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::ServiceExt;

use playerconsole::server::app;
use playerconsole::store::PlayerStore;

fn test_app() -> Router {
    let mut store = PlayerStore::empty();
    store
        .set(
            "15550001111",
            json!({"scripts": {"adventure": {"state": "State_New"}}}),
        )
        .unwrap();
    store.set("15550002222", json!({"scripts": {}})).unwrap();
    app(Arc::new(RwLock::new(store)))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn list_players_returns_storage_key_mapping() {
    let response = test_app()
        .oneshot(Request::builder().uri("/players").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let map: BTreeMap<String, Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(map.len(), 2);
    assert!(map.contains_key("plr:+15550001111"));
    assert!(map.contains_key("plr:+15550002222"));
}

#[tokio::test]
async fn get_player_by_friendly_key() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/players/15550001111")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(payload["scripts"]["adventure"]["state"], "State_New");
}

#[tokio::test]
async fn get_missing_player_is_404_with_text() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/players/15559999999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("15559999999"));
}

#[tokio::test]
async fn delete_then_list_drops_the_key() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/players/15550001111")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The caller obligation after a 2xx delete: re-issue the GET
    let response = app
        .oneshot(Request::builder().uri("/players").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let map: BTreeMap<String, Value> =
        serde_json::from_str(&body_string(response).await).unwrap();
    assert!(!map.contains_key("plr:+15550001111"));
    assert!(map.contains_key("plr:+15550002222"));
}

#[tokio::test]
async fn delete_missing_player_reports_failure_text() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/players/15559999999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("15559999999"));
}

#[tokio::test]
async fn put_creates_a_record() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/players/15550003333")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"scripts": {}}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/players/15550003333")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn debug_prefix_serves_the_same_records() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/debug/players")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let map: BTreeMap<String, Value> =
        serde_json::from_str(&body_string(response).await).unwrap();
    assert!(map.contains_key("plr:+15550001111"));

    // Deleting under /debug is visible at the root too
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/debug/players/15550001111")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(Request::builder().uri("/players").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let map: BTreeMap<String, Value> =
        serde_json::from_str(&body_string(response).await).unwrap();
    assert!(!map.contains_key("plr:+15550001111"));
}

#[tokio::test]
async fn admin_page_renders_rows_with_actions() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("<th>Players</th><th>Delete</th>"));
    assert!(html.contains("View 15550001111"));
    assert!(html.contains("Delete 15550002222"));
    assert!(html.contains("href=\"/players/15550001111/view\""));
}

#[tokio::test]
async fn debug_admin_page_links_stay_under_debug() {
    let response = test_app()
        .oneshot(Request::builder().uri("/debug/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("href=\"/debug/players/15550001111/view\""));
    assert!(html.contains("action=\"/debug/players/15550002222/delete\""));
}

#[tokio::test]
async fn view_page_renders_expanded_json() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/players/15550001111/view")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Player 15550001111"));
    assert!(html.contains("adventure"));
}

#[tokio::test]
async fn view_missing_player_is_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/players/15559999999/view")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("15559999999"));
}

#[tokio::test]
async fn form_delete_redirects_to_the_table() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/players/15550001111/delete")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/"
    );
}

#[tokio::test]
async fn form_delete_under_debug_redirects_under_debug() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/debug/players/15550001111/delete")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/debug/"
    );
}

#[tokio::test]
async fn form_delete_failure_surfaces_the_reason() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/players/15559999999/delete")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Delete Failed"));
    assert!(html.contains("15559999999"));
}
