use std::fs;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use deckhand::data::loader::default_sources;
use deckhand::server::create_router;
use deckhand::state::AppState;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const OFFICIAL_CSV: &str = "\
カードID,カード名,色,タイプ,コスト,特徴,入手情報
OP01-001,ロロノア・ゾロ,赤,LEADER,-,超新星/麦わらの一味,ブースターパック【OP-01】
OP01-016,ナミ,赤,CHARACTER,1,麦わらの一味,ブースターパック【OP-01】
OP01-060,ドンキホーテ・ドフラミンゴ,青,LEADER,-,王下七武海,ブースターパック【OP-01】
ST01-004,サンジ,赤/緑,CHARACTER,2,麦わらの一味,スタートデッキ【ST-01】
";

fn router_with_data() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cardlist_filtered.csv"), OFFICIAL_CSV).unwrap();
    let state = AppState::new(default_sources(dir.path()));
    (create_router(state), dir)
}

fn router_without_data() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(default_sources(dir.path()));
    (create_router(state), dir)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = router_with_data();
    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_filter_returns_count_and_cards() {
    let (app, _dir) = router_with_data();
    let response = app
        .oneshot(post_json("/api/filter", r#"{"types": ["LEADER"], "colors": ["赤"]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["cards"][0]["card_id"], "OP01-001");
    assert_eq!(json["cards"][0]["type"], "LEADER");
    assert_eq!(json["cards"][0]["cost"], 0);
    assert_eq!(json["cards"][0]["series_id"], "OP-01");
}

#[tokio::test]
async fn test_filter_empty_body_object_returns_all() {
    let (app, _dir) = router_with_data();
    let response = app.oneshot(post_json("/api/filter", "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 4);
}

#[tokio::test]
async fn test_filter_leader_colors_excludes_leaders() {
    let (app, _dir) = router_with_data();
    let response = app
        .oneshot(post_json("/api/filter", r#"{"leader_colors": ["赤"]}"#))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["cards"][0]["card_id"], "OP01-016");
    assert_eq!(json["cards"][1]["card_id"], "ST01-004");
}

#[tokio::test]
async fn test_filter_malformed_body_is_bad_request() {
    let (app, _dir) = router_with_data();
    let response = app
        .oneshot(post_json("/api/filter", r#"{"costs": "three"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_filter_unknown_parallel_mode_is_rejected() {
    let (app, _dir) = router_with_data();
    let response = app
        .oneshot(post_json("/api/filter", r#"{"parallel_mode": "all"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_filter_null_facets_return_all() {
    let (app, _dir) = router_with_data();
    let response = app
        .oneshot(post_json(
            "/api/filter",
            r#"{"colors": null, "costs": null, "free_words": null, "parallel_mode": null}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 4);
}

#[tokio::test]
async fn test_filter_negative_cost_matches_nothing() {
    let (app, _dir) = router_with_data();
    let response = app
        .oneshot(post_json("/api/filter", r#"{"costs": [-1]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 0);
    assert_eq!(json["cards"], serde_json::json!([]));
}

#[tokio::test]
async fn test_filter_without_data_is_service_unavailable() {
    let (app, _dir) = router_without_data();
    let response = app.oneshot(post_json("/api/filter", "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("no card list found"));
}

#[tokio::test]
async fn test_filter_unreadable_data_is_server_error() {
    let (app, dir) = router_with_data();
    fs::write(dir.path().join("custom_cards.csv"), "").unwrap();
    let response = app.oneshot(post_json("/api/filter", "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("missing header row"));
}

#[tokio::test]
async fn test_facets() {
    let (app, _dir) = router_with_data();
    let response = app
        .oneshot(Request::get("/api/facets").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["types"], serde_json::json!(["CHARACTER", "LEADER"]));
    assert_eq!(json["costs"], serde_json::json!([0, 1, 2]));
    assert_eq!(json["series_ids"], serde_json::json!(["OP-01", "ST-01"]));
    assert_eq!(json["colors"], serde_json::json!(["緑", "赤", "青"]));
}

#[tokio::test]
async fn test_deck_export() {
    let (app, _dir) = router_without_data();
    let body = r#"{"name": "Zoro Red", "leader": "OP01-001", "cards": {"OP01-016": 4, "ST01-004": 2}}"#;
    let response = app.oneshot(post_json("/api/deck/export", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        String::from_utf8(bytes.to_vec()).unwrap(),
        "# Zoro Red\n1xOP01-001\n4xOP01-016\n2xST01-004"
    );
}

#[tokio::test]
async fn test_deck_export_without_leader_is_bad_request() {
    let (app, _dir) = router_without_data();
    let response = app
        .oneshot(post_json("/api/deck/export", r#"{"leader": ""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "deck has no leader");
}
