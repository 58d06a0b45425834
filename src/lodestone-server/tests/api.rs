//! End-to-end tests for the HTTP surface, driven through the router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use lodestone_server::{router, AppState};
use lodestone_store::{collections, MemoryStore, SqliteStore};
use serde_json::{json, Value};
use tower::ServiceExt;

fn lodestone_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert(
        collections::RESOURCE_HUBS,
        "h1",
        json!({
            "name": "Lamplighter's Stall",
            "minProvisions": 2,
            "maxProvisions": 2,
            "upperPriceModifier": 0,
            "lowerPriceModifier": 0,
            "selectedProvisions": ["p1"]
        }),
    );
    store.insert(
        collections::RESOURCE_HUBS,
        "empty",
        json!({
            "name": "Closed Shop",
            "minProvisions": 0,
            "maxProvisions": 0,
            "upperPriceModifier": 10,
            "lowerPriceModifier": 10,
            "selectedProvisions": ["p1"]
        }),
    );
    store.insert(
        collections::RESOURCE_HUBS,
        "stale",
        json!({
            "name": "Dusty Cellar",
            "minProvisions": 3,
            "maxProvisions": 3,
            "upperPriceModifier": 0,
            "lowerPriceModifier": 0,
            "selectedProvisions": ["gone", "p2"]
        }),
    );
    store.insert(
        collections::PROVISIONS,
        "p1",
        json!({"name": "Torch", "basePrice": 50, "rarity": "Common"}),
    );
    store.insert(
        collections::PROVISIONS,
        "p2",
        json!({"name": "Rope", "basePrice": 2.5, "rarity": "Common"}),
    );
    store.insert(
        collections::SETTINGS,
        collections::RARITY_SETTINGS_ID,
        json!({"options": [{"value": "Common", "weight": 75}]}),
    );
    store
}

fn app(store: MemoryStore) -> Router {
    router(Arc::new(AppState::new(store)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/lodestone/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(MemoryStore::new()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn lists_hubs() {
    let request = Request::get("/api/lodestone/hubs").body(Body::empty()).unwrap();
    let (status, body) = send(app(lodestone_store()), request).await;
    assert_eq!(status, StatusCode::OK);

    let hubs = body.as_array().unwrap();
    assert_eq!(hubs.len(), 3);
    let h1 = hubs.iter().find(|h| h["id"] == "h1").unwrap();
    assert_eq!(h1["name"], "Lamplighter's Stall");
    assert_eq!(h1["minProvisions"], 2);
    assert_eq!(h1["selectedProvisions"], json!(["p1"]));
}

#[tokio::test]
async fn generates_single_provision_list() {
    let (status, body) = send(app(lodestone_store()), generate_request(r#"{"hubId":"h1"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "hubName": "Lamplighter's Stall",
            "items": [
                {"id": "p1", "name": "Torch", "price": 50.0, "count": 2, "rarity": "Common"}
            ]
        })
    );
}

#[tokio::test]
async fn zero_target_gives_empty_items() {
    let (status, body) =
        send(app(lodestone_store()), generate_request(r#"{"hubId":"empty"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hubName"], "Closed Shop");
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn stale_provision_ids_are_skipped() {
    let (status, body) =
        send(app(lodestone_store()), generate_request(r#"{"hubId":"stale"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "p2");
    assert_eq!(items[0]["count"], 3);
    assert_eq!(items[0]["price"], 2.5);
}

#[tokio::test]
async fn unknown_hub_is_not_found() {
    let (status, body) =
        send(app(lodestone_store()), generate_request(r#"{"hubId":"nowhere"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Failed to generate list");
    assert!(body["details"].as_str().unwrap().contains("nowhere"));
}

#[tokio::test]
async fn missing_hub_id_is_bad_request() {
    let (status, body) = send(app(lodestone_store()), generate_request("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to generate list");

    let (status, _) = send(app(lodestone_store()), generate_request(r#"{"hubId":"  "}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    // No schema: every query fails
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    let app = router(Arc::new(AppState::new(store)));

    let (status, body) = send(app.clone(), generate_request(r#"{"hubId":"h1"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate list");
    assert!(!body["details"].as_str().unwrap().is_empty());

    let request = Request::get("/api/lodestone/hubs").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch resource hubs");
}

#[tokio::test]
async fn openapi_lists_generate_route() {
    let request = Request::get("/openapi.json").body(Body::empty()).unwrap();
    let (status, body) = send(app(MemoryStore::new()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/lodestone/generate"]["post"].is_object());
}
