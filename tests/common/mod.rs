// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    routing::post,
    Json, Router,
};
use meal_planner::config::Config;
use meal_planner::db::{FirestoreDb, LookupMode, MemoryDb, ProfileStore};
use meal_planner::routes::create_router;
use meal_planner::services::{CompletionClient, MealPlanGenerator, ProfileProvisioner};
use meal_planner::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app over the given store with the default (unreachable)
/// completion endpoint.
#[allow(dead_code)]
pub fn create_test_app(store: ProfileStore) -> (Router, Arc<AppState>) {
    create_test_app_with_config(store, Config::test_default())
}

/// Create a test app with an explicit config.
#[allow(dead_code)]
pub fn create_test_app_with_config(store: ProfileStore, config: Config) -> (Router, Arc<AppState>) {
    let completion = CompletionClient::new(&config).expect("Failed to build completion client");

    let state = Arc::new(AppState {
        config,
        provisioner: ProfileProvisioner::new(store),
        meal_plans: MealPlanGenerator::new(completion),
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an in-memory store, returning the store too.
#[allow(dead_code)]
pub fn create_memory_app() -> (Router, Arc<AppState>, MemoryDb) {
    let db = MemoryDb::new();
    let (app, state) = create_test_app(ProfileStore::Memory(db.clone()));
    (app, state, db)
}

/// Like [`create_memory_app`], but store lookups follow `mode`.
#[allow(dead_code)]
pub fn create_memory_app_with_lookup(mode: LookupMode) -> (Router, MemoryDb) {
    let db = MemoryDb::new();
    let (app, _) = create_test_app(ProfileStore::Memory(db.with_lookup_mode(mode)));
    (app, db)
}

/// Start a fake chat-completions server that answers every request with
/// `status` and `body`. Returns its URL.
#[allow(dead_code)]
pub async fn spawn_completion_server(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake completion server");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/v1/chat/completions", addr)
}

/// Chat-completions response whose single choice has `content`.
#[allow(dead_code)]
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

/// Create a test app whose completion service returns `content`.
#[allow(dead_code)]
pub async fn create_meal_plan_app(content: &str) -> Router {
    let url = spawn_completion_server(StatusCode::OK, completion_body(content)).await;
    let config = Config {
        completion_api_url: url,
        ..Config::test_default()
    };
    create_test_app_with_config(ProfileStore::Offline, config).0
}

/// JSON POST request.
#[allow(dead_code)]
pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
