//! End-to-end tests for the agent registry HTTP API
//!
//! These tests drive the router with `tower::ServiceExt::oneshot` and verify:
//! - pagination and role filtering of the listing
//! - create / update / delete round trips
//! - error bodies for rejected requests
//! - persistence of mutations to the registry file, and rollback when saving fails

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use entropy_opstack_backend::api;
use entropy_opstack_backend::state::{seed::seed_demo_agents, AppState};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::util::ServiceExt; // for oneshot

/// Setup a router over a seeded in-memory registry
fn setup_app() -> Router {
    let mut state = AppState::new();
    seed_demo_agents(&mut state);
    api::router(Arc::new(RwLock::new(state)))
}

/// Setup a router whose registry is saved to `path`
fn setup_persistent_app(path: PathBuf) -> Router {
    let state = AppState::with_registry_path(path);
    api::router(Arc::new(RwLock::new(state)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();
    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_root_path_is_not_served() {
    let app = setup_app();
    let (status, _) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_first_page() {
    let app = setup_app();
    let (status, body) = send(&app, get("/api/agents?page=1&size=8")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["agents"].as_array().unwrap().len(), 8);
    assert_eq!(body["total_pages"], 2);
    // Supervisors sort first
    assert_eq!(body["agents"][0]["role"], "GLOBAL_SUPERVISOR");
}

#[tokio::test]
async fn test_list_worker_filter_excludes_supervisors() {
    let app = setup_app();
    let (status, body) = send(&app, get("/api/agents?size=100&role=WORKER")).await;
    assert_eq!(status, StatusCode::OK);
    let agents = body["agents"].as_array().unwrap();
    assert!(!agents.is_empty());
    assert!(agents.iter().all(|a| a["role"] == "WORKER"));
}

#[tokio::test]
async fn test_list_keyword_filter() {
    let app = setup_app();
    let (_, body) = send(&app, get("/api/agents?keyword=kafka")).await;
    let names: Vec<&str> = body["agents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Kafka Lag Worker"));
    assert!(names.contains(&"Data Platform Lead"));
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_list_rejects_unknown_role() {
    let app = setup_app();
    let (status, body) = send(&app, get("/api/agents?role=ADMIN")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("ADMIN"));
}

#[tokio::test]
async fn test_create_update_delete_flow() {
    let app = setup_app();

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/agents",
            json!({"name": "Queue Depth Worker", "specialty": "RabbitMQ backlog"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role"], "WORKER");
    assert_eq!(created["status"], "IDLE");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/agents/{}", id),
            json!({"name": "Queue Worker", "specialty": "backlog"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Queue Worker");

    let (status, _) = send(&app, delete(&format!("/api/agents/{}", id))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get(&format!("/api/agents/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_delete_supervisor_is_forbidden() {
    let app = setup_app();
    let (status, body) = send(&app, delete("/api/agents/agent-sup-data")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("TEAM_SUPERVISOR"));

    let (status, _) = send(&app, get("/api/agents/agent-sup-data")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_config_validates_temperature() {
    let app = setup_app();
    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/agents/agent-w-etl/config",
            json!({"model": "gemini-2.0-flash", "temperature": 3.5, "system_instruction": ""}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mutations_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents.json");
    let app = setup_persistent_app(path.clone());

    let (status, _) = send(
        &app,
        json_request("POST", "/api/agents", json!({"name": "Persisted Worker"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let mut reloaded = AppState::new();
    assert_eq!(reloaded.load_agents(&path).unwrap(), 1);
    assert_eq!(
        reloaded.agents.values().next().unwrap().name,
        "Persisted Worker"
    );
}

#[tokio::test]
async fn test_list_page_far_past_the_end() {
    let app = setup_app();
    let uri = format!("/api/agents?page={}&size=100", usize::MAX / 50);
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["agents"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"], 11);
}

#[tokio::test]
async fn test_failed_save_leaves_registry_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("registry-file");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut state = AppState::with_registry_path(blocker.join("agents.json"));
    seed_demo_agents(&mut state);
    let app = api::router(Arc::new(RwLock::new(state)));

    let (status, body) = send(&app, delete("/api/agents/agent-w-dns")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("IO Error"));
    let (status, _) = send(&app, get("/api/agents/agent-w-dns")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request("PUT", "/api/agents/agent-w-dns", json!({"name": "Renamed"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (_, agent) = send(&app, get("/api/agents/agent-w-dns")).await;
    assert_eq!(agent["name"], "DNS Resolution Worker");

    let (status, _) = send(
        &app,
        json_request("POST", "/api/agents", json!({"name": "Never Saved"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (_, page) = send(&app, get("/api/agents?keyword=never")).await;
    assert_eq!(page["total"], 0);
}
