//! Integration tests for the TripVaults HTTP surface
//!
//! Drives the full router (including the CORS layer) in-process with a
//! scripted completion backend, so no network access is needed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use tripvaults::api::AppState;
use tripvaults::error::TripVaultsError;
use tripvaults::openai::CompletionBackend;
use tripvaults::web;

/// Completion backend that replays a scripted answer and records every
/// prompt it receives.
struct ScriptedBackend {
    reply: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn success(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failure(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, TripVaultsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(TripVaultsError::upstream(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn app_with(backend: Arc<ScriptedBackend>) -> Router {
    web::app(AppState::with_backend(backend))
}

async fn get_root(app: Router) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    read_json(response).await
}

async fn post_plan(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/travel-plan")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn paris_request() -> Value {
    json!({
        "destination": "Paris",
        "people": 2,
        "interests": ["art", "food"]
    })
}

#[tokio::test]
async fn health_reports_configured_credential() {
    let app = app_with(ScriptedBackend::success("x"));

    let (status, body) = get_root(app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "TripVaults API is running!");
    assert_eq!(body["message"], "Backend is ready");
    assert_eq!(body["api_key"], "set");
}

#[tokio::test]
async fn health_reports_missing_credential() {
    let app = web::app(AppState::without_backend());

    let (status, body) = get_root(app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_key"], "not_set");
}

#[tokio::test]
async fn valid_request_returns_plan() {
    let backend = ScriptedBackend::success("PLAN_TEXT");
    let app = app_with(backend.clone());

    let (status, body) = post_plan(app, paris_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"], "PLAN_TEXT");
    assert_eq!(backend.calls(), 1);

    let prompt = backend.last_prompt().unwrap();
    assert!(prompt.contains("Paris"));
    assert!(prompt.contains('2'));
    assert!(prompt.contains("art"));
    assert!(prompt.contains("food"));
}

#[tokio::test]
async fn people_as_string_is_accepted() {
    let backend = ScriptedBackend::success("PLAN_TEXT");
    let app = app_with(backend.clone());

    let body = json!({
        "destination": "Lisbon",
        "people": "4",
        "interests": ["surfing"]
    });
    let (status, _) = post_plan(app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn missing_required_fields_are_rejected_before_the_upstream_call() {
    let cases = [
        json!({"people": 2, "interests": ["art"]}),
        json!({"destination": "Paris", "interests": ["art"]}),
        json!({"destination": "Paris", "people": 2}),
        json!({"destination": "", "people": 2, "interests": ["art"]}),
        json!({"destination": "Paris", "people": 0, "interests": ["art"]}),
        json!({"destination": "Paris", "people": "  ", "interests": ["art"]}),
        json!({"destination": "Paris", "people": 2, "interests": []}),
    ];

    for case in cases {
        let backend = ScriptedBackend::success("PLAN_TEXT");
        let app = app_with(backend.clone());

        let (status, body) = post_plan(app, case.clone()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {case}");
        assert!(body["error"].is_string(), "payload: {case}");
        assert_eq!(backend.calls(), 0, "payload: {case}");
    }
}

#[tokio::test]
async fn empty_language_is_rejected() {
    let backend = ScriptedBackend::success("PLAN_TEXT");
    let app = app_with(backend.clone());

    let mut body = paris_request();
    body["language"] = json!("");
    let (status, _) = post_plan(app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn unknown_budget_value_still_generates_a_plan() {
    let backend = ScriptedBackend::success("PLAN_TEXT");
    let app = app_with(backend.clone());

    let mut body = paris_request();
    body["budget"] = json!("extravagant");
    let (status, _) = post_plan(app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(backend.last_prompt().unwrap().contains("mid-range"));
}

#[tokio::test]
async fn date_range_drives_the_plan_length() {
    let backend = ScriptedBackend::success("PLAN_TEXT");
    let app = app_with(backend.clone());

    let mut body = paris_request();
    body["startDate"] = json!("2025-09-01");
    body["endDate"] = json!("2025-09-11");
    let (status, _) = post_plan(app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        backend
            .last_prompt()
            .unwrap()
            .starts_with("Create a 10-day travel plan")
    );
}

#[tokio::test]
async fn upstream_failure_maps_to_500_without_retry() {
    let backend = ScriptedBackend::failure("You exceeded your current quota");
    let app = app_with(backend.clone());

    let (status, body) = post_plan(app, paris_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "You exceeded your current quota");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn missing_credential_maps_to_500() {
    let app = web::app(AppState::without_backend());

    let (status, body) = post_plan(app, paris_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "OpenAI API key not configured");
}

#[tokio::test]
async fn cors_preflight_allows_the_frontend() {
    let app = app_with(ScriptedBackend::success("x"));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/travel-plan")
                .header(header::ORIGIN, "https://tripvaults.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());

    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let allow_methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(allow_methods.contains("POST"));
}

#[tokio::test]
async fn malformed_json_never_reaches_the_planner() {
    let backend = ScriptedBackend::success("PLAN_TEXT");
    let app = app_with(backend.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/travel-plan")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(backend.calls(), 0);
}
