//! HTTP-level tests for the registration endpoint

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use registrar::{
    config::HashingConfig,
    create_router,
    db::{repositories::MemoryAccountStore, AccountStore, KeyQuery, PutOutcome, UniquenessCondition},
    error::InfraError,
    middleware::REQUEST_ID_HEADER,
    models::Account,
    services::RegistrationService,
    state::AppState,
    utils::{time::FixedClock, CredentialHasher, RuleTable},
};

// 2024-01-15T12:34:56Z
const NOW: i64 = 1_705_322_096;
const START_OF_DAY: i64 = 1_705_276_800;

fn app(store: Arc<dyn AccountStore>) -> Router {
    let hashing = HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    let registration = RegistrationService::new(
        store,
        Arc::new(RuleTable::build().unwrap()),
        CredentialHasher::new(&hashing).unwrap(),
        "email",
        Arc::new(FixedClock::at_unix(NOW).unwrap()),
    );
    create_router(AppState::new(registration), Duration::from_secs(10))
}

async fn post_register(app: &Router, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_body(value: Value) -> Body {
    Body::from(value.to_string())
}

fn valid_signup() -> Value {
    json!({
        "username": "validUser1",
        "email": "user@example.com",
        "password": "longenough1"
    })
}

/// Store whose every operation fails, as an unreachable database would
struct UnreachableStore;

#[async_trait]
impl AccountStore for UnreachableStore {
    async fn query(&self, _query: &KeyQuery) -> Result<Vec<Account>, InfraError> {
        Err(InfraError::Store("connection refused (10.0.0.7:5432)".to_string()))
    }

    async fn conditional_put(
        &self,
        _account: &Account,
        _condition: UniquenessCondition,
    ) -> Result<PutOutcome, InfraError> {
        Err(InfraError::Store("connection refused (10.0.0.7:5432)".to_string()))
    }
}

#[tokio::test]
async fn test_register_returns_created() {
    let store = Arc::new(MemoryAccountStore::default());
    let app = app(store.clone());

    let (status, body) = post_register(&app, json_body(valid_signup())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Signup successful");
    assert_eq!(body["account"]["username"], "validUser1");
    assert_eq!(body["account"]["email"], "user@example.com");
    assert_eq!(body["account"]["member_since"], START_OF_DAY);
    assert_eq!(body["account"]["num_ratings"], 0);
    assert_eq!(body["account"]["is_verified"], false);
    assert!(body["account"].get("password_hash").is_none());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_fields() {
    let app = app(Arc::new(MemoryAccountStore::default()));

    let (status, body) = post_register(
        &app,
        json_body(json!({"username": "ab", "email": "bad", "password": "short"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["message"],
        "Username must be between 3 and 16 characters\nEmail must be valid\nPassword must be between 8 and 32 characters"
    );
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["Username", "Email", "Password"]);
}

#[tokio::test]
async fn test_register_twice_reports_both_duplicates() {
    let app = app(Arc::new(MemoryAccountStore::default()));

    let (first, _) = post_register(&app, json_body(valid_signup())).await;
    assert_eq!(first, StatusCode::CREATED);

    let (status, body) = post_register(&app, json_body(valid_signup())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Email already in use\nUsername already in use"
    );
}

#[tokio::test]
async fn test_missing_fields_are_validation_issues() {
    let app = app(Arc::new(MemoryAccountStore::default()));

    let (status, body) = post_register(&app, json_body(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("Username must not be empty"));
    assert!(message.contains("Email must not be empty"));
    assert!(message.contains("Password must not be empty"));
}

#[tokio::test]
async fn test_malformed_json_is_invalid_input() {
    let app = app(Arc::new(MemoryAccountStore::default()));

    let (status, body) = post_register(&app, Body::from("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_store_failure_is_opaque_500() {
    let app = app(Arc::new(UnreachableStore));

    let (status, body) = post_register(&app, json_body(valid_signup())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "An internal error occurred");
    assert!(!body.to_string().contains("10.0.0.7"));
}

#[tokio::test]
async fn test_concurrent_identical_signups() {
    let store = Arc::new(MemoryAccountStore::default());
    let app = app(store.clone());

    let requests = (0..4).map(|_| post_register(&app, json_body(valid_signup())));
    let results = futures::future::join_all(requests).await;

    let created = results
        .iter()
        .filter(|(status, _)| *status == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1);
    for (status, body) in results.iter().filter(|(status, _)| *status != StatusCode::CREATED) {
        assert_eq!(*status, StatusCode::BAD_REQUEST);
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("already in use"));
    }
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_health_and_request_id() {
    let app = app(Arc::new(MemoryAccountStore::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "registrar");
}
