//! Router-level tests for `/bfhl`, driven in-process with `oneshot`.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bfhl_service::config::{BfhlConfig, GeminiSettings};
use bfhl_service::services::providers::mock::{MockReply, MockTextProvider};
use bfhl_service::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use service_core::config::Config;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

const EMAIL: &str = "student@chitkara.edu.in";

fn app(reply: MockReply) -> Router {
    let config = BfhlConfig {
        common: Config { port: 0 },
        official_email: EMAIL.to_string(),
        gemini: GeminiSettings::default(),
    };
    build_router(AppState::new(&config, Arc::new(MockTextProvider::new(reply))))
}

async fn post_raw(app: Router, body: impl ToString) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bfhl")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(body: Value) -> (StatusCode, Value) {
    post_raw(app(MockReply::Text("Paris".into())), body).await
}

async fn assert_rejected(body: Value, message: &str) {
    let (status, json) = post(body.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
    assert_eq!(
        json,
        json!({ "is_success": false, "official_email": EMAIL, "error": message }),
        "body {body}"
    );
}

#[tokio::test]
async fn fibonacci_returns_first_n_plus_one_terms() {
    let (status, body) = post(json!({ "fibonacci": 5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "is_success": true, "official_email": EMAIL, "data": [0, 1, 1, 2, 3, 5] })
    );
}

#[tokio::test]
async fn prime_filters_in_order() {
    let (status, body) = post(json!({ "prime": [2, 3, 4, 5, 6, 7] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([2, 3, 5, 7]));
}

#[tokio::test]
async fn hcf_and_lcm() {
    let (status, body) = post(json!({ "hcf": [12, 18, 24] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(6));

    let (status, body) = post(json!({ "lcm": [4, 6] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(12));
}

#[tokio::test]
async fn zero_operands_in_hcf_and_lcm() {
    let (status, body) = post(json!({ "lcm": [0, 5] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(0));

    let (status, body) = post(json!({ "hcf": [0, 12] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(12));

    assert_rejected(json!({ "lcm": [0, 0] }), "Invalid lcm input").await;
}

#[tokio::test]
async fn prime_handles_values_near_i64_max() {
    let (status, body) = post(json!({ "prime": [9_223_372_036_854_775_783_i64, i64::MAX] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([9_223_372_036_854_775_783_i64]));
}

#[tokio::test]
async fn heavy_prime_request_does_not_block_health() {
    let app = app(MockReply::Empty);
    let primes = vec![9_223_372_036_854_775_783_i64; 20_000];
    let body = json!({ "prime": primes }).to_string();

    let heavy = tokio::spawn(post_raw(app.clone(), body));
    tokio::time::sleep(Duration::from_millis(20)).await;

    let health = tokio::time::timeout(
        Duration::from_secs(1),
        app.oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        ),
    )
    .await
    .expect("health check stalled behind prime computation")
    .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let (status, body) = heavy.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 20_000);
}

#[tokio::test]
async fn ai_returns_single_word() {
    let (status, body) = post_raw(
        app(MockReply::Text("Paris is the capital".into())),
        r#"{"AI":"What is the capital of France?"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_success"], true);
    assert_eq!(body["data"], "Paris");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn ai_provider_failure_is_still_success() {
    let (status, body) = post_raw(app(MockReply::Fail), r#"{"AI":"anything"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_success"], true);
    assert_eq!(body["data"], "Error");
}

#[tokio::test]
async fn ai_empty_reply_is_unknown() {
    let (status, body) = post_raw(app(MockReply::Empty), r#"{"AI":"anything"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "Unknown");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    for raw in ["", "{not json", "null", "[1,2]", "7"] {
        let (status, body) = post_raw(app(MockReply::Empty), raw).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw:?}");
        assert_eq!(body["error"], "Invalid JSON body");
        assert_eq!(body["official_email"], EMAIL);
    }
}

#[tokio::test]
async fn key_count_must_be_one() {
    assert_rejected(json!({}), "Exactly one key required").await;
    assert_rejected(json!({ "a": 1, "b": 2 }), "Exactly one key required").await;
}

#[tokio::test]
async fn per_key_validation_messages() {
    assert_rejected(json!({ "fibonacci": -1 }), "Invalid fibonacci input").await;
    assert_rejected(json!({ "fibonacci": 1.5 }), "Invalid fibonacci input").await;
    assert_rejected(json!({ "prime": "2,3" }), "Prime input must be array").await;
    assert_rejected(json!({ "hcf": [] }), "Invalid hcf input").await;
    assert_rejected(json!({ "lcm": 4 }), "Invalid lcm input").await;
    assert_rejected(json!({ "AI": ["q"] }), "AI input must be string").await;
    assert_rejected(json!({ "unknown": 1 }), "Invalid key").await;
}

#[tokio::test]
async fn overflow_is_internal_server_error() {
    let (status, body) = post(json!({ "fibonacci": 1000 })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "is_success": false, "official_email": EMAIL, "error": "Internal server error" })
    );
}

#[tokio::test]
async fn identical_requests_yield_identical_data() {
    for body in [
        json!({ "fibonacci": 12 }),
        json!({ "prime": [97, 98, 101] }),
        json!({ "hcf": [48, 180] }),
        json!({ "lcm": [3, 4, 5] }),
    ] {
        let (_, first) = post(body.clone()).await;
        let (_, second) = post(body).await;
        assert_eq!(first["data"], second["data"]);
    }
}

#[tokio::test]
async fn responses_carry_request_id() {
    let response = app(MockReply::Empty)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bfhl")
                .header("x-request-id", "abc-123")
                .body(Body::from(r#"{"fibonacci":1}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
