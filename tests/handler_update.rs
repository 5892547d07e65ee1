mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use linkspan::domain::repositories::MappingRepository;
use serde_json::json;

// ─── UPDATE DESTINATION ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_destination_success() {
    let (state, repository) = common::create_test_state();
    common::create_test_mapping(
        &repository,
        "upd00001",
        "https://old.example.com",
        Utc::now() + Duration::days(30),
    )
    .await;
    let server = common::make_server(state);

    let response = server
        .put("/update")
        .json(&json!({ "shortUrl": "upd00001", "destinationUrl": "https://new.example.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), json!({ "updated": true }));

    let stored = repository.find_by_code("upd00001").await.unwrap().unwrap();
    assert_eq!(stored.destination_url, "https://new.example.com");
}

#[tokio::test]
async fn test_update_destination_unknown_code() {
    let (state, repository) = common::create_test_state();
    let server = common::make_server(state);

    let response = server
        .put("/update")
        .json(&json!({ "shortUrl": "ghost", "destinationUrl": "https://new.example.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), json!({ "updated": false }));
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_update_destination_missing_fields() {
    let (state, _repository) = common::create_test_state();
    let server = common::make_server(state);

    let response = server
        .put("/update")
        .json(&json!({ "destinationUrl": "https://new.example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "shortUrl is required"
    );

    let response = server
        .put("/update")
        .json(&json!({ "shortUrl": "abc" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_destination_invalid_url_keeps_old_value() {
    let (state, repository) = common::create_test_state();
    common::create_test_mapping(
        &repository,
        "upd00002",
        "https://old.example.com",
        Utc::now() + Duration::days(30),
    )
    .await;
    let server = common::make_server(state);

    let response = server
        .put("/update")
        .json(&json!({ "shortUrl": "upd00002", "destinationUrl": "javascript:alert(1)" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let stored = repository.find_by_code("upd00002").await.unwrap().unwrap();
    assert_eq!(stored.destination_url, "https://old.example.com");
}

#[tokio::test]
async fn test_update_destination_store_failure() {
    let server = common::make_server(common::create_failing_state());

    let response = server
        .put("/update")
        .json(&json!({ "shortUrl": "abc", "destinationUrl": "https://new.example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "Error while updating short URL"
    );
}

// ─── EXTEND EXPIRY ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_extend_expiry_success() {
    let (state, repository) = common::create_test_state();
    common::create_test_mapping(
        &repository,
        "exp00001",
        "https://example.com",
        Utc::now() + Duration::days(30),
    )
    .await;
    let server = common::make_server(state);

    let before = Utc::now();
    let response = server
        .put("/expiry")
        .json(&json!({ "shortUrl": "exp00001", "daysToAdd": 10 }))
        .await;
    let after = Utc::now();

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), json!({ "updated": true }));

    // The new expiry counts from now, not from the previous expiry.
    let stored = repository.find_by_code("exp00001").await.unwrap().unwrap();
    assert!(stored.expires_at >= before + Duration::days(10));
    assert!(stored.expires_at <= after + Duration::days(10));
}

#[tokio::test]
async fn test_extend_expiry_accepts_numeric_string() {
    let (state, repository) = common::create_test_state();
    common::create_test_mapping(
        &repository,
        "exp00002",
        "https://example.com",
        Utc::now() + Duration::days(1),
    )
    .await;
    let server = common::make_server(state);

    let response = server
        .put("/expiry")
        .json(&json!({ "shortUrl": "exp00002", "daysToAdd": "7" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), json!({ "updated": true }));
}

#[tokio::test]
async fn test_extend_expiry_unknown_code() {
    let (state, _repository) = common::create_test_state();
    let server = common::make_server(state);

    let response = server
        .put("/expiry")
        .json(&json!({ "shortUrl": "ghost", "daysToAdd": 10 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), json!({ "updated": false }));
}

#[tokio::test]
async fn test_extend_expiry_rejects_bad_days() {
    let (state, repository) = common::create_test_state();
    let original = common::create_test_mapping(
        &repository,
        "exp00003",
        "https://example.com",
        Utc::now() + Duration::days(30),
    )
    .await;
    let server = common::make_server(state);

    for days in [json!(0), json!(-5), json!("ten"), json!(36_501)] {
        let response = server
            .put("/expiry")
            .json(&json!({ "shortUrl": "exp00003", "daysToAdd": days }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    let response = server
        .put("/expiry")
        .json(&json!({ "shortUrl": "exp00003" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "daysToAdd is required"
    );

    let stored = repository.find_by_code("exp00003").await.unwrap().unwrap();
    assert_eq!(stored.expires_at, original.expires_at);
}

#[tokio::test]
async fn test_extend_expiry_store_failure() {
    let server = common::make_server(common::create_failing_state());

    let response = server
        .put("/expiry")
        .json(&json!({ "shortUrl": "abc", "daysToAdd": 10 }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "Error while updating expiry time"
    );
}

#[tokio::test]
async fn test_update_destination_twice_is_idempotent() {
    let (state, repository) = common::create_test_state();
    common::create_test_mapping(
        &repository,
        "upd00003",
        "https://old.example.com",
        Utc::now() + Duration::days(30),
    )
    .await;
    let server = common::make_server(state);

    let body = json!({ "shortUrl": "upd00003", "destinationUrl": "https://new.example.com" });

    let first = server.put("/update").json(&body).await;
    first.assert_status_ok();
    assert_eq!(first.json::<serde_json::Value>(), json!({ "updated": true }));
    let after_first = repository.find_by_code("upd00003").await.unwrap().unwrap();

    let second = server.put("/update").json(&body).await;
    second.assert_status_ok();
    assert_eq!(second.json::<serde_json::Value>(), json!({ "updated": true }));
    let after_second = repository.find_by_code("upd00003").await.unwrap().unwrap();

    assert_eq!(after_first.destination_url, "https://new.example.com");
    assert_eq!(after_second.destination_url, after_first.destination_url);
    assert_eq!(after_second.expires_at, after_first.expires_at);
    assert_eq!(repository.len().await, 1);
}
