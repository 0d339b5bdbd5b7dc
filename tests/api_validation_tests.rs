// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query parameter validation tests for the comparison endpoints.
//!
//! Parameter checks run before any provider call, so these tests never
//! touch the network.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn get_json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn authed_get(uri: &str) -> axum::response::Response {
    let (app, state) = common::create_test_app();
    let (_, cookie) = common::login_test_user(&state, common::test_profile());

    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_common_games_requires_friend_id() {
    let response = authed_get("/api/common-games").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert!(json.get("error").is_some(), "400 body must carry an error");
}

#[tokio::test]
async fn test_common_games_rejects_empty_friend_id() {
    let response = authed_get("/api/common-games?friendId=").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_achievements_requires_both_params() {
    for uri in [
        "/api/achievements",
        "/api/achievements?friendId=76561198000000001",
        "/api/achievements?appId=620",
    ] {
        let response = authed_get(uri).await;

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "{} should be rejected",
            uri
        );

        let json = get_json_body(response).await;
        assert!(json.get("error").is_some());
    }
}

#[tokio::test]
async fn test_achievements_rejects_non_numeric_app_id() {
    let response =
        authed_get("/api/achievements?friendId=76561198000000001&appId=portal2").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert_eq!(json["error"], "bad_request");
}
