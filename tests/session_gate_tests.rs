// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session gate endpoint tests.
//!
//! The gate must always answer with a state, never with an error: a
//! missing or malformed token is "unauthenticated", and so is a profile
//! lookup that fails or never resolves.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn gate_state(response: axum::response::Response) -> String {
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    body["state"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_no_token_is_unauthenticated() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(gate_state(response).await, "unauthenticated");
}

#[tokio::test]
async fn test_malformed_token_is_unauthenticated_not_an_error() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/session")
                .header(header::AUTHORIZATION, "Bearer garbage.token.here")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(gate_state(response).await, "unauthenticated");
}

#[tokio::test]
async fn test_failed_profile_lookup_falls_back_to_unauthenticated() {
    // Valid session, but the offline mock database errors on lookup; the
    // gate reports a state instead of surfacing the failure.
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", "a@b.c", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/session")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(gate_state(response).await, "unauthenticated");
}

#[tokio::test]
async fn test_session_cookie_is_read() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", "a@b.c", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/session")
                .header(header::COOKIE, format!("fitcontrol_session={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Token accepted, lookup fails offline: still a well-formed state.
    assert_eq!(gate_state(response).await, "unauthenticated");
}
