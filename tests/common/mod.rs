// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fitcontrol::config::Config;
use fitcontrol::db::FirestoreDb;
use fitcontrol::routes::create_router;
use fitcontrol::services::IdentityClient;
use fitcontrol::AppState;
use std::sync::Arc;

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock collaborators.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let identity = IdentityClient::new_mock();

    let state = Arc::new(AppState {
        config,
        db,
        identity,
    });

    (create_router(state.clone()), state)
}

/// Create a session JWT the way the auth routes do.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, email: &str, signing_key: &[u8]) -> String {
    fitcontrol::middleware::auth::create_jwt(uid, email, signing_key)
        .expect("Failed to create JWT")
}
