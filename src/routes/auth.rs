// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password authentication routes.
//!
//! Field validation happens first; a request that fails validation is
//! rejected before any identity provider call is made.

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::UserProfile;
use crate::time_utils::format_utc_rfc3339;
use crate::validators;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/reset-password", post(reset_password))
        .route("/auth/logout", post(logout))
}

/// Build the session cookie carrying a freshly minted JWT.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Response for register and login.
#[derive(Serialize)]
pub struct SessionResponse {
    pub uid: String,
    pub email: String,
}

/// Generic acknowledgment response.
#[derive(Serialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

// ─── Register ────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = validators::email_shape))]
    pub email: String,
    #[validate(custom(function = validators::strong_password))]
    pub password: String,
    #[validate(custom(function = validators::person_name))]
    pub first_name: String,
    #[validate(custom(function = validators::person_name))]
    pub last_name: String,
    #[validate(custom(function = validators::bounded_text))]
    pub address: String,
    #[serde(default)]
    pub accept_terms: bool,
}

/// Create an identity, write the initial profile document, and start a
/// session.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    payload.validate()?;
    if !payload.accept_terms {
        return Err(AppError::Validation(
            "accept_terms: the terms must be accepted".to_string(),
        ));
    }

    let email = payload.email.trim().to_lowercase();
    let identity = state.identity.sign_up(&email, &payload.password).await?;

    tracing::info!(uid = %identity.uid, "Identity created");

    let first_name = payload.first_name.trim().to_string();
    let last_name = payload.last_name.trim().to_string();

    // Cosmetic; a failure here must not lose the freshly created account.
    let display_name = format!("{} {}", first_name, last_name);
    if let Err(e) = state
        .identity
        .update_display_name(&identity.id_token, &display_name)
        .await
    {
        tracing::warn!(error = %e, "Failed to set display name, continuing");
    }

    let now = format_utc_rfc3339(Utc::now());
    let profile = UserProfile {
        id: identity.uid.clone(),
        email: email.clone(),
        first_name,
        last_name,
        address: payload.address.trim().to_string(),
        email_verified: false,
        created_at: now.clone(),
        updated_at: now,
    };
    state.db.set_profile(&identity.uid, &profile).await?;

    let jwt = create_jwt(&identity.uid, &email, &state.config.jwt_signing_key)?;

    Ok((
        jar.add(session_cookie(jwt)),
        Json(SessionResponse {
            uid: identity.uid,
            email,
        }),
    ))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = validators::email_shape))]
    pub email: String,
    pub password: String,
}

/// Authenticate with the identity provider and start a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    payload.validate()?;
    if payload.password.trim().is_empty() {
        return Err(AppError::Validation("password: required".to_string()));
    }

    let email = payload.email.trim().to_lowercase();
    let identity = state.identity.sign_in(&email, &payload.password).await?;

    tracing::info!(uid = %identity.uid, "Login successful");

    let jwt = create_jwt(&identity.uid, &identity.email, &state.config.jwt_signing_key)?;

    Ok((
        jar.add(session_cookie(jwt)),
        Json(SessionResponse {
            uid: identity.uid,
            email: identity.email,
        }),
    ))
}

// ─── Password Reset ──────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(custom(function = validators::email_shape))]
    pub email: String,
}

/// Ask the provider to send a reset mail.
///
/// An unknown address gets the same acknowledgment as a known one, so
/// this endpoint cannot be used to probe which emails are registered.
async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<AckResponse>> {
    payload.validate()?;

    let email = payload.email.trim().to_lowercase();
    match state.identity.send_password_reset(&email).await {
        Ok(()) | Err(AppError::InvalidCredentials) => Ok(Json(AckResponse {
            success: true,
            message: "If this email is registered, reset instructions are on the way".to_string(),
        })),
        Err(e) => Err(e),
    }
}

// ─── Logout ──────────────────────────────────────────────────

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<AckResponse>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (
        jar,
        Json(AckResponse {
            success: true,
            message: "Signed out".to_string(),
        }),
    )
}
