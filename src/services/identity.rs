// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client (Firebase Auth REST API).
//!
//! Handles:
//! - Account creation and password sign-in
//! - Password reset mails
//! - Display name updates
//! - Mapping provider error codes to the app error taxonomy
//!
//! Credentials never touch this codebase beyond the single API call; the
//! provider owns password storage and verification entirely.

use serde::Deserialize;

use crate::error::AppError;

const PASSWORD_RESET_REQUEST: &str = "PASSWORD_RESET";

/// An authenticated principal as reported by the provider.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Opaque uid, used as the profile document id
    pub uid: String,
    /// Normalized email echoed back by the provider
    pub email: String,
    /// Short-lived provider token for follow-up account calls
    pub id_token: String,
}

/// Identity provider REST client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    /// Offline mode for tests: every call errors instead of reaching out
    offline: bool,
}

/// Provider response for signUp / signInWithPassword.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    email: String,
    id_token: String,
}

/// Provider error envelope: `{"error": {"message": "EMAIL_EXISTS"}}`.
#[derive(Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

impl IdentityClient {
    /// Create a new client with the project API key.
    pub fn new(api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://identitytoolkit.googleapis.com/v1".to_string(),
            api_key: api_key.to_string(),
            offline: false,
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All provider operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: String::new(),
            api_key: String::new(),
            offline: true,
        }
    }

    /// Register a new identity with email and password.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response: TokenResponse = self.post_json("accounts:signUp", &body).await?;
        Ok(Identity {
            uid: response.local_id,
            email: response.email,
            id_token: response.id_token,
        })
    }

    /// Authenticate an existing identity with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response: TokenResponse = self
            .post_json("accounts:signInWithPassword", &body)
            .await?;
        Ok(Identity {
            uid: response.local_id,
            email: response.email,
            id_token: response.id_token,
        })
    }

    /// Ask the provider to send a password reset mail.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        let body = serde_json::json!({
            "requestType": PASSWORD_RESET_REQUEST,
            "email": email,
        });

        let response = self.post("accounts:sendOobCode", &body).await?;
        self.check_response(response).await.map(|_| ())
    }

    /// Set the display name on an identity, using its short-lived token.
    pub async fn update_display_name(
        &self,
        id_token: &str,
        display_name: &str,
    ) -> Result<(), AppError> {
        let body = serde_json::json!({
            "idToken": id_token,
            "displayName": display_name,
            "returnSecureToken": false,
        });

        let response = self.post("accounts:update", &body).await?;
        self.check_response(response).await.map(|_| ())
    }

    /// POST to a provider endpoint and parse the JSON response body.
    async fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<T, AppError> {
        let response = self.post(endpoint, body).await?;
        let response = self.check_response(response).await?;

        response
            .json()
            .await
            .map_err(|e| AppError::IdentityApi(format!("Malformed provider response: {}", e)))
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, AppError> {
        if self.offline {
            return Err(AppError::IdentityApi(
                "Identity provider not configured (offline mode)".to_string(),
            ));
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        self.http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::IdentityApi(e.to_string()))
    }

    /// Classify a non-success response into the app error taxonomy.
    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AppError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ProviderError>(&body) {
            Ok(parsed) => Err(classify_provider_code(&parsed.error.message)),
            Err(_) => Err(AppError::IdentityApi(format!("HTTP {}: {}", status, body))),
        }
    }
}

/// Map a provider error code to the app error taxonomy.
///
/// Codes sometimes carry a trailing reason (`"TOO_MANY_ATTEMPTS : retry
/// later"`), so matching is on the prefix. Anything unrecognized falls
/// back to one generic provider error.
fn classify_provider_code(code: &str) -> AppError {
    if code.starts_with("EMAIL_EXISTS") {
        return AppError::EmailInUse;
    }

    let credential_codes = [
        "INVALID_LOGIN_CREDENTIALS",
        "INVALID_PASSWORD",
        "EMAIL_NOT_FOUND",
        "USER_DISABLED",
    ];
    if credential_codes.iter().any(|c| code.starts_with(c)) {
        return AppError::InvalidCredentials;
    }

    AppError::IdentityApi(code.to_string())
}
