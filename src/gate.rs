// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session/profile gate.
//!
//! Classifies a visitor into one of three states so the SPA knows which
//! screen to show: login, complete-profile, or dashboard. The async path
//! bounds the external profile lookup with a timeout; if the collaborator
//! never answers, the visitor is reported as unauthenticated instead of
//! the gate hanging.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use crate::error::AppError;

/// The three visitor states of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No identity; route to login
    Unauthenticated,
    /// Identity exists but no profile document; route to complete-profile
    NeedsProfile,
    /// Identity and profile both present; dashboard allowed
    Ready,
}

/// Pure classification from the two external signals.
pub fn classify(authenticated: bool, profile_found: bool) -> SessionState {
    match (authenticated, profile_found) {
        (false, _) => SessionState::Unauthenticated,
        (true, false) => SessionState::NeedsProfile,
        (true, true) => SessionState::Ready,
    }
}

/// Resolve the gate for an authenticated identity.
///
/// `profile_lookup` reports whether the profile document exists. The
/// lookup is bounded by `wait`; on timeout or lookup failure the gate
/// falls back to `Unauthenticated` so the caller can re-route to login
/// rather than hang or surface a hard error.
pub async fn resolve<F>(wait: Duration, profile_lookup: F) -> SessionState
where
    F: Future<Output = Result<bool, AppError>>,
{
    match tokio::time::timeout(wait, profile_lookup).await {
        Ok(Ok(found)) => classify(true, found),
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "Profile lookup failed while resolving session gate");
            SessionState::Unauthenticated
        }
        Err(_) => {
            tracing::warn!(
                wait_secs = wait.as_secs(),
                "Profile lookup did not resolve within the gate bound"
            );
            SessionState::Unauthenticated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        assert_eq!(classify(false, false), SessionState::Unauthenticated);
        assert_eq!(classify(false, true), SessionState::Unauthenticated);
        assert_eq!(classify(true, false), SessionState::NeedsProfile);
        assert_eq!(classify(true, true), SessionState::Ready);
    }

    #[test]
    fn test_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SessionState::NeedsProfile).unwrap(),
            "\"needs_profile\""
        );
        assert_eq!(
            serde_json::to_string(&SessionState::Unauthenticated).unwrap(),
            "\"unauthenticated\""
        );
    }

    #[tokio::test]
    async fn test_resolve_maps_lookup_result() {
        let wait = Duration::from_secs(6);

        let state = resolve(wait, async { Ok(true) }).await;
        assert_eq!(state, SessionState::Ready);

        let state = resolve(wait, async { Ok(false) }).await;
        assert_eq!(state, SessionState::NeedsProfile);
    }

    #[tokio::test]
    async fn test_resolve_treats_lookup_error_as_unauthenticated() {
        let wait = Duration::from_secs(6);
        let state = resolve(wait, async {
            Err(AppError::Database("offline".to_string()))
        })
        .await;
        assert_eq!(state, SessionState::Unauthenticated);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_times_out_to_unauthenticated() {
        // A lookup that never completes; paused time auto-advances past
        // the bound instead of waiting 6 real seconds.
        let pending = std::future::pending::<Result<bool, AppError>>();
        let state = resolve(Duration::from_secs(6), pending).await;
        assert_eq!(state, SessionState::Unauthenticated);
    }
}
