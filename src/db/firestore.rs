// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - User profiles (`users/{uid}`)
//! - Workouts (`users/{uid}/workouts/{id}` subcollection)
//!
//! All writes are whole-document overwrites; there is exactly one logical
//! writer per user-owned document (the owning identity), so no
//! transactions or conflict resolution are needed here.

use chrono::{DateTime, Utc};

use crate::db::collections;
use crate::error::AppError;
use crate::models::{UserProfile, Workout};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any token; use an unauthenticated connection
        // so local runs never touch real credentials.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a user's profile document, or `None` if it was never written.
    pub async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or overwrite a user's profile document.
    pub async fn set_profile(&self, uid: &str, profile: &UserProfile) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(uid)
            .object(profile)
            .execute::<()>()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Store a workout under the owning user's subcollection.
    ///
    /// The document id is caller-generated, so no id round trip happens
    /// before the write.
    pub async fn set_workout(&self, uid: &str, workout: &Workout) -> Result<(), AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(&workout.id)
            .parent(&parent_path)
            .object(workout)
            .execute::<()>()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a user's workouts with `date >= from`, ordered by date ascending.
    pub async fn workouts_since(
        &self,
        uid: &str,
        from: DateTime<Utc>,
    ) -> Result<Vec<Workout>, AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .parent(&parent_path)
            .filter(move |q| {
                q.for_all([q
                    .field("date")
                    .greater_than_or_equal(firestore::FirestoreTimestamp(from))])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
