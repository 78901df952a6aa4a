// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model and document id generation.

use chrono::{DateTime, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};

/// Closed set of workout types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Mobility,
    Other,
}

/// A single logged exercise session, stored in the `workouts`
/// subcollection under the owning user. Create-only: never updated or
/// deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Caller-generated document id (see [`new_workout_id`])
    pub id: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    /// Duration in minutes; absent fields in stored documents read as 0
    #[serde(default)]
    pub duration_min: u32,
    /// Estimated calories; absent fields in stored documents read as 0
    #[serde(default)]
    pub calories: u32,
    /// When the workout took place
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub date: DateTime<Utc>,
    /// When the record was written
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Generate a workout document id from the occurrence date plus a random
/// suffix, so a record can be written without a round trip to reserve an
/// id first.
pub fn new_workout_id(date: DateTime<Utc>) -> anyhow::Result<String> {
    let mut suffix = [0u8; 3];
    SystemRandom::new()
        .fill(&mut suffix)
        .map_err(|_| anyhow::anyhow!("system RNG unavailable"))?;
    Ok(format!("{}-{}", date.timestamp_millis(), hex::encode(suffix)))
}
