// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: session gate, profile, workouts, dashboard.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::gate::{self, SessionState};
use crate::middleware::auth::{extract_token, verify_token, AuthUser};
use crate::models::stats::{chart_points, ChartPoint, WEEK_DAYS};
use crate::models::workout::new_workout_id;
use crate::models::{DashboardStats, UserProfile, Workout, WorkoutType};
use crate::time_utils::{add_days, format_utc_rfc3339, start_of_day};
use crate::validators;
use crate::AppState;

/// Routes requiring authentication. The auth middleware is applied in
/// routes/mod.rs for these.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(get_profile).put(put_profile))
        .route("/api/workouts", post(quick_add_workout))
        .route("/api/dashboard", get(get_dashboard))
}

/// Public routes: the session gate must answer for unauthenticated
/// visitors too, so it sits outside the auth middleware.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/session", get(get_session))
}

// ─── Session Gate ────────────────────────────────────────────

#[derive(Serialize)]
pub struct GateResponse {
    pub state: SessionState,
}

/// Classify the visitor: no (or invalid) session token means
/// unauthenticated, never an error; with a valid token the profile
/// lookup decides between complete-profile and dashboard, bounded by the
/// configured gate wait.
async fn get_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Json<GateResponse> {
    let claims = extract_token(&jar, &headers)
        .and_then(|token| verify_token(&token, &state.config.jwt_signing_key));

    let gate_state = match claims {
        None => SessionState::Unauthenticated,
        Some(claims) => {
            let db = state.db.clone();
            gate::resolve(state.config.auth_wait, async move {
                Ok(db.get_profile(&claims.sub).await?.is_some())
            })
            .await
        }
    };

    Json(GateResponse { state: gate_state })
}

// ─── Profile ─────────────────────────────────────────────────

/// Get the current user's profile, or 404 if it was never completed.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .db
        .get_profile(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not completed".to_string()))?;

    Ok(Json(profile))
}

#[derive(Deserialize, Validate)]
pub struct CompleteProfileRequest {
    #[validate(custom(function = validators::person_name))]
    pub first_name: String,
    #[validate(custom(function = validators::person_name))]
    pub last_name: String,
    #[validate(custom(function = validators::bounded_text))]
    pub address: String,
}

/// Build the overwrite document for a profile write.
///
/// `created_at` and the verification flag are carried over from an
/// existing document, `updated_at` is stamped with `now`; a first write
/// stamps both.
fn merge_profile(
    user: &AuthUser,
    payload: CompleteProfileRequest,
    existing: Option<&UserProfile>,
    now: String,
) -> UserProfile {
    let (created_at, email_verified) = match existing {
        Some(p) => (p.created_at.clone(), p.email_verified),
        None => (now.clone(), false),
    };

    UserProfile {
        id: user.uid.clone(),
        email: user.email.clone(),
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        address: payload.address.trim().to_string(),
        email_verified,
        created_at,
        updated_at: now,
    }
}

/// Complete or overwrite the profile document.
async fn put_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CompleteProfileRequest>,
) -> Result<Json<UserProfile>> {
    payload.validate()?;

    let now = format_utc_rfc3339(Utc::now());
    let existing = state.db.get_profile(&user.uid).await?;
    let profile = merge_profile(&user, payload, existing.as_ref(), now);
    state.db.set_profile(&user.uid, &profile).await?;

    tracing::info!(uid = %user.uid, "Profile written");

    Ok(Json(profile))
}

// ─── Workouts ────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct QuickAddRequest {
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    /// Minutes; a day only has 1440 of them
    #[validate(range(min = 1, max = 1440))]
    pub duration_min: u32,
    #[validate(range(max = 10_000))]
    pub calories: u32,
    /// Occurrence date, `YYYY-MM-DD`; the workout is logged at midnight
    pub date: String,
}

/// Quick-add a workout. The document id is generated here from the
/// occurrence date so the write needs no prior round trip.
async fn quick_add_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<QuickAddRequest>,
) -> Result<Json<Workout>> {
    payload.validate()?;

    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| {
            AppError::BadRequest("Invalid 'date': must be YYYY-MM-DD".to_string())
        })?
        .and_time(NaiveTime::MIN)
        .and_utc();

    let workout = Workout {
        id: new_workout_id(date)?,
        workout_type: payload.workout_type,
        duration_min: payload.duration_min,
        calories: payload.calories,
        date,
        created_at: Utc::now(),
    };

    state.db.set_workout(&user.uid, &workout).await?;

    tracing::debug!(uid = %user.uid, id = %workout.id, "Workout stored");

    Ok(Json(workout))
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct DashboardResponse {
    pub profile: UserProfile,
    pub stats: DashboardStats,
    /// Normalized bar positions for the weekly chart
    pub chart: Vec<ChartPoint>,
}

/// Build the weekly dashboard: profile, 7-day aggregates, chart points.
///
/// The query window matches the bucketing window (7 days ending today);
/// the aggregation tolerates wider input but nothing fetches it.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardResponse>> {
    let profile = state
        .db
        .get_profile(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not completed".to_string()))?;

    let now = Utc::now();
    let from = add_days(start_of_day(now), -(WEEK_DAYS - 1));
    let workouts = state.db.workouts_since(&user.uid, from).await?;

    tracing::debug!(
        uid = %user.uid,
        count = workouts.len(),
        "Computing dashboard aggregates"
    );

    let stats = DashboardStats::compute(now, &workouts);
    let chart = chart_points(&stats);

    Ok(Json(DashboardResponse {
        profile,
        stats,
        chart,
    }))
}
