// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod stats;
pub mod user;
pub mod workout;

pub use stats::{DashboardStats, WeekPoint};
pub use user::UserProfile;
pub use workout::{Workout, WorkoutType};
