// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitControl: workout tracking with a weekly dashboard.
//!
//! This crate provides the API backend for the FitControl app: account
//! and session handling against a hosted identity provider, profile and
//! workout storage in Firestore, and the 7-day aggregation behind the
//! dashboard.

pub mod config;
pub mod db;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod validators;

use config::Config;
use db::FirestoreDb;
use services::IdentityClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity: IdentityClient,
}
