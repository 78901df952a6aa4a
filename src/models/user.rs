//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile document stored at `users/{uid}`.
///
/// Exactly one profile exists per authenticated identity; its existence
/// is what separates "authenticated without profile" from a fully
/// onboarded user. Writes are whole-document overwrites, preserving
/// `created_at` across updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity provider uid (also used as document ID)
    pub id: String,
    /// Normalized (trimmed, lowercased) email address
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Postal address
    pub address: String,
    /// Whether the identity provider has verified the email
    #[serde(default)]
    pub email_verified: bool,
    /// When the profile was first written (RFC3339)
    pub created_at: String,
    /// Last overwrite timestamp (RFC3339)
    pub updated_at: String,
}
