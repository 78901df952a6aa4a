//! External service clients.

pub mod identity;

pub use identity::{Identity, IdentityClient};
