//! Error types for the Gatekeeper.

use clearance_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Gatekeeper operations.
#[derive(Debug, Error)]
pub enum GatekeeperError {
    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Unknown user or wrong password. The two are not distinguished.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// No stored session with this id.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// A session snapshot could not be encoded or decoded.
    #[error("session snapshot error: {0}")]
    Session(String),
}

/// Result type for Gatekeeper operations.
pub type Result<T> = std::result::Result<T, GatekeeperError>;
