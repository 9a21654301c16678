//! Error types for Clearance Core.
//!
//! The policies themselves never fail. These errors only arise when parsing
//! values that enter the core from outside.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown widget kind: {0}")]
    UnknownWidgetKind(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
