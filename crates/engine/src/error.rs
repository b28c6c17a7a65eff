//! Unified error handling for the engine.
//!
//! All public operations return `Result<T, EngineError>`. The taxonomy maps
//! one-to-one onto the response classes of the (out-of-scope) transport
//! layer: validation -> client fault, not-found -> missing resource,
//! unauthenticated/unauthorized -> auth failures, internal -> generic
//! failure with detail suppressed outside development.

use thiserror::Error;

use crate::store::StoreError;

/// Engine-level error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required field is missing or a supplied value is out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced client or delivery id does not resolve.
    #[error("{0}")]
    NotFound(String),

    /// No authenticated principal was supplied.
    #[error("authentication required")]
    Unauthenticated,

    /// The principal's role does not satisfy the operation's policy.
    #[error("forbidden: {0}")]
    Unauthorized(String),

    /// Record store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Validation error from anything displayable.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Not-found error with the given message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Result type alias for [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EngineError::not_found("client not found");
        assert_eq!(err.to_string(), "client not found");

        let err = EngineError::validation("invalid status");
        assert_eq!(err.to_string(), "validation error: invalid status");

        assert_eq!(
            EngineError::Unauthenticated.to_string(),
            "authentication required"
        );
    }
}
