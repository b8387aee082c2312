//! Error types for Murmur
//!
//! Explicit error types with context, using thiserror.

use thiserror::Error;

/// Result type alias for Murmur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Murmur error types
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Spawn Errors
    // =========================================================================
    #[error("Actor name already in use: {name}")]
    SpawnNameCollision { name: String },

    #[error("Invalid actor name: {name}, reason: {reason}")]
    InvalidActorName { name: String, reason: String },

    #[error("Live actor limit reached: {count} >= {limit}")]
    ActorLimitReached { count: usize, limit: usize },

    // =========================================================================
    // Behavior Errors
    // =========================================================================
    #[error("Handler failed in {actor}: {reason}")]
    HandlerFailed { actor: String, reason: String },

    // =========================================================================
    // Timer Errors
    // =========================================================================
    #[error("Invalid timer period: {period_ms} ms, minimum is {min_ms} ms")]
    InvalidTimerPeriod { period_ms: u64, min_ms: u64 },

    #[error("Timer limit reached for {actor}: {count} >= {limit}")]
    TimerLimitReached {
        actor: String,
        count: usize,
        limit: usize,
    },

    // =========================================================================
    // Event Sink Errors
    // =========================================================================
    #[error("Sink connection failed: {endpoint}, reason: {reason}")]
    SinkConnectFailed { endpoint: String, reason: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {field}, reason: {reason}")]
    InvalidConfiguration { field: String, reason: String },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// Create a spawn name collision error
    pub fn name_collision(name: impl Into<String>) -> Self {
        Self::SpawnNameCollision { name: name.into() }
    }

    /// Create an invalid actor name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidActorName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a handler failure error
    pub fn handler_failed(actor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::HandlerFailed {
            actor: actor.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an internal error
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::name_collision("chat-room");
        assert!(err.to_string().contains("chat-room"));

        let err = Error::invalid_config("chat.clients", "must be positive");
        assert!(err.to_string().contains("chat.clients"));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_handler_failed_carries_actor() {
        let err = Error::handler_failed("session-3", "boom");
        match err {
            Error::HandlerFailed { actor, reason } => {
                assert_eq!(actor, "session-3");
                assert_eq!(reason, "boom");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
