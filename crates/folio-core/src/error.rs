//! Error types for the Folio assistant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Folio workspace.
///
/// Dialogue operations are mostly total (classification never fails, blank
/// input is ignored), so the variants here cover misuse of the session API,
/// invalid knowledge content, the contact form and the storage layer.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FolioError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A navigation key or category id outside the closed category set
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    /// A reply is still being typed; callers must wait for it first
    #[error("A reply is already in flight for session '{0}'")]
    ReplyInFlight(String),

    /// The session was closed and no longer accepts input
    #[error("Session '{0}' is closed")]
    SessionClosed(String),

    /// An event the dialogue state machine does not accept in its current state
    #[error("Invalid transition: {event} while {state}")]
    InvalidTransition { state: String, event: String },

    /// Knowledge content is incomplete or inconsistent
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Input validation error (contact form fields)
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Contact submissions are throttled
    #[error("Rate limited: retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Mail relay failure
    #[error("Relay error: {0}")]
    Relay(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FolioError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Knowledge error
    pub fn knowledge(message: impl Into<String>) -> Self {
        Self::Knowledge(message.into())
    }

    /// Creates a Validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a Relay error
    pub fn relay(message: impl Into<String>) -> Self {
        Self::Relay(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a rate limit rejection
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Check if this error came from the session lifecycle (busy or closed)
    pub fn is_session_state(&self) -> bool {
        matches!(self, Self::ReplyInFlight(_) | Self::SessionClosed(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FolioError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for FolioError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for FolioError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, FolioError>`.
pub type Result<T> = std::result::Result<T, FolioError>;
