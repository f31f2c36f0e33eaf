//! Error types for the bridge.
//!
//! Every failure flows through [`BridgeError`]; the split between what an
//! operator sees and what the calling model sees happens in exactly one
//! place, [`BridgeError::caller_message`].

use thiserror::Error;

/// Primary error type for all bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A tool argument failed its declared schema constraint. Resolved
    /// locally; never reaches the backend.
    #[error("Invalid parameter '{field}': {message}")]
    Validation { field: String, message: String },

    /// Backend reported a missing resource (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected the shared secret (401/403).
    #[error("Authentication rejected by backend (status {status})")]
    Authentication { status: u16 },

    /// Backend application error with a machine message.
    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure: the backend was never reached or the
    /// connection died mid-flight. Carries no backend message.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl BridgeError {
    /// Create a validation error naming the offending field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an API error from a backend status and machine message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// The message safe to return to the calling model.
    ///
    /// Validation, not-found, and backend application errors are already
    /// caller-safe: they contain field names and backend machine messages,
    /// nothing internal. Authentication and transport failures collapse to
    /// generic phrases; their detail is only ever logged.
    pub fn caller_message(&self) -> String {
        match self {
            Self::Validation { .. } | Self::NotFound(_) | Self::UnknownTool(_) => self.to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::Authentication { .. } => {
                "Authentication with the backend service failed.".to_string()
            }
            Self::Network(_) | Self::Serialization(_) | Self::Configuration(_) => {
                "The backend service could not be reached. Please try again later.".to_string()
            }
        }
    }

    /// Whether this error was produced before any network call was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = BridgeError::validation("duration_minutes", "must be between 15 and 240");
        assert_eq!(
            err.caller_message(),
            "Invalid parameter 'duration_minutes': must be between 15 and 240"
        );
    }

    #[test]
    fn api_error_passes_backend_message_through() {
        let err = BridgeError::api(422, "User u-1 not found");
        assert_eq!(err.caller_message(), "User u-1 not found");
    }

    #[test]
    fn authentication_error_is_generic() {
        let err = BridgeError::Authentication { status: 403 };
        assert_eq!(
            err.caller_message(),
            "Authentication with the backend service failed."
        );
    }

    #[test]
    fn not_found_identifies_the_resource() {
        let err = BridgeError::NotFound("User abc-123 not found".to_string());
        assert!(err.caller_message().contains("abc-123"));
    }
}
