//! Error types for Sejour
//!
//! This module provides the error taxonomy shared by every crate in the
//! workspace: local validation errors, server-reported errors, storage and
//! serialization failures.

use thiserror::Error;

/// The main error type for Sejour
#[derive(Debug, Error)]
pub enum MarketError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field validation failed
    #[error("Field validation failed for '{entity}.{field}': {message}")]
    FieldValidation {
        entity: String,
        field: String,
        message: String,
    },

    /// The image set of a form breaks the submission rules
    #[error("Image validation failed: {0}")]
    ImageValidation(String),

    // ========================================================================
    // Server Errors
    // ========================================================================
    /// The server rejected the request with a non-field error
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The session is missing or expired
    #[error("Not authenticated")]
    Unauthenticated,

    /// The requested record does not exist on the server
    #[error("{resource} #{id} not found")]
    NotFound { resource: String, id: u64 },

    /// A status transition the current screen does not offer
    #[error("Action '{action}' is not available while {resource} is {status}")]
    ActionUnavailable {
        resource: String,
        action: String,
        status: String,
    },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// Local storage IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Unexpected payload shape from the server
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl MarketError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        MarketError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(
        entity: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        MarketError::FieldValidation {
            entity: entity.into(),
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a server error
    pub fn server(status: u16, msg: impl Into<String>) -> Self {
        MarketError::Server {
            status,
            message: msg.into(),
        }
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        MarketError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a local validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MarketError::Validation(_)
                | MarketError::FieldValidation { .. }
                | MarketError::ImageValidation(_)
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, MarketError::NotFound { .. })
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, MarketError::Io(_))
    }

    /// Check if this error came back from the remote API
    pub fn is_server(&self) -> bool {
        matches!(
            self,
            MarketError::Server { .. } | MarketError::Unauthenticated | MarketError::NotFound { .. }
        )
    }
}

/// Result type alias using MarketError
pub type MarketResult<T> = Result<T, MarketError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> MarketResult<T>;
}

impl<T, E: Into<MarketError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> MarketResult<T> {
        self.map_err(|e| {
            let err: MarketError = e.into();
            MarketError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_error() {
        let err = MarketError::validation("Name is required");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Validation error: Name is required");
    }

    #[test]
    fn test_field_validation_error() {
        let err = MarketError::field_validation("Hotel", "name", "Too short");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Field validation failed for 'Hotel.name': Too short"
        );
    }

    #[test]
    fn test_server_errors() {
        let err = MarketError::server(500, "Server exploded");
        assert!(err.is_server());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Server error (500): Server exploded");

        let err = MarketError::NotFound {
            resource: "booking".to_string(),
            id: 7,
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "booking #7 not found");
    }

    #[test]
    fn test_action_unavailable() {
        let err = MarketError::ActionUnavailable {
            resource: "booking".to_string(),
            action: "cancel".to_string(),
            status: "ANNULE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Action 'cancel' is not available while booking is ANNULE"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = MarketError::with_context("Saving token", "Permission denied");
        assert_eq!(err.to_string(), "Saving token: Permission denied");
    }

    #[test]
    fn test_result_ext() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.with_context("Writing storage").unwrap_err();
        assert_eq!(err.to_string(), "Writing storage: IO error: denied");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MarketError = io_err.into();
        assert!(err.is_io());
    }
}
