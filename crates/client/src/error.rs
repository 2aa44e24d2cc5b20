//! Errors raised while talking to the API

use sejour_core::MarketError;
use sejour_model::ErrorEnvelope;
use thiserror::Error;

/// Result alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur when making API requests
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server rejected the payload with per-field messages
    #[error("Validation failed ({status})")]
    Validation {
        /// HTTP status code (usually 422)
        status: u16,
        /// Parsed error envelope
        envelope: ErrorEnvelope,
    },

    /// Missing or rejected credentials (401)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-2xx response
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-supplied message, or the raw body
        message: String,
    },

    /// Failed to deserialize the response body
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Local storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A verification token could not be turned into a QR code
    #[error("QR encoding failed: {0}")]
    Qr(String),

    /// Error from the shared domain layer
    #[error(transparent)]
    Market(#[from] MarketError),
}

impl ClientError {
    /// Build the error for a non-2xx response
    ///
    /// Bodies in an unexpected shape degrade to a plain message; this never
    /// fails.
    pub fn from_response(status: u16, body: &str) -> Self {
        let envelope = ErrorEnvelope::parse(body);

        if status == 401 {
            let message = envelope
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Your session has expired. Please sign in again.".to_string());
            return Self::Unauthorized { message };
        }

        match envelope {
            Some(envelope) if envelope.has_field_errors() && (400..500).contains(&status) => {
                Self::Validation { status, envelope }
            }
            Some(ErrorEnvelope {
                message: Some(message),
                ..
            }) => Self::Api { status, message },
            _ => Self::Api {
                status,
                message: summarize_body(body),
            },
        }
    }

    /// HTTP status of the failed response, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this is a "not found" (404) error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether this is an "unauthorized" (401) error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Whether this is a "forbidden" (403) error
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Whether the server reported per-field errors
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Field-error envelope carried by the error
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            Self::Validation { envelope, .. } => Some(envelope),
            _ => None,
        }
    }

    /// Get the user-facing error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(e) => {
                if e.is_timeout() {
                    "Request timed out. Please try again.".to_string()
                } else if e.is_connect() {
                    "Unable to connect to the server. Please check your connection.".to_string()
                } else {
                    "An unexpected network error occurred.".to_string()
                }
            }
            Self::Validation { envelope, .. } => envelope
                .message
                .clone()
                .unwrap_or_else(|| "Some fields are invalid.".to_string()),
            Self::Unauthorized { message } => message.clone(),
            Self::Api { status, message } if *status >= 500 => {
                if message.is_empty() {
                    "The server encountered an error. Please try again later.".to_string()
                } else {
                    message.clone()
                }
            }
            Self::Api { message, .. } => message.clone(),
            Self::Parse(_) => "Received an unexpected response from the server.".to_string(),
            Self::Storage(_) => "Local storage is unavailable.".to_string(),
            Self::Config(message) => message.clone(),
            Self::Qr(_) => "The verification code could not be generated.".to_string(),
            Self::Market(e) => e.to_string(),
        }
    }
}

/// Keep raw bodies readable in messages (HTML error pages can be huge)
fn summarize_body(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.chars().count() <= MAX {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(MAX).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_envelope() {
        let err = ClientError::from_response(
            422,
            r#"{"message":"The given data was invalid.","errors":{"email":["already taken"]}}"#,
        );
        assert!(err.is_validation());
        assert_eq!(err.envelope().unwrap().errors["email"], vec!["already taken"]);
        assert_eq!(err.user_message(), "The given data was invalid.");
    }

    #[test]
    fn test_unauthorized() {
        let err = ClientError::from_response(401, r#"{"message":"Unauthenticated."}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.user_message(), "Unauthenticated.");
    }

    #[test]
    fn test_unexpected_shape_degrades_to_message() {
        let err = ClientError::from_response(500, "<html>boom</html>");
        assert!(!err.is_validation());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.user_message(), "<html>boom</html>");

        let err = ClientError::from_response(500, "");
        assert_eq!(
            err.user_message(),
            "The server encountered an error. Please try again later."
        );
    }

    #[test]
    fn test_not_found() {
        let err = ClientError::from_response(404, r#"{"message":"No query results."}"#);
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "No query results.");
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(500);
        let ClientError::Api { message, .. } = ClientError::from_response(502, &body) else {
            panic!("expected Api variant");
        };
        assert_eq!(message.len(), 203);
    }
}
