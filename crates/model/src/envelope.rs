//! Response envelopes shared by every endpoint
//!
//! List endpoints wrap their rows in `{ data, meta }`; failures use an error
//! envelope carrying an optional top-level message and a per-field map of
//! message arrays. Payloads are parsed into these strict shapes before they
//! reach application state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::user::User;

// ============================================================================
// Pagination
// ============================================================================

/// Pagination block of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl PageMeta {
    /// Metadata for an unpaginated response holding everything
    pub fn single() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            per_page: None,
            total: None,
        }
    }

    /// Whether a next page exists
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Whether a previous page exists
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// Page envelope returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl<T> Paginated<T> {
    /// Wrap rows without pagination metadata
    pub fn unpaged(data: Vec<T>) -> Self {
        Self { data, meta: None }
    }

    /// Metadata, defaulting to a single page
    pub fn meta_or_single(&self) -> PageMeta {
        self.meta.unwrap_or_else(PageMeta::single)
    }

    /// Whether the page holds no rows
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self::unpaged(Vec::new())
    }
}

/// Single-record envelope (`{ data: {...} }`) used by detail and mutation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// A response that may or may not be wrapped in `{ data }`
///
/// Some endpoints return the bare record, others the wrapped one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MaybeWrapped<T> {
    Wrapped(DataEnvelope<T>),
    Bare(T),
}

impl<T> MaybeWrapped<T> {
    /// Unwrap the record
    pub fn into_inner(self) -> T {
        match self {
            MaybeWrapped::Wrapped(envelope) => envelope.data,
            MaybeWrapped::Bare(value) => value,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error envelope returned by the API on validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ErrorEnvelope {
    /// Envelope with just a top-level message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: BTreeMap::new(),
        }
    }

    /// Parse a response body
    ///
    /// Accepts the canonical shape plus the common degenerate ones: `errors`
    /// values given as a bare string, and `error` used instead of `message`.
    /// Returns `None` when the body is not a JSON object.
    pub fn parse(body: &str) -> Option<Self> {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::debug!("Error body is not JSON: {}", e);
                None
            }
        }
    }

    /// Parse an already-decoded JSON value
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;

        let message = object
            .get("message")
            .or_else(|| object.get("error"))
            .and_then(|m| m.as_str())
            .map(str::to_string);

        let mut errors = BTreeMap::new();
        if let Some(map) = object.get("errors").and_then(|e| e.as_object()) {
            for (field, messages) in map {
                let list: Vec<String> = match messages {
                    serde_json::Value::String(s) => vec![s.clone()],
                    serde_json::Value::Array(items) => items
                        .iter()
                        .filter_map(|m| m.as_str().map(str::to_string))
                        .collect(),
                    _ => Vec::new(),
                };
                if !list.is_empty() {
                    errors.insert(field.clone(), list);
                }
            }
        }

        if message.is_none() && errors.is_empty() {
            return None;
        }
        Some(Self { message, errors })
    }

    /// Whether the envelope carries field errors
    pub fn has_field_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// ============================================================================
// Auth
// ============================================================================

/// Response of `auth/login` and `auth/register`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Response carrying a bare token (`owner-verifications/{id}/token`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Tests
// ============================================================================
