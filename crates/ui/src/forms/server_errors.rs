//! Server Error Adapter
//!
//! Maps the field errors of a failed submission back onto local form
//! fields. Server keys are looked up in a caller-provided dictionary;
//! anything unmapped (and any top-level message) lands in the error panel
//! shown above the form.

use std::collections::BTreeMap;

use sejour_client::ClientError;
use sejour_model::{ErrorEnvelope, FieldErrors};

/// Message shown when a failure carries nothing usable
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Server-to-form error mapping plus the unmapped-error panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerErrorAdapter {
    mapping: BTreeMap<String, String>,
    field_errors: FieldErrors,
    panel: Vec<String>,
    panel_open: bool,
}

impl ServerErrorAdapter {
    /// Create an adapter from `(server key, local field)` pairs
    pub fn new<'a>(mapping: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            mapping: mapping
                .into_iter()
                .map(|(server, local)| (server.to_string(), local.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    /// Add or replace one mapping entry
    pub fn map(mut self, server: &str, local: &str) -> Self {
        self.mapping.insert(server.to_string(), local.to_string());
        self
    }

    /// Local field for a server key
    ///
    /// Array keys such as `amenities.2` or `gallery_images.0` resolve
    /// through their base name.
    pub fn local_field(&self, server_key: &str) -> Option<&str> {
        if let Some(local) = self.mapping.get(server_key) {
            return Some(local);
        }
        let base = server_key.split('.').next().unwrap_or(server_key);
        let base = base.trim_end_matches("[]");
        self.mapping.get(base).map(String::as_str)
    }

    /// Route a caught request error
    pub fn apply(&mut self, error: &ClientError) {
        match error.envelope() {
            Some(envelope) => self.apply_envelope(envelope),
            None => self.push_panel(error.user_message()),
        }
    }

    /// Route an error envelope
    pub fn apply_envelope(&mut self, envelope: &ErrorEnvelope) {
        let before = self.panel.len();

        for (key, messages) in &envelope.errors {
            match self.local_field(key).map(str::to_string) {
                Some(local) => {
                    for message in messages {
                        self.field_errors.add(local.clone(), message.clone());
                    }
                }
                None => {
                    tracing::debug!(field = %key, "Unmapped server field error");
                    for message in messages {
                        self.push_panel(message.clone());
                    }
                }
            }
        }

        if let Some(message) = envelope.message.as_deref().filter(|m| !m.trim().is_empty()) {
            self.push_panel(message.to_string());
        }

        if self.field_errors.is_empty() && self.panel.len() == before {
            self.push_panel(GENERIC_ERROR.to_string());
        }
    }

    fn push_panel(&mut self, message: String) {
        let message = if message.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            message
        };
        if !self.panel.contains(&message) {
            self.panel.push(message);
        }
        self.panel_open = true;
    }

    /// Empty field errors and the panel, and close the panel
    pub fn clear(&mut self) {
        self.field_errors.clear();
        self.panel.clear();
        self.panel_open = false;
    }

    /// Close the panel without forgetting field errors
    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    /// Errors mapped onto local fields
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Messages shown in the panel
    pub fn panel(&self) -> &[String] {
        &self.panel
    }

    /// Whether the panel is visible
    pub fn is_panel_open(&self) -> bool {
        self.panel_open && !self.panel.is_empty()
    }

    /// Whether the adapter holds nothing
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.panel.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn envelope(json: &str) -> ErrorEnvelope {
        ErrorEnvelope::parse(json).unwrap()
    }

    #[test]
    fn test_mapped_field_leaves_panel_empty() {
        let mut adapter = ServerErrorAdapter::new([("email", "email")]);
        adapter.apply_envelope(&envelope(r#"{"errors":{"email":["already taken"]}}"#));

        assert_eq!(adapter.field_errors().first("email"), Some("already taken"));
        assert!(adapter.panel().is_empty());
        assert!(!adapter.is_panel_open());
    }

    #[test]
    fn test_unmapped_key_goes_to_panel() {
        let mut adapter = ServerErrorAdapter::new([("email", "email")]);
        adapter.apply_envelope(&envelope(
            r#"{"errors":{"email":["already taken"],"tenant":["closed"]}}"#,
        ));

        assert_eq!(adapter.field_errors().len(), 1);
        assert_eq!(adapter.panel(), ["closed".to_string()]);
        assert!(adapter.is_panel_open());
    }

    #[test]
    fn test_renamed_field_and_array_keys() {
        let mut adapter = ServerErrorAdapter::new([("type", "room_type"), ("amenities", "amenities")]);
        adapter.apply_envelope(&envelope(
            r#"{"errors":{"type":["invalid"],"amenities.3":["unknown amenity"]}}"#,
        ));

        assert_eq!(adapter.field_errors().first("room_type"), Some("invalid"));
        assert_eq!(adapter.field_errors().first("amenities"), Some("unknown amenity"));
    }

    #[test]
    fn test_top_level_message_goes_to_panel() {
        let mut adapter = ServerErrorAdapter::default();
        adapter.apply_envelope(&ErrorEnvelope::message("Hotel is archived"));
        assert_eq!(adapter.panel(), ["Hotel is archived".to_string()]);
    }

    #[test]
    fn test_empty_envelope_becomes_generic_message() {
        let mut adapter = ServerErrorAdapter::default();
        adapter.apply_envelope(&ErrorEnvelope::default());
        assert_eq!(adapter.panel(), [GENERIC_ERROR.to_string()]);
    }

    #[test]
    fn test_non_envelope_error_uses_user_message() {
        let mut adapter = ServerErrorAdapter::default();
        adapter.apply(&ClientError::from_response(500, "<html>oops</html>"));
        assert_eq!(adapter.panel().len(), 1);
        assert!(adapter.field_errors().is_empty());
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut adapter = ServerErrorAdapter::new([("name", "name")]);
        adapter.apply(&ClientError::from_response(
            422,
            r#"{"message":"Invalid","errors":{"name":["taken"],"x":["bad"]}}"#,
        ));
        assert!(!adapter.is_empty());

        adapter.clear();
        assert!(adapter.is_empty());
        assert!(!adapter.is_panel_open());
    }
}
