//! Field-level validation results
//!
//! This module turns the output of `validator` schemas into a flat
//! field-name → messages map that forms render inline. Server-side field
//! errors are mapped into the same structure so the UI has one error model.

use sejour_core::{MarketError, MarketResult};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Key used for errors that belong to the image area of a form
pub const IMAGES_FIELD: &str = "images";

// ============================================================================
// FieldErrors
// ============================================================================

/// Per-field validation messages
///
/// Keys are local form-field names. Every invalid field is reported, not
/// just the first one encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error set with a single message
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Build from the result of a `validator` run
    pub fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        let mut errors = Self::new();
        if let Err(e) = result {
            errors.collect(&e);
        }
        errors
    }

    /// Validate a schema and collect every failing field
    pub fn check<T: Validate>(value: &T) -> Self {
        Self::from_validation(value.validate())
    }

    fn collect(&mut self, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            match kind {
                ValidationErrorsKind::Field(list) => {
                    for err in list {
                        let message = err
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| default_message(&err.code));
                        self.add(field.to_string(), message);
                    }
                }
                // Nested address blocks are flattened on the wire, so their
                // fields keep their own names.
                ValidationErrorsKind::Struct(inner) => self.collect(inner),
                ValidationErrorsKind::List(items) => {
                    for inner in items.values() {
                        self.collect(inner);
                    }
                }
            }
        }
    }

    /// Add a message to a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let message = message.into();
        let entry = self.errors.entry(field.into()).or_default();
        if !entry.contains(&message) {
            entry.push(message);
        }
    }

    /// Merge another error set into this one
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.errors {
            for message in messages {
                self.add(field.clone(), message);
            }
        }
    }

    /// Remove every message
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Remove the messages of a single field (e.g. when the user edits it)
    pub fn clear_field(&mut self, field: &str) {
        self.errors.remove(field);
    }

    /// Check if there are no errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with at least one message
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if a field has errors
    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Messages for a field
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message for a field (what an inline error shows)
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    /// Names of the failing fields, sorted
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Iterate over fields and their messages
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Convert to MarketResult (fails if any errors)
    pub fn to_result(&self) -> MarketResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            let msg = self
                .iter()
                .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
                .collect::<Vec<_>>()
                .join("; ");
            Err(MarketError::validation(msg))
        }
    }
}

/// Fallback message for validator codes without a custom message
fn default_message(code: &str) -> String {
    match code {
        "required" => "This field is required".to_string(),
        "length" => "Invalid length".to_string(),
        "range" => "Value is out of range".to_string(),
        "email" => "Must be a valid email address".to_string(),
        "regex" => "Invalid format".to_string(),
        "must_match" => "Values do not match".to_string(),
        other => format!("Invalid value ({})", other),
    }
}

// ============================================================================
// Shared field validators
// ============================================================================

/// Phone numbers: optional leading `+`, digits, spaces, dashes and dots
pub static PHONE_RE: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
    regex::Regex::new(r"^\+?[0-9][0-9 .\-]{5,19}$").expect("phone pattern is valid")
});

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "Name is too short"))]
        name: String,
        #[validate(required(message = "Price is required"))]
        price: Option<f64>,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_collects_every_field() {
        let sample = Sample {
            name: String::new(),
            price: None,
            email: "nope".to_string(),
        };
        let errors = FieldErrors::check(&sample);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.first("name"), Some("Name is too short"));
        assert_eq!(errors.first("price"), Some("Price is required"));
        assert_eq!(errors.first("email"), Some("Must be a valid email address"));
    }

    #[test]
    fn test_valid_schema_has_no_errors() {
        let sample = Sample {
            name: "Ok".to_string(),
            price: Some(3.0),
            email: "a@b.co".to_string(),
        };
        assert!(FieldErrors::check(&sample).is_empty());
    }

    #[test]
    fn test_add_deduplicates_and_merge() {
        let mut errors = FieldErrors::single("email", "already taken");
        errors.add("email", "already taken");
        assert_eq!(errors.get("email").len(), 1);

        errors.merge(FieldErrors::single("name", "required"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email", "name"]);

        errors.clear_field("email");
        assert!(!errors.has("email"));
        errors.clear();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_to_result() {
        assert!(FieldErrors::new().to_result().is_ok());
        let err = FieldErrors::single("name", "required").to_result().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: name: required");
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_RE.is_match("+237 699 11 22 33"));
        assert!(PHONE_RE.is_match("0612-345-678"));
        assert!(!PHONE_RE.is_match("call me"));
    }
}
