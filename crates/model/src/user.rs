//! Accounts and authentication payloads

use sejour_core::{EntityId, Identifiable, Named, Resource, UserType, VerificationStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{FieldErrors, PHONE_RE};

// ============================================================================
// Records
// ============================================================================

/// An authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(rename = "type", default)]
    pub user_type: UserType,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub verification_status: Option<VerificationStatus>,
}

impl User {
    /// Whether the account may open the back-office
    pub fn can_manage(&self) -> bool {
        self.user_type.can_manage()
    }

    /// Initials shown in the avatar bubble
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl Resource for User {
    const COLLECTION: &'static str = "users";
    const LABEL: &'static str = "user";
}

impl Identifiable for User {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Named for User {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Compact user projection embedded in other records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

// ============================================================================
// Payloads
// ============================================================================

/// Sign-in form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Keep the email in local storage for the next visit
    #[serde(skip)]
    pub remember: bool,
}

impl Credentials {
    /// Create credentials
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember: false,
        }
    }

    /// Validate every field
    pub fn check(&self) -> FieldErrors {
        FieldErrors::check(self)
    }
}

/// Sign-up form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(regex(path = *PHONE_RE, message = "Enter a valid phone number"))]
    pub phone: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,

    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl RegisterPayload {
    /// Validate every field, including the confirmation match
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::check(self);
        if let Some(confirmation) = &self.password_confirmation {
            if confirmation != &self.password {
                errors.add("password_confirmation", "Passwords do not match");
            }
        }
        if !UserType::registrable().contains(&self.user_type) {
            errors.add("type", "This account type cannot be created");
        }
        errors
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
    fn test_user_parse() {
        let user: User = serde_json::from_str(
            r#"{"id":3,"name":"Awa Ndiaye","email":"awa@test.com","type":"OWNER"}"#,
        )
        .unwrap();
        assert_eq!(user.user_type, UserType::Owner);
        assert!(user.can_manage());
        assert_eq!(user.initials(), "AN");
    }

    #[test]
    fn test_credentials_check() {
        let errors = Credentials::new("user@test.com", "secret1").check();
        assert!(errors.is_empty());

        let errors = Credentials::new("nope", "123").check();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first("password"), Some("Password must be at least 6 characters"));
    }

    #[test]
    fn test_register_confirmation_mismatch() {
        let payload = RegisterPayload {
            name: "Jo Doe".to_string(),
            email: "jo@test.com".to_string(),
            phone: None,
            password: "secret1".to_string(),
            password_confirmation: Some("secret2".to_string()),
            user_type: UserType::Customer,
        };
        let errors = payload.check();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["password_confirmation"]);
    }

    #[test]
    fn test_register_wire_format() {
        let payload = RegisterPayload {
            name: "Jo Doe".to_string(),
            email: "jo@test.com".to_string(),
            password: "secret1".to_string(),
            user_type: UserType::Customer,
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "CUSTOMER");
        assert!(json.get("password_confirmation").is_none());
        assert!(payload.check().is_empty());
    }

    #[test]
    fn test_register_rejects_admin() {
        let payload = RegisterPayload {
            name: "Jo Doe".to_string(),
            email: "jo@test.com".to_string(),
            password: "secret1".to_string(),
            user_type: UserType::Admin,
            ..Default::default()
        };
        assert!(payload.check().has("type"));
    }
}
