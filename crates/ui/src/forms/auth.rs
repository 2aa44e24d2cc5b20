//! Sign-in and sign-up forms
//!
//! Both forms validate locally, call the [`Session`] and redirect to the
//! home screen on success. A 422 puts the server messages on the matching
//! fields; anything else is a server error for a toast.

use sejour_client::Session;
use sejour_core::UserType;
use sejour_model::{Credentials, FieldErrors, RegisterPayload, User};

use super::entity_form::SubmitResult;
use super::server_errors::ServerErrorAdapter;
use crate::state::Route;

/// Outcome of validating an auth form before sending it
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPrepared<T> {
    /// Valid payload to send
    Ready(T),
    /// Local field errors; nothing was sent
    Invalid(FieldErrors),
    /// A submission is already running
    Busy,
}

// ============================================================================
// Sign in
// ============================================================================

/// Sign-in form state
#[derive(Debug, Clone, PartialEq)]
pub struct SignInForm {
    pub credentials: Credentials,
    errors: FieldErrors,
    server: ServerErrorAdapter,
    submitting: bool,
}

impl SignInForm {
    /// Form pre-filled with the remembered email, if any
    pub fn new(remembered_email: Option<String>) -> Self {
        let mut credentials = Credentials::new(String::new(), String::new());
        if let Some(email) = remembered_email {
            credentials.email = email;
            credentials.remember = true;
        }
        Self {
            credentials,
            errors: FieldErrors::new(),
            server: ServerErrorAdapter::new([("email", "email"), ("password", "password")]),
            submitting: false,
        }
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.errors.first(field).map(str::to_string)
    }

    pub fn panel(&self) -> &[String] {
        if self.server.is_panel_open() {
            self.server.panel()
        } else {
            &[]
        }
    }

    pub fn close_panel(&mut self) {
        self.server.close_panel();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and hand out the credentials to send
    pub fn prepare(&mut self) -> AuthPrepared<Credentials> {
        if self.submitting {
            return AuthPrepared::Busy;
        }
        self.server.clear();
        self.errors = self.credentials.check();
        if !self.errors.is_empty() {
            return AuthPrepared::Invalid(self.errors.clone());
        }
        self.submitting = true;
        AuthPrepared::Ready(self.credentials.clone())
    }

    /// Route the outcome of the login request
    pub fn finish(&mut self, result: sejour_client::ClientResult<User>) -> SubmitResult<Route> {
        self.submitting = false;
        match result {
            Ok(user) => {
                tracing::info!(user = %user.email, "Signed in from form");
                SubmitResult::Submitted(Route::Home)
            }
            Err(e) => route_failure(&mut self.server, &mut self.errors, &e),
        }
    }

    /// Full sign-in against a session
    pub async fn submit(&mut self, session: &Session) -> SubmitResult<Route> {
        match self.prepare() {
            AuthPrepared::Ready(credentials) => {
                let result = session.login(&credentials).await;
                self.finish(result)
            }
            AuthPrepared::Invalid(errors) => SubmitResult::Invalid(errors),
            AuthPrepared::Busy => SubmitResult::Busy,
        }
    }
}

// ============================================================================
// Sign up
// ============================================================================

/// Sign-up form state
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpForm {
    pub payload: RegisterPayload,
    /// Keep the email for the next sign-in
    pub remember: bool,
    errors: FieldErrors,
    server: ServerErrorAdapter,
    submitting: bool,
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self {
            payload: RegisterPayload {
                password_confirmation: Some(String::new()),
                user_type: UserType::Customer,
                ..Default::default()
            },
            remember: false,
            errors: FieldErrors::new(),
            server: ServerErrorAdapter::new([
                ("name", "name"),
                ("email", "email"),
                ("phone", "phone"),
                ("password", "password"),
                ("password_confirmation", "password_confirmation"),
                ("type", "type"),
            ]),
            submitting: false,
        }
    }
}

impl SignUpForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.errors.first(field).map(str::to_string)
    }

    pub fn panel(&self) -> &[String] {
        if self.server.is_panel_open() {
            self.server.panel()
        } else {
            &[]
        }
    }

    pub fn close_panel(&mut self) {
        self.server.close_panel();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and hand out the payload to send
    pub fn prepare(&mut self) -> AuthPrepared<RegisterPayload> {
        if self.submitting {
            return AuthPrepared::Busy;
        }
        self.server.clear();
        if self.payload.phone.as_deref().is_some_and(|p| p.trim().is_empty()) {
            self.payload.phone = None;
        }
        self.errors = self.payload.check();
        if !self.errors.is_empty() {
            return AuthPrepared::Invalid(self.errors.clone());
        }
        self.submitting = true;
        AuthPrepared::Ready(self.payload.clone())
    }

    /// Route the outcome of the register request
    pub fn finish(&mut self, result: sejour_client::ClientResult<User>) -> SubmitResult<Route> {
        self.submitting = false;
        match result {
            Ok(_) => SubmitResult::Submitted(Route::Home),
            Err(e) => route_failure(&mut self.server, &mut self.errors, &e),
        }
    }

    /// Full registration against a session
    pub async fn submit(&mut self, session: &Session) -> SubmitResult<Route> {
        let payload = match self.prepare() {
            AuthPrepared::Ready(payload) => payload,
            AuthPrepared::Invalid(errors) => return SubmitResult::Invalid(errors),
            AuthPrepared::Busy => return SubmitResult::Busy,
        };
        let result = session.register(&payload).await;
        if result.is_ok() {
            let email = self.remember.then_some(payload.email.as_str());
            if let Err(e) = session.remember_email(email) {
                tracing::warn!("Could not store remembered email: {}", e);
            }
        }
        self.finish(result)
    }
}

fn route_failure(
    server: &mut ServerErrorAdapter,
    errors: &mut FieldErrors,
    error: &sejour_client::ClientError,
) -> SubmitResult<Route> {
    server.apply(error);
    if error.is_validation() && !server.field_errors().is_empty() {
        errors.merge(server.field_errors().clone());
        SubmitResult::Invalid(errors.clone())
    } else {
        SubmitResult::ServerError(error.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::post};
    use pretty_assertions::assert_eq;
    use sejour_client::{AUTH_TOKEN_KEY, ApiClient, MemoryStore, TokenStore};
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}/", addr)
    }

    /// Session against a login endpoint that only accepts "secret1"
    async fn login_session() -> (Session, Arc<MemoryStore>) {
        let router = Router::new().route(
            "/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret1" {
                    Json(json!({
                        "token": "abc",
                        "user": { "id": 1, "name": "Test User", "email": "user@test.com", "type": "OWNER" }
                    }))
                    .into_response()
                } else {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({
                            "message": "The given data was invalid.",
                            "errors": { "password": ["invalid"] }
                        })),
                    )
                        .into_response()
                }
            }),
        );
        let api = ApiClient::with_base_url(&serve(router).await).unwrap();
        let store = Arc::new(MemoryStore::new());
        (Session::new(api, store.clone()), store)
    }

    #[test]
    fn test_sign_in_prefills_remembered_email() {
        let form = SignInForm::new(Some("awa@test.com".to_string()));
        assert_eq!(form.credentials.email, "awa@test.com");
        assert!(form.credentials.remember);

        let blank = SignInForm::new(None);
        assert!(blank.credentials.email.is_empty());
        assert!(!blank.credentials.remember);
    }

    #[test]
    fn test_sign_in_blank_reports_both_fields() {
        let mut form = SignInForm::new(None);
        let AuthPrepared::Invalid(errors) = form.prepare() else {
            panic!("blank form should not be ready");
        };
        assert!(errors.has("email"));
        assert!(errors.has("password"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_sign_in_server_field_error() {
        let mut form = SignInForm::new(None);
        form.credentials = Credentials::new("user@test.com", "secret1");
        assert!(matches!(form.prepare(), AuthPrepared::Ready(_)));

        let result = form.finish(Err(sejour_client::ClientError::from_response(
            422,
            r#"{"errors":{"password":["invalid"]}}"#,
        )));
        assert!(matches!(result, SubmitResult::Invalid(_)));
        assert_eq!(form.error("password").as_deref(), Some("invalid"));
    }

    #[test]
    fn test_second_prepare_while_running_is_busy() {
        let mut form = SignInForm::new(None);
        form.credentials = Credentials::new("user@test.com", "secret1");
        assert!(matches!(form.prepare(), AuthPrepared::Ready(_)));

        assert_eq!(form.prepare(), AuthPrepared::Busy);
        assert!(form.is_submitting());
        assert_eq!(form.error("email"), None);

        let mut sign_up = SignUpForm::new();
        sign_up.payload.name = "Awa Ndiaye".to_string();
        sign_up.payload.email = "awa@test.com".to_string();
        sign_up.payload.password = "secret1".to_string();
        sign_up.payload.password_confirmation = Some("secret1".to_string());
        assert!(matches!(sign_up.prepare(), AuthPrepared::Ready(_)));
        assert_eq!(sign_up.prepare(), AuthPrepared::Busy);
    }

    #[tokio::test]
    async fn test_submit_while_running_sends_nothing() {
        let (session, store) = login_session().await;
        let mut form = SignInForm::new(None);
        form.credentials = Credentials::new("user@test.com", "secret1");
        assert!(matches!(form.prepare(), AuthPrepared::Ready(_)));

        let result = form.submit(&session).await;

        assert_eq!(result, SubmitResult::Busy);
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn test_submit_signs_in_and_stores_token() {
        let (session, store) = login_session().await;
        let mut form = SignInForm::new(None);
        form.credentials = Credentials::new("user@test.com", "secret1");

        let result = form.submit(&session).await;

        assert_eq!(result, SubmitResult::Submitted(Route::Home));
        assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("abc"));
        assert!(session.has_token());
        assert_eq!(
            session.current_user().await.map(|u| u.email),
            Some("user@test.com".to_string())
        );
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_wrong_password_marks_field() {
        let (session, store) = login_session().await;
        let mut form = SignInForm::new(None);
        form.credentials = Credentials::new("user@test.com", "wrong-one");

        let result = form.submit(&session).await;

        let SubmitResult::Invalid(errors) = result else {
            panic!("expected field errors, got {:?}", result);
        };
        assert!(errors.has("password"));
        assert_eq!(form.error("password").as_deref(), Some("invalid"));
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
        assert!(!session.has_token());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_sign_up_password_mismatch() {
        let mut form = SignUpForm::new();
        form.payload.name = "Awa Ndiaye".to_string();
        form.payload.email = "awa@test.com".to_string();
        form.payload.password = "secret1".to_string();
        form.payload.password_confirmation = Some("secret2".to_string());
        form.payload.phone = Some("  ".to_string());

        let AuthPrepared::Invalid(errors) = form.prepare() else {
            panic!("mismatched passwords should not be ready");
        };
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["password_confirmation"]);
        assert_eq!(form.payload.phone, None);
    }
}
