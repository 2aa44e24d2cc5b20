//! Authentication context
//!
//! The session is an explicit object created once at start-up and handed
//! to whoever needs it. Its lifecycle:
//!
//! 1. `Session::new` loads the stored token into the API client
//! 2. `restore` validates it with `auth/me` (a 401 clears it)
//! 3. `login` / `register` store a fresh token
//! 4. `logout` clears the token but keeps the remembered email

use std::sync::Arc;

use sejour_model::{AuthResponse, Credentials, MaybeWrapped, RegisterPayload, User};
use tokio::sync::RwLock;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::storage::{AUTH_TOKEN_KEY, REMEMBERED_EMAIL_KEY, TokenStore};

/// Current authentication state
#[derive(Clone)]
pub struct Session {
    api: ApiClient,
    store: Arc<dyn TokenStore>,
    user: Arc<RwLock<Option<User>>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api", &self.api.base_url().as_str())
            .field("authenticated", &self.api.token().is_some())
            .finish()
    }
}

impl Session {
    /// Create a session, loading any stored token into the client
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        api.set_token(store.get(AUTH_TOKEN_KEY));
        Self {
            api,
            store,
            user: Arc::new(RwLock::new(None)),
        }
    }

    /// The API client carrying this session's token
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Whether a token is held (not necessarily validated yet)
    pub fn has_token(&self) -> bool {
        self.api.token().is_some()
    }

    /// The signed-in user, once known
    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    /// Email to pre-fill on the sign-in form
    pub fn remembered_email(&self) -> Option<String> {
        self.store.get(REMEMBERED_EMAIL_KEY)
    }

    /// Validate the stored token
    ///
    /// Returns `Ok(None)` when there is no token or the server rejected it;
    /// a rejected token is removed from storage. Other failures (network)
    /// keep the token for a later retry.
    pub async fn restore(&self) -> ClientResult<Option<User>> {
        if !self.has_token() {
            return Ok(None);
        }

        match self.api.get::<MaybeWrapped<User>>("auth/me", &[]).await {
            Ok(body) => {
                let user = body.into_inner();
                tracing::info!(user = %user.email, "Session restored");
                *self.user.write().await = Some(user.clone());
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Stored token rejected, signing out");
                self.clear_token().await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Sign in and persist the token
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<User> {
        let response: AuthResponse = self.api.post("auth/login", credentials).await?;

        self.remember_email(credentials.remember.then_some(credentials.email.as_str()))?;
        self.accept(response).await
    }

    /// Store (or forget) the email pre-filled on the next sign-in
    pub fn remember_email(&self, email: Option<&str>) -> ClientResult<()> {
        match email {
            Some(email) => self.store.set(REMEMBERED_EMAIL_KEY, email),
            None => self.store.remove(REMEMBERED_EMAIL_KEY),
        }
    }

    /// Create an account; a successful registration signs the user in
    pub async fn register(&self, payload: &RegisterPayload) -> ClientResult<User> {
        let response: AuthResponse = self.api.post("auth/register", payload).await?;
        self.accept(response).await
    }

    /// Sign out
    ///
    /// The server-side logout is best effort; the local token is always
    /// cleared.
    pub async fn logout(&self) -> ClientResult<()> {
        if self.has_token() {
            if let Err(e) = self.api.post_empty("auth/logout").await {
                tracing::warn!("Server logout failed: {}", e);
            }
        }
        self.clear_token().await?;
        tracing::info!("Signed out");
        Ok(())
    }

    async fn accept(&self, response: AuthResponse) -> ClientResult<User> {
        self.store.set(AUTH_TOKEN_KEY, &response.token)?;
        self.api.set_token(Some(response.token));

        let user = match response.user {
            Some(user) => user,
            None => self
                .api
                .get::<MaybeWrapped<User>>("auth/me", &[])
                .await?
                .into_inner(),
        };

        tracing::info!(user = %user.email, "Signed in");
        *self.user.write().await = Some(user.clone());
        Ok(user)
    }

    async fn clear_token(&self) -> ClientResult<()> {
        self.api.set_token(None);
        *self.user.write().await = None;
        self.store.remove(AUTH_TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn session_with(store: Arc<MemoryStore>) -> Session {
        let api = ApiClient::with_base_url("http://127.0.0.1:9/api/").unwrap();
        Session::new(api, store)
    }

    #[test]
    fn test_new_loads_stored_token() {
        let store = Arc::new(MemoryStore::new());
        store.set(AUTH_TOKEN_KEY, "stored").unwrap();
        let session = session_with(store);
        assert!(session.has_token());
        assert_eq!(session.api().token().as_deref(), Some("stored"));
    }

    #[tokio::test]
    async fn test_restore_without_token_is_anonymous() {
        let session = session_with(Arc::new(MemoryStore::new()));
        assert_eq!(session.restore().await.unwrap(), None);
        assert_eq!(session.current_user().await, None);
    }

    #[test]
    fn test_remembered_email() {
        let store = Arc::new(MemoryStore::new());
        store.set(REMEMBERED_EMAIL_KEY, "user@test.com").unwrap();
        let session = session_with(store);
        assert_eq!(session.remembered_email().as_deref(), Some("user@test.com"));
    }
}
