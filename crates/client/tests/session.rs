//! Session lifecycle against the fake API

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use sejour_client::{AUTH_TOKEN_KEY, MemoryStore, REMEMBERED_EMAIL_KEY, Session, TokenStore};
use sejour_core::UserType;
use sejour_model::Credentials;

use common::{PASSWORD, TOKEN, spawn_server};

#[tokio::test]
async fn test_login_stores_token_and_user() {
    let server = spawn_server().await;
    let store = Arc::new(MemoryStore::new());
    let session = Session::new(server.client(), store.clone());

    let mut credentials = Credentials::new("user@test.com", PASSWORD);
    credentials.remember = true;
    let user = session.login(&credentials).await.unwrap();

    assert_eq!(user.name, "Test User");
    assert_eq!(user.user_type, UserType::Owner);
    assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some(TOKEN));
    assert_eq!(session.api().token().as_deref(), Some(TOKEN));
    assert_eq!(session.remembered_email().as_deref(), Some("user@test.com"));
    assert_eq!(session.current_user().await, Some(user));
}

#[tokio::test]
async fn test_wrong_password_is_a_field_error() {
    let server = spawn_server().await;
    let store = Arc::new(MemoryStore::new());
    let session = Session::new(server.client(), store.clone());

    let err = session
        .login(&Credentials::new("user@test.com", "wrong-pass"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.envelope().unwrap().errors["password"], vec!["invalid"]);
    assert!(!session.has_token());
    assert!(store.get(AUTH_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn test_restore_with_valid_token() {
    let server = spawn_server().await;
    let store = Arc::new(MemoryStore::new());
    store.set(AUTH_TOKEN_KEY, TOKEN).unwrap();

    let session = Session::new(server.client(), store);
    let user = session.restore().await.unwrap().unwrap();
    assert_eq!(user.email, "user@test.com");
}

#[tokio::test]
async fn test_restore_with_rejected_token_clears_it() {
    let server = spawn_server().await;
    let store = Arc::new(MemoryStore::new());
    store.set(AUTH_TOKEN_KEY, "expired").unwrap();

    let session = Session::new(server.client(), store.clone());
    assert!(session.has_token());

    assert!(session.restore().await.unwrap().is_none());
    assert!(!session.has_token());
    assert!(store.get(AUTH_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn test_restore_without_token_skips_request() {
    let server = spawn_server().await;
    let session = Session::new(server.client(), Arc::new(MemoryStore::new()));
    assert!(session.restore().await.unwrap().is_none());
}

#[tokio::test]
async fn test_logout_keeps_remembered_email() {
    let server = spawn_server().await;
    let store = Arc::new(MemoryStore::new());
    let session = Session::new(server.client(), store.clone());

    let mut credentials = Credentials::new("user@test.com", PASSWORD);
    credentials.remember = true;
    session.login(&credentials).await.unwrap();

    session.logout().await.unwrap();

    assert_eq!(server.hits.logout(), 1);
    assert!(!session.has_token());
    assert!(session.current_user().await.is_none());
    assert!(store.get(AUTH_TOKEN_KEY).is_none());
    assert_eq!(
        store.get(REMEMBERED_EMAIL_KEY).as_deref(),
        Some("user@test.com")
    );
}

#[tokio::test]
async fn test_logout_without_token_is_local_only() {
    let server = spawn_server().await;
    let session = Session::new(server.client(), Arc::new(MemoryStore::new()));
    session.logout().await.unwrap();
    assert_eq!(server.hits.logout(), 0);
}
