use std::sync::Arc;

use storefront::catalog::CatalogClient;
use storefront::error::AuthError;
use storefront::models::{Credentials, SignupForm};
use storefront::session::SessionStore;

use crate::common::*;

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_success_starts_session() {
    let catalog = spawn_catalog().await;
    let session = Arc::new(SessionStore::new());

    let account = catalog
        .client()
        .login(&credentials(USER_EMAIL, USER_PASSWORD))
        .await
        .unwrap();
    assert_eq!(account.id.as_deref(), Some("u1"));
    assert_eq!(account.name.as_deref(), Some("Asha"));
    assert_eq!(account.token.as_deref(), Some("token-u1"));

    session.begin(account);
    assert!(session.is_logged_in());

    session.end();
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_login_unknown_user() {
    let catalog = spawn_catalog().await;
    let err = catalog
        .client()
        .login(&credentials("who@example.com", "x"))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::UnknownUser);
    assert_eq!(err.to_string(), "No account found with this email");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let catalog = spawn_catalog().await;
    let err = catalog
        .client()
        .login(&credentials(USER_EMAIL, "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::WrongPassword);
}

#[tokio::test]
async fn test_login_server_unreachable() {
    let client = CatalogClient::new(unreachable_base_url().await);
    let err = client
        .login(&credentials(USER_EMAIL, USER_PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Network(_)));
}

#[tokio::test]
async fn test_signup_success() {
    let catalog = spawn_catalog().await;
    let account = catalog
        .client()
        .signup(&SignupForm {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();

    assert_eq!(account.id.as_deref(), Some("u2"));
    assert_eq!(account.name.as_deref(), Some("Ravi"));
    assert_eq!(account.email.as_deref(), Some("ravi@example.com"));
}

#[tokio::test]
async fn test_signup_rejected() {
    let catalog = spawn_catalog().await;
    let err = catalog
        .client()
        .signup(&SignupForm {
            name: "Dup".into(),
            email: TAKEN_EMAIL.into(),
            password: "pw".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::Rejected("Email already registered".into()));
}
