use crate::error::AuthError;
use crate::models::{Account, Credentials, SignupForm};

use super::CatalogClient;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl CatalogClient {
    /// Log in with email and password.
    ///
    /// Blank fields are rejected locally without contacting the backend.
    pub async fn login(&self, credentials: &Credentials) -> Result<Account, AuthError> {
        if is_blank(&credentials.email) || is_blank(&credentials.password) {
            return Err(AuthError::MissingFields);
        }

        let data: Option<serde_json::Value> = self
            .post_json("/auth/login", credentials)
            .await
            .map_err(|e| {
                tracing::info!(error = %e, "Login rejected");
                AuthError::from(e)
            })?;

        let account = account_from_data(data, &credentials.email);
        tracing::info!(user_id = account.id.as_deref().unwrap_or_default(), "Logged in");
        Ok(account)
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<Account, AuthError> {
        if is_blank(&form.name) || is_blank(&form.email) || is_blank(&form.password) {
            return Err(AuthError::MissingFields);
        }

        let data: Option<serde_json::Value> = self
            .post_json("/auth/signup", form)
            .await
            .map_err(|e| {
                tracing::info!(error = %e, "Signup rejected");
                AuthError::from(e)
            })?;

        let mut account = account_from_data(data, &form.email);
        if account.name.is_none() {
            account.name = Some(form.name.clone());
        }
        tracing::info!(user_id = account.id.as_deref().unwrap_or_default(), "Account created");
        Ok(account)
    }
}

/// The backend's `data` shape varies between a bare user, `{ user, token }`,
/// or nothing useful. Take what is there and fall back to the email used.
fn account_from_data(data: Option<serde_json::Value>, email: &str) -> Account {
    let data = data.unwrap_or(serde_json::Value::Null);
    let token = data
        .get("token")
        .and_then(|t| t.as_str())
        .map(String::from);

    let user = data.get("user").cloned().unwrap_or(data);
    let mut account: Account = serde_json::from_value(user).unwrap_or_default();

    if account.token.is_none() {
        account.token = token;
    }
    if account.email.is_none() {
        account.email = Some(email.to_string());
    }
    account
}
