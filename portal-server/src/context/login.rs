//! Credentials verification

use std::time::Duration;

use async_trait::async_trait;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::model::Model;
use crate::model::auth::Identity;
use crate::model::users::Account;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Required field is empty")]
    IncompleteSubmission,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Sign-in service is unavailable: {0}")]
    Unavailable(String),
}

/// Login form submission
#[derive(Derivative, Clone, Default, Serialize, Deserialize)]
#[derivative(Debug)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[derivative(Debug = "ignore")]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks that both fields were filled in
    ///
    /// Nothing else is checked, whitespace counts as content.
    pub fn validate(&self) -> Result<(), LoginError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(LoginError::IncompleteSubmission);
        }
        Ok(())
    }

    /// Identity a successful login would be recorded for, as typed
    pub fn identity(&self) -> Identity {
        Identity::new(self.email.as_str())
    }
}

/// Boundary verifying login credentials
///
/// Implementations wait their artificial latency before resolving any outcome, including
/// [`LoginError::IncompleteSubmission`] for credentials missing a field.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError>;
}

/// Accepts any complete credentials, after a fixed artificial delay
#[derive(Debug, Clone)]
pub struct DemoAuthenticator {
    delay: Duration,
}

impl DemoAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Authenticator for DemoAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError> {
        tokio::time::sleep(self.delay).await;
        credentials.validate()?;
        Ok(credentials.identity())
    }
}

/// Verifies credentials against registered accounts, after the same fixed delay as the demo
#[derive(Debug, Clone)]
pub struct AccountsAuthenticator {
    model: Model,
    delay: Duration,
}

impl AccountsAuthenticator {
    pub fn new(model: Model, delay: Duration) -> Self {
        Self { model, delay }
    }
}

#[async_trait]
impl Authenticator for AccountsAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError> {
        tokio::time::sleep(self.delay).await;
        credentials.validate()?;

        let identity = credentials.identity();
        let account = Account::find(self.model.db(), identity.as_str())
            .await
            .map_err(|err| {
                error!(%err, "Cannot fetch account");
                LoginError::Unavailable(err.to_string())
            })?;

        let Some(account) = account else {
            debug!(%identity, "Login for unknown account");
            return Err(LoginError::InvalidCredentials);
        };

        // Argon2 verification blocks the thread for a while
        let password = credentials.password.clone();
        let verified = tokio::task::spawn_blocking(move || account.verify_password(&password))
            .await
            .map_err(|err| LoginError::Unavailable(err.to_string()))?;

        if !verified {
            debug!(%identity, "Login with invalid password");
            return Err(LoginError::InvalidCredentials);
        }

        Ok(identity)
    }
}
