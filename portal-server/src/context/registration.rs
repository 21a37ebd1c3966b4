//! New student registration

use derivative::Derivative;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::model::Model;
use crate::model::users::{self, Account, UserId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Required field is empty")]
    IncompleteSubmission,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Account already exists")]
    EmailTaken,
    #[error("Registration is unavailable: {0}")]
    Unavailable(String),
}

/// Registration form submission
#[derive(Derivative, Clone, Default, Serialize, Deserialize)]
#[derivative(Debug)]
pub struct Registration {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[derivative(Debug = "ignore")]
    pub password: String,
    #[serde(default)]
    #[derivative(Debug = "ignore")]
    pub confirm_password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.email.is_empty() || self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(RegistrationError::IncompleteSubmission);
        }

        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        Ok(())
    }

    /// Validates the submission and stores the account
    pub async fn register(&self, model: &Model) -> Result<UserId, RegistrationError> {
        self.validate()?;

        let email = self.email.as_str();
        match Account::register(model.db(), email, &self.password).await {
            Ok(user_id) => {
                info!(%user_id, email, "Account registered");
                Ok(user_id)
            }
            Err(err) => match err.downcast_ref::<users::Error>() {
                Some(users::Error::EmailTaken(_)) => Err(RegistrationError::EmailTaken),
                _ => {
                    error!(%err, "Cannot register account");
                    Err(RegistrationError::Unavailable(err.to_string()))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str, password: &str, confirm_password: &str) -> Registration {
        Registration {
            email: email.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm_password.to_owned(),
        }
    }

    #[test]
    fn validation() {
        assert_eq!(
            registration("", "x", "x").validate(),
            Err(RegistrationError::IncompleteSubmission)
        );
        assert_eq!(
            registration("a@b.com", "x", "").validate(),
            Err(RegistrationError::IncompleteSubmission)
        );
        assert_eq!(
            registration("a@b.com", "x", "y").validate(),
            Err(RegistrationError::PasswordMismatch)
        );
        registration("a@b.com", "x", "x").validate().unwrap();
        registration(" ", "x", "x").validate().unwrap();
    }

    #[tokio::test]
    async fn duplicate_email() {
        let model = Model::test().await.unwrap();

        registration("a@b.com", "x", "x")
            .register(&model)
            .await
            .unwrap();
        let err = registration("a@b.com", "y", "y")
            .register(&model)
            .await
            .unwrap_err();
        assert_eq!(err, RegistrationError::EmailTaken);
    }
}
