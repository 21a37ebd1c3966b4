//! Registered accounts

use color_eyre::eyre::{Result, bail};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use sqlx::prelude::Type;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Account for {0} already exists")]
    EmailTaken(String),
}

/// Newtype for user id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account able to sign in with a password
#[derive(Derivative, Clone, PartialEq)]
#[derivative(Debug)]
pub struct Account {
    pub id: UserId,
    /// Email used to sign in, compared case-insensitively
    pub email: String,
    /// Argon2 PHC string
    #[derivative(Debug = "ignore")]
    password_hash: String,
}

impl Account {
    /// Registers a new account returning its id
    ///
    /// Fails with [`Error::EmailTaken`] when the email is already registered.
    pub async fn register(
        db: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
        email: &str,
        password: &str,
    ) -> Result<UserId> {
        let id = UserId(Uuid::new_v4());
        let password_hash = password_auth::generate_hash(password);

        let insertion = sqlx::query(
            "insert into accounts (id, email, password_hash) values (?, ?, ?) on conflict(email) do nothing",
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .execute(db)
        .await?;

        if insertion.rows_affected() == 0 {
            bail!(Error::EmailTaken(email.to_owned()));
        }

        Ok(id)
    }

    /// Fetches account by its email
    pub async fn find(
        db: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
        email: &str,
    ) -> Result<Option<Self>> {
        let row: Option<(UserId, String, String)> =
            sqlx::query_as("select id, email, password_hash from accounts where email = ?")
                .bind(email)
                .fetch_optional(db)
                .await?;

        Ok(row.map(|(id, email, password_hash)| Self {
            id,
            email,
            password_hash,
        }))
    }

    /// Checks the password against the stored hash
    pub fn verify_password(&self, password: &str) -> bool {
        password_auth::verify_password(password, &self.password_hash).is_ok()
    }
}
