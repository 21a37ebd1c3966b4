//! Session tokens
//!
//! A database session is represented by a PASETO v4 public token. The token carries the signed
//! in identity as its `sub` claim and the expiration time as `exp`. Every session is signed with
//! its own key pair. Only the public key is kept, in the `session_tokens` table, indexed by the
//! PASERK key id put in the token footer. Removing the row revokes the session: the token can no
//! longer be verified, even before it expires.

use std::time::Duration;

use chrono::{DateTime, Utc};
use color_eyre::Result;
use color_eyre::eyre::OptionExt;
use pasetors::claims::{Claims, ClaimsValidationRules};
use pasetors::footer::Footer;
use pasetors::keys::{AsymmetricKeyPair, AsymmetricPublicKey, Generate};
use pasetors::paserk::{self, FormatAsPaserk};
use pasetors::token::UntrustedToken;
use pasetors::version4::V4;
use pasetors::{Public, public};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Token doesn't exist")]
    NonExistingToken,
    #[error("Missing identity on a token")]
    MissingIdentity,
    #[error("Missing token id on a token")]
    MissingTokenId,
    #[error("Missing session data")]
    MissingClaims,
    #[error("Invalid session claim {0}")]
    InvalidSessionClaim(&'static str),
}

/// PASETO implicit assertion for session tokens
const SESSION_APP_SECRET: &[u8] = b"SvitPortalSessionTokenSecret";

/// Who a session is held for
///
/// This is whatever the user typed into the login form, it is never validated beyond being
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name used to greet the user - the part of an email before the `@`
    pub fn display_name(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for session token string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads the key id from the token footer, without verifying the token
    fn key_id(&self) -> Result<String> {
        let token = UntrustedToken::<Public, V4>::try_from(&self.0)?;
        let mut footer = Footer::new();
        footer.parse_bytes(token.untrusted_footer())?;

        let key_id = footer
            .get_claim("kid")
            .ok_or_eyre(Error::MissingTokenId)?
            .as_str()
            .ok_or_eyre(Error::MissingTokenId)?;

        Ok(key_id.to_owned())
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed in session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Identity this session was created for
    pub identity: Identity,
    /// Session token
    pub token: SessionToken,
    /// Session expiration time
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session for given identity storing its key in DB
    pub async fn create(
        db: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
        identity: Identity,
        valid_for: Duration,
    ) -> Result<Self> {
        let (session, kid, pk) = Self::new(identity, valid_for)?;

        sqlx::query("insert into session_tokens (id, public_key, expires_at) values (?, ?, ?)")
            .bind(kid)
            .bind(pk)
            .bind(session.expires_at)
            .execute(db)
            .await?;

        Ok(session)
    }

    /// Verifies a session token, returning the session on success
    ///
    /// Fails for malformed, forged, expired and revoked tokens.
    pub async fn authenticate(
        db: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
        session_token: SessionToken,
    ) -> Result<Self> {
        let key_id = session_token.key_id()?;
        let token = UntrustedToken::<Public, V4>::try_from(&session_token.0)?;

        let (key,): (String,) =
            sqlx::query_as("select public_key from session_tokens where id = ?")
                .bind(key_id)
                .fetch_optional(db)
                .await?
                .ok_or_eyre(Error::NonExistingToken)?;

        let key = AsymmetricPublicKey::<V4>::try_from(key.as_str())?;

        let rules = ClaimsValidationRules::new();
        let token = public::verify(&key, &token, &rules, None, Some(SESSION_APP_SECRET))?;

        let claims = token.payload_claims().ok_or_eyre(Error::MissingClaims)?;
        let identity = claims
            .get_claim("sub")
            .and_then(|sub| sub.as_str())
            .ok_or_eyre(Error::MissingIdentity)?;

        Ok(Self {
            identity: Identity::new(identity),
            token: session_token,
            expires_at: expires_at(claims)?,
        })
    }

    /// Revokes whatever session the token refers to
    ///
    /// Works for tokens that no longer verify (eg. expired ones), as long as the footer can be
    /// read. Revoking unknown token is a no-op.
    pub async fn revoke(
        db: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
        token: &SessionToken,
    ) -> Result<()> {
        let key_id = token.key_id()?;

        sqlx::query("delete from session_tokens where id = ?")
            .bind(key_id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Cleans expired sessions from database, returning how many were removed.
    pub async fn cleanup(db: impl sqlx::Executor<'_, Database = sqlx::Sqlite>) -> Result<u64> {
        let now = Utc::now();
        let result = sqlx::query("delete from session_tokens where expires_at < ?")
            .bind(now)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    /// Creates new session for an identity.
    ///
    /// The session data are not stored in the database. The `(session, key_id, public_key)` tuple
    /// is returned instead for the purpose of storing the session.
    fn new(identity: Identity, valid_for: Duration) -> Result<(Self, String, String)> {
        let key_pair = AsymmetricKeyPair::<V4>::generate()?;
        let key_id = paserk::Id::from(&key_pair.public);

        let mut claims = Claims::new_expires_in(&valid_for)?;
        claims.subject(identity.as_str())?;
        let expires_at = expires_at(&claims)?;

        // Key id collision fails on the primary key when stored
        let mut kid = String::new();
        key_id.fmt(&mut kid)?;

        let mut pk = String::new();
        key_pair.public.fmt(&mut pk)?;

        let mut footer = Footer::new();
        footer.key_id(&key_id);

        let token = public::sign(
            &key_pair.secret,
            &claims,
            Some(&footer),
            Some(SESSION_APP_SECRET),
        )?;

        let session = Self {
            identity,
            token: SessionToken(token),
            expires_at,
        };

        Ok((session, kid, pk))
    }
}

/// Retrieves `expires_at` from the session claims.
fn expires_at(claims: &Claims) -> Result<DateTime<Utc>> {
    let expires_at = claims
        .get_claim("exp")
        .and_then(|expires_at| expires_at.as_str())
        .ok_or(Error::InvalidSessionClaim("exp"))?;
    expires_at.parse().map_err(Into::into)
}
