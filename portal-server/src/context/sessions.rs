//! Session store
//!
//! The browser keeps an opaque session token, the store resolves it back to the signed in
//! identity. Handlers only see the [`SessionStore`] trait, so the backend is picked by
//! configuration and tests may run without a database.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::*;
use chrono::Utc;
use color_eyre::Result;
use serde::Serialize;
use sha3::{Digest, Sha3_256};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::model::Model;
use crate::model::auth::{Identity, Session, SessionToken};

/// Storage of signed in sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a new session for the identity
    async fn save(&self, identity: Identity) -> Result<Session>;

    /// Resolves a token to its session
    ///
    /// Returns `None` if the token doesn't refer to a live session - it was never issued, was
    /// cleared, or expired. Errors are reserved for the store itself failing.
    async fn load(&self, token: &SessionToken) -> Result<Option<Session>>;

    /// Removes the session the token refers to. Clearing unknown token is a no-op.
    async fn clear(&self, token: &SessionToken) -> Result<()>;

    /// Drops expired sessions, returning how many were dropped
    async fn cleanup(&self) -> Result<u64>;
}

/// Session as reported to the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Is anyone signed in
    pub present: bool,
    /// Signed in identity, empty if nobody is
    pub identity: String,
}

impl From<Option<&Session>> for SessionState {
    fn from(session: Option<&Session>) -> Self {
        match session {
            Some(session) => Self {
                present: true,
                identity: session.identity.to_string(),
            },
            None => Self {
                present: false,
                identity: String::new(),
            },
        }
    }
}

/// Sessions backed by PASETO tokens with keys stored in the database
pub struct DatabaseSessions {
    model: Model,
    /// Lifetime of created sessions
    ttl: Duration,
}

impl DatabaseSessions {
    pub fn new(model: Model, ttl: Duration) -> Self {
        Self { model, ttl }
    }
}

#[async_trait]
impl SessionStore for DatabaseSessions {
    async fn save(&self, identity: Identity) -> Result<Session> {
        Session::create(self.model.db(), identity, self.ttl).await
    }

    async fn load(&self, token: &SessionToken) -> Result<Option<Session>> {
        match Session::authenticate(self.model.db(), token.clone()).await {
            Ok(session) => Ok(Some(session)),
            Err(err) if err.downcast_ref::<sqlx::Error>().is_some() => Err(err),
            Err(err) => {
                debug!(%err, "Session token rejected");
                Ok(None)
            }
        }
    }

    async fn clear(&self, token: &SessionToken) -> Result<()> {
        match Session::revoke(self.model.db(), token).await {
            Err(err) if err.downcast_ref::<sqlx::Error>().is_none() => {
                debug!(%err, "Clearing unreadable session token");
                Ok(())
            }
            result => result,
        }
    }

    async fn cleanup(&self) -> Result<u64> {
        self.model.cleanup().await
    }
}

/// Process local sessions
///
/// Tokens are random and never kept verbatim - the map is indexed by their SHA3 digests, so a
/// dump of the map is not enough to take over a session.
pub struct MemorySessions {
    sessions: RwLock<HashMap<[u8; 32], Session>>,
    /// Lifetime of created sessions
    ttl: Duration,
}

impl MemorySessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn digest(token: &SessionToken) -> [u8; 32] {
        let mut hasher = Sha3_256::new();
        hasher.update(token.as_str().as_bytes());
        hasher.finalize().into()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn save(&self, identity: Identity) -> Result<Session> {
        let mut secret = [0u8; 32];
        secret[..16].copy_from_slice(Uuid::new_v4().as_bytes());
        secret[16..].copy_from_slice(Uuid::new_v4().as_bytes());
        let token = SessionToken::new(BASE64_URL_SAFE_NO_PAD.encode(secret));

        let session = Session {
            identity,
            token,
            expires_at: Utc::now() + chrono::Duration::from_std(self.ttl)?,
        };

        self.sessions
            .write()
            .await
            .insert(Self::digest(&session.token), session.clone());

        Ok(session)
    }

    async fn load(&self, token: &SessionToken) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(&Self::digest(token))
            .filter(|session| session.expires_at > Utc::now())
            .cloned();
        Ok(session)
    }

    async fn clear(&self, token: &SessionToken) -> Result<()> {
        self.sessions.write().await.remove(&Self::digest(token));
        Ok(())
    }

    async fn cleanup(&self) -> Result<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}
