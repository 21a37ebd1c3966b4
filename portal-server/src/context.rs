//! Service global context

pub mod login;
pub mod registration;
pub mod sessions;

use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;

use crate::config::{self, LoginMode, SessionBackend};
use crate::model::Model;
use login::{AccountsAuthenticator, Authenticator, DemoAuthenticator};
use sessions::{DatabaseSessions, MemorySessions, SessionStore};

/// How the session cookie is issued
#[derive(Debug, Clone)]
pub struct SessionCookie {
    /// Cookie name
    pub name: String,
    /// Send only over HTTPS
    pub secure: bool,
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self {
            name: "user".to_owned(),
            secure: false,
        }
    }
}

struct ContextInner {
    /// Persistent state
    model: Model,
    /// Signed in sessions
    sessions: Arc<dyn SessionStore>,
    /// Login credentials verification
    authenticator: Arc<dyn Authenticator>,
    /// Session cookie settings
    cookie: SessionCookie,
}

/// Everything request handlers share
#[derive(Clone)]
pub struct Context(Arc<ContextInner>);

impl Context {
    pub fn new(
        model: Model,
        sessions: Arc<dyn SessionStore>,
        authenticator: Arc<dyn Authenticator>,
        cookie: SessionCookie,
    ) -> Self {
        Self(Arc::new(ContextInner {
            model,
            sessions,
            authenticator,
            cookie,
        }))
    }

    /// Context for testing purposes
    ///
    /// In-memory database and sessions, demo login without delay.
    pub async fn test() -> Result<Self> {
        let model = Model::test().await?;
        Ok(Self::new(
            model,
            Arc::new(MemorySessions::new(Duration::from_secs(60 * 60))),
            Arc::new(DemoAuthenticator::new(Duration::ZERO)),
            SessionCookie::default(),
        ))
    }

    /// Context from configuration
    pub fn with_config(
        model: Model,
        sessions: &config::Sessions,
        login: &config::Login,
    ) -> Self {
        let store: Arc<dyn SessionStore> = match sessions.store {
            SessionBackend::Database => {
                Arc::new(DatabaseSessions::new(model.clone(), sessions.ttl()))
            }
            SessionBackend::Memory => Arc::new(MemorySessions::new(sessions.ttl())),
        };

        let authenticator: Arc<dyn Authenticator> = match login.mode {
            LoginMode::Demo => Arc::new(DemoAuthenticator::new(login.delay())),
            LoginMode::Accounts => {
                Arc::new(AccountsAuthenticator::new(model.clone(), login.delay()))
            }
        };

        let cookie = SessionCookie {
            name: sessions.cookie.clone(),
            secure: sessions.secure,
        };

        Self::new(model, store, authenticator, cookie)
    }

    /// Access to persistent state
    pub fn model(&self) -> &Model {
        &self.0.model
    }

    /// Access to sessions
    pub fn sessions(&self) -> &dyn SessionStore {
        self.0.sessions.as_ref()
    }

    /// Access to credentials verification
    pub fn authenticator(&self) -> &dyn Authenticator {
        self.0.authenticator.as_ref()
    }

    /// Session cookie settings
    pub fn cookie(&self) -> &SessionCookie {
        &self.0.cookie
    }
}
