//! Service configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use tracing_subscriber::filter::Directive;

/// Logging output format
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Logging {
    /// Additional filtering directives
    #[serde(default, deserialize_with = "Logging::deserialize_filters")]
    pub filters: Vec<Directive>,

    /// Logging format
    #[serde(default)]
    pub format: LogFormat,
}

impl Logging {
    fn deserialize_filters<'de, D>(deserializer: D) -> Result<Vec<Directive>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let dirs: Vec<String> = Deserialize::deserialize(deserializer)?;
        dirs.into_iter()
            .map(|dir| dir.parse().map_err(serde::de::Error::custom))
            .collect()
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Database {
    /// In-memory database, gone with the process
    Memory {
        #[serde(default = "Database::default_max_connections")]
        max_connections: u32,
    },
    /// File based SQLite database
    SqLite {
        path: PathBuf,
        #[serde(default = "Database::default_max_connections")]
        max_connections: u32,
        /// Run migrations on startup
        #[serde(default)]
        migrate: bool,
    },
}

impl Database {
    fn default_max_connections() -> u32 {
        1
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::Memory {
            max_connections: Self::default_max_connections(),
        }
    }
}

/// Where sessions are kept
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Signed tokens with revocation entries in the database
    #[default]
    Database,
    /// Process local map
    Memory,
}

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Sessions {
    /// Session store backend
    pub store: SessionBackend,

    /// Name of the cookie holding the session token
    pub cookie: String,

    /// Marks the session cookie as `Secure`
    pub secure: bool,

    /// Session lifetime in hours, at most [`Sessions::MAX_TTL_HOURS`]
    #[serde(deserialize_with = "Sessions::deserialize_ttl_hours")]
    pub ttl_hours: u64,

    /// How often expired sessions are swept, in seconds
    pub cleanup_interval_secs: u64,
}

impl Sessions {
    /// Longest accepted session lifetime, a year
    pub const MAX_TTL_HOURS: u64 = 365 * 24;

    fn deserialize_ttl_hours<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hours = u64::deserialize(deserializer)?;
        if hours > Self::MAX_TTL_HOURS {
            return Err(serde::de::Error::custom(format!(
                "ttl_hours {hours} exceeds the limit of {}",
                Self::MAX_TTL_HOURS
            )));
        }
        Ok(hours)
    }

    /// Session lifetime
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(60 * 60))
    }

    /// Expired sessions sweep period
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self {
            store: SessionBackend::default(),
            cookie: "user".to_owned(),
            secure: false,
            ttl_hours: 24,
            cleanup_interval_secs: 600,
        }
    }
}

/// How login credentials are verified
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoginMode {
    /// Any non-empty credentials are accepted after an artificial delay
    #[default]
    Demo,
    /// Credentials are checked against registered accounts
    Accounts,
}

/// Login configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Login {
    pub mode: LoginMode,

    /// Artificial latency of the demo authenticator, in milliseconds
    pub delay_ms: u64,
}

impl Login {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for Login {
    fn default() -> Self {
        Self {
            mode: LoginMode::default(),
            delay_ms: 1500,
        }
    }
}

/// Top level service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address where to host the service
    #[serde(default = "Config::default_host")]
    pub host: SocketAddr,

    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,

    /// Database configuration
    #[serde(default)]
    pub db: Database,

    /// Session configuration
    #[serde(default)]
    pub sessions: Sessions,

    /// Login configuration
    #[serde(default)]
    pub login: Login,
}

impl Config {
    fn default_host() -> SocketAddr {
        ([127, 0, 0, 1], 3030).into()
    }
}
