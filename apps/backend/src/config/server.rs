use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::store::WritePolicy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_LONG_POLL_SECS: u64 = 25;

/// Server settings read from `THEGAME_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub write_policy: WritePolicy,
    /// How long `GET /changes` waits before answering 204.
    pub long_poll: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            write_policy: WritePolicy::default(),
            long_poll: Duration::from_secs(DEFAULT_LONG_POLL_SECS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source; unset variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("THEGAME_HOST").unwrap_or(defaults.host);

        let port = match lookup("THEGAME_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("THEGAME_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => defaults.port,
        };

        let write_policy = match lookup("THEGAME_WRITE_POLICY") {
            Some(raw) => raw.parse::<WritePolicy>()?,
            None => defaults.write_policy,
        };

        let long_poll = match lookup("THEGAME_LONG_POLL_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    AppError::config(format!(
                        "THEGAME_LONG_POLL_SECS must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(AppError::config("THEGAME_LONG_POLL_SECS must be positive"));
                }
                Duration::from_secs(secs)
            }
            None => defaults.long_poll,
        };

        Ok(Self {
            host,
            port,
            write_policy,
            long_poll,
        })
    }
}
