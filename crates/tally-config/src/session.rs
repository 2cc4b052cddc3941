//! Session cookie and expiry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_cookie_name() -> String {
    "tally.session".to_string()
}

const fn default_idle_ttl_secs() -> u64 {
    24 * 60 * 60
}

const fn default_sweep_interval_secs() -> u64 {
    5 * 60
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Sessions untouched for longer than this are dropped.
    #[serde(default = "default_idle_ttl_secs")]
    pub idle_ttl_secs: u64,

    /// How often the server purges expired sessions.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            idle_ttl_secs: default_idle_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub const fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }

    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !is_cookie_token(&self.cookie_name) {
            return Err(ConfigError::invalid(
                "session.cookie_name",
                format!("'{}' is not a valid cookie name", self.cookie_name),
            ));
        }
        if self.idle_ttl_secs == 0 {
            return Err(ConfigError::invalid(
                "session.idle_ttl_secs",
                "must be non-zero",
            ));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::invalid(
                "session.sweep_interval_secs",
                "must be non-zero",
            ));
        }
        Ok(())
    }
}

/// RFC 6265 cookie-name: a non-empty token of visible ASCII minus separators.
fn is_cookie_token(name: &str) -> bool {
    const SEPARATORS: &str = "()<>@,;:\\\"/[]?={} \t";
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_graphic() && !SEPARATORS.contains(c))
}
