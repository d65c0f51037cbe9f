use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

#[cfg(feature = "http")]
use crate::normalize::http::HttpResolverSettings;

/// Per-request timeout when resolving shortened links.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Redirect hop limit before a chain counts as a loop.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

pub const DEFAULT_USER_AGENT: &str = "cinder/0.1 (feature-extraction)";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Everything has a
/// default, so an empty environment is a valid configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Per-request timeout when resolving shortened links (CINDER_RESOLVE_TIMEOUT_SECS)
    pub resolve_timeout: Duration,
    /// Redirect hop limit (CINDER_MAX_REDIRECTS)
    pub max_redirects: usize,
    /// User-Agent header sent to shorteners (CINDER_USER_AGENT)
    pub user_agent: String,
    /// Skip the network entirely and keep shortened links as-is (CINDER_OFFLINE)
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            offline: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `load` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let resolve_timeout = match lookup("CINDER_RESOLVE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("CINDER_RESOLVE_TIMEOUT_SECS is not a number: {raw}"))?,
            ),
            None => defaults.resolve_timeout,
        };

        let max_redirects = match lookup("CINDER_MAX_REDIRECTS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("CINDER_MAX_REDIRECTS is not a number: {raw}"))?,
            None => defaults.max_redirects,
        };

        let config = Self {
            resolve_timeout,
            max_redirects,
            user_agent: lookup("CINDER_USER_AGENT").unwrap_or(defaults.user_agent),
            offline: lookup("CINDER_OFFLINE").is_some_and(|v| parse_flag(&v)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every resolution fail.
    pub fn validate(&self) -> Result<()> {
        if self.resolve_timeout.is_zero() {
            anyhow::bail!("CINDER_RESOLVE_TIMEOUT_SECS must be at least 1 second");
        }
        if self.max_redirects == 0 {
            anyhow::bail!("CINDER_MAX_REDIRECTS must be at least 1");
        }
        if self.user_agent.trim().is_empty() {
            anyhow::bail!("CINDER_USER_AGENT must not be empty");
        }
        Ok(())
    }

    #[cfg(feature = "http")]
    pub fn resolver_settings(&self) -> HttpResolverSettings {
        HttpResolverSettings {
            timeout: self.resolve_timeout,
            max_redirects: self.max_redirects,
            user_agent: self.user_agent.clone(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
