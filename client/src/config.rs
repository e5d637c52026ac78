//! Client configuration
//!
//! Defaults match the public NHL endpoints. Every field can be overridden
//! with a builder-style setter or from the environment.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_CORE_URL, DEFAULT_API_STATS_URL, DEFAULT_API_WEB_URL, DEFAULT_EDGE_WS_URL,
    DEFAULT_HEARTBEAT_SECS, DEFAULT_RECEIVE_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, ENV_API_CORE_URL,
    ENV_API_STATS_URL, ENV_API_WEB_URL, ENV_DEBUG, ENV_EDGE_WS_URL, ENV_FOLLOW_REDIRECTS,
    ENV_SSL_VERIFY, ENV_TIMEOUT_SECS,
};
use crate::error::{NhlApiError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Log each request and response status at debug level
    pub debug: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub ssl_verify: bool,
    pub follow_redirects: bool,
    pub api_web_url: String,
    pub api_core_url: String,
    pub api_stats_url: String,
    pub edge_ws_url: String,
    /// Cookies sent on the EDGE WebSocket upgrade
    pub edge_cookies: BTreeMap<String, String>,
    pub edge_heartbeat_secs: u64,
    pub edge_receive_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debug: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ssl_verify: true,
            follow_redirects: true,
            api_web_url: DEFAULT_API_WEB_URL.to_string(),
            api_core_url: DEFAULT_API_CORE_URL.to_string(),
            api_stats_url: DEFAULT_API_STATS_URL.to_string(),
            edge_ws_url: DEFAULT_EDGE_WS_URL.to_string(),
            edge_cookies: BTreeMap::new(),
            edge_heartbeat_secs: DEFAULT_HEARTBEAT_SECS,
            edge_receive_timeout_secs: DEFAULT_RECEIVE_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `NHL_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`, keyed by environment
    /// variable name
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = value.trim().parse().map_err(|_| {
                NhlApiError::invalid_argument(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, value
                ))
            })?;
        }
        if let Some(value) = lookup(ENV_SSL_VERIFY) {
            config.ssl_verify = parse_bool(ENV_SSL_VERIFY, &value)?;
        }
        if let Some(value) = lookup(ENV_FOLLOW_REDIRECTS) {
            config.follow_redirects = parse_bool(ENV_FOLLOW_REDIRECTS, &value)?;
        }
        if let Some(value) = lookup(ENV_DEBUG) {
            config.debug = parse_bool(ENV_DEBUG, &value)?;
        }
        if let Some(value) = lookup(ENV_API_WEB_URL) {
            config = config.with_api_web_url(value);
        }
        if let Some(value) = lookup(ENV_API_CORE_URL) {
            config = config.with_api_core_url(value);
        }
        if let Some(value) = lookup(ENV_API_STATS_URL) {
            config = config.with_api_stats_url(value);
        }
        if let Some(value) = lookup(ENV_EDGE_WS_URL) {
            config = config.with_edge_ws_url(value);
        }

        Ok(config)
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_ssl_verify(mut self, verify: bool) -> Self {
        self.ssl_verify = verify;
        self
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn with_api_web_url(mut self, url: impl Into<String>) -> Self {
        self.api_web_url = with_trailing_slash(url.into());
        self
    }

    pub fn with_api_core_url(mut self, url: impl Into<String>) -> Self {
        self.api_core_url = with_trailing_slash(url.into());
        self
    }

    pub fn with_api_stats_url(mut self, url: impl Into<String>) -> Self {
        self.api_stats_url = with_trailing_slash(url.into());
        self
    }

    pub fn with_edge_ws_url(mut self, url: impl Into<String>) -> Self {
        self.edge_ws_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_edge_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.edge_cookies.insert(name.into(), value.into());
        self
    }

    pub fn with_edge_heartbeat_secs(mut self, secs: u64) -> Self {
        self.edge_heartbeat_secs = secs;
        self
    }

    pub fn with_edge_receive_timeout_secs(mut self, secs: u64) -> Self {
        self.edge_receive_timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn edge_heartbeat(&self) -> Duration {
        Duration::from_secs(self.edge_heartbeat_secs)
    }

    pub fn edge_receive_timeout(&self) -> Duration {
        Duration::from_secs(self.edge_receive_timeout_secs)
    }

    /// `name=value; name=value` form of the EDGE cookies
    pub fn edge_cookie_header(&self) -> Option<String> {
        if self.edge_cookies.is_empty() {
            return None;
        }
        Some(
            self.edge_cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(NhlApiError::invalid_argument(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}
