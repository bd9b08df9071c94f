use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{LinearError, Result};

pub const API_KEY_ENV: &str = "LINEAR_API_KEY";
pub const DEFAULT_ENDPOINT: &str = "https://api.linear.app/graphql";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_REVALIDATE_SECS: u64 = 60;

#[derive(Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub bind: Option<String>,
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub fetch_timeout_secs: Option<u64>,
    pub revalidate_secs: Option<u64>,
}

/// A Linear personal API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| LinearError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| LinearError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "linear-tasks")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(LinearError::NoConfigDir)
    }

    /// Get API key with env var taking precedence over config file.
    /// An unset key is a valid configuration, not an error.
    pub fn api_key(&self) -> Option<ApiKey> {
        pick_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    pub fn endpoint(&self) -> Result<Url> {
        let raw = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        Url::parse(raw).map_err(|e| LinearError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Get bind address, preferring explicit argument over config file
    pub fn bind_addr(&self, explicit: Option<&str>) -> Result<SocketAddr> {
        let raw = explicit
            .or(self.bind.as_deref())
            .unwrap_or(DEFAULT_BIND);
        raw.parse()
            .map_err(|_| LinearError::InvalidBind(raw.to_string()))
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        nonzero_secs(
            "request_timeout_secs",
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn fetch_timeout(&self) -> Result<Duration> {
        nonzero_secs(
            "fetch_timeout_secs",
            self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
        )
    }

    /// Revalidation hint for the hosting layer (`Cache-Control: max-age`).
    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs.unwrap_or(DEFAULT_REVALIDATE_SECS))
    }
}

fn nonzero_secs(key: &'static str, secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(LinearError::ZeroTimeout(key));
    }
    Ok(Duration::from_secs(secs))
}

fn pick_api_key(env: Option<String>, file: Option<&str>) -> Option<ApiKey> {
    env.as_deref()
        .and_then(ApiKey::new)
        .or_else(|| file.and_then(ApiKey::new))
}
