//! Client configuration

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Cloudflare API v4 base URL
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// 默认重试次数
const DEFAULT_MAX_RETRIES: u32 = 2;

pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
pub const ENV_API_BASE: &str = "CLOUDFLARE_API_BASE";
pub const ENV_MAX_RETRIES: &str = "CLOUDFLARE_MAX_RETRIES";

/// Settings for the default [`ReqwestExecutor`](crate::ReqwestExecutor).
#[derive(Clone)]
pub struct ClientConfig {
    /// Prefix for every request path, without a trailing slash.
    pub api_base: String,
    /// API token sent as `Authorization: Bearer ...`.
    pub api_token: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Retries for transient failures; 0 disables retrying. `POST` (create)
    /// is retried only on HTTP 429.
    pub max_retries: u32,
}

impl ClientConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_token: api_token.into(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// `CLOUDFLARE_API_TOKEN` is required. `CLOUDFLARE_API_BASE` and
    /// `CLOUDFLARE_MAX_RETRIES` override the defaults when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_token = lookup(ENV_API_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Config {
                detail: format!("{ENV_API_TOKEN} is not set"),
            })?;

        let mut config = Self::new(api_token);

        if let Some(base) = lookup(ENV_API_BASE)
            && !base.trim().is_empty()
        {
            config = config.with_api_base(base);
        }

        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            let retries = raw.trim().parse::<u32>().map_err(|e| Error::Config {
                detail: format!("{ENV_MAX_RETRIES}={raw:?} is not a valid retry count: {e}"),
            })?;
            config.max_retries = retries;
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base)
            .field("api_token", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
