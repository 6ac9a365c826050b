//! Transport-level errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Envelope, ResponseInfo};

/// Failure of a single request/response round trip.
///
/// Produced by a [`RequestExecutor`](super::RequestExecutor); the custom
/// hostname client wraps it with the step that failed.
///
/// # Retryable Errors
///
/// [`Network`](Self::Network), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited) are transient. The default executor
/// retries them with exponential backoff.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TransportError {
    /// Connection refused, DNS failure, 5xx gateway errors, unreadable body.
    #[error("Network error: {detail}")]
    Network { detail: String },

    /// The request did not complete in time.
    #[error("Request timeout: {detail}")]
    Timeout { detail: String },

    /// HTTP 429.
    #[error("Rate limited{}", retry_suffix(*.retry_after))]
    RateLimited {
        /// Seconds from the `Retry-After` header, if any.
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// The API token was rejected.
    #[error("Invalid credentials (HTTP {status}){}", message_suffix(.raw_message.as_deref()))]
    InvalidCredentials {
        status: u16,
        raw_message: Option<String>,
    },

    /// Any other non-success response.
    #[error("API error (HTTP {status}{}): {message}", code_suffix(*.code))]
    Api {
        status: u16,
        /// First Cloudflare error code in the envelope, if one was present.
        code: Option<i64>,
        message: String,
    },
}

fn retry_suffix(retry_after: Option<u64>) -> String {
    retry_after.map_or_else(String::new, |s| format!(" (retry after {s}s)"))
}

fn message_suffix(message: Option<&str>) -> String {
    message.map_or_else(String::new, |m| format!(": {m}"))
}

fn code_suffix(code: Option<i64>) -> String {
    code.map_or_else(String::new, |c| format!(", code {c}"))
}

impl TransportError {
    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// 是否为预期行为（凭证错误、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidCredentials { .. } => true,
            Self::Api { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Maps a non-success HTTP response to a transport error.
    ///
    /// The body is read as a Cloudflare envelope when possible so the first
    /// entry of `errors` becomes the code and message. Bodies that are not
    /// envelopes are kept verbatim as the message.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let first_error = serde_json::from_str::<Envelope<serde_json::Value>>(body)
            .ok()
            .and_then(|env| env.errors.into_iter().next());

        let Some(ResponseInfo { code, message }) = first_error else {
            if matches!(status, 401 | 403) {
                return Self::InvalidCredentials {
                    status,
                    raw_message: (!body.is_empty()).then(|| body.to_string()),
                };
            }
            return Self::Api {
                status,
                code: None,
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.to_string()
                },
            };
        };

        // Cloudflare 认证错误码
        // 6003: Invalid request headers
        // 6103: Invalid format for X-Auth-Key header
        // 6111: Invalid format for Authorization header
        // 9109: Unauthorized to access requested resource
        // 10000: Authentication error
        if matches!(code, 6003 | 6103 | 6111 | 9109 | 10000) || matches!(status, 401 | 403) {
            return Self::InvalidCredentials {
                status,
                raw_message: Some(message),
            };
        }

        Self::Api {
            status,
            code: Some(code),
            message,
        }
    }
}
