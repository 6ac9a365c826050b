//! Default reqwest-backed executor
//!
//! # design principles
//! - **One request, one round trip** - `send_once` sends, logs and classifies the response
//! - **Retries only for transient failures** - network errors, timeouts and HTTP 429
//! - **POST is retried only on 429** - a lost response may hide a created resource
//! - **Request rebuilt per attempt** - no reliance on `RequestBuilder::try_clone`

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Method, Response};

use super::{RequestExecutor, TransportError};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Longest wait honored from a `Retry-After` header.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Backoff ceiling in milliseconds.
const MAX_BACKOFF_MS: u64 = 10_000;

/// [`RequestExecutor`] talking to the Cloudflare API over HTTPS.
#[derive(Clone)]
pub struct ReqwestExecutor {
    client: Client,
    api_base: String,
    api_token: String,
    max_retries: u32,
}

impl ReqwestExecutor {
    /// Builds an HTTP client with the configured timeouts.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Config {
                detail: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self::with_client(client, config))
    }

    /// Uses a caller-supplied `reqwest::Client` (shared pool, proxy, custom TLS).
    /// Timeouts from `config` are ignored in favor of the client's own.
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            max_retries: config.max_retries,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Performs a single attempt and returns the response body.
    async fn send_once(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> std::result::Result<Vec<u8>, TransportError> {
        log::debug!("{method} {url}");

        let mut request = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_token));
        if let Some(body) = body {
            log::debug!(
                "Request Body: {}",
                truncate_for_log(&String::from_utf8_lossy(&body))
            );
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                TransportError::Network {
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("Response Status: {status}");

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status == 429 {
            let body = read_text(response).await;
            log::warn!("Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(TransportError::RateLimited {
                retry_after,
                raw_message: (!body.is_empty()).then_some(body),
            });
        }

        if matches!(status, 502..=504) {
            let body = read_text(response).await;
            log::warn!("Server error (HTTP {status})");
            return Err(TransportError::Network {
                detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network {
                detail: format!("Failed to read response body: {e}"),
            })?;
        let text = String::from_utf8_lossy(&bytes);
        log::debug!("Response Body: {}", truncate_for_log(&text));

        if !(200..300).contains(&status) {
            let err = TransportError::from_response(status, &text);
            if err.is_expected() {
                log::warn!("API request rejected: {err}");
            } else {
                log::error!("API request failed: {err}");
            }
            return Err(err);
        }

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl RequestExecutor for ReqwestExecutor {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> std::result::Result<Vec<u8>, TransportError> {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            match self.send_once(method.clone(), &url, body.clone()).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if attempt < self.max_retries && should_retry(&method, &e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        attempt + 1,
                        self.max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl fmt::Debug for ReqwestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestExecutor")
            .field("api_base", &self.api_base)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

/// Body of an error response; a failed read is logged and treated as empty.
async fn read_text(response: Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            log::debug!("Failed to read error response body: {e}");
            String::new()
        }
    }
}

/// `POST` is not idempotent: after a network error or timeout the server may
/// already have created the resource, so only an explicit 429 is retried.
fn should_retry(method: &Method, error: &TransportError) -> bool {
    if *method == Method::POST {
        matches!(error, TransportError::RateLimited { .. })
    } else {
        error.is_retryable()
    }
}

/// Wait before the next attempt.
///
/// `Retry-After` wins when present (capped at 30s); otherwise exponential backoff.
fn retry_delay(error: &TransportError, attempt: u32) -> Duration {
    if let TransportError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10s
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}
