//! Request execution seam
//!
//! The custom hostname client only builds paths and bodies and decodes
//! envelopes. Everything that touches the network (base URL, authentication,
//! timeouts, retries, rate limiting) lives behind [`RequestExecutor`].

mod error;
mod http_client;

use std::sync::Arc;

use async_trait::async_trait;
pub use reqwest::Method;

pub use error::TransportError;
pub use http_client::ReqwestExecutor;

/// Executes one API request and returns the raw response body.
///
/// `path` is relative to the API root and may carry a query string
/// (`/zones/z1/custom_hostnames?per_page=50&page=1`). `body` is already
/// serialized JSON.
///
/// Implementations return `Err` for anything other than a successful
/// response; the caller only decodes bytes it gets back.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, TransportError>;
}

#[async_trait]
impl<E: RequestExecutor + ?Sized> RequestExecutor for Arc<E> {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).execute(method, path, body).await
    }
}

#[async_trait]
impl<E: RequestExecutor + ?Sized> RequestExecutor for Box<E> {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).execute(method, path, body).await
    }
}
