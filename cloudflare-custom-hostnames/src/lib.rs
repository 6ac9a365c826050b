//! # cloudflare-custom-hostnames
//!
//! A client for the Cloudflare **custom hostnames** API (SSL for SaaS):
//! hostnames a tenant wants proxied and secured on Cloudflare's edge under a
//! zone, distinct from the zone's apex domain.
//!
//! ## Operations
//!
//! | Method | HTTP | Path |
//! |--------|------|------|
//! | [`create`](CustomHostnameClient::create) | `POST` | `/zones/{zone_id}/custom_hostnames` |
//! | [`get`](CustomHostnameClient::get) | `GET` | `/zones/{zone_id}/custom_hostnames/{id}` |
//! | [`list`](CustomHostnameClient::list) / [`filter`](CustomHostnameClient::filter) | `GET` | `/zones/{zone_id}/custom_hostnames?per_page=50&page=N[&hostname=H]` |
//! | [`delete`](CustomHostnameClient::delete) | `DELETE` | `/zones/{zone_id}/custom_hostnames/{id}` |
//! | [`find_id_by_hostname`](CustomHostnameClient::find_id_by_hostname) | `GET` | filter, page 1 |
//! | [`update_ssl`](CustomHostnameClient::update_ssl) | none | always [`Error::NotImplemented`] |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cloudflare_custom_hostnames::{ClientConfig, CustomHostname, CustomHostnameClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CustomHostnameClient::from_config(&ClientConfig::new("your-token"))?;
//!
//!     let created = client
//!         .create("zone-id", &CustomHostname::new("app.customer.com"))
//!         .await?;
//!     println!("{} -> {:?}", created.id, created.ssl.status);
//!
//!     let (page, info) = client.list("zone-id", 1).await?;
//!     println!("{} of {} hostnames", page.len(), info.total_count);
//!
//!     let id = client.find_id_by_hostname("zone-id", "app.customer.com").await?;
//!     client.delete("zone-id", &id).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Transport
//!
//! Requests go through the [`RequestExecutor`] trait. The default
//! [`ReqwestExecutor`] handles the base URL, bearer token, timeouts,
//! rate limiting and retries; any other implementation can be plugged in:
//!
//! ```rust,no_run
//! # use cloudflare_custom_hostnames::*;
//! struct Recorder;
//!
//! #[async_trait::async_trait]
//! impl RequestExecutor for Recorder {
//!     async fn execute(
//!         &self,
//!         method: Method,
//!         path: &str,
//!         _body: Option<Vec<u8>>,
//!     ) -> std::result::Result<Vec<u8>, TransportError> {
//!         println!("{method} {path}");
//!         Ok(br#"{"success":true,"result":null}"#.to_vec())
//!     }
//! }
//!
//! let client = CustomHostnameClient::new(Recorder);
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Error):
//!
//! - [`Error::Transport`] when the executor failed; see [`TransportError`]
//! - [`Error::Decode`] when the response was not the expected JSON envelope
//! - [`Error::Encode`] when the request body could not be serialized
//! - [`Error::NotImplemented`] from [`update_ssl`](CustomHostnameClient::update_ssl)
//! - [`Error::NotFound`] when [`find_id_by_hostname`](CustomHostnameClient::find_id_by_hostname)
//!   has no exact match
//! - [`Error::Config`] when the default client could not be configured
//!
//! ## Known Limitations
//!
//! [`find_id_by_hostname`](CustomHostnameClient::find_id_by_hostname) only
//! scans the first page (50 entries) of the hostname filter results.

mod client;
mod config;
mod error;
mod transport;
mod types;
mod utils;

pub use client::{CustomHostnameClient, PER_PAGE};
pub use config::{ClientConfig, DEFAULT_API_BASE, ENV_API_BASE, ENV_API_TOKEN, ENV_MAX_RETRIES};
pub use error::{Error, Result};
pub use transport::{Method, RequestExecutor, ReqwestExecutor, TransportError};
pub use types::{CustomHostname, CustomHostnameSsl, CustomMetadata, ResponseInfo, ResultInfo};
