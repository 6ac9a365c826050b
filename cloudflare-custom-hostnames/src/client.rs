//! Custom hostname 接口
//!
//! API reference: <https://developers.cloudflare.com/api/resources/custom_hostnames/>

use std::fmt::Write;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::transport::{Method, RequestExecutor, ReqwestExecutor};
use crate::types::{CustomHostname, CustomHostnameSsl, Envelope, ResultInfo};
use crate::utils::log_sanitizer::truncate_for_log;

/// Custom hostnames API 单页记录数
pub const PER_PAGE: u32 = 50;

const ERR_REQUEST: &str = "custom hostname request failed";
const ERR_DECODE: &str = "failed to decode custom hostname response";
const ERR_ENCODE: &str = "failed to encode custom hostname";
const ERR_FIND: &str = "failed to look up custom hostname ID by name";

/// Client for `/zones/{zone_id}/custom_hostnames`.
///
/// Stateless: every call is one round trip through the executor and nothing
/// is cached. Shareable across tasks when the executor is.
#[derive(Debug, Clone)]
pub struct CustomHostnameClient<E = ReqwestExecutor> {
    executor: E,
}

impl CustomHostnameClient<ReqwestExecutor> {
    /// Builds a client backed by [`ReqwestExecutor`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(ReqwestExecutor::new(config)?))
    }

    /// Same as [`from_config`](Self::from_config) with
    /// [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env()?)
    }
}

impl<E: RequestExecutor> CustomHostnameClient<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Creates a custom hostname and requests that an SSL certificate be
    /// issued for it. Returns the created resource with its assigned `id`.
    pub async fn create(&self, zone_id: &str, hostname: &CustomHostname) -> Result<CustomHostname> {
        let path = collection_path(zone_id);
        let envelope: Envelope<CustomHostname> =
            self.send(Method::POST, &path, Some(hostname)).await?;
        Ok(envelope.result.unwrap_or_default())
    }

    /// Fetches one custom hostname by ID.
    pub async fn get(&self, zone_id: &str, custom_hostname_id: &str) -> Result<CustomHostname> {
        let path = item_path(zone_id, custom_hostname_id);
        let envelope: Envelope<CustomHostname> = self.send(Method::GET, &path, None::<&()>).await?;
        Ok(envelope.result.unwrap_or_default())
    }

    /// Lists custom hostnames page by page, [`PER_PAGE`] at a time.
    pub async fn list(
        &self,
        zone_id: &str,
        page: u32,
    ) -> Result<(Vec<CustomHostname>, ResultInfo)> {
        self.filter(zone_id, page, &CustomHostname::default()).await
    }

    /// Lists custom hostnames matching `filter`.
    ///
    /// Only non-empty filter fields become query parameters; currently that
    /// is `hostname`.
    pub async fn filter(
        &self,
        zone_id: &str,
        page: u32,
        filter: &CustomHostname,
    ) -> Result<(Vec<CustomHostname>, ResultInfo)> {
        let path = format!("{}?{}", collection_path(zone_id), filter_query(page, filter));
        let envelope: Envelope<Vec<CustomHostname>> =
            self.send(Method::GET, &path, None::<&()>).await?;

        Ok((
            envelope.result.unwrap_or_default(),
            envelope.result_info.unwrap_or_default(),
        ))
    }

    /// Modifying the SSL configuration of an existing hostname is not
    /// supported yet. Always returns [`Error::NotImplemented`] without
    /// sending anything.
    #[allow(clippy::unused_async)]
    pub async fn update_ssl(
        &self,
        zone_id: &str,
        custom_hostname_id: &str,
        ssl: &CustomHostnameSsl,
    ) -> Result<CustomHostname> {
        let _ = (zone_id, custom_hostname_id, ssl);
        Err(Error::NotImplemented {
            operation: "update_ssl",
        })
    }

    /// Deletes a custom hostname and any SSL certificates issued for it.
    ///
    /// The response is decoded so malformed bodies surface as
    /// [`Error::Decode`], but its content is otherwise ignored. A bare `null`
    /// body counts as an empty envelope.
    pub async fn delete(&self, zone_id: &str, custom_hostname_id: &str) -> Result<()> {
        let path = item_path(zone_id, custom_hostname_id);
        let _: Option<Envelope<serde_json::Value>> =
            self.send(Method::DELETE, &path, None::<&()>).await?;
        Ok(())
    }

    /// Resolves a hostname to its custom hostname ID.
    ///
    /// Only the first page of results (up to [`PER_PAGE`] entries) returned
    /// by the hostname filter is scanned for an exact, case-sensitive match.
    /// A hostname that the server ranks past the first page is reported as
    /// [`Error::NotFound`].
    pub async fn find_id_by_hostname(&self, zone_id: &str, hostname: &str) -> Result<String> {
        let filter = CustomHostname::new(hostname);
        let (candidates, _) = self
            .filter(zone_id, 1, &filter)
            .await
            .map_err(|e| e.recontext(ERR_FIND))?;

        candidates
            .into_iter()
            .find(|ch| ch.hostname == hostname)
            .map(|ch| ch.id)
            .ok_or_else(|| Error::NotFound {
                hostname: hostname.to_string(),
            })
    }

    /// Encodes `body`, runs the request and decodes the response.
    async fn send<R, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|source| Error::Encode {
                context: ERR_ENCODE,
                source,
            })?;

        let raw = self
            .executor
            .execute(method, path, body)
            .await
            .context(ERR_REQUEST)?;

        serde_json::from_slice(&raw).map_err(|source| {
            log::error!("JSON 解析失败: {source}");
            log::error!(
                "原始响应: {}",
                truncate_for_log(&String::from_utf8_lossy(&raw))
            );
            Error::Decode {
                context: ERR_DECODE,
                source,
            }
        })
    }
}

fn collection_path(zone_id: &str) -> String {
    format!("/zones/{}/custom_hostnames", urlencoding::encode(zone_id))
}

fn item_path(zone_id: &str, custom_hostname_id: &str) -> String {
    format!(
        "{}/{}",
        collection_path(zone_id),
        urlencoding::encode(custom_hostname_id)
    )
}

/// `per_page=50&page=N[&hostname=H]`
fn filter_query(page: u32, filter: &CustomHostname) -> String {
    let mut query = format!("per_page={PER_PAGE}&page={page}");
    if !filter.hostname.is_empty() {
        let _ = write!(query, "&hostname={}", urlencoding::encode(&filter.hostname));
    }
    query
}
