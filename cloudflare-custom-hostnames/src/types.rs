//! Custom hostname 资源类型定义

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decodes an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Provider-defined metadata attached to a custom hostname.
///
/// Cloudflare acts on these keys with account-specific logic; this crate
/// passes them through untouched.
pub type CustomMetadata = HashMap<String, Value>;

/// SSL section of a custom hostname.
///
/// Mostly provider-computed state. `method` and `type` may be supplied when
/// creating a hostname to choose the validation method and certificate type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHostnameSsl {
    /// Validation status (`pending_validation`, `active`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Domain control validation method (`http`, `txt`, `email`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Certificate type (`dv`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ssl_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname_name: Option<String>,
}

impl CustomHostnameSsl {
    /// `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.method.is_none()
            && self.ssl_type.is_none()
            && self.cname_target.is_none()
            && self.cname_name.is_none()
    }
}

/// A custom hostname bound to a zone.
///
/// `hostname` is the natural key inside a zone; `id` is assigned by the
/// server on creation and stays empty until then.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomHostname {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub hostname: String,
    /// Per-hostname override of the origin server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_origin_server: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "CustomHostnameSsl::is_empty"
    )]
    pub ssl: CustomHostnameSsl,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub custom_metadata: CustomMetadata,
}

impl CustomHostname {
    /// Creates a hostname with only `hostname` set, the minimum the create
    /// endpoint accepts.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ssl(mut self, ssl: CustomHostnameSsl) -> Self {
        self.ssl = ssl;
        self
    }

    #[must_use]
    pub fn with_custom_origin_server(mut self, origin: impl Into<String>) -> Self {
        self.custom_origin_server = Some(origin.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom_metadata.insert(key.into(), value);
        self
    }
}

/// Pagination info returned alongside list results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub per_page: u32,
    /// Number of items on this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
}

/// Cloudflare `errors` / `messages` 条目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Cloudflare API 通用响应信封
///
/// Every field defaults, whether missing or `null`, so only a body that is
/// not a JSON object of this shape fails.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ResponseInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub messages: Vec<ResponseInfo>,
    pub result: Option<T>,
    pub result_info: Option<ResultInfo>,
}
