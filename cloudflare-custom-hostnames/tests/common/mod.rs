//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cloudflare_custom_hostnames::{
    ClientConfig, CustomHostname, CustomHostnameClient, Method, RequestExecutor, ReqwestExecutor,
    TransportError,
};
use serde_json::{Value, json};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 生成唯一的测试主机名
pub fn generate_test_hostname(domain: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("test-{}.{domain}", &uuid.to_string()[..8])
}

// ============ In-memory Cloudflare ============

/// In-memory stand-in for the custom hostnames endpoints.
///
/// Mirrors the parts of Cloudflare's behavior the client relies on: IDs are
/// assigned on create, the `hostname` filter matches substrings, results
/// come back in creation order and are paginated by `per_page`/`page`.
#[derive(Default)]
pub struct FakeCloudflare {
    /// zone -> hostnames in creation order
    zones: Mutex<HashMap<String, Vec<CustomHostname>>>,
    log: Mutex<Vec<(Method, String)>>,
}

impl FakeCloudflare {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Requests seen so far as `(method, path)`.
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.log.lock().unwrap().clone()
    }

    fn handle(
        &self,
        method: &Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Value, TransportError> {
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        match (method.as_str(), segments.as_slice()) {
            ("POST", ["zones", zone, "custom_hostnames"]) => {
                let input: CustomHostname = serde_json::from_slice(body.unwrap_or_default())
                    .map_err(|e| api_error(400, 1400, &e.to_string()))?;
                self.create(zone, input)
            }
            ("GET", ["zones", zone, "custom_hostnames"]) => Ok(self.list(zone, query)),
            ("GET", ["zones", zone, "custom_hostnames", id]) => self.get(zone, id),
            ("DELETE", ["zones", zone, "custom_hostnames", id]) => self.delete(zone, id),
            _ => Err(api_error(404, 7003, "No route for that URI")),
        }
    }

    fn create(&self, zone: &str, mut input: CustomHostname) -> Result<Value, TransportError> {
        if input.hostname.is_empty() {
            return Err(api_error(400, 1400, "hostname is required"));
        }

        let mut zones = self.zones.lock().unwrap();
        let hostnames = zones.entry(zone.to_string()).or_default();
        if hostnames.iter().any(|ch| ch.hostname == input.hostname) {
            return Err(api_error(409, 1406, "Duplicate custom hostname found."));
        }

        input.id = uuid::Uuid::new_v4().simple().to_string();
        input.ssl.status = Some("pending_validation".to_string());
        input.ssl.method.get_or_insert_with(|| "http".to_string());
        input.ssl.ssl_type.get_or_insert_with(|| "dv".to_string());
        hostnames.push(input.clone());

        Ok(json!({ "success": true, "errors": [], "messages": [], "result": input }))
    }

    fn get(&self, zone: &str, id: &str) -> Result<Value, TransportError> {
        let zones = self.zones.lock().unwrap();
        zones
            .get(zone)
            .and_then(|hostnames| hostnames.iter().find(|ch| ch.id == id))
            .map(|ch| json!({ "success": true, "errors": [], "messages": [], "result": ch }))
            .ok_or_else(|| api_error(404, 1436, "The custom hostname was not found."))
    }

    fn list(&self, zone: &str, query: &str) -> Value {
        let params: HashMap<String, String> = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), urlencoding::decode(v).unwrap().into_owned()))
            .collect();
        let per_page: usize = params.get("per_page").map_or(20, |v| v.parse().unwrap());
        let page: usize = params.get("page").map_or(1, |v| v.parse().unwrap());

        let zones = self.zones.lock().unwrap();
        let matching: Vec<&CustomHostname> = zones
            .get(zone)
            .into_iter()
            .flatten()
            .filter(|ch| {
                params
                    .get("hostname")
                    .is_none_or(|needle| ch.hostname.contains(needle.as_str()))
            })
            .collect();

        let items: Vec<&CustomHostname> = matching
            .iter()
            .skip(per_page * page.saturating_sub(1))
            .take(per_page)
            .copied()
            .collect();

        json!({
            "success": true,
            "errors": [],
            "messages": [],
            "result": items,
            "result_info": {
                "page": page,
                "per_page": per_page,
                "count": items.len(),
                "total_count": matching.len(),
                "total_pages": matching.len().div_ceil(per_page),
            }
        })
    }

    fn delete(&self, zone: &str, id: &str) -> Result<Value, TransportError> {
        let mut zones = self.zones.lock().unwrap();
        let hostnames = zones.entry(zone.to_string()).or_default();
        let Some(pos) = hostnames.iter().position(|ch| ch.id == id) else {
            return Err(api_error(404, 1436, "The custom hostname was not found."));
        };
        hostnames.remove(pos);

        Ok(json!({ "success": true, "errors": [], "messages": [], "result": { "id": id } }))
    }
}

#[async_trait]
impl RequestExecutor for FakeCloudflare {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, TransportError> {
        self.log
            .lock()
            .unwrap()
            .push((method.clone(), path.to_string()));
        let value = self.handle(&method, path, body.as_deref())?;
        Ok(serde_json::to_vec(&value).unwrap())
    }
}

fn api_error(status: u16, code: i64, message: &str) -> TransportError {
    TransportError::Api {
        status,
        code: Some(code),
        message: message.to_string(),
    }
}

// ============ Live API ============

/// 测试上下文 - 封装真实 API 客户端和测试 zone
pub struct TestContext {
    pub client: CustomHostnameClient<ReqwestExecutor>,
    pub zone_id: String,
    pub domain: String,
}

impl TestContext {
    /// 创建 Cloudflare 测试上下文
    pub fn cloudflare() -> Option<Self> {
        let zone_id = env::var("TEST_ZONE_ID").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let config = ClientConfig::from_env().ok()?;
        let client = CustomHostnameClient::from_config(&config).ok()?;

        Some(Self {
            client,
            zone_id,
            domain,
        })
    }

    /// 清理测试主机名（以 test- 开头）
    pub async fn cleanup_test_hostnames(&self) {
        let filter = CustomHostname::new(format!(".{}", self.domain));
        if let Ok((hostnames, _)) = self.client.filter(&self.zone_id, 1, &filter).await {
            for ch in hostnames {
                if ch.hostname.starts_with("test-") {
                    let _ = self.client.delete(&self.zone_id, &ch.id).await;
                }
            }
        }
    }
}
