use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use super::envelope::CanvasResponse;
use super::error::GatewayError;

/// Upstream coordinates for one call. Supplied by the caller on every
/// request; the gateway keeps no credential or session state of its own.
#[derive(Debug, Clone)]
pub struct Upstream {
    pub base_url: String,
    pub token: String,
}

impl Upstream {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), token: token.into() }
    }
}

/// One logical Canvas API call: resource path plus verb, query pairs, and
/// optional JSON body. Query keys may repeat (e.g. `include=submission`).
#[derive(Debug, Clone)]
pub struct ApiCall {
    pub path: String,
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiCall {
    pub fn get(path: impl Into<String>) -> Self {
        Self { path: path.into(), method: Method::GET, query: Vec::new(), body: None }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { path: path.into(), method: Method::POST, query: Vec::new(), body: Some(body) }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Single authenticated upstream call abstraction. The aggregator depends on
/// this trait rather than the concrete client so tests can script the
/// upstream.
#[async_trait]
pub trait CanvasApi: Send + Sync {
    /// Issue one call and normalize the outcome into an envelope. No
    /// transport error escapes past this boundary.
    async fn request(&self, upstream: &Upstream, call: ApiCall) -> CanvasResponse;
}

/// reqwest-backed gateway. One attempt per call, shared connection pool,
/// per-call timeout from config. No retries and no rate limiting; a failed
/// envelope is the caller's problem to interpret.
#[derive(Debug, Clone)]
pub struct CanvasClient {
    http: reqwest::Client,
}

static SHARED: Lazy<CanvasClient> = Lazy::new(CanvasClient::new);

impl CanvasClient {
    pub fn new() -> Self {
        let timeout = Duration::from_secs(crate::config::config().upstream.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("failed to build upstream client with timeout: {}", e);
                reqwest::Client::new()
            });
        Self { http }
    }

    /// Process-wide client, so every handler reuses one connection pool.
    pub fn shared() -> &'static CanvasClient {
        &SHARED
    }

    async fn execute(&self, upstream: &Upstream, call: &ApiCall) -> Result<Value, GatewayError> {
        let url = build_url(&upstream.base_url, &call.path)?;

        let mut request = self
            .http
            .request(call.method.clone(), url.clone())
            .bearer_auth(&upstream.token)
            .query(&call.query);
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UpstreamStatus { status, url: url.to_string() });
        }

        response.json::<Value>().await.map_err(GatewayError::Decode)
    }
}

impl Default for CanvasClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CanvasApi for CanvasClient {
    async fn request(&self, upstream: &Upstream, call: ApiCall) -> CanvasResponse {
        tracing::debug!(method = %call.method, path = %call.path, "canvas upstream call");
        match self.execute(upstream, &call).await {
            Ok(data) => CanvasResponse::ok(data),
            Err(e) => CanvasResponse::fail(e.to_string()),
        }
    }
}

/// Join `{base}/api/v1/{path}`, tolerating a trailing slash on the base.
fn build_url(base: &str, path: &str) -> Result<Url, GatewayError> {
    let parsed = Url::parse(base).map_err(|e| GatewayError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(GatewayError::InvalidBaseUrl {
            url: base.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    let full = format!("{}/api/v1/{}", base.trim_end_matches('/'), path);
    Url::parse(&full).map_err(|e| GatewayError::InvalidBaseUrl {
        url: full,
        reason: e.to_string(),
    })
}
