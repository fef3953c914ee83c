use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Process-level configuration. Deliberately small: upstream coordinates
/// (institution URL, token) are per-call parameters, never config state, so
/// one process can serve differently-authenticated callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Cap on simultaneous per-course calls during aggregation.
    pub concurrency: usize,
    /// Per-call timeout so one hung upstream call cannot stall a whole
    /// aggregation.
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    fn defaults() -> Self {
        Self {
            server: ServerConfig { port: 8000 },
            upstream: UpstreamConfig { concurrency: 8, timeout_secs: 30 },
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("CANVAS_GATEWAY_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("CANVAS_UPSTREAM_CONCURRENCY") {
            self.upstream.concurrency = v.parse().unwrap_or(self.upstream.concurrency);
        }
        if let Ok(v) = env::var("CANVAS_UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = v.parse().unwrap_or(self.upstream.timeout_secs);
        }
        self
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
