use thiserror::Error;

/// Failures a single upstream call can produce. These exist only inside the
/// gateway client; the boundary converts every variant into a failure
/// envelope, so callers never see this type.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid institution URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status} for {url}")]
    UpstreamStatus { status: reqwest::StatusCode, url: String },

    #[error("failed to decode upstream response body: {0}")]
    Decode(#[source] reqwest::Error),
}
