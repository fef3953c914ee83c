use serde::Deserialize;

use crate::canvas::Upstream;

/// Upstream coordinates every endpoint requires. Missing parameters are
/// rejected by the `Query` extractor before any handler runs.
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Canvas institution URL, e.g. https://university.instructure.com
    pub institute_url: String,
    /// Pre-obtained Canvas API token; this service never issues or
    /// refreshes credentials.
    pub token: String,
}

impl ConnectParams {
    pub fn upstream(&self) -> Upstream {
        Upstream::new(&self.institute_url, &self.token)
    }
}

/// Split a comma-separated `include` value into the repeated `include=`
/// pairs the upstream API expects.
pub fn split_includes(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
