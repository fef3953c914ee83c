use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform result wrapper returned by every gateway operation.
///
/// Exactly one side is meaningful at a time: a success carries `data` and a
/// null `error`, a failure carries `error` and null `data`. Upstream
/// failures are reported through this envelope with HTTP 200, never through
/// the gateway's own status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasResponse {
    pub success: bool,
    pub data: Value,
    pub error: Option<String>,
}

impl CanvasResponse {
    pub fn ok(data: Value) -> Self {
        Self { success: true, data, error: None }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self { success: false, data: Value::Null, error: Some(error.into()) }
    }
}

impl IntoResponse for CanvasResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
