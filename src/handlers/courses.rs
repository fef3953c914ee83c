use axum::extract::{Path, Query};
use serde::Deserialize;

use super::utils::ConnectParams;
use crate::canvas::{ApiCall, CanvasApi, CanvasClient, CanvasResponse};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(flatten)]
    connect: ConnectParams,
    enrollment_state: Option<String>,
}

/// GET /courses - list the caller's courses, active enrollment by default
pub async fn list(Query(query): Query<ListQuery>) -> CanvasResponse {
    let state = query.enrollment_state.as_deref().unwrap_or("active");
    CanvasClient::shared()
        .request(
            &query.connect.upstream(),
            ApiCall::get("courses").param("enrollment_state", state),
        )
        .await
}

/// GET /courses/:course_id - details for one course
pub async fn show(
    Path(course_id): Path<i64>,
    Query(query): Query<ConnectParams>,
) -> CanvasResponse {
    CanvasClient::shared()
        .request(&query.upstream(), ApiCall::get(format!("courses/{}", course_id)))
        .await
}
