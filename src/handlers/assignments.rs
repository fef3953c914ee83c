use axum::extract::{Path, Query};
use serde::Deserialize;

use super::utils::{split_includes, ConnectParams};
use crate::canvas::{ApiCall, CanvasApi, CanvasClient, CanvasResponse};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(flatten)]
    connect: ConnectParams,
    /// Comma-separated extra fields to include, e.g. `include=submission`.
    include: Option<String>,
}

/// GET /courses/:course_id/assignments - all assignments for a course
pub async fn list(Path(course_id): Path<i64>, Query(query): Query<ListQuery>) -> CanvasResponse {
    let mut call = ApiCall::get(format!("courses/{}/assignments", course_id));
    for include in split_includes(query.include.as_deref()) {
        call = call.param("include", include);
    }

    CanvasClient::shared().request(&query.connect.upstream(), call).await
}

/// GET /courses/:course_id/assignments/:assignment_id - one assignment
pub async fn show(
    Path((course_id, assignment_id)): Path<(i64, i64)>,
    Query(query): Query<ConnectParams>,
) -> CanvasResponse {
    CanvasClient::shared()
        .request(
            &query.upstream(),
            ApiCall::get(format!("courses/{}/assignments/{}", course_id, assignment_id)),
        )
        .await
}
