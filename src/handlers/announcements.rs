use axum::extract::{Path, Query};

use super::utils::ConnectParams;
use crate::canvas::{ApiCall, CanvasApi, CanvasClient, CanvasResponse};

/// GET /courses/:course_id/announcements - announcements for a course
pub async fn list(
    Path(course_id): Path<i64>,
    Query(query): Query<ConnectParams>,
) -> CanvasResponse {
    CanvasClient::shared()
        .request(
            &query.upstream(),
            ApiCall::get(format!("courses/{}/announcements", course_id)),
        )
        .await
}
