use axum::extract::{Path, Query};

use super::utils::ConnectParams;
use crate::canvas::{ApiCall, CanvasApi, CanvasClient, CanvasResponse};

/// GET /courses/:course_id/modules - all modules for a course
pub async fn list(
    Path(course_id): Path<i64>,
    Query(query): Query<ConnectParams>,
) -> CanvasResponse {
    CanvasClient::shared()
        .request(&query.upstream(), ApiCall::get(format!("courses/{}/modules", course_id)))
        .await
}

/// GET /courses/:course_id/modules/:module_id/items - items in a module
pub async fn items(
    Path((course_id, module_id)): Path<(i64, i64)>,
    Query(query): Query<ConnectParams>,
) -> CanvasResponse {
    CanvasClient::shared()
        .request(
            &query.upstream(),
            ApiCall::get(format!("courses/{}/modules/{}/items", course_id, module_id)),
        )
        .await
}
