use axum::extract::Query;

use super::utils::ConnectParams;
use crate::canvas::{missing::missing_assignments, CanvasClient, CanvasResponse};

/// GET /missing_assignments - missing assignments across all active courses
///
/// The only endpoint that fans out: one course-list call, then one
/// assignments call per course with bounded concurrency. See
/// canvas::missing for the failure policy.
pub async fn list(Query(query): Query<ConnectParams>) -> CanvasResponse {
    let concurrency = crate::config::config().upstream.concurrency;
    missing_assignments(CanvasClient::shared(), &query.upstream(), concurrency).await
}
