use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::utils::ConnectParams;
use crate::canvas::CanvasResponse;

#[derive(Debug, Deserialize)]
pub struct StudyGuideRequest {
    pub course_id: i64,
    #[allow(dead_code)]
    pub module_ids: Option<Vec<i64>>,
    #[allow(dead_code)]
    pub topic: Option<String>,
}

/// POST /generate_study_guide - placeholder content
///
/// Returns fixed sections until a real generation backend exists. The
/// upstream parameters are accepted for surface consistency but unused.
pub async fn generate(
    Query(_query): Query<ConnectParams>,
    Json(request): Json<StudyGuideRequest>,
) -> CanvasResponse {
    CanvasResponse::ok(json!({
        "title": format!("Study Guide for Course {}", request.course_id),
        "sections": [
            {"title": "Key Concepts", "content": "This would contain key concepts from the course."},
            {"title": "Important Definitions", "content": "This would contain important definitions."},
            {"title": "Practice Questions", "content": "This would contain practice questions."}
        ]
    }))
}
