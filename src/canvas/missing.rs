use futures::stream::{self, StreamExt};
use serde_json::{json, Value};

use super::client::{ApiCall, CanvasApi, Upstream};
use super::envelope::CanvasResponse;
use super::models::{Assignment, Course, MissingAssignment};

/// Missing-work aggregation across all of the caller's active courses.
///
/// One call lists the courses, then one assignments call per course fans out
/// with bounded concurrency. A failed per-course call drops that course
/// silently; availability of the aggregate wins over per-course
/// completeness. Only a failure of the initial course list surfaces to the
/// caller, and it surfaces verbatim.
///
/// Records come back in course order, then assignment order within each
/// course, exactly as upstream returned them. `buffered` yields per-course
/// results in input order regardless of which call completes first, which is
/// what keeps the output stable under concurrency.
pub async fn missing_assignments(
    api: &dyn CanvasApi,
    upstream: &Upstream,
    concurrency: usize,
) -> CanvasResponse {
    let courses_response = api
        .request(upstream, ApiCall::get("courses").param("enrollment_state", "active"))
        .await;
    if !courses_response.success {
        return courses_response;
    }

    let courses = parse_items::<Course>(&courses_response.data, "course");

    let records: Vec<MissingAssignment> = stream::iter(courses)
        .map(|course| async move { course_missing(api, upstream, &course).await })
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .flatten()
        .collect();

    CanvasResponse::ok(json!(records))
}

/// Fetch one course's assignments and project the missing ones. Any failure
/// here contributes zero records instead of failing the aggregate.
async fn course_missing(
    api: &dyn CanvasApi,
    upstream: &Upstream,
    course: &Course,
) -> Vec<MissingAssignment> {
    let response = api
        .request(
            upstream,
            ApiCall::get(format!("courses/{}/assignments", course.id)).param("include", "submission"),
        )
        .await;
    if !response.success {
        tracing::warn!(
            course_id = course.id,
            error = response.error.as_deref().unwrap_or("unknown"),
            "assignments call failed, skipping course"
        );
        return Vec::new();
    }

    parse_items::<Assignment>(&response.data, "assignment")
        .into_iter()
        .filter(|a| a.submission.as_ref().map_or(false, |s| s.missing))
        .filter_map(|a| match a.points_possible {
            Some(points) => Some(MissingAssignment {
                course_name: course.name.clone(),
                course_id: course.id,
                assignment_name: a.name,
                assignment_id: a.id,
                due_date: a.due_at,
                points_possible: points,
            }),
            None => {
                tracing::warn!(
                    course_id = course.id,
                    assignment_id = a.id,
                    "missing assignment has no points_possible, skipping record"
                );
                None
            }
        })
        .collect()
}

/// Walk a list payload item by item. A malformed item is dropped with a
/// warning; the rest of the list survives. A non-list payload counts as
/// zero items.
fn parse_items<T: serde::de::DeserializeOwned>(data: &Value, kind: &'static str) -> Vec<T> {
    let Some(items) = data.as_array() else {
        tracing::warn!(kind, "expected a list payload from upstream, treating as empty");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(kind, error = %e, "malformed upstream item skipped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted upstream keyed by resource path, with a call log and
    /// optional per-path delays to exercise completion-order shuffling.
    struct StubApi {
        responses: HashMap<String, CanvasResponse>,
        delays_ms: HashMap<String, u64>,
        calls: Mutex<Vec<String>>,
    }

    impl StubApi {
        fn new(responses: Vec<(&str, CanvasResponse)>) -> Self {
            Self {
                responses: responses.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
                delays_ms: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn delay(mut self, path: &str, ms: u64) -> Self {
            self.delays_ms.insert(path.to_string(), ms);
            self
        }

        fn recorded_calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CanvasApi for StubApi {
        async fn request(&self, _upstream: &Upstream, call: ApiCall) -> CanvasResponse {
            self.calls.lock().unwrap().push(call.path.clone());
            if let Some(ms) = self.delays_ms.get(&call.path) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.responses
                .get(&call.path)
                .cloned()
                .unwrap_or_else(|| CanvasResponse::fail(format!("no stub for {}", call.path)))
        }
    }

    fn upstream() -> Upstream {
        Upstream::new("https://school.instructure.com", "token-123")
    }

    fn course(id: i64, name: &str) -> Value {
        json!({"id": id, "name": name, "enrollment_term_id": 7})
    }

    fn assignment(id: i64, name: &str, missing: Option<bool>, points: Option<f64>) -> Value {
        let mut a = json!({"id": id, "name": name, "due_at": "2024-01-01T05:59:59Z"});
        if let Some(m) = missing {
            a["submission"] = json!({"missing": m, "workflow_state": "unsubmitted"});
        }
        if let Some(p) = points {
            a["points_possible"] = json!(p);
        }
        a
    }

    fn record_ids(response: &CanvasResponse) -> Vec<i64> {
        response
            .data
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["assignment_id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn course_list_failure_returns_verbatim_and_stops() {
        let api = StubApi::new(vec![("courses", CanvasResponse::fail("502 Bad Gateway"))]);

        let result = missing_assignments(&api, &upstream(), 4).await;

        assert!(!result.success);
        assert!(result.data.is_null());
        assert_eq!(result.error.as_deref(), Some("502 Bad Gateway"));
        // Fail-fast: no per-course call may have been attempted.
        assert_eq!(api.recorded_calls(), vec!["courses"]);
    }

    #[tokio::test]
    async fn failed_course_is_skipped_silently() {
        let api = StubApi::new(vec![
            (
                "courses",
                CanvasResponse::ok(json!([course(1, "Math"), course(2, "History"), course(3, "Art")])),
            ),
            (
                "courses/1/assignments",
                CanvasResponse::ok(json!([assignment(11, "HW1", Some(true), Some(10.0))])),
            ),
            ("courses/2/assignments", CanvasResponse::fail("timeout")),
            (
                "courses/3/assignments",
                CanvasResponse::ok(json!([assignment(31, "Sketch", Some(true), Some(5.0))])),
            ),
        ]);

        let result = missing_assignments(&api, &upstream(), 4).await;

        assert!(result.success);
        assert_eq!(record_ids(&result), vec![11, 31]);
    }

    #[tokio::test]
    async fn only_submissions_flagged_missing_qualify() {
        let api = StubApi::new(vec![
            ("courses", CanvasResponse::ok(json!([course(1, "Math")]))),
            (
                "courses/1/assignments",
                CanvasResponse::ok(json!([
                    assignment(1, "late", Some(true), Some(10.0)),
                    assignment(2, "done", Some(false), Some(10.0)),
                    assignment(3, "ungraded", None, Some(10.0)),
                ])),
            ),
        ]);

        let result = missing_assignments(&api, &upstream(), 4).await;

        assert_eq!(record_ids(&result), vec![1]);
    }

    #[tokio::test]
    async fn order_is_course_order_not_completion_order() {
        let api = StubApi::new(vec![
            ("courses", CanvasResponse::ok(json!([course(1, "Slow"), course(2, "Fast")]))),
            (
                "courses/1/assignments",
                CanvasResponse::ok(json!([assignment(11, "A", Some(true), Some(1.0))])),
            ),
            (
                "courses/2/assignments",
                CanvasResponse::ok(json!([assignment(21, "B", Some(true), Some(1.0))])),
            ),
        ])
        .delay("courses/1/assignments", 100);

        let result = missing_assignments(&api, &upstream(), 4).await;

        // Course 2 finishes first but course 1 still emits first.
        assert_eq!(record_ids(&result), vec![11, 21]);
    }

    #[tokio::test]
    async fn qualifying_assignment_without_points_is_dropped() {
        let api = StubApi::new(vec![
            ("courses", CanvasResponse::ok(json!([course(1, "Math")]))),
            (
                "courses/1/assignments",
                CanvasResponse::ok(json!([
                    assignment(1, "no points", Some(true), None),
                    assignment(2, "with points", Some(true), Some(20.0)),
                ])),
            ),
        ]);

        let result = missing_assignments(&api, &upstream(), 4).await;

        assert_eq!(record_ids(&result), vec![2]);
    }

    #[tokio::test]
    async fn malformed_course_item_does_not_poison_the_list() {
        let api = StubApi::new(vec![
            (
                "courses",
                // Second item lacks a name (e.g. access restricted by date).
                CanvasResponse::ok(json!([course(1, "Math"), {"id": 2}, course(3, "Art")])),
            ),
            (
                "courses/1/assignments",
                CanvasResponse::ok(json!([assignment(11, "HW", Some(true), Some(10.0))])),
            ),
            (
                "courses/3/assignments",
                CanvasResponse::ok(json!([assignment(31, "HW", Some(true), Some(10.0))])),
            ),
        ]);

        let result = missing_assignments(&api, &upstream(), 4).await;

        assert_eq!(record_ids(&result), vec![11, 31]);
        let calls = api.recorded_calls();
        assert!(!calls.contains(&"courses/2/assignments".to_string()));
    }

    #[tokio::test]
    async fn single_course_scenario_produces_exact_record() {
        let api = StubApi::new(vec![
            ("courses", CanvasResponse::ok(json!([{"id": 10, "name": "Math"}]))),
            (
                "courses/10/assignments",
                CanvasResponse::ok(json!([{
                    "id": 100,
                    "name": "HW1",
                    "due_at": "2024-01-01",
                    "points_possible": 10.0,
                    "submission": {"missing": true}
                }])),
            ),
        ]);

        let result = missing_assignments(&api, &upstream(), 4).await;

        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(
            result.data,
            json!([{
                "course_name": "Math",
                "course_id": 10,
                "assignment_name": "HW1",
                "assignment_id": 100,
                "due_date": "2024-01-01",
                "points_possible": 10.0
            }])
        );
    }

    #[tokio::test]
    async fn empty_course_list_yields_empty_success() {
        let api = StubApi::new(vec![("courses", CanvasResponse::ok(json!([])))]);

        let result = missing_assignments(&api, &upstream(), 4).await;

        assert!(result.success);
        assert_eq!(result.data, json!([]));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn non_list_course_payload_counts_as_empty() {
        let api = StubApi::new(vec![(
            "courses",
            CanvasResponse::ok(json!({"unexpected": "object"})),
        )]);

        let result = missing_assignments(&api, &upstream(), 4).await;

        assert!(result.success);
        assert_eq!(result.data, json!([]));
    }

    #[tokio::test]
    async fn sequential_cap_still_preserves_order() {
        let api = StubApi::new(vec![
            ("courses", CanvasResponse::ok(json!([course(1, "A"), course(2, "B")]))),
            (
                "courses/1/assignments",
                CanvasResponse::ok(json!([assignment(11, "x", Some(true), Some(1.0))])),
            ),
            (
                "courses/2/assignments",
                CanvasResponse::ok(json!([assignment(21, "y", Some(true), Some(1.0))])),
            ),
        ]);

        let result = missing_assignments(&api, &upstream(), 1).await;

        assert_eq!(record_ids(&result), vec![11, 21]);
    }
}
