use serde::{Deserialize, Serialize};

/// Typed views of the upstream entities. Only the fields the aggregator
/// reads are declared; forwarding endpoints pass the raw JSON through
/// untouched. Unknown upstream fields are ignored on deserialize.
#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub name: String,
    pub due_at: Option<String>,
    pub points_possible: Option<f64>,
    pub submission: Option<Submission>,
}

/// Embedded in Assignment when the assignments call asks for
/// `include=submission`. An absent `missing` flag means not missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub missing: bool,
}

/// Derived record emitted per missing assignment. Never stored anywhere;
/// built and serialized within one aggregation request. `due_date` carries
/// the upstream `due_at` string verbatim, null included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingAssignment {
    pub course_name: String,
    pub course_id: i64,
    pub assignment_name: String,
    pub assignment_id: i64,
    pub due_date: Option<String>,
    pub points_possible: f64,
}
