// src/models/submission.rs

use serde::{Deserialize, Serialize};

use super::assignment::AnswerKey;

/// Answers a student entered for one level of an assignment, mirroring the
/// level's question shape: dynamic answers keyed by question position, or
/// one filled-in answer key for predefined mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnteredAnswers {
    pub dynamic_answers: Vec<String>,
    pub answer_key: Option<AnswerKey>,
}

/// DTO for `POST /student/submit-assignment`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssignmentRequest {
    pub student_id: String,
    pub assignment_id: String,
    /// None for parent-level modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_assignment_id: Option<String>,
    #[serde(flatten)]
    pub entered: EnteredAnswers,
}

/// A graded submission as the backend reports it. At most one
/// non-superseded submission exists per student per sub-assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub student_id: String,
    pub assignment_id: String,
    #[serde(default)]
    pub sub_assignment_id: Option<String>,
    #[serde(default)]
    pub entered: EnteredAnswers,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub progress_percent: f64,
}

/// Wire shape of the submit response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub correct_count: Option<u32>,
    #[serde(default)]
    pub wrong_count: Option<u32>,
    #[serde(default)]
    pub progress_percent: Option<f64>,
}
