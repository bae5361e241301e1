// src/api/student.rs

use std::sync::Arc;

use serde::Serialize;

use crate::api::Ack;
use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::assignment::{Assignment, RawAssignment};
use crate::models::stats::{PaymentDetails, StudentStats};
use crate::models::submission::{SubmitAssignmentRequest, SubmitResponse, Submission};
use crate::normalize::normalize_assignment;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitHistoryRequest<'a> {
    student_id: &'a str,
    assignment_id: &'a str,
}

/// Student-facing surface: assigned modules, submission, progress.
pub struct StudentApi {
    gateway: Arc<Gateway>,
}

impl StudentApi {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `GET /assignments/student/:userId`, normalized for rendering.
    pub async fn assignments(&self, user_id: &str) -> Result<Vec<Assignment>, ApiError> {
        let raw: Vec<RawAssignment> = self
            .gateway
            .get(&format!("/assignments/student/{}", user_id))
            .await?;
        Ok(raw.into_iter().map(normalize_assignment).collect())
    }

    /// `GET /assignments/:id/student/:userId`, normalized.
    pub async fn assignment(&self, id: &str, user_id: &str) -> Result<Assignment, ApiError> {
        let raw: RawAssignment = self
            .gateway
            .get(&format!("/assignments/{}/student/{}", id, user_id))
            .await?;
        Ok(normalize_assignment(raw))
    }

    /// `POST /student/submit-assignment`.
    pub async fn submit_assignment(
        &self,
        payload: &SubmitAssignmentRequest,
    ) -> Result<SubmitResponse, ApiError> {
        let response: SubmitResponse = self
            .gateway
            .post("/student/submit-assignment", payload)
            .await?;
        if !response.success {
            return Err(ApiError::Business(
                response
                    .message
                    .clone()
                    .unwrap_or_else(|| "Submission failed".to_string()),
            ));
        }
        Ok(response)
    }

    pub async fn stats(&self, course_name: &str, user_id: &str) -> Result<StudentStats, ApiError> {
        self.gateway
            .get(&format!("/stats/{}/{}", course_name, user_id))
            .await
    }

    pub async fn payment_details(&self) -> Result<PaymentDetails, ApiError> {
        self.gateway.get("/payment-details").await
    }

    pub async fn submitted_assignments(&self) -> Result<Vec<Submission>, ApiError> {
        self.gateway.get("/submitted-assignments").await
    }

    /// `POST /student/submithistory`: records that the student opened a
    /// graded submission for review.
    pub async fn submit_history(
        &self,
        student_id: &str,
        assignment_id: &str,
    ) -> Result<(), ApiError> {
        let ack: Ack = self
            .gateway
            .post(
                "/student/submithistory",
                &SubmitHistoryRequest {
                    student_id,
                    assignment_id,
                },
            )
            .await?;
        ack.into_result()
    }
}
