// src/api/admin.rs

use std::sync::Arc;

use reqwest::multipart;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use validator::Validate;

use crate::api::Ack;
use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::assignment::{
    AnswerKey, Assignment, DynamicQuestion, RawAssignment, TimeWindow,
};
use crate::models::stats::{DashboardStats, RecentAssignment};
use crate::models::student::{
    CreateStudentRequest, Student, Subadmin, SubadminRequest, UpdateStudentRequest,
    validate_category,
};
use crate::normalize::normalize_assignment;

/// DTO for one authored sub-assignment inside a new module. Exactly one of
/// `dynamic_questions` / `answer_key` is expected to carry data; `pdf_index`
/// points into the upload's file list.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubAssignment {
    pub sub_module_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dynamic_questions: Vec<DynamicQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_key: Option<AnswerKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_index: Option<usize>,
}

/// DTO for authoring a module. Validated client-side; an empty or unknown
/// category never reaches the backend.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleRequest {
    #[validate(length(min = 1, max = 200, message = "Module name is required."))]
    pub module_name: String,
    #[validate(custom(function = validate_category))]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_date: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
    pub assigned_students: Vec<String>,
    pub sub_assignments: Vec<NewSubAssignment>,
    /// Parent-level questions, for modules without sub-assignments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dynamic_questions: Vec<DynamicQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_key: Option<AnswerKey>,
}

/// DTO for editing a module. All fields optional.
#[derive(Debug, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModuleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = validate_category))]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_students: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
}

/// DTO for editing one sub-assignment in place.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubAssignmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_module_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_questions: Option<Vec<DynamicQuestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_key: Option<AnswerKey>,
}

/// A PDF attached to a module upload.
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveModuleResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    assignment: Option<RawAssignment>,
}

/// Handle to an in-flight module-creation upload. Dropping the handle
/// aborts the upload; this is the client's one cancellation path.
pub struct ModuleUpload {
    handle: Option<JoinHandle<Result<Assignment, ApiError>>>,
}

impl ModuleUpload {
    pub async fn join(mut self) -> Result<Assignment, ApiError> {
        let Some(handle) = self.handle.take() else {
            return Err(ApiError::Transport("upload already joined".to_string()));
        };
        match handle.await {
            Ok(result) => result,
            Err(e) => Err(ApiError::Transport(format!("upload task failed: {}", e))),
        }
    }

    pub fn abort(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

impl Drop for ModuleUpload {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

/// Admin/subadmin surface: dashboard, roster, assignment authoring,
/// subadmin management.
pub struct AdminApi {
    gateway: Arc<Gateway>,
}

impl AdminApi {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    // ---- Dashboard ----

    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        self.gateway.get("/admin/dashboard").await
    }

    pub async fn recent_assignments(&self) -> Result<Vec<RecentAssignment>, ApiError> {
        self.gateway.get("/admin/recentassignments").await
    }

    // ---- Student roster ----

    pub async fn students_list(&self) -> Result<Vec<Student>, ApiError> {
        self.gateway.get("/admin/studentslist").await
    }

    pub async fn get_student(&self, id: &str) -> Result<Student, ApiError> {
        self.gateway.get(&format!("/admin/student/{}", id)).await
    }

    pub async fn create_student(&self, payload: &CreateStudentRequest) -> Result<Student, ApiError> {
        payload.validate()?;
        self.gateway.post("/admin/students", payload).await
    }

    pub async fn update_student(
        &self,
        id: &str,
        payload: &UpdateStudentRequest,
    ) -> Result<Student, ApiError> {
        payload.validate()?;
        self.gateway
            .put(&format!("/admin/student/{}", id), payload)
            .await
    }

    pub async fn delete_student(&self, id: &str) -> Result<(), ApiError> {
        let ack: Ack = self.gateway.delete(&format!("/admin/student/{}", id)).await?;
        ack.into_result()
    }

    // ---- Assignments ----

    pub async fn assignments(&self) -> Result<Vec<Assignment>, ApiError> {
        let raw: Vec<RawAssignment> = self.gateway.get("/admin/assignments").await?;
        Ok(raw.into_iter().map(normalize_assignment).collect())
    }

    pub async fn assignment_for_edit(&self, id: &str) -> Result<Assignment, ApiError> {
        let raw: RawAssignment = self
            .gateway
            .get(&format!("/admin/assignments/{}/edit", id))
            .await?;
        Ok(normalize_assignment(raw))
    }

    pub async fn update_assignment(
        &self,
        id: &str,
        payload: &UpdateModuleRequest,
    ) -> Result<Assignment, ApiError> {
        payload.validate()?;
        let raw: RawAssignment = self
            .gateway
            .put(&format!("/admin/assignments/{}", id), payload)
            .await?;
        Ok(normalize_assignment(raw))
    }

    pub async fn delete_assignment(&self, id: &str) -> Result<(), ApiError> {
        let ack: Ack = self
            .gateway
            .delete(&format!("/admin/assignments/{}", id))
            .await?;
        ack.into_result()
    }

    pub async fn update_sub_assignment(
        &self,
        id: &str,
        sub_id: &str,
        payload: &UpdateSubAssignmentRequest,
    ) -> Result<(), ApiError> {
        let ack: Ack = self
            .gateway
            .put(&format!("/admin/assignments/{}/sub/{}", id, sub_id), payload)
            .await?;
        ack.into_result()
    }

    pub async fn delete_sub_assignment(&self, id: &str, sub_id: &str) -> Result<(), ApiError> {
        let ack: Ack = self
            .gateway
            .delete(&format!("/admin/assignments/{}/sub/{}", id, sub_id))
            .await?;
        ack.into_result()
    }

    /// `POST /admin/add-assignment` as a spawned multipart upload: text
    /// fields plus the JSON-encoded sub-assignment array plus PDF files.
    /// The returned handle aborts the request when dropped, covering the
    /// owning view unmounting mid-upload.
    pub fn create_module(
        &self,
        payload: CreateModuleRequest,
        files: Vec<PdfUpload>,
    ) -> Result<ModuleUpload, ApiError> {
        payload.validate()?;

        let gateway = Arc::clone(&self.gateway);
        let handle = tokio::spawn(async move {
            let mut form = multipart::Form::new()
                .text("moduleName", payload.module_name.clone())
                .text("category", payload.category.clone())
                .text(
                    "assignedStudents",
                    serde_json::to_string(&payload.assigned_students)?,
                )
                .text(
                    "subAssignments",
                    serde_json::to_string(&payload.sub_assignments)?,
                );

            if let Some(date) = payload.assigned_date {
                form = form.text("assignedDate", date.to_string());
            }
            if let Some(window) = &payload.window {
                form = form.text("window", serde_json::to_string(window)?);
            }
            if !payload.dynamic_questions.is_empty() {
                form = form.text(
                    "dynamicQuestions",
                    serde_json::to_string(&payload.dynamic_questions)?,
                );
            }
            if let Some(key) = &payload.answer_key {
                form = form.text("answerKey", serde_json::to_string(key)?);
            }

            for file in files {
                let part = multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str("application/pdf")?;
                form = form.part("assignmentPdfs", part);
            }

            let response: SaveModuleResponse =
                gateway.post_multipart("/admin/add-assignment", form).await?;

            if !response.success {
                return Err(ApiError::Business(
                    response
                        .message
                        .unwrap_or_else(|| "Failed to create module".to_string()),
                ));
            }

            let raw = response.assignment.ok_or_else(|| {
                ApiError::Decode("save response missing assignment".to_string())
            })?;
            Ok(normalize_assignment(raw))
        });

        Ok(ModuleUpload {
            handle: Some(handle),
        })
    }

    // ---- Subadmins ----

    pub async fn subadmins(&self) -> Result<Vec<Subadmin>, ApiError> {
        self.gateway.get("/admin/subadmins").await
    }

    pub async fn create_subadmin(&self, payload: &SubadminRequest) -> Result<Subadmin, ApiError> {
        payload.validate()?;
        self.gateway.post("/admin/subadmins", payload).await
    }

    pub async fn update_subadmin(
        &self,
        id: &str,
        payload: &SubadminRequest,
    ) -> Result<Subadmin, ApiError> {
        payload.validate()?;
        self.gateway
            .put(&format!("/admin/subadmins/{}", id), payload)
            .await
    }

    pub async fn delete_subadmin(&self, id: &str) -> Result<(), ApiError> {
        let ack: Ack = self
            .gateway
            .delete(&format!("/admin/subadmins/{}", id))
            .await?;
        ack.into_result()
    }
}
