// src/models/student.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The fixed course-category list. Module categories and student course
/// names must come from this set.
pub const COURSE_CATEGORIES: &[&str] = &[
    "CPC",
    "CCS",
    "IPDRG",
    "ED",
    "EM",
    "SURGERY",
    "RADIOLOGY",
    "ANESTHESIA",
];

pub fn validate_category(category: &str) -> Result<(), validator::ValidationError> {
    if category.is_empty() {
        return Err(validator::ValidationError::new("category_cannot_be_empty"));
    }
    if !COURSE_CATEGORIES.contains(&category) {
        return Err(validator::ValidationError::new("unknown_category"));
    }
    Ok(())
}

/// A roster entry. The password is write-only: it exists on the create DTO
/// and is never redisplayed on edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub course_name: String,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    #[serde(default)]
    pub remaining_amount: Option<f64>,
    #[serde(default)]
    pub enrolled_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// DTO for enrolling a student.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required."))]
    pub name: String,
    #[validate(length(min = 4, max = 128, message = "Password must be at least 4 characters."))]
    pub password: String,
    #[validate(custom(function = validate_category))]
    pub course_name: String,
    pub paid_amount: Option<f64>,
    pub remaining_amount: Option<f64>,
    pub enrolled_date: Option<chrono::NaiveDate>,
    pub expiry_date: Option<chrono::NaiveDate>,
    pub profile_image: Option<String>,
}

/// DTO for editing a student. All fields optional; an absent password
/// leaves the stored one untouched.
#[derive(Debug, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = validate_category))]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// A subadmin account managed under `/admin/subadmins`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subadmin {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// DTO for creating/updating a subadmin.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubadminRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required."))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 4, max = 128))]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}
