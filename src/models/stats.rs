// src/models/stats.rs

use serde::{Deserialize, Serialize};

/// Aggregates behind `GET /admin/dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_assignments: u64,
    pub total_submissions: u64,
    pub active_students: u64,
}

/// A row of `GET /admin/recentassignments`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAssignment {
    #[serde(alias = "_id")]
    pub id: String,
    pub module_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub assigned_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub assigned_count: u64,
}

/// Per-student progress behind `GET /stats/:courseName/:userId`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentStats {
    pub completed_assignments: u64,
    pub pending_assignments: u64,
    pub average_progress_percent: f64,
}

/// Behind `GET /payment-details`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub paid_amount: f64,
    pub remaining_amount: f64,
    #[serde(default)]
    pub expiry_date: Option<chrono::NaiveDate>,
}
