// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::guard::Route;

/// User role as issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Subadmin,
    /// Students carry the role 'user' on the wire.
    User,
}

impl Role {
    /// The dashboard a user of this role lands on. Role-mismatched route
    /// access redirects here rather than to an error page.
    pub fn home_route(self) -> Route {
        match self {
            Role::Admin => Route::AdminDashboard,
            Role::Subadmin => Route::SubadminDashboard,
            Role::User => Route::StudentDashboard,
        }
    }
}

/// The user object cached alongside the session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub enrolled_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// A login session: the opaque token plus the cached user.
/// Created at login, static until logout/invalidation, never refreshed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(alias = "sessionId")]
    pub token: String,
    pub user: User,
}

/// DTO for the login call.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Wire shape of `POST /login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Wire shape of `GET /validate-session`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
}
