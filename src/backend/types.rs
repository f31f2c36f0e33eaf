//! Typed mirrors of the Task API's JSON resources.
//!
//! The bridge does not own these entities; it deserializes what the backend
//! returns and serializes creation payloads. Status fields and `user_type`
//! are closed enumerations: a string outside the set fails to parse, it is
//! never passed through as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type of user in the system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserType {
    Client,
    Prospect,
    Partner,
}

/// Status of a scheduled call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CallStatus {
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

/// Status of a task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Cancelled,
}

/// A registered user. `id` is backend-generated and immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for `POST /users`.
#[derive(Debug, Clone, Serialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub company: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A scheduled call. Only `status` is mutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledCall {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub scheduled_for: DateTime<Utc>,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: CallStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for `POST /calls`.
#[derive(Debug, Clone, Serialize)]
pub struct CallCreate {
    pub user_id: String,
    pub title: String,
    pub scheduled_for: String,
    pub duration_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A task, optionally associated with a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for `POST /tasks`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// `GET /health` response.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error envelope the backend returns for application failures:
/// `{ "success": false, "message": "..." }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    #[allow(dead_code)]
    pub success: bool,
    pub message: String,
}
