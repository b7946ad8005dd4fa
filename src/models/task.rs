use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A work interval. `end_time` stays `None` while the task is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub user_id: i32,
    pub task_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Body of POST /tasks. Timestamps are always set by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub user_id: i32,
    #[serde(default)]
    pub task_name: String,
}

/// Tasks of one user, optionally restricted to `created_at` in
/// `[created_from, created_before)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
    pub user_id: i32,
    pub created_from: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}
