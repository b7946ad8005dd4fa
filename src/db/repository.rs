use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppResult;
use crate::models::{
    task::{NewTask, Task, TaskQuery},
    user::{NewUser, User, UserChanges, UserQuery},
};

/// Data access for users and tasks.
///
/// Handlers only see this trait; the server runs on `PgRepository`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    async fn list_users(&self, query: UserQuery) -> AppResult<Vec<User>>;

    async fn find_user(&self, id: i32) -> AppResult<Option<User>>;

    async fn insert_user(&self, user: NewUser) -> AppResult<User>;

    /// `None` when no user has this id; nothing is written then.
    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<Option<User>>;

    /// Returns whether a row was deleted. Tasks of the user are kept.
    async fn delete_user(&self, id: i32) -> AppResult<bool>;

    /// Ended tasks longest first, then in-progress tasks most recently
    /// started first, ties by id.
    async fn list_user_tasks(&self, query: TaskQuery) -> AppResult<Vec<Task>>;

    async fn insert_task(&self, task: NewTask, started_at: DateTime<Utc>) -> AppResult<Task>;

    async fn end_task(&self, id: i32, ended_at: DateTime<Utc>) -> AppResult<Option<Task>>;
}
