use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::repository::Repository;
use crate::error::AppResult;
use crate::models::{
    task::{NewTask, Task, TaskQuery},
    user::{NewUser, User, UserChanges, UserQuery},
};

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn list_users(&self, query: UserQuery) -> AppResult<Vec<User>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM users WHERE TRUE");

        if let Some(passport_number) = query.passport_number {
            builder.push(" AND passport_number = ").push_bind(passport_number);
        }
        // strpos keeps the match a plain case-sensitive substring, no LIKE wildcards
        for (column, needle) in [
            ("surname", query.surname),
            ("name", query.name),
            ("address", query.address),
        ] {
            if let Some(needle) = needle {
                builder
                    .push(format!(" AND strpos({}, ", column))
                    .push_bind(needle)
                    .push(") > 0");
            }
        }
        builder
            .push(" ORDER BY id LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let users = builder
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn find_user(&self, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            "
            INSERT INTO users (passport_number, surname, name, patronymic, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(user.passport_number)
        .bind(user.surname)
        .bind(user.name)
        .bind(user.patronymic)
        .bind(user.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "
            UPDATE users
            SET passport_number = COALESCE($2, passport_number),
                surname = COALESCE($3, surname),
                name = COALESCE($4, name),
                patronymic = COALESCE($5, patronymic),
                address = COALESCE($6, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(changes.passport_number)
        .bind(changes.surname)
        .bind(changes.name)
        .bind(changes.patronymic)
        .bind(changes.address)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_user_tasks(&self, query: TaskQuery) -> AppResult<Vec<Task>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM tasks WHERE user_id = ");
        builder.push_bind(query.user_id);

        if let Some(from) = query.created_from {
            builder.push(" AND created_at >= ").push_bind(from);
        }
        if let Some(before) = query.created_before {
            builder.push(" AND created_at < ").push_bind(before);
        }
        builder.push(
            "
            ORDER BY end_time IS NULL,
                end_time - start_time DESC,
                CASE WHEN end_time IS NULL THEN start_time END DESC,
                id
            ",
        );

        let tasks = builder
            .build_query_as::<Task>()
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn insert_task(&self, task: NewTask, started_at: DateTime<Utc>) -> AppResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            "
            INSERT INTO tasks (user_id, task_name, start_time)
            VALUES ($1, $2, $3)
            RETURNING *
            ",
        )
        .bind(task.user_id)
        .bind(task.task_name)
        .bind(started_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn end_task(&self, id: i32, ended_at: DateTime<Utc>) -> AppResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "
            UPDATE tasks
            SET end_time = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(ended_at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }
}
