use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::{error, info};

use super::tasks_models::TaskPeriodQuery;
use crate::db::Repository;
use crate::error::{AppError, AppResult};
use crate::models::task::NewTask;

// Tasks of a user, longest first, optionally limited to a creation period
pub async fn get_user_tasks(
    repo: web::Data<dyn Repository>,
    path: web::Path<i32>,
    period: web::Query<TaskPeriodQuery>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    info!("Received request to list tasks of user {}", user_id);

    let query = match period.into_inner().into_task_query(user_id) {
        Ok(query) => query,
        Err(e) => {
            info!("Rejected task period for user {}: {}", user_id, e);
            return Err(e);
        }
    };

    match repo.list_user_tasks(query).await {
        Ok(tasks) => {
            info!("Retrieved {} tasks for user {}", tasks.len(), user_id);
            Ok(HttpResponse::Ok().json(tasks))
        }
        Err(e) => {
            error!("Failed to list tasks of user {}: {}", user_id, e);
            Err(e)
        }
    }
}

// Start a task now for an existing user
pub async fn start_task(
    repo: web::Data<dyn Repository>,
    body: web::Json<NewTask>,
) -> AppResult<HttpResponse> {
    let new_task = body.into_inner();
    info!("Received request to start task '{}' for user {}", new_task.task_name, new_task.user_id);

    match repo.find_user(new_task.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            info!("User not found for id {}", new_task.user_id);
            return Err(AppError::NotFound("User"));
        }
        Err(e) => {
            error!("Failed to look up user {}: {}", new_task.user_id, e);
            return Err(e);
        }
    }

    match repo.insert_task(new_task, Utc::now()).await {
        Ok(task) => {
            info!("Task {} started successfully", task.id);
            Ok(HttpResponse::Ok().json(task))
        }
        Err(e) => {
            error!("Failed to create task: {}", e);
            Err(e)
        }
    }
}

// Stamp the end time; repeating the call moves it to the new "now"
pub async fn end_task(
    repo: web::Data<dyn Repository>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    info!("Received request to end task {}", id);

    match repo.end_task(id, Utc::now()).await {
        Ok(Some(task)) => {
            info!("Task {} ended successfully", id);
            Ok(HttpResponse::Ok().json(task))
        }
        Ok(None) => {
            info!("Task not found for id {}", id);
            Err(AppError::NotFound("Task"))
        }
        Err(e) => {
            error!("Failed to end task {}: {}", id, e);
            Err(e)
        }
    }
}
