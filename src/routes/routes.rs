use actix_web::{web, HttpResponse};
use log::info;

use super::tasks::tasks_handlers;
use super::users::users_handlers;
use crate::error::AppError;

// Every extractor failure answers with the same JSON error body as the handlers
pub fn extractors_configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| {
        info!("Rejected body for {}: {}", req.path(), err);
        AppError::Validation(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, req| {
        info!("Rejected query string for {}: {}", req.path(), err);
        AppError::Validation(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, req| {
        info!("Rejected path {}: {}", req.path(), err);
        AppError::NotFound("Resource").into()
    }));
}

pub fn users_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(users_handlers::get_users))
            .route("", web::post().to(users_handlers::add_user))
            .route("/{id}", web::put().to(users_handlers::update_user))
            .route("/{id}", web::delete().to(users_handlers::delete_user))
            .route("/{id}/tasks", web::get().to(tasks_handlers::get_user_tasks))
    );
}

pub fn tasks_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .route("", web::post().to(tasks_handlers::start_task))
            .route("/{task_id}/end", web::put().to(tasks_handlers::end_task))
    );
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async { HttpResponse::Ok().body("Hello, this is the time tracker API.") }))
        .configure(extractors_configure)
        .configure(users_configure)
        .configure(tasks_configure);
}
