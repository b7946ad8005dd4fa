use actix_web::{web, HttpResponse};
use log::{error, info};

use super::users_models::{DeleteUserResponse, GetUsersQuery};
use crate::db::Repository;
use crate::error::{AppError, AppResult};
use crate::models::user::{NewUser, UserChanges};

// List users, filtered and paginated
pub async fn get_users(
    repo: web::Data<dyn Repository>,
    query: web::Query<GetUsersQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner().into_user_query()?;
    info!("Received request to list users: {:?}", query);

    match repo.list_users(query).await {
        Ok(users) => {
            info!("Retrieved {} users", users.len());
            Ok(HttpResponse::Ok().json(users))
        }
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(e)
        }
    }
}

// Create a user
pub async fn add_user(
    repo: web::Data<dyn Repository>,
    body: web::Json<NewUser>,
) -> AppResult<HttpResponse> {
    let new_user = body.into_inner();
    info!(
        "Received request to add user with passport number: {:?}",
        new_user.passport_number
    );

    match repo.insert_user(new_user).await {
        Ok(user) => {
            info!("User {} created successfully", user.id);
            Ok(HttpResponse::Ok().json(user))
        }
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(e)
        }
    }
}

// Update the fields present in the body, keep the rest.
// The body is parsed only once the user is known to exist.
pub async fn update_user(
    repo: web::Data<dyn Repository>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    info!("Received request to update user {}", id);

    match repo.find_user(id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            info!("User not found for id {}", id);
            return Err(AppError::NotFound("User"));
        }
        Err(e) => {
            error!("Failed to look up user {}: {}", id, e);
            return Err(e);
        }
    }

    let changes: UserChanges = match serde_json::from_slice(&body) {
        Ok(changes) => changes,
        Err(e) => {
            info!("Rejected body for user {}: {}", id, e);
            return Err(AppError::Validation(format!("Json deserialize error: {}", e)));
        }
    };

    match repo.update_user(id, changes).await {
        Ok(Some(user)) => {
            info!("User {} updated successfully", id);
            Ok(HttpResponse::Ok().json(user))
        }
        Ok(None) => {
            info!("User {} disappeared before the update", id);
            Err(AppError::NotFound("User"))
        }
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            Err(e)
        }
    }
}

// Delete a user; their tasks stay
pub async fn delete_user(
    repo: web::Data<dyn Repository>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    info!("Received request to delete user {}", id);

    match repo.delete_user(id).await {
        Ok(true) => {
            info!("User {} deleted successfully", id);
            Ok(HttpResponse::Ok().json(DeleteUserResponse {
                message: "User deleted".into(),
            }))
        }
        Ok(false) => {
            info!("User not found for id {}", id);
            Err(AppError::NotFound("User"))
        }
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            Err(e)
        }
    }
}
