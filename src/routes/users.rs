pub mod users_handlers;
pub mod users_models;
