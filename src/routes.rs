pub mod routes;
pub mod tasks;
pub mod users;
