use log::info;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

pub mod postgres;
pub mod repository;

pub use postgres::PgRepository;
pub use repository::Repository;

// Create-if-missing only: existing tables are never altered.
const SCHEMA: [&str; 3] = [
    "
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        passport_number TEXT NOT NULL UNIQUE,
        surname TEXT NOT NULL DEFAULT '',
        name TEXT NOT NULL DEFAULT '',
        patronymic TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS tasks (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL,
        task_name TEXT NOT NULL DEFAULT '',
        start_time TIMESTAMPTZ NOT NULL,
        end_time TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    ",
    "CREATE INDEX IF NOT EXISTS tasks_user_id_idx ON tasks (user_id)",
];

pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
}

pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        "Connecting to database {} at {}:{}",
        config.name, config.host, config.port
    );
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options(config))
        .await
}

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema is up to date");
    Ok(())
}
