use std::env;

use dotenv::dotenv;
use thiserror::Error;

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server_address: String,
    pub database: DatabaseConfig,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig {
            host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
            port: parse_or(&lookup, "DB_PORT", DEFAULT_DB_PORT)?,
            user: lookup("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: lookup("DB_NAME")
                .filter(|name| !name.is_empty())
                .ok_or(ConfigError::Missing("DB_NAME"))?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        };

        if database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        Ok(Config {
            server_address: lookup("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            database,
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
