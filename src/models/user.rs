use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub passport_number: String,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of POST /users. A missing passport number is not rejected here;
/// the NOT NULL column refuses it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub passport_number: Option<String>,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub patronymic: String,
    #[serde(default)]
    pub address: String,
}

/// Body of PUT /users/{id}. Absent or null fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    pub passport_number: Option<String>,
    pub surname: Option<String>,
    pub name: Option<String>,
    pub patronymic: Option<String>,
    pub address: Option<String>,
}

/// Normalised filter for listing users: exact passport match, substring
/// matches on the rest, offset pagination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub passport_number: Option<String>,
    pub surname: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
