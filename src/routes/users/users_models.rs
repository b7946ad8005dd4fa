use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::user::UserQuery;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

// Query string of GET /users
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUsersQuery {
    pub passport_number: Option<String>,
    pub surname: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl GetUsersQuery {
    /// Drops empty filters and turns page/limit into a non-negative offset.
    pub fn into_user_query(self) -> AppResult<UserQuery> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if page == 0 {
            return Err(AppError::Validation("page must be at least 1".to_string()));
        }
        if limit == 0 {
            return Err(AppError::Validation("limit must be at least 1".to_string()));
        }
        let limit = i64::from(limit.min(MAX_LIMIT));

        Ok(UserQuery {
            passport_number: non_empty(self.passport_number),
            surname: non_empty(self.surname),
            name: non_empty(self.name),
            address: non_empty(self.address),
            limit,
            offset: (i64::from(page) - 1) * limit,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub message: String,
}
