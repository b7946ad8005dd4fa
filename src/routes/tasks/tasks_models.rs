use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::task::TaskQuery;

// Query string of GET /users/{id}/tasks, dates as YYYY-MM-DD
#[derive(Debug, Default, Deserialize)]
pub struct TaskPeriodQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl TaskPeriodQuery {
    /// Both days are inclusive: `end` extends to the following midnight UTC.
    pub fn into_task_query(self, user_id: i32) -> AppResult<TaskQuery> {
        let start = parse_day(self.start, "start")?;
        let end = parse_day(self.end, "end")?;

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(AppError::Validation(format!(
                    "Invalid period: start date {} is after end date {}",
                    start, end
                )));
            }
        }

        Ok(TaskQuery {
            user_id,
            created_from: start.map(midnight_utc),
            created_before: end.and_then(|day| day.succ_opt()).map(midnight_utc),
        })
    }
}

fn parse_day(value: Option<String>, which: &str) -> AppResult<Option<NaiveDate>> {
    let value = match value.filter(|v| !v.is_empty()) {
        Some(value) => value,
        None => return Ok(None),
    };
    let well_formed = value.len() == 10
        && value
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });

    match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
        Ok(day) if well_formed => Ok(Some(day)),
        _ => Err(AppError::Validation(format!(
            "Invalid {} date '{}': expected YYYY-MM-DD",
            which, value
        ))),
    }
}

fn midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}
