use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub section_id: String,
    pub duration: i32, // minutes, informational; the window below is what gates access
    #[serde(with = "crate::models::domain::timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "crate::models::domain::timestamp")]
    pub end_time: DateTime<Utc>,
    pub created_by: String,
    #[serde(with = "crate::models::domain::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn new(
        title: &str,
        section_id: &str,
        duration: i32,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        created_by: &str,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            section_id: section_id.to_string(),
            duration,
            start_time,
            end_time,
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        }
    }

    /// A quiz can be taken within `[start_time, end_time)`.
    pub fn ensure_open_at(&self, now: DateTime<Utc>) -> AppResult<()> {
        if now < self.start_time {
            return Err(AppError::Forbidden("Quiz not started".to_string()));
        }
        if now >= self.end_time {
            return Err(AppError::Forbidden("Quiz ended".to_string()));
        }
        Ok(())
    }

    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.end_time - now).num_seconds().max(0)
    }
}
