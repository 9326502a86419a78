use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::domain::AnswerOption;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 100))]
    pub section_id: String,

    #[validate(range(min = 1, max = 1440))]
    pub duration: i32,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start_time: DateTime<Utc>,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end_time: DateTime<Utc>,

    #[validate(length(min = 1, message = "Add at least one question"), nested)]
    pub questions: Vec<CreateQuestionRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 2000))]
    pub question_text: String,

    #[validate(length(min = 1, max = 500))]
    pub option_a: String,

    #[validate(length(min = 1, max = 500))]
    pub option_b: String,

    #[validate(length(min = 1, max = 500))]
    pub option_c: String,

    #[validate(length(min = 1, max = 500))]
    pub option_d: String,

    pub correct_option: AnswerOption,
}

impl CreateQuestionRequest {
    pub fn options(&self) -> [&str; 4] {
        [&self.option_a, &self.option_b, &self.option_c, &self.option_d]
    }
}

/// Body of `POST /api/quiz/{id}/submit`. Keys of `answers` are question ids;
/// a `null` selection means the question was left unanswered.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswersRequest {
    pub attempt_id: Option<String>,

    #[serde(default)]
    pub answers: HashMap<String, Option<Selection>>,

    #[serde(default)]
    pub auto_submit: bool,
}

/// One submitted choice. A value that names no option (out of range, wrong
/// type) still parses, so a single bad entry cannot reject the whole
/// submission; it is graded as wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Chosen(AnswerOption),
    Unrecognised,
}

impl Selection {
    pub fn option(self) -> Option<AnswerOption> {
        match self {
            Selection::Chosen(option) => Some(option),
            Selection::Unrecognised => None,
        }
    }
}

impl From<AnswerOption> for Selection {
    fn from(option: AnswerOption) -> Self {
        Selection::Chosen(option)
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(serde_json::from_value::<AnswerOption>(value)
            .map(Selection::Chosen)
            .unwrap_or(Selection::Unrecognised))
    }
}

/// Accepts RFC 3339 timestamps as well as the offset-less
/// `YYYY-MM-DDTHH:MM[:SS]` form produced by `datetime-local` inputs, which is
/// taken to be UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}
