use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    InProgress,
    Completed,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::InProgress => "in_progress",
            AttemptStatus::Completed => "completed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    #[serde(with = "crate::models::domain::timestamp")]
    pub started_at: DateTime<Utc>,
    #[serde(default, with = "crate::models::domain::timestamp::option")]
    pub submitted_at: Option<DateTime<Utc>>,
    pub status: AttemptStatus,
}

impl QuizAttempt {
    pub fn start(quiz_id: &str, student_id: &str, now: DateTime<Utc>) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            student_id: student_id.to_string(),
            started_at: now,
            submitted_at: None,
            status: AttemptStatus::InProgress,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == AttemptStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_attempt_is_in_progress() {
        let attempt = QuizAttempt::start("quiz-1", "student-1", Utc::now());

        assert_eq!(attempt.status, AttemptStatus::InProgress);
        assert!(attempt.submitted_at.is_none());
        assert!(!attempt.is_completed());
    }

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&AttemptStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(AttemptStatus::Completed.as_str(), "completed");

        let parsed: AttemptStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, AttemptStatus::Completed);
    }

    #[test]
    fn timestamps_are_stored_in_sortable_form() {
        use chrono::TimeZone;

        let started = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let mut attempt = QuizAttempt::start("quiz-1", "student-1", started);
        let open = serde_json::to_value(&attempt).unwrap();
        attempt.submitted_at = Some(started + chrono::Duration::milliseconds(250));
        let done = serde_json::to_value(&attempt).unwrap();

        assert_eq!(open["started_at"], "2026-10-19T09:00:00.000000000Z");
        assert!(open["submitted_at"].is_null());
        assert_eq!(done["submitted_at"], "2026-10-19T09:00:00.250000000Z");
        assert_eq!(serde_json::from_value::<QuizAttempt>(done).unwrap(), attempt);
    }
}
