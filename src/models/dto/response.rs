use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{AttemptStatus, Quiz, QuizQuestion, Section};

pub const UNKNOWN_SECTION: &str = "Unknown";
pub const UNKNOWN_STUDENT: &str = "Unknown";

/// A quiz annotated with its section name and mark totals.
#[derive(Debug, Clone, Serialize)]
pub struct QuizOverview {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub section_name: String,
    pub question_count: i64,
    pub total_marks: i64,
}

impl QuizOverview {
    pub fn new(quiz: Quiz, section_name: Option<String>, question_count: i64) -> Self {
        QuizOverview {
            quiz,
            section_name: section_name.unwrap_or_else(|| UNKNOWN_SECTION.to_string()),
            question_count,
            total_marks: question_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizListResponse<T> {
    pub quizzes: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct QuizDetailResponse {
    pub quiz: QuizOverview,
    pub questions: Vec<QuizQuestion>,
}

/// A question as shown to a student taking the quiz: no `correct_option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicQuestion {
    pub id: String,
    pub quiz_id: String,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub marks: i32,
    pub position: i32,
}

impl From<QuizQuestion> for PublicQuestion {
    fn from(question: QuizQuestion) -> Self {
        PublicQuestion {
            id: question.id,
            quiz_id: question.quiz_id,
            question_text: question.question_text,
            option_a: question.option_a,
            option_b: question.option_b,
            option_c: question.option_c,
            option_d: question.option_d,
            marks: question.marks,
            position: question.position,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttemptQuizResponse {
    pub quiz: Quiz,
    pub questions: Vec<PublicQuestion>,
    pub remaining_seconds: i64,
}

/// Entry of a student's quiz listing.
#[derive(Debug, Clone, Serialize)]
pub struct StudentQuizEntry {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub question_count: i64,
    pub attempt_status: String,
}

impl StudentQuizEntry {
    pub fn new(quiz: Quiz, question_count: i64, attempt: Option<AttemptStatus>) -> Self {
        StudentQuizEntry {
            quiz,
            question_count,
            attempt_status: attempt
                .map(|status| status.as_str())
                .unwrap_or("not_started")
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultStatus {
    #[serde(rename = "Not Attempted")]
    NotAttempted,
    #[serde(rename = "Not Submitted")]
    NotSubmitted,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MyResultResponse {
    pub marks_obtained: i64,
    pub total_marks: i64,
    pub status: ResultStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentResult {
    pub student_id: String,
    pub student_name: String,
    pub marks_obtained: i64,
    pub total_marks: i64,
    pub status: ResultStatus,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct QuizResultsResponse {
    pub results: Vec<StudentResult>,
}

#[derive(Debug, Serialize)]
pub struct SectionListResponse {
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
pub struct QuizCreatedResponse {
    pub success: bool,
    pub quiz_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AttemptStartedResponse {
    pub success: bool,
    pub attempt_id: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        SuccessResponse {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: &str) -> Self {
        SuccessResponse {
            success: true,
            message: Some(message.to_string()),
        }
    }
}
