//! Collection names in the backing store.

pub const QUIZZES: &str = "quizzes";
pub const QUIZ_QUESTIONS: &str = "quiz_questions";
pub const QUIZ_ATTEMPTS: &str = "quiz_attempts";
pub const QUIZ_ANSWERS: &str = "quiz_answers";
pub const SECTIONS: &str = "sections";
pub const STUDENTS: &str = "students";

/// Server error code MongoDB reports for unique index violations.
pub const DUPLICATE_KEY_CODE: i32 = 11000;
