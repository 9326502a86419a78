pub mod quiz;
pub mod quiz_answer;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod section;
pub mod student;
pub mod timestamp;
pub use quiz::Quiz;
pub use quiz_answer::QuizAnswer;
pub use quiz_attempt::{AttemptStatus, QuizAttempt};
pub use quiz_question::{AnswerOption, QuizQuestion, MARKS_PER_QUESTION};
pub use section::Section;
pub use student::Student;
