pub mod quiz_answer_repository;
pub mod quiz_attempt_repository;
pub mod quiz_question_repository;
pub mod quiz_repository;
pub mod section_repository;
pub mod student_repository;

pub use quiz_answer_repository::{MongoQuizAnswerRepository, QuizAnswerRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_question_repository::{MongoQuizQuestionRepository, QuizQuestionRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use section_repository::{MongoSectionRepository, SectionRepository};
pub use student_repository::{MongoStudentRepository, StudentRepository};
