pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod results_service;
pub mod section_service;

pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_service::QuizService;
pub use results_service::ResultsService;
pub use section_service::SectionService;
