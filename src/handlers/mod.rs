pub mod attempt_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod section_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use attempt_handler::{attempt_quiz, my_results, start_attempt, student_quizzes, submit_quiz};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{create_quiz, delete_quiz, get_quiz, list_quizzes, quiz_results};
pub use section_handler::list_sections;

/// Malformed JSON bodies get the same error shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected request body: {}", err);
        AppError::ValidationError(format!("Invalid request body: {}", err)).into()
    })
}

/// Registers every route. Everything under `/api` requires a bearer token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .app_data(json_config())
                // Literal quiz routes must precede `/quiz/{id}`.
                .service(list_quizzes)
                .service(create_quiz)
                .service(get_quiz)
                .service(delete_quiz)
                .service(quiz_results)
                .service(start_attempt)
                .service(attempt_quiz)
                .service(submit_quiz)
                .service(my_results)
                .service(student_quizzes)
                .service(list_sections),
        );
}
