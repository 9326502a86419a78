use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;

use crate::{
    app_state::AppState,
    auth::StudentPrincipal,
    errors::AppError,
    models::dto::{
        request::SubmitAnswersRequest,
        response::{AttemptStartedResponse, QuizListResponse, SuccessResponse},
    },
};

#[get("/student/quizzes")]
pub async fn student_quizzes(
    state: web::Data<AppState>,
    student: StudentPrincipal,
) -> Result<HttpResponse, AppError> {
    let section_id = student.require_section()?;
    let quizzes = state
        .quiz_service
        .list_for_student(&student.student_id, section_id)
        .await?;
    Ok(HttpResponse::Ok().json(QuizListResponse { quizzes }))
}

#[post("/quiz/{id}/start-attempt")]
pub async fn start_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    student: StudentPrincipal,
) -> Result<HttpResponse, AppError> {
    let attempt = state
        .attempt_service
        .start_attempt(&id, &student.student_id, Utc::now())
        .await?;
    Ok(HttpResponse::Ok().json(AttemptStartedResponse {
        success: true,
        attempt_id: attempt.id,
    }))
}

#[get("/quiz/{id}/attempt")]
pub async fn attempt_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    student: StudentPrincipal,
) -> Result<HttpResponse, AppError> {
    let response = state
        .attempt_service
        .fetch_for_attempt(&id, &student.student_id, Utc::now())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/quiz/{id}/submit")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitAnswersRequest>,
    student: StudentPrincipal,
) -> Result<HttpResponse, AppError> {
    state
        .attempt_service
        .submit(&id, &student.student_id, request.into_inner(), Utc::now())
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

#[get("/quiz/{id}/my-results")]
pub async fn my_results(
    state: web::Data<AppState>,
    id: web::Path<String>,
    student: StudentPrincipal,
) -> Result<HttpResponse, AppError> {
    let result = state
        .results_service
        .my_result(&id, &student.student_id)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
