use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AdminPrincipal,
    errors::AppError,
    models::dto::{
        request::CreateQuizRequest,
        response::{QuizListResponse, QuizResultsResponse, SuccessResponse},
    },
};

#[post("/quiz/create")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    admin: AdminPrincipal,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_service
        .create_quiz(request.into_inner(), &admin.admin_id)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/quiz/list")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    _admin: AdminPrincipal,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_quizzes().await?;
    Ok(HttpResponse::Ok().json(QuizListResponse { quizzes }))
}

#[get("/quiz/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _admin: AdminPrincipal,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/quiz/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _admin: AdminPrincipal,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::with_message("Quiz deleted successfully")))
}

#[get("/quiz/{id}/results")]
pub async fn quiz_results(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _admin: AdminPrincipal,
) -> Result<HttpResponse, AppError> {
    let results = state.results_service.quiz_results(&id).await?;
    Ok(HttpResponse::Ok().json(QuizResultsResponse { results }))
}
