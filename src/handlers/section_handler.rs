use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState, auth::AdminPrincipal, errors::AppError,
    models::dto::response::SectionListResponse,
};

#[get("/sections")]
pub async fn list_sections(
    state: web::Data<AppState>,
    _admin: AdminPrincipal,
) -> Result<HttpResponse, AppError> {
    let sections = state.section_service.list_sections().await?;
    Ok(HttpResponse::Ok().json(SectionListResponse { sections }))
}
