use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfessorService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn delete_professor(
    service: &ProfessorService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).delete_professor(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Professor deleted"))),
        Ok(false) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Delete professor")),
    }
}
