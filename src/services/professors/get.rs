use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfessorService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn get_professor(
    service: &ProfessorService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).get_professor_by_id(id).await {
        Ok(Some(professor)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(professor, "Professor retrieved")))
        }
        Ok(None) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Load professor")),
    }
}
