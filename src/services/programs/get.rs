use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProgramService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn get_program(
    service: &ProgramService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).get_program_by_id(id).await {
        Ok(Some(program)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(program, "Program retrieved")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProgramNotFound,
            "Program not found",
        ))),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Load program")),
    }
}
