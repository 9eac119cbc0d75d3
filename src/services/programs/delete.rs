use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProgramService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

/// Programs still referenced by students or subjects are kept
pub async fn delete_program(
    service: &ProgramService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).delete_program(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Program deleted"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProgramNotFound,
            "Program not found",
        ))),
        Err(e) => Ok(storage_failure(e, ErrorCode::ProgramInUse, "Delete program")),
    }
}
