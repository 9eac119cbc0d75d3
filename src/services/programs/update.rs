use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProgramService;
use crate::models::programs::requests::UpdateProgramRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::utils::validate::normalize_program_code;

pub async fn update_program(
    service: &ProgramService,
    id: i64,
    mut update: UpdateProgramRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(code) = update.code.take() {
        match normalize_program_code(&code) {
            Ok(code) => update.code = Some(code),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
            }
        }
    }
    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Program name cannot be empty",
            )));
        }
    }

    match service.get_storage(request).update_program(id, update).await {
        Ok(Some(program)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(program, "Program updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProgramNotFound,
            "Program not found",
        ))),
        Err(e) => Ok(storage_failure(e, ErrorCode::ProgramAlreadyExists, "Update program")),
    }
}
