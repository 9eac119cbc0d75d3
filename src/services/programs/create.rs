use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProgramService;
use crate::models::programs::requests::CreateProgramRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::utils::validate::{non_blank, normalize_program_code};

pub async fn create_program(
    service: &ProgramService,
    mut program: CreateProgramRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    program.code = match normalize_program_code(&program.code) {
        Ok(code) => code,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };
    program.name = program.name.trim().to_string();
    if program.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Program name is required",
        )));
    }
    program.description = non_blank(program.description);

    match service.get_storage(request).create_program(program).await {
        Ok(program) => {
            info!("Created program {}", program.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(program, "Program created")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::ProgramAlreadyExists, "Create program")),
    }
}
