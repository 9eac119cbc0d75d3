use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProfessorService;
use crate::models::professors::requests::CreateProfessorRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::utils::id_gen::{generate_professor_code, generate_unused, is_valid_professor_code};
use crate::utils::validate::{non_blank, validate_email, validate_name_part};

pub async fn create_professor(
    service: &ProfessorService,
    mut professor: CreateProfessorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let names = validate_name_part(&professor.first_name, "First name")
        .and_then(|first| Ok((first, validate_name_part(&professor.last_name, "Last name")?)));
    match names {
        Ok((first, last)) => {
            professor.first_name = first;
            professor.last_name = last;
        }
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    }
    professor.middle_name = non_blank(professor.middle_name);
    professor.department = non_blank(professor.department);
    professor.email = non_blank(professor.email).map(|e| e.to_lowercase());
    if let Some(email) = &professor.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    let code = match non_blank(professor.professor_code.take()) {
        Some(code) => {
            let code = code.to_uppercase();
            if !is_valid_professor_code(&code) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationFailed,
                    "Professor code must look like PROF-XXXXXXXX",
                )));
            }
            code
        }
        None => {
            let generated = generate_unused(generate_professor_code, |code| {
                let storage = storage.clone();
                async move { storage.professor_code_exists(&code).await }
            })
            .await;
            match generated {
                Ok(code) => code,
                Err(e) => {
                    return Ok(storage_failure(
                        e,
                        ErrorCode::ProfessorAlreadyExists,
                        "Generate professor code",
                    ));
                }
            }
        }
    };

    match storage.create_professor(code, professor).await {
        Ok(created) => {
            info!("Created professor {} ({})", created.professor_code, created.full_name());
            Ok(HttpResponse::Created().json(ApiResponse::success(created, "Professor created")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::ProfessorAlreadyExists, "Create professor")),
    }
}
