use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfessorService;
use crate::models::professors::requests::UpdateProfessorRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::utils::validate::{validate_email, validate_name_part};

/// Empty strings clear the optional fields
pub async fn update_professor(
    service: &ProfessorService,
    id: i64,
    mut update: UpdateProfessorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for (value, field) in [
        (&mut update.first_name, "First name"),
        (&mut update.last_name, "Last name"),
    ] {
        if let Some(name) = value.as_mut() {
            match validate_name_part(name, field) {
                Ok(valid) => *name = valid,
                Err(msg) => {
                    return Ok(HttpResponse::BadRequest()
                        .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
                }
            }
        }
    }

    if let Some(email) = update.email.as_mut() {
        *email = email.trim().to_lowercase();
        if !email.is_empty()
            && let Err(msg) = validate_email(email)
        {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    }

    match service.get_storage(request).update_professor(id, update).await {
        Ok(Some(professor)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(professor, "Professor updated")))
        }
        Ok(None) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::ProfessorAlreadyExists, "Update professor")),
    }
}
