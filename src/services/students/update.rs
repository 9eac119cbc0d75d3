use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{check_references, storage_failure};
use crate::utils::validate::{validate_email, validate_name_part};

/// The school ID never changes; empty strings clear the optional fields
pub async fn update_student(
    service: &StudentService,
    id: i64,
    mut update: UpdateStudentRequest,
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

    let storage = service.get_storage(request);
    if let Some(response) =
        check_references(storage.as_ref(), update.program_id, update.year_level_id).await
    {
        return Ok(response);
    }

    match storage.update_student(id, update).await {
        Ok(Some(student)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student updated")))
        }
        Ok(None) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::StudentAlreadyExists, "Update student")),
    }
}
