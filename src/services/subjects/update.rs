use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::subjects::requests::UpdateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{check_references, storage_failure};
use crate::utils::validate::{normalize_subject_code, validate_units};

pub async fn update_subject(
    service: &SubjectService,
    id: i64,
    mut update: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = normalize_update(&mut update) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);
    if let Some(response) = check_references(storage.as_ref(), None, update.year_level_id).await {
        return Ok(response);
    }

    match storage.update_subject(id, update).await {
        Ok(Some(subject)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Subject updated")))
        }
        Ok(None) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::SubjectAlreadyExists, "Update subject")),
    }
}

fn normalize_update(update: &mut UpdateSubjectRequest) -> Result<(), &'static str> {
    if let Some(code) = update.code.as_mut() {
        *code = normalize_subject_code(code)?;
    }
    if let Some(title) = update.title.as_mut() {
        *title = title.trim().to_string();
        if title.is_empty() {
            return Err("Subject title cannot be empty");
        }
    }
    if let Some(units) = update.units {
        validate_units(units)?;
    }
    if let Some(prerequisite) = update.prerequisite.as_mut() {
        *prerequisite = prerequisite.trim().to_string();
    }
    Ok(())
}
