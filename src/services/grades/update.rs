use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, check_class_references};
use crate::models::grades::requests::UpdateGradeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::utils::grading;

pub async fn update_grade(
    service: &GradeService,
    id: i64,
    update: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let value = match update.value.as_deref().map(grading::normalize).transpose() {
        Ok(value) => value,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::GradeValueInvalid, e.message())));
        }
    };

    let storage = service.get_storage(request);
    if let Some(response) =
        check_class_references(storage.as_ref(), None, None, update.professor_id).await
    {
        return Ok(response);
    }

    match storage.update_grade(id, value, update.professor_id).await {
        Ok(Some(grade)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade updated")))
        }
        Ok(None) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::GradeAlreadyExists, "Update grade")),
    }
}
