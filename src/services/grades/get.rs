use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn get_grade(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).get_grade_detail(id).await {
        Ok(Some(grade)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade retrieved")))
        }
        Ok(None) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Load grade")),
    }
}
