use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn delete_grade(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).delete_grade(id).await {
        Ok(true) => {
            info!("Deleted grade {}", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade deleted")))
        }
        Ok(false) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Delete grade")),
    }
}
