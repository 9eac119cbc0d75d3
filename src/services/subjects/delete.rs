use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

/// Subjects with recorded grades are kept
pub async fn delete_subject(
    service: &SubjectService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).delete_subject(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted"))),
        Ok(false) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::SubjectInUse, "Delete subject")),
    }
}
