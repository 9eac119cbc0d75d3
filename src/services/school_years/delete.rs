use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolYearService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

/// Years that still have grades are kept
pub async fn delete_school_year(
    service: &SchoolYearService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).delete_school_year(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("School year deleted"))),
        Ok(false) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::SchoolYearInUse, "Delete school year")),
    }
}
