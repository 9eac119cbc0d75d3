use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::YearLevelService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn delete_year_level(
    service: &YearLevelService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).delete_year_level(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Year level deleted"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::YearLevelNotFound,
            "Year level not found",
        ))),
        Err(e) => Ok(storage_failure(e, ErrorCode::YearLevelInUse, "Delete year level")),
    }
}
