use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::YearLevelService;
use crate::models::year_levels::responses::YearLevelListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn list_year_levels(
    service: &YearLevelService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).list_year_levels().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            YearLevelListResponse { items },
            "Year levels retrieved",
        ))),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "List year levels")),
    }
}
