use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolYearService;
use crate::models::school_years::responses::SchoolYearListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn list_school_years(
    service: &SchoolYearService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).list_school_years().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SchoolYearListResponse { items },
            "School years retrieved",
        ))),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "List school years")),
    }
}
