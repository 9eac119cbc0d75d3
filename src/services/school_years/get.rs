use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolYearService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn get_school_year(
    service: &SchoolYearService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).get_school_year_by_id(id).await {
        Ok(Some(school_year)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(school_year, "School year retrieved")))
        }
        Ok(None) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Load school year")),
    }
}

/// The school year flagged current, 404 when none is
pub async fn get_current_school_year(
    service: &SchoolYearService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).get_current_school_year().await {
        Ok(Some(school_year)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            school_year,
            "Current school year retrieved",
        ))),
        Ok(None) => Ok(super::not_found()),
        Err(e) => {
            Ok(storage_failure(e, ErrorCode::InternalServerError, "Load current school year"))
        }
    }
}
