use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SchoolYearService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn set_current_school_year(
    service: &SchoolYearService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).set_current_school_year(id).await {
        Ok(Some(school_year)) => {
            info!("School year {} is now current", school_year.name);
            let body = ApiResponse::success(school_year, "Current school year set");
            Ok(HttpResponse::Ok().json(body))
        }
        Ok(None) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Set current school year")),
    }
}
