use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolYearService;
use crate::models::school_years::requests::UpdateSchoolYearRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::utils::validate::parse_school_year;

pub async fn update_school_year(
    service: &SchoolYearService,
    id: i64,
    update: UpdateSchoolYearRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (start_year, end_year) = match parse_school_year(&update.name) {
        Ok(years) => years,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    match service
        .get_storage(request)
        .update_school_year(id, format!("{start_year}-{end_year}"), start_year, end_year)
        .await
    {
        Ok(Some(school_year)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(school_year, "School year updated")))
        }
        Ok(None) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::SchoolYearAlreadyExists, "Update school year")),
    }
}
