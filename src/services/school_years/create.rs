use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SchoolYearService;
use crate::models::school_years::requests::CreateSchoolYearRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::utils::validate::parse_school_year;

pub async fn create_school_year(
    service: &SchoolYearService,
    school_year: CreateSchoolYearRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (start_year, end_year) = match parse_school_year(&school_year.name) {
        Ok(years) => years,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    match service
        .get_storage(request)
        .create_school_year(
            format!("{start_year}-{end_year}"),
            start_year,
            end_year,
            school_year.is_current,
        )
        .await
    {
        Ok(created) => {
            info!("Created school year {} (current: {})", created.name, created.is_current);
            Ok(HttpResponse::Created().json(ApiResponse::success(created, "School year created")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::SchoolYearAlreadyExists, "Create school year")),
    }
}
