use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::YearLevelService;
use crate::models::year_levels::{entities::YearLevel, requests::CreateYearLevelRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::utils::validate::non_blank;

pub async fn create_year_level(
    service: &YearLevelService,
    level: CreateYearLevelRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !(YearLevel::MIN_LEVEL..=YearLevel::MAX_LEVEL).contains(&level.level) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            format!(
                "Year level must be between {} and {}",
                YearLevel::MIN_LEVEL,
                YearLevel::MAX_LEVEL
            ),
        )));
    }

    let name = match non_blank(level.name).or_else(|| YearLevel::default_name(level.level)) {
        Some(name) => name,
        None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Year level name is required",
            )));
        }
    };

    match service
        .get_storage(request)
        .create_year_level(level.level, name)
        .await
    {
        Ok(year_level) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(year_level, "Year level created")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::YearLevelAlreadyExists, "Create year level")),
    }
}
