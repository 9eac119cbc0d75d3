use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn get_summary(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let window_days = service.get_config().grading.completion_window_days;
    // an INC recorded at or after this moment is still inside its window
    let eligible_since = (chrono::Utc::now() - chrono::Duration::days(window_days)).timestamp();

    match service
        .get_storage(request)
        .dashboard_summary(eligible_since)
        .await
    {
        Ok(summary) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "Dashboard retrieved")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Load dashboard")),
    }
}
