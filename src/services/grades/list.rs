use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::requests::GradeListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn list_grades(
    service: &GradeService,
    query: GradeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service
        .get_storage(request)
        .list_grades_with_pagination(query.into())
        .await
    {
        Ok(response) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Grade list retrieved")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "List grades")),
    }
}
