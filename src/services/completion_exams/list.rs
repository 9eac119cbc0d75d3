use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CompletionExamService;
use crate::models::completion_exams::requests::CompletionExamListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn list_completion_exams(
    service: &CompletionExamService,
    query: CompletionExamListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service
        .get_storage(request)
        .list_completion_exams_with_pagination(query.into())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Completion exam list retrieved",
        ))),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "List completion exams")),
    }
}
