use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::requests::StudentListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn list_students(
    service: &StudentService,
    query: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service
        .get_storage(request)
        .list_students_with_pagination(query.into())
        .await
    {
        Ok(response) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Student list retrieved")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "List students")),
    }
}
