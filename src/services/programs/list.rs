use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProgramService;
use crate::models::programs::requests::ProgramListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn list_programs(
    service: &ProgramService,
    query: ProgramListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service
        .get_storage(request)
        .list_programs_with_pagination(query.into())
        .await
    {
        Ok(response) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Program list retrieved")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "List programs")),
    }
}
