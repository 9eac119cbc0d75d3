use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfessorService;
use crate::models::professors::requests::ProfessorListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn list_professors(
    service: &ProfessorService,
    query: ProfessorListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service
        .get_storage(request)
        .list_professors_with_pagination(query.into())
        .await
    {
        Ok(response) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Professor list retrieved")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "List professors")),
    }
}
