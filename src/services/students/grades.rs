use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, load_record};
use crate::models::students::responses::StudentGradesResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;

pub async fn student_grades(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_record(storage.as_ref(), id).await {
        Ok(Some(record)) => {
            let total_units: f64 = record.grades.iter().filter_map(|g| g.units).sum();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentGradesResponse {
                    student: record.student,
                    grades: record.grades,
                    gwa: record.gwa,
                    total_units,
                },
                "Student grades retrieved",
            )))
        }
        Ok(None) => Ok(super::not_found()),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Load student grades")),
    }
}
