use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, check_class_references};
use crate::middlewares::RequireJWT;
use crate::models::grades::requests::{CreateGradeRequest, NewGrade};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::utils::grading;

/// Encodes one grade; the same enrollment cannot be graded twice
pub async fn create_grade(
    service: &GradeService,
    grade: CreateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let value = match grading::normalize(&grade.value) {
        Ok(value) => value,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::GradeValueInvalid, e.message())));
        }
    };

    let storage = service.get_storage(request);

    match storage.get_student_by_id(grade.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(storage_failure(e, ErrorCode::InternalServerError, "Load student")),
    }
    if let Some(response) = check_class_references(
        storage.as_ref(),
        Some(grade.subject_id),
        Some(grade.school_year_id),
        grade.professor_id,
    )
    .await
    {
        return Ok(response);
    }

    let new_grade = NewGrade {
        student_id: grade.student_id,
        subject_id: grade.subject_id,
        school_year_id: grade.school_year_id,
        semester: grade.semester,
        professor_id: grade.professor_id,
        value,
        encoded_by: RequireJWT::extract_user_id(request),
    };

    match storage.create_grade(new_grade).await {
        Ok(created) => {
            info!(
                "Encoded grade {} for student {} in subject {}",
                created.value, created.student_id, created.subject_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(created, "Grade encoded")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::GradeAlreadyExists, "Encode grade")),
    }
}
