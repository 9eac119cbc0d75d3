//! Completion exams replacing an `INC` grade.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::middlewares::RequireJWT;
use crate::models::completion_exams::{
    requests::{NewCompletionExam, RecordCompletionRequest},
    responses::CompletionRecordedResponse,
};
use crate::models::grades::{entities::Grade, responses::CompletionEligibility};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::storage::Storage;
use crate::utils::grading::{completion_eligibility, parse_completion_value};
use crate::utils::validate::non_blank;

async fn load_eligibility(
    service: &GradeService,
    storage: &dyn Storage,
    id: i64,
) -> Result<(Grade, CompletionEligibility), HttpResponse> {
    let grade = match storage.get_grade_by_id(id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Err(super::not_found()),
        Err(e) => return Err(storage_failure(e, ErrorCode::InternalServerError, "Load grade")),
    };
    let completed = storage
        .has_completion_exam(id)
        .await
        .map_err(|e| storage_failure(e, ErrorCode::InternalServerError, "Load completion exam"))?;

    let eligibility = completion_eligibility(
        &grade.value,
        completed,
        grade.created_at,
        chrono::Utc::now(),
        service.get_config().grading.completion_window_days,
    );
    Ok((grade, eligibility))
}

pub async fn get_eligibility(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match load_eligibility(service, storage.as_ref(), id).await {
        Ok((_, eligibility)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            eligibility,
            "Completion eligibility evaluated",
        ))),
        Err(response) => Ok(response),
    }
}

pub async fn record_completion(
    service: &GradeService,
    id: i64,
    completion: RecordCompletionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let value = match parse_completion_value(&completion.completion_value) {
        Ok(value) => value,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::GradeValueInvalid, e.message())));
        }
    };

    let storage = service.get_storage(request);
    let (grade, eligibility) = match load_eligibility(service, storage.as_ref(), id).await {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };
    if let Some(reason) = eligibility.reason {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CompletionNotEligible,
            reason.message(),
        )));
    }

    let exam = NewCompletionExam {
        grade_id: grade.id,
        original_value: grade.value,
        completion_value: value.to_string(),
        exam_date: completion.exam_date.unwrap_or_else(chrono::Utc::now),
        remarks: non_blank(completion.remarks),
        processed_by: RequireJWT::extract_user_id(request),
    };

    match storage.record_completion(exam).await {
        Ok((exam, grade)) => {
            info!("Grade {} completed with {}", grade.id, grade.value);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CompletionRecordedResponse { exam, grade },
                "Completion recorded",
            )))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::CompletionNotEligible, "Record completion")),
    }
}
