pub mod auth;
pub mod completion_exams;
pub mod dashboard;
pub mod grades;
pub mod professors;
pub mod programs;
pub mod school_years;
pub mod students;
pub mod subjects;
pub mod system;
pub mod users;
pub mod year_levels;

pub use auth::AuthService;
pub use completion_exams::CompletionExamService;
pub use dashboard::DashboardService;
pub use grades::GradeService;
pub use professors::ProfessorService;
pub use programs::ProgramService;
pub use school_years::SchoolYearService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use users::UserService;
pub use year_levels::YearLevelService;

use actix_multipart::Multipart;
use actix_web::HttpResponse;

use crate::errors::GradeSysError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::sheet::{self, Rows, SheetFormat};
use crate::utils::validate_magic_bytes;

/// Response for a failed storage call.
///
/// Constraint violations answer 409 with `conflict`, missing rows 404, the rest 500.
pub(crate) fn storage_failure(
    err: GradeSysError,
    conflict: ErrorCode,
    action: &str,
) -> HttpResponse {
    match err {
        GradeSysError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(conflict, msg))
        }
        GradeSysError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        GradeSysError::Validation(msg) => {
            let body = ApiResponse::error_empty(ErrorCode::ValidationFailed, msg);
            HttpResponse::BadRequest().json(body)
        }
        err => {
            tracing::error!("{} failed: {}", action, err);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{action} failed: {}", err.message()),
            ))
        }
    }
}

/// 404 response when a referenced program or year level is missing
pub(crate) async fn check_references(
    storage: &dyn Storage,
    program_id: Option<i64>,
    year_level_id: Option<i64>,
) -> Option<HttpResponse> {
    if let Some(program_id) = program_id {
        match storage.get_program_by_id(program_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ProgramNotFound,
                    "Program not found",
                )));
            }
            Err(e) => {
                return Some(storage_failure(
                    e,
                    ErrorCode::InternalServerError,
                    "Load program",
                ));
            }
        }
    }
    if let Some(year_level_id) = year_level_id {
        match storage.get_year_level_by_id(year_level_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::YearLevelNotFound,
                    "Year level not found",
                )));
            }
            Err(e) => {
                return Some(storage_failure(
                    e,
                    ErrorCode::InternalServerError,
                    "Load year level",
                ));
            }
        }
    }
    None
}

/// Reads the `file` part of an upload into rows.
///
/// The error side is the 400 response to send back.
pub(crate) async fn read_uploaded_rows(
    payload: &mut Multipart,
    allowed: &[SheetFormat],
) -> Result<Rows, HttpResponse> {
    let upload = sheet::read_upload(payload).await.map_err(|msg| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::FileUploadFailed, msg))
    })?;

    let format = SheetFormat::from_file_name(&upload.file_name)
        .filter(|f| allowed.contains(f))
        .ok_or_else(|| {
            let accepted: Vec<&str> = allowed.iter().map(|f| f.extension()).collect();
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("Unsupported file type, expected one of {}", accepted.join(", ")),
            ))
        })?;

    if !validate_magic_bytes(&upload.bytes, format.extension()) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileUploadFailed,
            "File content does not match its extension",
        )));
    }

    sheet::read_rows(&upload.bytes, format).map_err(|e| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileParseFailed,
            e.message(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn storage_failures_map_to_statuses() {
        let conflict = storage_failure(
            GradeSysError::conflict("duplicate"),
            ErrorCode::StudentAlreadyExists,
            "Create student",
        );
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let missing = storage_failure(
            GradeSysError::not_found("gone"),
            ErrorCode::StudentAlreadyExists,
            "Load student",
        );
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let broken = storage_failure(
            GradeSysError::database_operation("disk I/O error"),
            ErrorCode::StudentAlreadyExists,
            "Create student",
        );
        assert_eq!(broken.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
