use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, load_record};
use crate::models::students::requests::FileFormatParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::reports;
use crate::services::storage_failure;
use crate::utils::table_export::{ExportFormat, attachment};

/// Printable grade report, XLSX unless CSV is asked for
pub async fn student_report(
    service: &StudentService,
    id: i64,
    query: FileFormatParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let format = match query.format.as_deref() {
        None => ExportFormat::Xlsx,
        given => ExportFormat::from_param(given),
    };

    let record = match load_record(service.get_storage(request).as_ref(), id).await {
        Ok(Some(record)) => record,
        Ok(None) => return Ok(super::not_found()),
        Err(e) => return Ok(storage_failure(e, ErrorCode::ExportFailed, "Load student grades")),
    };

    let table = reports::student_report(&record.student, &record.grades, record.gwa);
    match table.render(format, "Grade Report") {
        Ok(body) => Ok(attachment(
            format,
            &format!("grade_report_{}", record.student.student.school_id),
            body,
        )),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::ExportFailed,
            e.message(),
        ))),
    }
}
