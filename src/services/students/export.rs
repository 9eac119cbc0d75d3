use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::requests::{StudentExportParams, StudentListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::utils::table_export::{ExportFormat, Table, attachment};

const MAX_EXPORT_ROWS: u64 = 10_000;

const EXPORT_HEADERS: [&str; 9] = [
    "School ID",
    "Last Name",
    "First Name",
    "Middle Name",
    "Suffix",
    "Email",
    "Program",
    "Year Level",
    "Status",
];

pub async fn export_students(
    service: &StudentService,
    query: StudentExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let format = ExportFormat::from_param(query.format.as_deref());
    let list_query = StudentListQuery {
        search: query.search,
        program_id: query.program_id,
        year_level_id: query.year_level_id,
        status: query.status,
        ..Default::default()
    };

    let students = match service
        .get_storage(request)
        .list_students_for_export(list_query, MAX_EXPORT_ROWS)
        .await
    {
        Ok(students) => students,
        Err(e) => return Ok(storage_failure(e, ErrorCode::ExportFailed, "Export students")),
    };

    let mut table = Table::new(EXPORT_HEADERS);
    for detail in students {
        let s = detail.student;
        table.push_row(vec![
            s.school_id,
            s.last_name,
            s.first_name,
            s.middle_name.unwrap_or_default(),
            s.suffix.unwrap_or_default(),
            s.email.unwrap_or_default(),
            detail.program_code.unwrap_or_default(),
            detail.year_level_name.unwrap_or_default(),
            s.status.to_string(),
        ]);
    }

    match table.render(format, "Students") {
        Ok(body) => Ok(attachment(format, "students", body)),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::ExportFailed,
            e.message(),
        ))),
    }
}
