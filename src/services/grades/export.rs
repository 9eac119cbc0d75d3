use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::requests::GradeSheetExportParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::reports;
use crate::services::storage_failure;
use crate::utils::table_export::{ExportFormat, attachment};

/// Printable grade sheet of one subject offering, XLSX unless CSV is asked for
pub async fn export_grade_sheet(
    service: &GradeService,
    query: GradeSheetExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let format = match query.format.as_deref() {
        None => ExportFormat::Xlsx,
        given => ExportFormat::from_param(given),
    };
    let storage = service.get_storage(request);

    let subject = match storage.get_subject_by_id(query.subject_id).await {
        Ok(Some(subject)) => subject,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "Subject not found",
            )));
        }
        Err(e) => return Ok(storage_failure(e, ErrorCode::ExportFailed, "Load subject")),
    };
    let school_year = match storage.get_school_year_by_id(query.school_year_id).await {
        Ok(Some(school_year)) => school_year,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SchoolYearNotFound,
                "School year not found",
            )));
        }
        Err(e) => return Ok(storage_failure(e, ErrorCode::ExportFailed, "Load school year")),
    };

    let grades = match storage
        .list_grade_sheet(subject.id, school_year.id, query.semester)
        .await
    {
        Ok(grades) => grades,
        Err(e) => return Ok(storage_failure(e, ErrorCode::ExportFailed, "Load grade sheet")),
    };

    let table = reports::grade_sheet(&subject, &school_year, query.semester, &grades);
    let semester = query.semester.to_string();
    let file_name = file_name(&subject.code, &school_year.name, &semester);

    match table.render(format, "Grade Sheet") {
        Ok(body) => Ok(attachment(format, &file_name, body)),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::ExportFailed,
            e.message(),
        ))),
    }
}

/// `grade_sheet_<code>_<year>_<semester>` with anything but letters, digits and `-` as `_`
fn file_name(subject_code: &str, school_year: &str, semester: &str) -> String {
    format!("grade_sheet_{subject_code}_{school_year}_{semester}")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_header_safe() {
        assert_eq!(
            file_name("IT 101", "2024-2025", "first"),
            "grade_sheet_IT_101_2024-2025_first"
        );
        assert_eq!(file_name("A\"B", "x", "y"), "grade_sheet_A_B_x_y");
    }
}
