use actix_web::{HttpResponse, Result as ActixResult};

use crate::importers::student::TEMPLATE_HEADERS;
use crate::models::students::requests::FileFormatParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::table_export::{ExportFormat, Table, attachment};

/// Empty roster with the columns the import understands
pub async fn import_template(query: FileFormatParams) -> ActixResult<HttpResponse> {
    let format = ExportFormat::from_param(query.format.as_deref());

    match Table::new(TEMPLATE_HEADERS).render(format, "Students") {
        Ok(body) => Ok(attachment(format, "student_import_template", body)),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::ExportFailed,
            e.message(),
        ))),
    }
}
