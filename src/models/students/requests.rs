use serde::Deserialize;
use ts_rs::TS;

use super::entities::StudentStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateStudentRequest {
    /// Generated when absent
    pub school_id: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub program_id: i64,
    pub year_level_id: i64,
    pub status: Option<StudentStatus>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub program_id: Option<i64>,
    pub year_level_id: Option<i64>,
    pub status: Option<StudentStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub program_id: Option<i64>,
    pub year_level_id: Option<i64>,
    pub status: Option<StudentStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub program_id: Option<i64>,
    pub year_level_id: Option<i64>,
    pub status: Option<StudentStatus>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(params: StudentListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
            program_id: params.program_id,
            year_level_id: params.year_level_id,
            status: params.status,
        }
    }
}

/// Query of the export endpoint: list filters plus the file format
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentExportParams {
    pub format: Option<String>,
    pub search: Option<String>,
    pub program_id: Option<i64>,
    pub year_level_id: Option<i64>,
    pub status: Option<StudentStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct FileFormatParams {
    pub format: Option<String>,
}
