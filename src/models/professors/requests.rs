use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "professor.ts")]
pub struct CreateProfessorRequest {
    /// Generated when absent
    pub professor_code: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "professor.ts")]
pub struct UpdateProfessorRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "professor.ts")]
pub struct ProfessorListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfessorListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub department: Option<String>,
}

impl From<ProfessorListParams> for ProfessorListQuery {
    fn from(params: ProfessorListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
            department: params.department,
        }
    }
}
