use serde::Deserialize;
use ts_rs::TS;

use super::entities::Semester;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct CreateSubjectRequest {
    pub code: String,
    pub title: String,
    pub units: f64,
    pub program_id: i64,
    pub year_level_id: i64,
    pub semester: Semester,
    pub prerequisite: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct UpdateSubjectRequest {
    pub code: Option<String>,
    pub title: Option<String>,
    pub units: Option<f64>,
    pub year_level_id: Option<i64>,
    pub semester: Option<Semester>,
    pub prerequisite: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub program_id: Option<i64>,
    pub year_level_id: Option<i64>,
    pub semester: Option<Semester>,
}

#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub program_id: Option<i64>,
    pub year_level_id: Option<i64>,
    pub semester: Option<Semester>,
}

impl From<SubjectListParams> for SubjectListQuery {
    fn from(params: SubjectListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
            program_id: params.program_id,
            year_level_id: params.year_level_id,
            semester: params.semester,
        }
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct CurriculumImportParams {
    pub program_id: i64,
}
