use serde::Deserialize;
use ts_rs::TS;

use super::entities::GradeRemark;
use crate::models::common::PaginationQuery;
use crate::models::subjects::entities::Semester;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub school_year_id: i64,
    pub semester: Semester,
    pub professor_id: Option<i64>,
    pub value: String,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct UpdateGradeRequest {
    pub value: Option<String>,
    pub professor_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub school_year_id: Option<i64>,
    pub semester: Option<Semester>,
    pub professor_id: Option<i64>,
    pub remarks: Option<GradeRemark>,
}

#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub school_year_id: Option<i64>,
    pub semester: Option<Semester>,
    pub professor_id: Option<i64>,
    pub remarks: Option<GradeRemark>,
}

impl From<GradeListParams> for GradeListQuery {
    fn from(params: GradeListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            subject_id: params.subject_id,
            school_year_id: params.school_year_id,
            semester: params.semester,
            professor_id: params.professor_id,
            remarks: params.remarks,
        }
    }
}

/// Target class record of a grade sheet upload
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeSheetParams {
    pub subject_id: i64,
    pub school_year_id: i64,
    pub semester: Semester,
    pub professor_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeSheetExportParams {
    pub subject_id: i64,
    pub school_year_id: i64,
    pub semester: Semester,
    pub format: Option<String>,
}

/// Fields of one grade written by storage
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub student_id: i64,
    pub subject_id: i64,
    pub school_year_id: i64,
    pub semester: Semester,
    pub professor_id: Option<i64>,
    pub value: String,
    pub encoded_by: Option<i64>,
}
