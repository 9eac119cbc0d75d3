use serde::Serialize;
use ts_rs::TS;

use super::entities::StudentDetail;
use crate::models::common::PaginationInfo;
use crate::models::grades::entities::GradeDetail;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListResponse {
    pub items: Vec<StudentDetail>,
    pub pagination: PaginationInfo,
}

/// All grades of one student with the general weighted average
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentGradesResponse {
    pub student: StudentDetail,
    pub grades: Vec<GradeDetail>,
    pub gwa: Option<f64>,
    pub total_units: f64,
}
