use serde::Serialize;
use ts_rs::TS;

use super::entities::Professor;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "professor.ts")]
pub struct ProfessorListResponse {
    pub items: Vec<Professor>,
    pub pagination: PaginationInfo,
}
