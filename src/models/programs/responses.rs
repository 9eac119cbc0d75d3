use serde::Serialize;
use ts_rs::TS;

use super::entities::Program;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "program.ts")]
pub struct ProgramListResponse {
    pub items: Vec<Program>,
    pub pagination: PaginationInfo,
}
