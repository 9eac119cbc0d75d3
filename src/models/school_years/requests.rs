use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "school_year.ts")]
pub struct CreateSchoolYearRequest {
    pub name: String,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "school_year.ts")]
pub struct UpdateSchoolYearRequest {
    pub name: String,
}
