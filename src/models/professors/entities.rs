use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::names;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "professor.ts")]
pub struct Professor {
    pub id: i64,
    /// `PROF-XXXXXXXX`
    pub professor_code: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Professor {
    pub fn full_name(&self) -> String {
        names::full_name(
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
            None,
        )
    }
}
