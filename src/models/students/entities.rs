use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::names;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "student.ts")]
pub enum StudentStatus {
    Enrolled,
    Inactive,
    Graduated,
    Dropped,
}

impl<'de> Deserialize<'de> for StudentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StudentStatus::Enrolled => "enrolled",
            StudentStatus::Inactive => "inactive",
            StudentStatus::Graduated => "graduated",
            StudentStatus::Dropped => "dropped",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enrolled" => Ok(StudentStatus::Enrolled),
            "inactive" => Ok(StudentStatus::Inactive),
            "graduated" => Ok(StudentStatus::Graduated),
            "dropped" => Ok(StudentStatus::Dropped),
            _ => Err(format!(
                "Invalid student status: {s}. Supported: enrolled, inactive, graduated, dropped"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    /// `STU-XXXXXXXX`
    pub school_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub program_id: i64,
    pub year_level_id: i64,
    pub status: StudentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        names::full_name(
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
            self.suffix.as_deref(),
        )
    }

    pub fn sortable_name(&self) -> String {
        names::sortable_name(&self.first_name, self.middle_name.as_deref(), &self.last_name)
    }
}

/// Student joined with its program and year level for listings and reports
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: Student,
    pub full_name: String,
    pub program_code: Option<String>,
    pub year_level_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Enrolled".parse::<StudentStatus>(), Ok(StudentStatus::Enrolled));
        assert!("expelled".parse::<StudentStatus>().is_err());
        assert_eq!(StudentStatus::Graduated.to_string(), "graduated");
    }
}
