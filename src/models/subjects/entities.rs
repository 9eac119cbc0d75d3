use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "subject.ts")]
pub enum Semester {
    First,
    Second,
    Summer,
}

impl Semester {
    pub fn label(&self) -> &'static str {
        match self {
            Semester::First => "First Semester",
            Semester::Second => "Second Semester",
            Semester::Summer => "Summer",
        }
    }
}

impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Semester::First => "first",
            Semester::Second => "second",
            Semester::Summer => "summer",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "1" | "1st" | "first semester" => Ok(Semester::First),
            "second" | "2" | "2nd" | "second semester" => Ok(Semester::Second),
            "summer" => Ok(Semester::Summer),
            _ => Err(format!(
                "Invalid semester: {s}. Supported: first, second, summer"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct Subject {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub units: f64,
    pub program_id: i64,
    pub year_level_id: i64,
    pub semester: Semester,
    pub prerequisite: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semester_accepts_common_spellings() {
        assert_eq!("1st".parse::<Semester>(), Ok(Semester::First));
        assert_eq!("Second Semester".parse::<Semester>(), Ok(Semester::Second));
        assert_eq!("SUMMER".parse::<Semester>(), Ok(Semester::Summer));
        assert!("third".parse::<Semester>().is_err());
    }
}
