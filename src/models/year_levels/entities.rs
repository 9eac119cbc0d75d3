use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "year_level.ts")]
pub struct YearLevel {
    pub id: i64,
    pub level: i32,
    pub name: String,
}

const ORDINALS: [&str; 10] = [
    "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth", "Ninth", "Tenth",
];

impl YearLevel {
    pub const MIN_LEVEL: i32 = 1;
    pub const MAX_LEVEL: i32 = 10;

    /// `First Year` ... `Tenth Year`
    pub fn default_name(level: i32) -> Option<String> {
        usize::try_from(level - 1)
            .ok()
            .and_then(|idx| ORDINALS.get(idx))
            .map(|ordinal| format!("{ordinal} Year"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_cover_levels_one_to_ten() {
        assert_eq!(YearLevel::default_name(1).as_deref(), Some("First Year"));
        assert_eq!(YearLevel::default_name(5).as_deref(), Some("Fifth Year"));
        assert_eq!(YearLevel::default_name(10).as_deref(), Some("Tenth Year"));
        assert_eq!(YearLevel::default_name(0), None);
        assert_eq!(YearLevel::default_name(11), None);
    }
}
