//! Student roster upload: one student per row below a header row.

use std::collections::{HashMap, HashSet};

use super::{ImportParseError, row_number};
use crate::models::imports::ImportRowError;
use crate::models::year_levels::entities::YearLevel;
use crate::utils::id_gen::is_valid_school_id;
use crate::utils::sheet::{Rows, header_key, is_blank_row};
use crate::utils::validate::{validate_email, validate_name_part};

pub const REQUIRED_COLUMNS: [&str; 4] = ["first_name", "last_name", "program", "year_level"];

/// Column order of the downloadable template
pub const TEMPLATE_HEADERS: [&str; 8] = [
    "school_id",
    "first_name",
    "middle_name",
    "last_name",
    "suffix",
    "email",
    "program",
    "year_level",
];

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub row: usize,
    pub school_id: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    /// Program code, uppercased
    pub program: String,
    /// Level number or year level name as written
    pub year_level: String,
}

#[derive(Debug, Default)]
pub struct ParsedStudents {
    /// Non-blank data rows
    pub total: usize,
    pub rows: Vec<StudentRow>,
    pub failed: Vec<ImportRowError>,
    /// Rows repeating a school ID seen earlier in the file
    pub skipped: Vec<ImportRowError>,
}

pub fn parse_student_rows(
    rows: &Rows,
    max_rows: usize,
) -> Result<ParsedStudents, ImportParseError> {
    let header = rows.first().ok_or(ImportParseError::EmptyFile)?;
    let columns: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.trim().is_empty())
        .map(|(idx, cell)| (header_key(cell), idx))
        .collect();

    for required in REQUIRED_COLUMNS {
        if !columns.contains_key(required) {
            return Err(ImportParseError::MissingColumn(required.to_string()));
        }
    }

    let data: Vec<(usize, &Vec<String>)> = rows
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| !is_blank_row(row))
        .collect();
    if data.is_empty() {
        return Err(ImportParseError::EmptyFile);
    }
    if data.len() > max_rows {
        return Err(ImportParseError::TooManyRows {
            rows: data.len(),
            max: max_rows,
        });
    }

    let cell = |row: &Vec<String>, name: &str| -> Option<String> {
        columns
            .get(name)
            .and_then(|idx| row.get(*idx))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let mut parsed = ParsedStudents {
        total: data.len(),
        ..Default::default()
    };
    let mut seen_ids = HashSet::new();

    for (idx, row) in data {
        let row_num = row_number(idx);
        let mut errors = Vec::new();

        let mut name_part = |field: &'static str| {
            let value = cell(row, field).unwrap_or_default();
            validate_name_part(&value, field)
                .map_err(|e| errors.push(ImportRowError::new(row_num, Some(field), e)))
                .ok()
        };
        let first_name = name_part("first_name");
        let last_name = name_part("last_name");

        let program = cell(row, "program").map(|p| p.to_uppercase());
        if program.is_none() {
            errors.push(ImportRowError::new(row_num, Some("program"), "program is required"));
        }
        let year_level = cell(row, "year_level");
        if year_level.is_none() {
            errors.push(ImportRowError::new(
                row_num,
                Some("year_level"),
                "year_level is required",
            ));
        }

        let school_id = cell(row, "school_id").map(|id| id.to_uppercase());
        if let Some(ref id) = school_id
            && !is_valid_school_id(id)
        {
            errors.push(ImportRowError::new(
                row_num,
                Some("school_id"),
                format!("School ID {id} must look like STU-XXXXXXXX"),
            ));
        }

        let email = cell(row, "email");
        if let Some(ref email) = email
            && let Err(msg) = validate_email(email)
        {
            errors.push(ImportRowError::new(row_num, Some("email"), msg));
        }

        if !errors.is_empty() {
            parsed.failed.extend(errors);
            continue;
        }

        if let Some(ref id) = school_id
            && !seen_ids.insert(id.clone())
        {
            parsed.skipped.push(ImportRowError::new(
                row_num,
                Some("school_id"),
                format!("School ID {id} appears more than once in the file"),
            ));
            continue;
        }

        if let (Some(first_name), Some(last_name), Some(program), Some(year_level)) =
            (first_name, last_name, program, year_level)
        {
            parsed.rows.push(StudentRow {
                row: row_num,
                school_id,
                first_name,
                middle_name: cell(row, "middle_name"),
                last_name,
                suffix: cell(row, "suffix"),
                email,
                program,
                year_level,
            });
        }
    }

    Ok(parsed)
}

/// Resolves a `year_level` cell given as a level number (`2`, `2.0`) or a name (`Second Year`)
pub fn resolve_year_level(value: &str, levels: &[YearLevel]) -> Option<i64> {
    let value = value.trim();
    if let Ok(number) = value.parse::<f64>() {
        return levels
            .iter()
            .find(|y| f64::from(y.level) == number)
            .map(|y| y.id);
    }

    let wanted = super::header_text(value);
    levels
        .iter()
        .find(|y| super::header_text(&y.name) == wanted)
        .map(|y| y.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Rows {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn headers_are_matched_loosely() {
        let input = rows(&[
            &["First Name", "LAST-NAME", "Program", "Year Level", "School ID"],
            &["Ana", "Lopez", "bsit", "1", "stu-aaaa1111"],
        ]);
        let parsed = parse_student_rows(&input, 100).unwrap();
        assert_eq!(parsed.total, 1);
        let row = &parsed.rows[0];
        assert_eq!(row.row, 2);
        assert_eq!(row.program, "BSIT");
        assert_eq!(row.school_id.as_deref(), Some("STU-AAAA1111"));
        assert!(row.middle_name.is_none());
    }

    #[test]
    fn missing_required_column_rejects_the_file() {
        let input = rows(&[&["first_name", "last_name", "program"], &["Ana", "Lopez", "BSIT"]]);
        assert_eq!(
            parse_student_rows(&input, 100).unwrap_err(),
            ImportParseError::MissingColumn("year_level".into())
        );
    }

    #[test]
    fn invalid_rows_fail_and_repeats_are_skipped() {
        let input = rows(&[
            &["school_id", "first_name", "last_name", "program", "year_level", "email"],
            &["STU-AAAA1111", "Ana", "Lopez", "BSIT", "1", ""],
            &["", "", "Cruz", "BSIT", "1", ""],
            &["STU-AAAA1111", "Ben", "Reyes", "BSIT", "2", ""],
            &["", "", "", "", "", ""],
            &["BAD-ID", "Carl", "Diaz", "BSIT", "1", "not-an-email"],
        ]);
        let parsed = parse_student_rows(&input, 100).unwrap();
        assert_eq!(parsed.total, 4);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].row, 4);
        let failed_rows: Vec<usize> = parsed.failed.iter().map(|e| e.row).collect();
        assert_eq!(failed_rows, vec![3, 6, 6]);
    }

    #[test]
    fn row_limit_applies_to_data_rows() {
        let input = rows(&[
            &["first_name", "last_name", "program", "year_level"],
            &["Ana", "Lopez", "BSIT", "1"],
            &["Ben", "Cruz", "BSIT", "1"],
        ]);
        assert!(matches!(
            parse_student_rows(&input, 1),
            Err(ImportParseError::TooManyRows { rows: 2, max: 1 })
        ));
    }

    #[test]
    fn year_level_by_number_or_name() {
        let levels = vec![
            YearLevel {
                id: 10,
                level: 1,
                name: "First Year".into(),
            },
            YearLevel {
                id: 11,
                level: 2,
                name: "Second Year".into(),
            },
        ];
        assert_eq!(resolve_year_level("2", &levels), Some(11));
        assert_eq!(resolve_year_level("1.0", &levels), Some(10));
        assert_eq!(resolve_year_level("second  year", &levels), Some(11));
        assert_eq!(resolve_year_level("5", &levels), None);
    }
}
