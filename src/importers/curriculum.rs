//! Curriculum sheets: a prospectus laid out as year and semester blocks.
//!
//! ```text
//! FIRST YEAR
//! FIRST SEMESTER
//! COURSE CODE | DESCRIPTIVE TITLE          | UNITS | PRE-REQUISITE
//! IT 101      | Introduction to Computing  | 3     |
//! TOTAL       |                            | 23    |
//! SECOND SEMESTER
//! ...
//! ```
//!
//! The scan is single pass. Header cells update the current year level and
//! semester, and a column-header row fixes where code, title, units and
//! prerequisite are read from until the next column-header row.

use super::{ImportParseError, header_text, row_number};
use crate::models::imports::ImportRowError;
use crate::models::subjects::entities::Semester;
use crate::utils::sheet::{Rows, is_blank_row};
use crate::utils::validate::{normalize_subject_code, validate_units};

const YEAR_HEADERS: [(&str, i32); 5] = [
    ("FIRST YEAR", 1),
    ("SECOND YEAR", 2),
    ("THIRD YEAR", 3),
    ("FOURTH YEAR", 4),
    ("FIFTH YEAR", 5),
];
const SEMESTER_HEADERS: [(&str, Semester); 3] = [
    ("FIRST SEMESTER", Semester::First),
    ("SECOND SEMESTER", Semester::Second),
    ("SUMMER", Semester::Summer),
];
const CODE_HEADERS: [&str; 3] = ["CODE", "COURSE CODE", "SUBJECT CODE"];
const TITLE_HEADERS: [&str; 4] = ["DESCRIPTIVE TITLE", "DESCRIPTION", "SUBJECT TITLE", "TITLE"];
const UNITS_HEADERS: [&str; 3] = ["UNITS", "UNIT", "CREDIT UNITS"];
const PREREQUISITE_HEADERS: [&str; 3] = ["PRE-REQUISITE", "PREREQUISITE", "PRE-REQ"];

#[derive(Debug, Clone, PartialEq)]
pub struct CurriculumSubject {
    pub row: usize,
    pub code: String,
    pub title: String,
    pub units: f64,
    /// Year level number, 1-based
    pub year_level: i32,
    pub semester: Semester,
    pub prerequisite: Option<String>,
}

#[derive(Debug, Default)]
pub struct ParsedCurriculum {
    pub subjects: Vec<CurriculumSubject>,
    pub errors: Vec<ImportRowError>,
}

impl ParsedCurriculum {
    pub fn total(&self) -> usize {
        self.subjects.len() + self.errors.len()
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    code: usize,
    title: Option<usize>,
    units: Option<usize>,
    prerequisite: Option<usize>,
}

/// Year and/or semester named by one header cell, e.g. `FIRST YEAR - SUMMER`
fn parse_period(cell: &str) -> Option<(Option<i32>, Option<Semester>)> {
    let text = header_text(cell);
    if text.is_empty() {
        return None;
    }

    let mut year = None;
    let mut semester = None;
    for part in text.split('-').map(str::trim) {
        if let Some((_, level)) = YEAR_HEADERS.iter().find(|(h, _)| *h == part) {
            year = Some(*level);
        } else if let Some((_, sem)) = SEMESTER_HEADERS.iter().find(|(h, _)| *h == part) {
            semester = Some(*sem);
        } else {
            return None;
        }
    }
    Some((year, semester))
}

fn column_map(row: &[String]) -> Option<ColumnMap> {
    let headers: Vec<String> = row.iter().map(|c| header_text(c)).collect();
    let code = headers.iter().position(|h| !h.is_empty())?;
    if !CODE_HEADERS.contains(&headers[code].as_str()) {
        return None;
    }

    let find = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    Some(ColumnMap {
        code,
        title: find(&TITLE_HEADERS),
        units: find(&UNITS_HEADERS),
        prerequisite: find(&PREREQUISITE_HEADERS),
    })
}

fn cell_at(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(|c| c.trim()).unwrap_or("")
}

pub fn parse_curriculum(rows: &Rows) -> Result<ParsedCurriculum, ImportParseError> {
    let mut parsed = ParsedCurriculum::default();
    let mut year_level: Option<i32> = None;
    let mut semester: Option<Semester> = None;
    let mut columns: Option<ColumnMap> = None;
    let mut saw_column_header = false;

    for (idx, row) in rows.iter().enumerate() {
        if is_blank_row(row) {
            continue;
        }
        let row_num = row_number(idx);

        let periods: Vec<_> = row.iter().filter_map(|c| parse_period(c)).collect();
        if !periods.is_empty() {
            for (year, sem) in periods {
                if year.is_some() {
                    year_level = year;
                    // a new year block starts over at its own semester header
                    semester = sem;
                } else if sem.is_some() {
                    semester = sem;
                }
            }
            continue;
        }

        if let Some(map) = column_map(row) {
            columns = Some(map);
            saw_column_header = true;
            continue;
        }

        let Some(map) = columns else {
            continue;
        };

        let code = cell_at(row, Some(map.code));
        let title = cell_at(row, map.title);
        if code.is_empty() || title.is_empty() {
            continue;
        }
        if header_text(code).starts_with("TOTAL") {
            continue;
        }

        let (Some(year_level), Some(semester)) = (year_level, semester) else {
            parsed.errors.push(ImportRowError::new(
                row_num,
                None,
                format!("Subject {code} appears before a year level and semester header"),
            ));
            continue;
        };

        let code = match normalize_subject_code(code) {
            Ok(code) => code,
            Err(msg) => {
                parsed.errors.push(ImportRowError::new(row_num, Some("code"), msg));
                continue;
            }
        };

        let units_text = cell_at(row, map.units);
        let units = match units_text.parse::<f64>() {
            Ok(units) => units,
            Err(_) => {
                parsed.errors.push(ImportRowError::new(
                    row_num,
                    Some("units"),
                    format!("Units '{units_text}' of {code} is not a number"),
                ));
                continue;
            }
        };
        if let Err(msg) = validate_units(units) {
            parsed.errors.push(ImportRowError::new(row_num, Some("units"), msg));
            continue;
        }

        let prerequisite = Some(cell_at(row, map.prerequisite))
            .filter(|p| !p.is_empty() && !p.eq_ignore_ascii_case("none"))
            .map(str::to_string);

        parsed.subjects.push(CurriculumSubject {
            row: row_num,
            code,
            title: title.to_string(),
            units,
            year_level,
            semester,
            prerequisite,
        });
    }

    if !saw_column_header {
        return Err(ImportParseError::MissingColumn(
            "CODE (or COURSE CODE / SUBJECT CODE)".to_string(),
        ));
    }
    if parsed.total() == 0 {
        return Err(ImportParseError::EmptyFile);
    }
    Ok(parsed)
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
    fn subjects_take_the_nearest_preceding_headers() {
        let input = rows(&[
            &["BACHELOR OF SCIENCE IN INFORMATION TECHNOLOGY", "", "", ""],
            &["FIRST YEAR", "", "", ""],
            &["First Semester", "", "", ""],
            &["COURSE CODE", "DESCRIPTIVE TITLE", "UNITS", "PRE-REQUISITE"],
            &["IT 101", "Introduction to Computing", "3", ""],
            &["GE 1", "Understanding the Self", "3", "None"],
            &["TOTAL", "", "6", ""],
            &["SECOND SEMESTER", "", "", ""],
            &["IT 102", "Computer Programming 1", "3", "IT 101"],
            &["", "", "", ""],
            &["SECOND YEAR - SUMMER", "", "", ""],
            &["IT 201", "Practicum", "6", "IT 102"],
        ]);
        let parsed = parse_curriculum(&input).unwrap();
        assert!(parsed.errors.is_empty());

        let summary: Vec<_> = parsed
            .subjects
            .iter()
            .map(|s| (s.code.as_str(), s.year_level, s.semester))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("IT 101", 1, Semester::First),
                ("GE 1", 1, Semester::First),
                ("IT 102", 1, Semester::Second),
                ("IT 201", 2, Semester::Summer),
            ]
        );
        assert_eq!(parsed.subjects[1].prerequisite, None);
        assert_eq!(parsed.subjects[2].prerequisite.as_deref(), Some("IT 101"));
        assert_eq!(parsed.subjects[3].row, 12);
    }

    #[test]
    fn rows_before_headers_and_bad_units_are_row_errors() {
        let input = rows(&[
            &["CODE", "TITLE", "UNITS"],
            &["IT 100", "Orientation", "1"],
            &["FIRST YEAR"],
            &["FIRST SEMESTER"],
            &["IT 101", "Introduction to Computing", "three"],
            &["IT 103", "Discrete Math", "3"],
        ]);
        let parsed = parse_curriculum(&input).unwrap();
        assert_eq!(parsed.subjects.len(), 1);
        let rows: Vec<usize> = parsed.errors.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![2, 5]);
        assert_eq!(parsed.errors[1].field.as_deref(), Some("units"));
    }

    #[test]
    fn sheet_without_column_header_is_rejected() {
        let input = rows(&[&["FIRST YEAR"], &["IT 101", "Intro", "3"]]);
        assert!(matches!(
            parse_curriculum(&input),
            Err(ImportParseError::MissingColumn(_))
        ));
    }

    #[test]
    fn period_cells_parse_combined_headers() {
        assert_eq!(parse_period("Third Year"), Some((Some(3), None)));
        assert_eq!(
            parse_period("FIRST YEAR - SECOND SEMESTER"),
            Some((Some(1), Some(Semester::Second)))
        );
        assert_eq!(parse_period("PRE-REQUISITE"), None);
        assert_eq!(parse_period("IT 101"), None);
    }
}
