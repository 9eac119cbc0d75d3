//! Grade sheets handed in by professors: a student ID column and a grade column
//! somewhere below a title block.

use std::collections::HashSet;

use super::{ImportParseError, header_text, row_number};
use crate::models::imports::ImportRowError;
use crate::utils::grading;
use crate::utils::sheet::{Rows, is_blank_row};

const ID_HEADERS: [&str; 5] = ["STUDENT ID", "SCHOOL ID", "ID NUMBER", "ID NO.", "ID NO"];
const GRADE_HEADERS: [&str; 3] = ["GRADE", "FINAL GRADE", "RATING"];

#[derive(Debug, Clone, PartialEq)]
pub struct GradeSheetEntry {
    pub row: usize,
    pub school_id: String,
    /// Normalized grade value
    pub value: String,
}

#[derive(Debug, Default)]
pub struct ParsedGradeSheet {
    pub total: usize,
    pub entries: Vec<GradeSheetEntry>,
    pub failed: Vec<ImportRowError>,
    /// Later rows for a student already on the sheet
    pub skipped: Vec<ImportRowError>,
}

/// Positions of the ID and grade columns when `row` is a header row
fn header_columns(row: &[String]) -> Option<(usize, usize)> {
    let headers: Vec<String> = row.iter().map(|c| header_text(c)).collect();
    let id = headers.iter().position(|h| ID_HEADERS.contains(&h.as_str()))?;
    let grade = headers
        .iter()
        .position(|h| GRADE_HEADERS.contains(&h.as_str()))?;
    Some((id, grade))
}

pub fn parse_grade_sheet(rows: &Rows) -> Result<ParsedGradeSheet, ImportParseError> {
    let (header_idx, (id_col, grade_col)) = rows
        .iter()
        .enumerate()
        .find_map(|(idx, row)| header_columns(row).map(|cols| (idx, cols)))
        .ok_or_else(|| {
            ImportParseError::MissingColumn("STUDENT ID and GRADE header row".to_string())
        })?;

    let mut parsed = ParsedGradeSheet::default();
    let mut seen = HashSet::new();

    for (idx, row) in rows.iter().enumerate().skip(header_idx + 1) {
        // tables split across pages repeat their header
        if is_blank_row(row) || header_columns(row).is_some() {
            continue;
        }

        let school_id = row
            .get(id_col)
            .map(|c| c.trim().to_uppercase())
            .unwrap_or_default();
        if school_id.is_empty() {
            continue;
        }

        parsed.total += 1;
        let row_num = row_number(idx);
        let raw = row.get(grade_col).map(|c| c.trim()).unwrap_or("");

        if raw.is_empty() {
            parsed.failed.push(ImportRowError::new(
                row_num,
                Some("grade"),
                format!("No grade given for {school_id}"),
            ));
            continue;
        }
        let value = match grading::normalize(raw) {
            Ok(value) => value,
            Err(e) => {
                parsed
                    .failed
                    .push(ImportRowError::new(row_num, Some("grade"), e.message()));
                continue;
            }
        };

        if !seen.insert(school_id.clone()) {
            parsed.skipped.push(ImportRowError::new(
                row_num,
                Some("school_id"),
                format!("{school_id} appears more than once on the sheet"),
            ));
            continue;
        }

        parsed.entries.push(GradeSheetEntry {
            row: row_num,
            school_id,
            value,
        });
    }

    if parsed.total == 0 {
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
    fn entries_follow_the_first_header_row() {
        let input = rows(&[
            &["GRADE SHEET", "", ""],
            &["Subject: IT 101", "", ""],
            &["No.", "Student ID", "Name", "Final Grade"],
            &["1", "stu-aaaa1111", "Lopez, Ana", "1.5"],
            &["2", "STU-BBBB2222", "Cruz, Ben", "inc"],
            &["3", "", "", ""],
            &["No.", "STUDENT ID", "NAME", "FINAL GRADE"],
            &["4", "STU-CCCC3333", "Diaz, Carl", "5"],
        ]);
        let parsed = parse_grade_sheet(&input).unwrap();
        assert!(parsed.failed.is_empty());
        let entries: Vec<_> = parsed
            .entries
            .iter()
            .map(|e| (e.row, e.school_id.as_str(), e.value.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![
                (4, "STU-AAAA1111", "1.50"),
                (5, "STU-BBBB2222", "INC"),
                (8, "STU-CCCC3333", "5.00"),
            ]
        );
    }

    #[test]
    fn invalid_and_missing_grades_are_row_errors() {
        let input = rows(&[
            &["ID NO.", "RATING"],
            &["STU-AAAA1111", "3.5"],
            &["STU-BBBB2222", ""],
            &["STU-CCCC3333", "2.25"],
            &["STU-CCCC3333", "2.00"],
        ]);
        let parsed = parse_grade_sheet(&input).unwrap();
        assert_eq!(parsed.total, 4);
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.failed.iter().map(|e| e.row).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(parsed.skipped[0].row, 5);
    }

    #[test]
    fn sheet_without_header_is_rejected() {
        let input = rows(&[&["Name", "Grade"], &["Ana", "1.00"]]);
        assert!(matches!(
            parse_grade_sheet(&input),
            Err(ImportParseError::MissingColumn(_))
        ));
    }
}
