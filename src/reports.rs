//! Printable tables: a student's grade report and a class grade sheet.

use crate::models::grades::entities::GradeDetail;
use crate::models::school_years::entities::SchoolYear;
use crate::models::students::entities::StudentDetail;
use crate::models::subjects::entities::{Semester, Subject};
use crate::utils::grading::remarks_of;
use crate::utils::table_export::Table;

const STUDENT_REPORT_HEADERS: [&str; 7] = [
    "School Year",
    "Semester",
    "Code",
    "Descriptive Title",
    "Units",
    "Grade",
    "Remarks",
];

const GRADE_SHEET_HEADERS: [&str; 5] = ["No.", "School ID", "Name", "Grade", "Remarks"];

fn remarks_label(value: &str) -> String {
    remarks_of(value)
        .map(|r| r.label().to_string())
        .unwrap_or_default()
}

fn format_units(units: Option<f64>) -> String {
    units.map(|u| format!("{u:.1}")).unwrap_or_default()
}

/// Header block, one line per grade in the order given, then units and GWA
pub fn student_report(student: &StudentDetail, grades: &[GradeDetail], gwa: Option<f64>) -> Table {
    let mut table = Table::new(STUDENT_REPORT_HEADERS)
        .preamble("School ID", student.student.school_id.as_str())
        .preamble("Name", student.full_name.as_str())
        .preamble("Program", student.program_code.clone().unwrap_or_default())
        .preamble("Year Level", student.year_level_name.clone().unwrap_or_default());

    for grade in grades {
        table.push_row(vec![
            grade.school_year_name.clone().unwrap_or_default(),
            grade.grade.semester.label().to_string(),
            grade.subject_code.clone().unwrap_or_default(),
            grade.subject_title.clone().unwrap_or_default(),
            format_units(grade.units),
            grade.grade.value.clone(),
            remarks_label(&grade.grade.value),
        ]);
    }

    let total_units: f64 = grades.iter().filter_map(|g| g.units).sum();
    table
        .footer("Total Units", format!("{total_units:.1}"))
        .footer("GWA", gwa.map(|g| format!("{g:.4}")).unwrap_or_else(|| "N/A".to_string()))
}

/// Class record of one subject offering, one numbered line per student
pub fn grade_sheet(
    subject: &Subject,
    school_year: &SchoolYear,
    semester: Semester,
    grades: &[GradeDetail],
) -> Table {
    let mut table = Table::new(GRADE_SHEET_HEADERS)
        .preamble("Subject", format!("{} - {}", subject.code, subject.title))
        .preamble("Units", format!("{:.1}", subject.units))
        .preamble("School Year", school_year.name.as_str())
        .preamble("Semester", semester.label());

    for (idx, grade) in grades.iter().enumerate() {
        table.push_row(vec![
            (idx + 1).to_string(),
            grade.student_school_id.clone().unwrap_or_default(),
            grade.student_sortable_name.clone().unwrap_or_default(),
            grade.grade.value.clone(),
            remarks_label(&grade.grade.value),
        ]);
    }

    table.footer("Students", grades.len().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::Grade;
    use crate::models::students::entities::{Student, StudentStatus};

    fn detail(value: &str, code: &str, units: f64) -> GradeDetail {
        let now = chrono::Utc::now();
        GradeDetail {
            grade: Grade {
                id: 1,
                student_id: 1,
                subject_id: 1,
                professor_id: None,
                school_year_id: 1,
                semester: Semester::First,
                value: value.to_string(),
                remarks: remarks_of(value),
                encoded_by: None,
                created_at: now,
                updated_at: now,
            },
            student_school_id: Some("STU-AAAA1111".to_string()),
            student_name: Some("Ana Cruz Lopez".to_string()),
            student_sortable_name: Some("Lopez, Ana C.".to_string()),
            subject_code: Some(code.to_string()),
            subject_title: Some("Programming".to_string()),
            units: Some(units),
            school_year_name: Some("2024-2025".to_string()),
            professor_name: None,
            completed: false,
        }
    }

    fn student() -> StudentDetail {
        let now = chrono::Utc::now();
        StudentDetail {
            student: Student {
                id: 1,
                school_id: "STU-AAAA1111".to_string(),
                first_name: "Ana".to_string(),
                middle_name: Some("Cruz".to_string()),
                last_name: "Lopez".to_string(),
                suffix: None,
                email: None,
                program_id: 1,
                year_level_id: 1,
                status: StudentStatus::Enrolled,
                created_at: now,
                updated_at: now,
            },
            full_name: "Ana Cruz Lopez".to_string(),
            program_code: Some("BSIT".to_string()),
            year_level_name: Some("First Year".to_string()),
        }
    }

    #[test]
    fn student_report_lists_grades_and_gwa() {
        let grades = vec![detail("1.50", "IT101", 3.0), detail("INC", "IT102", 2.0)];
        let table = student_report(&student(), &grades, Some(1.5));

        assert_eq!(table.preamble[0], ("School ID".to_string(), "STU-AAAA1111".to_string()));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][2], "IT101");
        assert_eq!(table.rows[1][6], "Incomplete");
        assert_eq!(table.footer[0].1, "5.0");
        assert_eq!(table.footer[1].1, "1.5000");
    }

    #[test]
    fn report_without_numeric_grades_has_no_gwa() {
        let table = student_report(&student(), &[], None);
        assert_eq!(table.footer[1].1, "N/A");
    }

    #[test]
    fn grade_sheet_numbers_students_with_sortable_names() {
        let now = chrono::Utc::now();
        let subject = Subject {
            id: 1,
            code: "IT101".to_string(),
            title: "Programming".to_string(),
            units: 3.0,
            program_id: 1,
            year_level_id: 1,
            semester: Semester::First,
            prerequisite: None,
            created_at: now,
            updated_at: now,
        };
        let school_year = SchoolYear {
            id: 1,
            name: "2024-2025".to_string(),
            start_year: 2024,
            end_year: 2025,
            is_current: true,
            created_at: now,
            updated_at: now,
        };

        let rows = [detail("5.00", "IT101", 3.0)];
        let table = grade_sheet(&subject, &school_year, Semester::First, &rows);
        assert_eq!(table.preamble[0].1, "IT101 - Programming");
        assert_eq!(
            table.rows[0],
            vec!["1", "STU-AAAA1111", "Lopez, Ana C.", "5.00", "Failed"]
        );
    }
}
