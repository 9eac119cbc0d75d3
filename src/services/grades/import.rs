//! Grade sheet upload for one subject offering.

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use tracing::{info, warn};

use super::{GradeService, check_class_references};
use crate::errors::Result;
use crate::importers::grade_sheet::{ParsedGradeSheet, parse_grade_sheet};
use crate::middlewares::RequireJWT;
use crate::models::grades::requests::{GradeSheetParams, NewGrade};
use crate::models::imports::{ImportRowError, ImportSummary};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{read_uploaded_rows, storage_failure};
use crate::storage::Storage;
use crate::utils::sheet::SheetFormat;

/// Sheet values overwrite grades already recorded for the same enrollment
pub async fn import_grade_sheet(
    service: &GradeService,
    query: GradeSheetParams,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(response) = check_class_references(
        storage.as_ref(),
        Some(query.subject_id),
        Some(query.school_year_id),
        query.professor_id,
    )
    .await
    {
        return Ok(response);
    }

    let rows = match read_uploaded_rows(
        &mut payload,
        &[SheetFormat::Xlsx, SheetFormat::Csv, SheetFormat::Docx],
    )
    .await
    {
        Ok(rows) => rows,
        Err(response) => return Ok(response),
    };

    let parsed = match parse_grade_sheet(&rows) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    let encoded_by = RequireJWT::extract_user_id(request);
    match apply_grade_sheet(storage.as_ref(), &query, encoded_by, parsed).await {
        Ok(sheet) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            sheet.summary,
            "Grade sheet import finished",
        ))),
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Import grade sheet")),
    }
}

#[derive(Debug)]
pub(crate) struct AppliedSheet {
    pub summary: ImportSummary,
    /// Grades that already existed and took the sheet value
    pub overwritten: usize,
}

/// Saves every parsed entry for the class record named by `target`
pub(crate) async fn apply_grade_sheet(
    storage: &dyn Storage,
    target: &GradeSheetParams,
    encoded_by: Option<i64>,
    parsed: ParsedGradeSheet,
) -> Result<AppliedSheet> {
    let school_ids: Vec<String> = parsed.entries.iter().map(|e| e.school_id.clone()).collect();
    let students: HashMap<String, i64> = storage
        .find_students_by_school_ids(&school_ids)
        .await?
        .into_iter()
        .map(|s| (s.school_id, s.id))
        .collect();

    let mut summary = ImportSummary {
        total: parsed.total,
        ..Default::default()
    };
    for error in parsed.failed {
        summary.fail(error);
    }
    for error in parsed.skipped {
        summary.skip(error);
    }

    let mut overwritten = 0;
    for entry in parsed.entries {
        let Some(&student_id) = students.get(&entry.school_id) else {
            summary.fail(ImportRowError::new(
                entry.row,
                Some("school_id"),
                format!("Unknown student {}", entry.school_id),
            ));
            continue;
        };

        let grade = NewGrade {
            student_id,
            subject_id: target.subject_id,
            school_year_id: target.school_year_id,
            semester: target.semester,
            professor_id: target.professor_id,
            value: entry.value,
            encoded_by,
        };
        match storage.upsert_grade(grade).await {
            Ok((_, inserted)) => {
                summary.success += 1;
                if !inserted {
                    overwritten += 1;
                }
            }
            Err(e) => {
                warn!("Grade sheet row {} failed: {}", entry.row, e);
                summary.fail(ImportRowError::new(entry.row, None, e.message()));
            }
        }
    }

    summary.errors.sort_by_key(|e| e.row);
    info!(
        "Grade sheet for subject {}: {} saved ({} overwritten), {} skipped, {} failed",
        target.subject_id, summary.success, overwritten, summary.skipped, summary.failed
    );

    Ok(AppliedSheet {
        summary,
        overwritten,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::programs::requests::CreateProgramRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::subjects::{entities::Semester, requests::CreateSubjectRequest};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn class_record() -> (SeaOrmStorage, GradeSheetParams) {
        let storage = SeaOrmStorage::from_url("sqlite::memory:", 1, 5).await.unwrap();
        let program = storage
            .create_program(CreateProgramRequest {
                code: "BSIT".into(),
                name: "Bachelor of Science in Information Technology".into(),
                description: None,
            })
            .await
            .unwrap();
        let year_level_id = storage.list_year_levels().await.unwrap()[0].id;
        let school_year = storage
            .create_school_year("2024-2025".into(), 2024, 2025, true)
            .await
            .unwrap();
        let subject = storage
            .create_subject(CreateSubjectRequest {
                code: "IT101".into(),
                title: "Introduction to Computing".into(),
                units: 3.0,
                program_id: program.id,
                year_level_id,
                semester: Semester::First,
                prerequisite: None,
            })
            .await
            .unwrap();
        for (school_id, first, last) in [
            ("STU-AAAA1111", "Ana", "Lopez"),
            ("STU-BBBB2222", "Ben", "Cruz"),
        ] {
            storage
                .create_student(
                    school_id.into(),
                    CreateStudentRequest {
                        school_id: None,
                        first_name: first.into(),
                        middle_name: None,
                        last_name: last.into(),
                        suffix: None,
                        email: None,
                        program_id: program.id,
                        year_level_id,
                        status: None,
                    },
                )
                .await
                .unwrap();
        }

        let target = GradeSheetParams {
            subject_id: subject.id,
            school_year_id: school_year.id,
            semester: Semester::First,
            professor_id: None,
        };
        (storage, target)
    }

    fn sheet(data: &[&[&str]]) -> ParsedGradeSheet {
        let rows = data
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        parse_grade_sheet(&rows).unwrap()
    }

    #[tokio::test]
    async fn reimport_overwrites_and_unknown_students_fail() {
        let (storage, target) = class_record().await;

        let first = apply_grade_sheet(
            &storage,
            &target,
            None,
            sheet(&[&["STUDENT ID", "GRADE"], &["STU-AAAA1111", "2.0"]]),
        )
        .await
        .unwrap();
        assert_eq!((first.summary.success, first.overwritten), (1, 0));

        let second = apply_grade_sheet(
            &storage,
            &target,
            None,
            sheet(&[
                &["STUDENT ID", "GRADE"],
                &["STU-AAAA1111", "1.5"],
                &["STU-BBBB2222", "inc"],
                &["STU-ZZZZ9999", "1.00"],
            ]),
        )
        .await
        .unwrap();

        assert_eq!(second.overwritten, 1);
        assert_eq!((second.summary.success, second.summary.failed), (2, 1));
        assert_eq!(second.summary.errors[0].row, 4);
        assert!(second.summary.errors[0].message.contains("STU-ZZZZ9999"));

        let grades = storage
            .list_grade_sheet(target.subject_id, target.school_year_id, Semester::First)
            .await
            .unwrap();
        let values: Vec<_> = grades.iter().map(|g| g.grade.value.as_str()).collect();
        assert_eq!(values, vec!["INC", "1.50"]);
    }
}
