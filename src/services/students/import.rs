//! Student roster upload.

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use super::StudentService;
use crate::errors::Result;
use crate::importers::student::{
    ParsedStudents, StudentRow, parse_student_rows, resolve_year_level,
};
use crate::models::imports::{ImportRowError, ImportSummary};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{read_uploaded_rows, storage_failure};
use crate::storage::Storage;
use crate::utils::id_gen::{generate_school_id, generate_unused};
use crate::utils::sheet::SheetFormat;

pub async fn import_students(
    service: &StudentService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let formats = [SheetFormat::Xlsx, SheetFormat::Csv];
    let rows = match read_uploaded_rows(&mut payload, &formats).await {
        Ok(rows) => rows,
        Err(response) => return Ok(response),
    };

    let parsed = match parse_student_rows(&rows, service.get_config().import.max_rows) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    let storage = service.get_storage(request);
    match apply_student_rows(storage.as_ref(), parsed).await {
        Ok(summary) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "Student import finished")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Import students")),
    }
}

/// Creates the parsed rows. School IDs already on file are skipped, not failed.
pub(crate) async fn apply_student_rows(
    storage: &dyn Storage,
    parsed: ParsedStudents,
) -> Result<ImportSummary> {
    let programs: HashMap<String, i64> = storage
        .list_all_programs()
        .await?
        .into_iter()
        .map(|p| (p.code, p.id))
        .collect();
    let year_levels = storage.list_year_levels().await?;

    let supplied_ids: Vec<String> = parsed
        .rows
        .iter()
        .filter_map(|r| r.school_id.clone())
        .collect();
    let existing: HashSet<String> = storage
        .existing_school_ids(&supplied_ids)
        .await?
        .into_iter()
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

    for row in parsed.rows {
        let row_num = row.row;

        if let Some(id) = &row.school_id
            && existing.contains(id)
        {
            summary.skip(ImportRowError::new(
                row_num,
                Some("school_id"),
                format!("School ID {id} already exists"),
            ));
            continue;
        }

        let Some(&program_id) = programs.get(&row.program) else {
            summary.fail(ImportRowError::new(
                row_num,
                Some("program"),
                format!("Unknown program {}", row.program),
            ));
            continue;
        };
        let Some(year_level_id) = resolve_year_level(&row.year_level, &year_levels) else {
            summary.fail(ImportRowError::new(
                row_num,
                Some("year_level"),
                format!("Unknown year level {}", row.year_level),
            ));
            continue;
        };

        let school_id = match row.school_id.clone() {
            Some(id) => id,
            None => {
                let generated = generate_unused(generate_school_id, |id| async move {
                    storage.school_id_exists(&id).await
                })
                .await;
                match generated {
                    Ok(id) => id,
                    Err(e) => {
                        summary.fail(ImportRowError::new(row_num, Some("school_id"), e.message()));
                        continue;
                    }
                }
            }
        };

        match storage
            .create_student(school_id.clone(), into_request(row, program_id, year_level_id))
            .await
        {
            Ok(_) => summary.success += 1,
            Err(e) if e.is_conflict() => summary.skip(ImportRowError::new(
                row_num,
                Some("school_id"),
                format!("School ID {school_id} already exists"),
            )),
            Err(e) => {
                warn!("Student import row {} failed: {}", row_num, e);
                summary.fail(ImportRowError::new(row_num, None, e.message()));
            }
        }
    }

    summary.errors.sort_by_key(|e| e.row);
    info!(
        "Student import: {} created, {} skipped, {} failed of {}",
        summary.success, summary.skipped, summary.failed, summary.total
    );
    Ok(summary)
}

fn into_request(row: StudentRow, program_id: i64, year_level_id: i64) -> CreateStudentRequest {
    CreateStudentRequest {
        school_id: None,
        first_name: row.first_name,
        middle_name: row.middle_name,
        last_name: row.last_name,
        suffix: row.suffix,
        email: row.email.map(|e| e.to_lowercase()),
        program_id,
        year_level_id,
        status: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::programs::requests::CreateProgramRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn storage_with_program() -> SeaOrmStorage {
        let storage = SeaOrmStorage::from_url("sqlite::memory:", 1, 5).await.unwrap();
        storage
            .create_program(CreateProgramRequest {
                code: "BSIT".into(),
                name: "Bachelor of Science in Information Technology".into(),
                description: None,
            })
            .await
            .unwrap();
        storage
    }

    fn roster(data: &[&[&str]]) -> ParsedStudents {
        let rows = data
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        parse_student_rows(&rows, 100).unwrap()
    }

    const HEADER: &[&str] = &["School ID", "First Name", "Last Name", "Program", "Year Level"];

    #[tokio::test]
    async fn existing_school_ids_are_skipped() {
        let storage = storage_with_program().await;
        let first = apply_student_rows(
            &storage,
            roster(&[HEADER, &["STU-AAAA1111", "Ana", "Lopez", "BSIT", "1"]]),
        )
        .await
        .unwrap();
        assert_eq!(first.success, 1);

        let second = apply_student_rows(
            &storage,
            roster(&[
                HEADER,
                &["STU-AAAA1111", "Ana", "Lopez", "BSIT", "1"],
                &["STU-BBBB2222", "Ben", "Cruz", "BSIT", "2"],
                &["", "Cy", "Reyes", "BSIT", "First Year"],
            ]),
        )
        .await
        .unwrap();

        assert_eq!((second.total, second.success, second.skipped, second.failed), (3, 2, 1, 0));
        assert_eq!(second.errors[0].row, 2);
        assert_eq!(second.errors[0].field.as_deref(), Some("school_id"));
    }

    #[tokio::test]
    async fn unknown_program_and_year_level_fail_the_row() {
        let storage = storage_with_program().await;
        let summary = apply_student_rows(
            &storage,
            roster(&[
                HEADER,
                &["STU-AAAA1111", "Ana", "Lopez", "BSCS", "1"],
                &["STU-BBBB2222", "Ben", "Cruz", "BSIT", "9"],
            ]),
        )
        .await
        .unwrap();

        assert_eq!((summary.success, summary.failed), (0, 2));
        let fields: Vec<_> = summary.errors.iter().map(|e| e.field.as_deref()).collect();
        assert_eq!(fields, vec![Some("program"), Some("year_level")]);
    }
}
