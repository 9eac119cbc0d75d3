//! Curriculum spreadsheet upload for one program.

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use super::SubjectService;
use crate::errors::Result;
use crate::importers::curriculum::{CurriculumSubject, ParsedCurriculum, parse_curriculum};
use crate::models::imports::{ImportRowError, ImportSummary};
use crate::models::subjects::requests::{CreateSubjectRequest, CurriculumImportParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{check_references, read_uploaded_rows, storage_failure};
use crate::storage::Storage;
use crate::utils::sheet::SheetFormat;

pub async fn import_curriculum(
    service: &SubjectService,
    query: CurriculumImportParams,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let program_id = query.program_id;

    if let Some(response) = check_references(storage.as_ref(), Some(program_id), None).await {
        return Ok(response);
    }

    let formats = [SheetFormat::Xlsx, SheetFormat::Csv];
    let rows = match read_uploaded_rows(&mut payload, &formats).await {
        Ok(rows) => rows,
        Err(response) => return Ok(response),
    };

    let parsed = match parse_curriculum(&rows) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    match apply_curriculum(storage.as_ref(), program_id, parsed).await {
        Ok(summary) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "Curriculum import finished")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::InternalServerError, "Import curriculum")),
    }
}

/// Creates the parsed subjects under `program_id`; codes the program already has are skipped
pub(crate) async fn apply_curriculum(
    storage: &dyn Storage,
    program_id: i64,
    parsed: ParsedCurriculum,
) -> Result<ImportSummary> {
    let year_levels: HashMap<i32, i64> = storage
        .list_year_levels()
        .await?
        .into_iter()
        .map(|y| (y.level, y.id))
        .collect();
    let mut known_codes: HashSet<String> = storage
        .list_subject_codes(program_id)
        .await?
        .into_iter()
        .collect();

    let mut summary = ImportSummary {
        total: parsed.total(),
        ..Default::default()
    };
    for error in parsed.errors {
        summary.fail(error);
    }

    for subject in parsed.subjects {
        let row = subject.row;

        if known_codes.contains(&subject.code) {
            summary.skip(ImportRowError::new(
                row,
                Some("code"),
                format!("Subject {} already exists in this program", subject.code),
            ));
            continue;
        }

        let Some(&year_level_id) = year_levels.get(&subject.year_level) else {
            summary.fail(ImportRowError::new(
                row,
                Some("year_level"),
                format!("Year level {} is not configured", subject.year_level),
            ));
            continue;
        };

        let code = subject.code.clone();
        match storage
            .create_subject(into_request(subject, program_id, year_level_id))
            .await
        {
            Ok(_) => {
                summary.success += 1;
                known_codes.insert(code);
            }
            Err(e) if e.is_conflict() => summary.skip(ImportRowError::new(
                row,
                Some("code"),
                format!("Subject {code} already exists in this program"),
            )),
            Err(e) => {
                warn!("Curriculum import row {} failed: {}", row, e);
                summary.fail(ImportRowError::new(row, None, e.message()));
            }
        }
    }

    summary.errors.sort_by_key(|e| e.row);
    info!(
        "Curriculum import for program {}: {} created, {} skipped, {} failed",
        program_id, summary.success, summary.skipped, summary.failed
    );
    Ok(summary)
}

fn into_request(
    subject: CurriculumSubject,
    program_id: i64,
    year_level_id: i64,
) -> CreateSubjectRequest {
    CreateSubjectRequest {
        code: subject.code,
        title: subject.title,
        units: subject.units,
        program_id,
        year_level_id,
        semester: subject.semester,
        prerequisite: subject.prerequisite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::programs::requests::CreateProgramRequest;
    use crate::models::subjects::entities::Semester;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn curriculum(data: &[&[&str]]) -> ParsedCurriculum {
        let rows = data
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        parse_curriculum(&rows).unwrap()
    }

    #[tokio::test]
    async fn codes_already_in_the_program_are_skipped() {
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
        storage
            .create_subject(CreateSubjectRequest {
                code: "IT 101".into(),
                title: "Introduction to Computing".into(),
                units: 3.0,
                program_id: program.id,
                year_level_id,
                semester: Semester::First,
                prerequisite: None,
            })
            .await
            .unwrap();

        let summary = apply_curriculum(
            &storage,
            program.id,
            curriculum(&[
                &["FIRST YEAR - FIRST SEMESTER", "", ""],
                &["CODE", "DESCRIPTIVE TITLE", "UNITS"],
                &["IT 101", "Introduction to Computing", "3"],
                &["GE 1", "Understanding the Self", "3"],
                &["FIFTH YEAR - FIRST SEMESTER", "", ""],
                &["CODE", "DESCRIPTIVE TITLE", "UNITS"],
                &["IT 501", "Capstone 3", "3"],
            ]),
        )
        .await
        .unwrap();

        assert_eq!(
            (summary.total, summary.success, summary.skipped, summary.failed),
            (3, 1, 1, 1)
        );
        let fields: Vec<_> = summary.errors.iter().map(|e| (e.row, e.field.as_deref())).collect();
        assert_eq!(fields, vec![(3, Some("code")), (7, Some("year_level"))]);

        let mut codes = storage.list_subject_codes(program.id).await.unwrap();
        codes.sort();
        assert_eq!(codes, vec!["GE 1".to_string(), "IT 101".to_string()]);
    }
}
