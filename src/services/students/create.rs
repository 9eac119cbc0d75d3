use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{check_references, storage_failure};
use crate::utils::id_gen::{generate_school_id, generate_unused, is_valid_school_id};
use crate::utils::validate::{non_blank, validate_email, validate_name_part};

pub async fn create_student(
    service: &StudentService,
    mut student: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = normalize_student(&mut student) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    if let Some(response) =
        check_references(
            storage.as_ref(),
            Some(student.program_id),
            Some(student.year_level_id),
        )
        .await
    {
        return Ok(response);
    }

    let school_id = match student.school_id.take() {
        Some(id) => {
            if !is_valid_school_id(&id) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::StudentIdInvalid,
                    "School ID must look like STU-XXXXXXXX",
                )));
            }
            id
        }
        None => {
            let generated = generate_unused(generate_school_id, |id| {
                let storage = storage.clone();
                async move { storage.school_id_exists(&id).await }
            })
            .await;
            match generated {
                Ok(id) => id,
                Err(e) => {
                    return Ok(storage_failure(
                        e,
                        ErrorCode::StudentAlreadyExists,
                        "Generate school ID",
                    ));
                }
            }
        }
    };

    match storage.create_student(school_id, student).await {
        Ok(created) => {
            info!("Created student {} ({})", created.school_id, created.full_name());
            Ok(HttpResponse::Created().json(ApiResponse::success(created, "Student created")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::StudentAlreadyExists, "Create student")),
    }
}

/// Trims and validates the free-text fields in place
fn normalize_student(student: &mut CreateStudentRequest) -> Result<(), String> {
    student.first_name = validate_name_part(&student.first_name, "First name")?;
    student.last_name = validate_name_part(&student.last_name, "Last name")?;
    student.middle_name = non_blank(student.middle_name.take());
    student.suffix = non_blank(student.suffix.take());
    student.school_id = non_blank(student.school_id.take()).map(|id| id.to_uppercase());
    student.email = non_blank(student.email.take()).map(|e| e.to_lowercase());
    if let Some(email) = &student.email {
        validate_email(email)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            school_id: Some(" stu-abcd1234 ".to_string()),
            first_name: "  Ana ".to_string(),
            middle_name: Some("  ".to_string()),
            last_name: "Lopez".to_string(),
            suffix: None,
            email: Some("Ana.Lopez@School.EDU".to_string()),
            program_id: 1,
            year_level_id: 1,
            status: None,
        }
    }

    #[test]
    fn fields_are_trimmed_and_blank_optionals_dropped() {
        let mut student = request();
        normalize_student(&mut student).unwrap();
        assert_eq!(student.first_name, "Ana");
        assert_eq!(student.middle_name, None);
        assert_eq!(student.school_id.as_deref(), Some("STU-ABCD1234"));
        assert_eq!(student.email.as_deref(), Some("ana.lopez@school.edu"));
    }

    #[test]
    fn missing_names_and_bad_emails_are_rejected() {
        let mut student = request();
        student.last_name = " ".to_string();
        assert!(normalize_student(&mut student).is_err());

        let mut student = request();
        student.email = Some("not-an-email".to_string());
        assert!(normalize_student(&mut student).is_err());
    }
}
