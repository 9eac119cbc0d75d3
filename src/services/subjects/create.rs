use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{check_references, storage_failure};
use crate::utils::validate::{non_blank, normalize_subject_code, validate_units};

pub async fn create_subject(
    service: &SubjectService,
    mut subject: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = normalize_subject(&mut subject) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);
    if let Some(response) =
        check_references(
            storage.as_ref(),
            Some(subject.program_id),
            Some(subject.year_level_id),
        )
        .await
    {
        return Ok(response);
    }

    match storage.create_subject(subject).await {
        Ok(created) => {
            info!("Created subject {} ({})", created.code, created.title);
            Ok(HttpResponse::Created().json(ApiResponse::success(created, "Subject created")))
        }
        Err(e) => Ok(storage_failure(e, ErrorCode::SubjectAlreadyExists, "Create subject")),
    }
}

fn normalize_subject(subject: &mut CreateSubjectRequest) -> Result<(), &'static str> {
    subject.code = normalize_subject_code(&subject.code)?;
    subject.title = subject.title.trim().to_string();
    if subject.title.is_empty() {
        return Err("Subject title is required");
    }
    validate_units(subject.units)?;
    subject.prerequisite = non_blank(subject.prerequisite.take());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subjects::entities::Semester;

    fn request(code: &str, units: f64) -> CreateSubjectRequest {
        CreateSubjectRequest {
            code: code.to_string(),
            title: " Intro to Computing ".to_string(),
            units,
            program_id: 1,
            year_level_id: 1,
            semester: Semester::First,
            prerequisite: Some(String::new()),
        }
    }

    #[test]
    fn code_is_uppercased_and_blank_prerequisite_dropped() {
        let mut subject = request(" it  101 ", 3.0);
        normalize_subject(&mut subject).unwrap();
        assert_eq!(subject.code, "IT 101");
        assert_eq!(subject.title, "Intro to Computing");
        assert_eq!(subject.prerequisite, None);
    }

    #[test]
    fn units_must_be_positive_and_at_most_ten() {
        assert!(normalize_subject(&mut request("IT101", 0.0)).is_err());
        assert!(normalize_subject(&mut request("IT101", 10.5)).is_err());
        assert!(normalize_subject(&mut request("IT101", 10.0)).is_ok());
    }
}
