pub mod completion;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::completion_exams::requests::RecordCompletionRequest;
use crate::models::grades::requests::{
    CreateGradeRequest, GradeListParams, GradeSheetExportParams, GradeSheetParams,
    UpdateGradeRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_failure;
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn list_grades(
        &self,
        query: GradeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, query, request).await
    }

    pub async fn create_grade(
        &self,
        grade: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, grade, request).await
    }

    pub async fn get_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_grade(self, id, request).await
    }

    pub async fn update_grade(
        &self,
        id: i64,
        update: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, id, update, request).await
    }

    pub async fn delete_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, id, request).await
    }

    pub async fn import_grade_sheet(
        &self,
        query: GradeSheetParams,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_grade_sheet(self, query, payload, request).await
    }

    pub async fn export_grade_sheet(
        &self,
        query: GradeSheetExportParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_grade_sheet(self, query, request).await
    }

    pub async fn completion_eligibility(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        completion::get_eligibility(self, id, request).await
    }

    pub async fn record_completion(
        &self,
        id: i64,
        completion: RecordCompletionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        completion::record_completion(self, id, completion, request).await
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::GradeNotFound,
        "Grade not found",
    ))
}

/// 404 response when the subject, school year or professor of a grade is missing
pub(crate) async fn check_class_references(
    storage: &dyn Storage,
    subject_id: Option<i64>,
    school_year_id: Option<i64>,
    professor_id: Option<i64>,
) -> Option<HttpResponse> {
    if let Some(id) = subject_id {
        match storage.get_subject_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::SubjectNotFound,
                    "Subject not found",
                )));
            }
            Err(e) => {
                return Some(storage_failure(
                    e,
                    ErrorCode::InternalServerError,
                    "Load subject",
                ));
            }
        }
    }
    if let Some(id) = school_year_id {
        match storage.get_school_year_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::SchoolYearNotFound,
                    "School year not found",
                )));
            }
            Err(e) => {
                return Some(storage_failure(
                    e,
                    ErrorCode::InternalServerError,
                    "Load school year",
                ));
            }
        }
    }
    if let Some(id) = professor_id {
        match storage.get_professor_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ProfessorNotFound,
                    "Professor not found",
                )));
            }
            Err(e) => {
                return Some(storage_failure(
                    e,
                    ErrorCode::InternalServerError,
                    "Load professor",
                ));
            }
        }
    }
    None
}
