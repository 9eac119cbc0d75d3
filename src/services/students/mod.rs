pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod grades;
pub mod import;
pub mod list;
pub mod report;
pub mod template;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::grades::entities::GradeDetail;
use crate::models::students::entities::StudentDetail;
use crate::models::students::requests::{
    CreateStudentRequest, FileFormatParams, StudentExportParams, StudentListParams,
    UpdateStudentRequest,
};
use crate::storage::Storage;
use crate::utils::grading::gwa;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    pub async fn list_students(
        &self,
        query: StudentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn create_student(
        &self,
        student: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, student, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_student(self, id, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, id, update, request).await
    }

    pub async fn delete_student(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, id, request).await
    }

    pub async fn import_students(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_students(self, payload, request).await
    }

    pub async fn export_students(
        &self,
        query: StudentExportParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_students(self, query, request).await
    }

    pub async fn import_template(&self, query: FileFormatParams) -> ActixResult<HttpResponse> {
        template::import_template(query).await
    }

    pub async fn student_grades(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::student_grades(self, id, request).await
    }

    pub async fn student_report(
        &self,
        id: i64,
        query: FileFormatParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report::student_report(self, id, query, request).await
    }
}

/// A student's record with every grade in school-year order and the GWA
pub(crate) struct StudentRecord {
    pub student: StudentDetail,
    pub grades: Vec<GradeDetail>,
    pub gwa: Option<f64>,
}

pub(crate) async fn load_record(storage: &dyn Storage, id: i64) -> Result<Option<StudentRecord>> {
    let Some(student) = storage.get_student_detail(id).await? else {
        return Ok(None);
    };
    let grades = storage.list_student_grades(id).await?;
    let gwa = gwa(grades
        .iter()
        .filter_map(|g| g.units.map(|u| (g.grade.value.as_str(), u))));

    Ok(Some(StudentRecord {
        student,
        grades,
        gwa,
    }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(crate::models::ApiResponse::error_empty(
        crate::models::ErrorCode::StudentNotFound,
        "Student not found",
    ))
}
