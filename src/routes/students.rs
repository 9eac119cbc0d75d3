use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{any_role, encoder_role};
use crate::middlewares;
use crate::models::students::requests::{
    CreateStudentRequest, FileFormatParams, StudentExportParams, StudentListParams,
    UpdateStudentRequest,
};
use crate::services::StudentService;
use crate::utils::SafeIDI64;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn create_student(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_student(body.into_inner(), &req).await
}

pub async fn get_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(id.0, &req).await
}

pub async fn update_student(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(id.0, &req).await
}

pub async fn import_students(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.import_students(payload, &req).await
}

pub async fn export_students(
    req: HttpRequest,
    query: web::Query<StudentExportParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.export_students(query.into_inner(), &req).await
}

pub async fn import_template(query: web::Query<FileFormatParams>) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.import_template(query.into_inner()).await
}

pub async fn student_grades(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.student_grades(id.0, &req).await
}

pub async fn student_report(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<FileFormatParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .student_report(id.0, query.into_inner(), &req)
        .await
}

pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            // literal paths go before `/{id}`
            .route("/import", web::post().to(import_students).wrap(encoder_role()))
            .route(
                "/import/template",
                web::get().to(import_template).wrap(any_role()),
            )
            .route("/export", web::get().to(export_students).wrap(any_role()))
            .route("", web::get().to(list_students).wrap(any_role()))
            .route("", web::post().to(create_student).wrap(encoder_role()))
            .route("/{id}", web::get().to(get_student).wrap(any_role()))
            .route("/{id}", web::put().to(update_student).wrap(encoder_role()))
            .route("/{id}", web::delete().to(delete_student).wrap(encoder_role()))
            .route("/{id}/grades", web::get().to(student_grades).wrap(any_role()))
            .route("/{id}/report", web::get().to(student_report).wrap(any_role())),
    );
}
