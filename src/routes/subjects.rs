use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{any_role, encoder_role};
use crate::middlewares;
use crate::models::subjects::requests::{
    CreateSubjectRequest, CurriculumImportParams, SubjectListParams, UpdateSubjectRequest,
};
use crate::services::SubjectService;
use crate::utils::SafeIDI64;

static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectListParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(query.into_inner(), &req).await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.create_subject(body.into_inner(), &req).await
}

pub async fn get_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(id.0, &req).await
}

pub async fn update_subject(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(id.0, &req).await
}

pub async fn import_curriculum(
    req: HttpRequest,
    query: web::Query<CurriculumImportParams>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .import_curriculum(query.into_inner(), payload, &req)
        .await
}

pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .route("/import", web::post().to(import_curriculum).wrap(encoder_role()))
            .route("", web::get().to(list_subjects).wrap(any_role()))
            .route("", web::post().to(create_subject).wrap(encoder_role()))
            .route("/{id}", web::get().to(get_subject).wrap(any_role()))
            .route("/{id}", web::put().to(update_subject).wrap(encoder_role()))
            .route("/{id}", web::delete().to(delete_subject).wrap(encoder_role())),
    );
}
