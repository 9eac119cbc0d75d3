use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{admin_role, any_role, encoder_role};
use crate::middlewares;
use crate::models::completion_exams::requests::RecordCompletionRequest;
use crate::models::grades::requests::{
    CreateGradeRequest, GradeListParams, GradeSheetExportParams, GradeSheetParams,
    UpdateGradeRequest,
};
use crate::services::GradeService;
use crate::utils::SafeIDI64;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(query.into_inner(), &req).await
}

pub async fn create_grade(
    req: HttpRequest,
    body: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(body.into_inner(), &req).await
}

pub async fn get_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(id.0, &req).await
}

pub async fn update_grade(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.update_grade(id.0, body.into_inner(), &req).await
}

pub async fn delete_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_grade(id.0, &req).await
}

pub async fn import_grade_sheet(
    req: HttpRequest,
    query: web::Query<GradeSheetParams>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .import_grade_sheet(query.into_inner(), payload, &req)
        .await
}

pub async fn export_grade_sheet(
    req: HttpRequest,
    query: web::Query<GradeSheetExportParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .export_grade_sheet(query.into_inner(), &req)
        .await
}

pub async fn completion_eligibility(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.completion_eligibility(id.0, &req).await
}

pub async fn record_completion(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<RecordCompletionRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .record_completion(id.0, body.into_inner(), &req)
        .await
}

pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .route("/import", web::post().to(import_grade_sheet).wrap(encoder_role()))
            .route("/export", web::get().to(export_grade_sheet).wrap(any_role()))
            .route("", web::get().to(list_grades).wrap(any_role()))
            .route("", web::post().to(create_grade).wrap(encoder_role()))
            .route("/{id}", web::get().to(get_grade).wrap(any_role()))
            .route("/{id}", web::put().to(update_grade).wrap(encoder_role()))
            .route("/{id}", web::delete().to(delete_grade).wrap(admin_role()))
            .route(
                "/{id}/completion",
                web::get().to(completion_eligibility).wrap(any_role()),
            )
            .route(
                "/{id}/completion",
                web::post().to(record_completion).wrap(encoder_role()),
            ),
    );
}
