use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{any_role, encoder_role};
use crate::middlewares;
use crate::models::professors::requests::{
    CreateProfessorRequest, ProfessorListParams, UpdateProfessorRequest,
};
use crate::services::ProfessorService;
use crate::utils::SafeIDI64;

static PROFESSOR_SERVICE: Lazy<ProfessorService> = Lazy::new(ProfessorService::new_lazy);

pub async fn list_professors(
    req: HttpRequest,
    query: web::Query<ProfessorListParams>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE.list_professors(query.into_inner(), &req).await
}

pub async fn create_professor(
    req: HttpRequest,
    body: web::Json<CreateProfessorRequest>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE.create_professor(body.into_inner(), &req).await
}

pub async fn get_professor(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE.get_professor(id.0, &req).await
}

pub async fn update_professor(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateProfessorRequest>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .update_professor(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_professor(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE.delete_professor(id.0, &req).await
}

pub fn configure_professor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/professors")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_professors).wrap(any_role()))
            .route("", web::post().to(create_professor).wrap(encoder_role()))
            .route("/{id}", web::get().to(get_professor).wrap(any_role()))
            .route("/{id}", web::put().to(update_professor).wrap(encoder_role()))
            .route(
                "/{id}",
                web::delete().to(delete_professor).wrap(encoder_role()),
            ),
    );
}
