use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{admin_role, any_role};
use crate::middlewares;
use crate::models::programs::requests::{
    CreateProgramRequest, ProgramListParams, UpdateProgramRequest,
};
use crate::services::ProgramService;
use crate::utils::SafeIDI64;

static PROGRAM_SERVICE: Lazy<ProgramService> = Lazy::new(ProgramService::new_lazy);

pub async fn list_programs(
    req: HttpRequest,
    query: web::Query<ProgramListParams>,
) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.list_programs(query.into_inner(), &req).await
}

pub async fn create_program(
    req: HttpRequest,
    body: web::Json<CreateProgramRequest>,
) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.create_program(body.into_inner(), &req).await
}

pub async fn get_program(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.get_program(id.0, &req).await
}

pub async fn update_program(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateProgramRequest>,
) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE
        .update_program(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_program(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.delete_program(id.0, &req).await
}

pub fn configure_program_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/programs")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_programs).wrap(any_role()))
            .route("", web::post().to(create_program).wrap(admin_role()))
            .route("/{id}", web::get().to(get_program).wrap(any_role()))
            .route("/{id}", web::put().to(update_program).wrap(admin_role()))
            .route("/{id}", web::delete().to(delete_program).wrap(admin_role())),
    );
}
