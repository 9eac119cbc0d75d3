use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{admin_role, any_role};
use crate::middlewares;
use crate::models::school_years::requests::{CreateSchoolYearRequest, UpdateSchoolYearRequest};
use crate::services::SchoolYearService;
use crate::utils::SafeIDI64;

static SCHOOL_YEAR_SERVICE: Lazy<SchoolYearService> = Lazy::new(SchoolYearService::new_lazy);

pub async fn list_school_years(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE.list_school_years(&req).await
}

pub async fn create_school_year(
    req: HttpRequest,
    body: web::Json<CreateSchoolYearRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE
        .create_school_year(body.into_inner(), &req)
        .await
}

pub async fn get_school_year(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE.get_school_year(id.0, &req).await
}

pub async fn get_current_school_year(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE.get_current_school_year(&req).await
}

pub async fn update_school_year(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSchoolYearRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE
        .update_school_year(id.0, body.into_inner(), &req)
        .await
}

pub async fn set_current_school_year(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE.set_current_school_year(id.0, &req).await
}

pub async fn delete_school_year(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE.delete_school_year(id.0, &req).await
}

pub fn configure_school_year_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/school-years")
            .wrap(middlewares::RequireJWT)
            .route(
                "/current",
                web::get().to(get_current_school_year).wrap(any_role()),
            )
            .route("", web::get().to(list_school_years).wrap(any_role()))
            .route("", web::post().to(create_school_year).wrap(admin_role()))
            .route("/{id}", web::get().to(get_school_year).wrap(any_role()))
            .route("/{id}", web::put().to(update_school_year).wrap(admin_role()))
            .route(
                "/{id}",
                web::delete().to(delete_school_year).wrap(admin_role()),
            )
            .route(
                "/{id}/current",
                web::post().to(set_current_school_year).wrap(admin_role()),
            ),
    );
}
