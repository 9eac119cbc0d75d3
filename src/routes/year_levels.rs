use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{admin_role, any_role};
use crate::middlewares;
use crate::models::year_levels::requests::CreateYearLevelRequest;
use crate::services::YearLevelService;
use crate::utils::SafeIDI64;

static YEAR_LEVEL_SERVICE: Lazy<YearLevelService> = Lazy::new(YearLevelService::new_lazy);

pub async fn list_year_levels(req: HttpRequest) -> ActixResult<HttpResponse> {
    YEAR_LEVEL_SERVICE.list_year_levels(&req).await
}

pub async fn create_year_level(
    req: HttpRequest,
    body: web::Json<CreateYearLevelRequest>,
) -> ActixResult<HttpResponse> {
    YEAR_LEVEL_SERVICE
        .create_year_level(body.into_inner(), &req)
        .await
}

pub async fn delete_year_level(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    YEAR_LEVEL_SERVICE.delete_year_level(id.0, &req).await
}

pub fn configure_year_level_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/year-levels")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_year_levels).wrap(any_role()))
            .route("", web::post().to(create_year_level).wrap(admin_role()))
            .route(
                "/{id}",
                web::delete().to(delete_year_level).wrap(admin_role()),
            ),
    );
}
