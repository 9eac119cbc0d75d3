use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::system::RestoreRequest;
use crate::models::users::entities::UserRole;
use crate::services::SystemService;

static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn get_info(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_info(&request).await
}

pub async fn create_backup() -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.create_backup().await
}

pub async fn list_backups() -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.list_backups().await
}

pub async fn restore_backup(body: web::Json<RestoreRequest>) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.restore_backup(body.into_inner()).await
}

pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .route("/info", web::get().to(get_info))
            .service(
                web::scope("")
                    // last wrap runs first
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .wrap(middlewares::RequireJWT)
                    .route("/backup", web::post().to(create_backup))
                    .route("/backups", web::get().to(list_backups))
                    .route("/restore", web::post().to(restore_backup)),
            ),
    );
}
