use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::completion_exams::requests::CompletionExamListParams;
use crate::models::users::entities::UserRole;
use crate::services::CompletionExamService;

static COMPLETION_EXAM_SERVICE: Lazy<CompletionExamService> =
    Lazy::new(CompletionExamService::new_lazy);

pub async fn list_completion_exams(
    req: HttpRequest,
    query: web::Query<CompletionExamListParams>,
) -> ActixResult<HttpResponse> {
    COMPLETION_EXAM_SERVICE
        .list_completion_exams(query.into_inner(), &req)
        .await
}

pub fn configure_completion_exam_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/completion-exams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::all_roles()))
                    .route("", web::get().to(list_completion_exams)),
            ),
    );
}
