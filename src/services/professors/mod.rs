pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::professors::requests::{
    CreateProfessorRequest, ProfessorListParams, UpdateProfessorRequest,
};
use crate::storage::Storage;

pub struct ProfessorService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfessorService {
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

    pub async fn list_professors(
        &self,
        query: ProfessorListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_professors(self, query, request).await
    }

    pub async fn create_professor(
        &self,
        professor: CreateProfessorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_professor(self, professor, request).await
    }

    pub async fn get_professor(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_professor(self, id, request).await
    }

    pub async fn update_professor(
        &self,
        id: i64,
        update: UpdateProfessorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_professor(self, id, update, request).await
    }

    pub async fn delete_professor(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_professor(self, id, request).await
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(crate::models::ApiResponse::error_empty(
        crate::models::ErrorCode::ProfessorNotFound,
        "Professor not found",
    ))
}
