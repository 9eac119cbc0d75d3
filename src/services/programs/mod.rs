pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::programs::requests::{
    CreateProgramRequest, ProgramListParams, UpdateProgramRequest,
};
use crate::storage::Storage;

pub struct ProgramService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProgramService {
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

    pub async fn list_programs(
        &self,
        query: ProgramListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_programs(self, query, request).await
    }

    pub async fn create_program(
        &self,
        program: CreateProgramRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_program(self, program, request).await
    }

    pub async fn get_program(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_program(self, id, request).await
    }

    pub async fn update_program(
        &self,
        id: i64,
        update: UpdateProgramRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_program(self, id, update, request).await
    }

    pub async fn delete_program(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_program(self, id, request).await
    }
}
