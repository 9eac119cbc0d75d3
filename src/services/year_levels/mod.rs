pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::year_levels::requests::CreateYearLevelRequest;
use crate::storage::Storage;

pub struct YearLevelService {
    storage: Option<Arc<dyn Storage>>,
}

impl YearLevelService {
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

    pub async fn list_year_levels(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_year_levels(self, request).await
    }

    pub async fn create_year_level(
        &self,
        level: CreateYearLevelRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_year_level(self, level, request).await
    }

    pub async fn delete_year_level(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_year_level(self, id, request).await
    }
}
