pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::completion_exams::requests::CompletionExamListParams;
use crate::storage::Storage;

pub struct CompletionExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl CompletionExamService {
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

    pub async fn list_completion_exams(
        &self,
        query: CompletionExamListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_completion_exams(self, query, request).await
    }
}
