pub mod backup;
pub mod engine;
pub mod info;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::system::RestoreRequest;

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn get_info(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        info::get_info(self, request).await
    }

    pub async fn create_backup(&self) -> ActixResult<HttpResponse> {
        backup::create_backup(self).await
    }

    pub async fn list_backups(&self) -> ActixResult<HttpResponse> {
        backup::list_backups(self).await
    }

    pub async fn restore_backup(&self, restore: RestoreRequest) -> ActixResult<HttpResponse> {
        backup::restore_backup(self, restore).await
    }
}
