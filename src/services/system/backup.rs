use actix_web::{HttpResponse, Result as ActixResult};
use std::path::Path;
use tracing::{error, info, warn};

use super::SystemService;
use super::engine::{Engine, backup_file_name, resolve_backup_path};
use crate::errors::Result;
use crate::models::system::{BackupFile, BackupListResponse, RestoreRequest};
use crate::models::{ApiResponse, ErrorCode};

async fn describe(path: &Path) -> Result<BackupFile> {
    let meta = tokio::fs::metadata(path).await?;
    Ok(BackupFile {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size: meta.len(),
        modified: meta.modified().ok().map(chrono::DateTime::<chrono::Utc>::from),
    })
}

fn failure(code: ErrorCode, action: &str, e: impl std::fmt::Display) -> HttpResponse {
    error!("{} failed: {}", action, e);
    let message = format!("{action} failed: {e}");
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(code, message))
}

pub async fn create_backup(service: &SystemService) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let engine = match Engine::from_database_url(&config.database.url) {
        Ok(engine) => engine,
        Err(e) => return Ok(failure(ErrorCode::BackupFailed, "Backup", e)),
    };

    if let Err(e) = tokio::fs::create_dir_all(&config.backup.dir).await {
        return Ok(failure(ErrorCode::BackupFailed, "Backup", e));
    }

    let out = Path::new(&config.backup.dir).join(backup_file_name(chrono::Utc::now(), &engine));
    if let Err(e) = engine.backup_command(&config.backup, &out).run().await {
        // drop a partial dump
        let _ = tokio::fs::remove_file(&out).await;
        return Ok(failure(ErrorCode::BackupFailed, "Backup", e));
    }

    match describe(&out).await {
        Ok(file) => {
            info!("Backup written to {} ({} bytes)", out.display(), file.size);
            Ok(HttpResponse::Created().json(ApiResponse::success(file, "Backup created")))
        }
        Err(e) => Ok(failure(ErrorCode::BackupFailed, "Backup", e)),
    }
}

pub async fn list_backups(service: &SystemService) -> ActixResult<HttpResponse> {
    let dir = &service.get_config().backup.dir;
    let mut items = Vec::new();

    match tokio::fs::read_dir(dir).await {
        Ok(mut entries) => loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let path = entry.path();
                    if !path.is_file() {
                        continue;
                    }
                    match describe(&path).await {
                        Ok(file) => items.push(file),
                        Err(e) => warn!("Skipping backup {}: {}", path.display(), e),
                    }
                }
                Ok(None) => break,
                Err(e) => return Ok(failure(ErrorCode::InternalServerError, "Listing backups", e)),
            }
        },
        // nothing backed up yet
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Ok(failure(ErrorCode::InternalServerError, "Listing backups", e)),
    }

    // timestamped names sort chronologically
    items.sort_by(|a, b| b.file_name.cmp(&a.file_name));
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        BackupListResponse { items },
        "Backup list retrieved",
    )))
}

pub async fn restore_backup(
    service: &SystemService,
    restore: RestoreRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let Some(path) = resolve_backup_path(&config.backup.dir, &restore.file_name) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Backup file name must be a plain file name",
        )));
    };
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BackupNotFound,
            "Backup file not found",
        )));
    }

    let engine = match Engine::from_database_url(&config.database.url) {
        Ok(engine) => engine,
        Err(e) => return Ok(failure(ErrorCode::RestoreFailed, "Restore", e)),
    };

    warn!("Restoring database from {}", path.display());
    match engine.restore_command(&config.backup, &path).run().await {
        Ok(()) => {
            info!("Database restored from {}", path.display());
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Database restored")))
        }
        Err(e) => Ok(failure(ErrorCode::RestoreFailed, "Restore", e)),
    }
}
