//! # Bootstrap Route Handlers
//!
//! Lets a client supply the database file when the server started without one.

use super::{ApiResponse, AppError, AppState};
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::Multipart;
use serde::{Deserialize, Serialize};
use std::path::Path;
use toolrec::bootstrap::install_database;
use tracing::{info, warn};

#[derive(Serialize, Deserialize)]
pub struct BootstrapStatus {
    pub database_present: bool,
    pub db_path: String,
}

#[derive(Serialize, Deserialize)]
pub struct UploadResponse {
    pub bytes_written: usize,
    pub db_path: String,
}

/// Handler for `GET /bootstrap`.
pub async fn bootstrap_status_handler(
    State(app_state): State<AppState>,
) -> Json<ApiResponse<BootstrapStatus>> {
    let db_path = app_state.config.db_url.clone();
    Json(ApiResponse {
        result: BootstrapStatus {
            database_present: app_state.store.is_present(),
            db_path,
        },
    })
}

/// Handler for `POST /bootstrap/upload`. Expects the file in a `database` field.
pub async fn bootstrap_upload_handler(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponse>>), AppError> {
    let db_path = app_state.config.db_url.clone();
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "database" => {
                info!(
                    "Received database upload: {}",
                    field.file_name().unwrap_or("recommendation.db")
                );
                upload = Some(field.bytes().await?.to_vec());
            }
            _ => warn!("Ignoring unknown multipart field: {}", name),
        }
    }

    let bytes = upload.ok_or_else(|| {
        AppError::BadRequest("Multipart field 'database' not found in request.".to_string())
    })?;

    let bytes_written = install_database(Path::new(&db_path), &bytes).await?;
    app_state.store.reset().await;
    app_state.catalog.invalidate().await;
    info!(
        db_path = %db_path,
        "Database installed; catalog will read from it on the next request."
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            result: UploadResponse {
                bytes_written,
                db_path,
            },
        }),
    ))
}
