use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::multipart::MultipartError;
use serde_json::json;
use toolrec::{bootstrap::BootstrapError, CatalogError, StoreError};
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors from catalog operations, including the caller-side presence checks.
    Catalog(CatalogError),
    /// Errors from installing an uploaded database.
    Bootstrap(BootstrapError),
    /// A malformed or oversized multipart body.
    Multipart(MultipartError),
    /// A requested record does not exist.
    NotFound(String),
    /// The request was malformed.
    BadRequest(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::Catalog(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Catalog(CatalogError::Store(err))
    }
}

impl From<BootstrapError> for AppError {
    fn from(err: BootstrapError) -> Self {
        AppError::Bootstrap(err)
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Multipart(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Catalog(err) => {
                error!("CatalogError: {:?}", err);
                let status = match &err {
                    CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
                    CatalogError::Store(StoreError::DuplicateKey(_)) => StatusCode::CONFLICT,
                    CatalogError::Store(StoreError::DataUnavailable(_)) => {
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                    CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            AppError::Bootstrap(err) => {
                error!("BootstrapError: {:?}", err);
                let status = match &err {
                    BootstrapError::AlreadyPresent(_) => StatusCode::CONFLICT,
                    BootstrapError::EmptyUpload => StatusCode::BAD_REQUEST,
                    BootstrapError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            AppError::Multipart(err) => {
                error!("MultipartError: {:?}", err);
                (err.status(), err.body_text())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
