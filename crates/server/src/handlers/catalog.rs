//! # Catalog Route Handlers
//!
//! The user, tool and recommendation endpoints. Table reads answer with a
//! `TableResponse`, so a missing database renders as an empty table with
//! `data_unavailable` set rather than an error.

use super::{ApiResponse, AppError, AppState, TableResponse, ToolFilter};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use toolrec::{NewUser, Tool, User};
use tracing::info;

/// Handler for `GET /users`.
pub async fn list_users_handler(
    State(app_state): State<AppState>,
) -> Result<Json<TableResponse<User>>, AppError> {
    let response = TableResponse::from_load(app_state.catalog.load_users().await)?;
    Ok(Json(response))
}

/// Handler for `GET /users/{user_id}`.
pub async fn get_user_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = app_state
        .catalog
        .find_user(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{user_id}' not found.")))?;
    Ok(Json(ApiResponse { result: user }))
}

/// Handler for `POST /users`.
pub async fn add_user_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    info!("Received add-user request for '{}'", payload.user_id);
    let user = app_state.catalog.add_user(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse { result: user })))
}

/// Handler for `GET /tools`, optionally narrowed to one `Category`.
pub async fn list_tools_handler(
    State(app_state): State<AppState>,
    Query(filter): Query<ToolFilter>,
) -> Result<Json<TableResponse<Tool>>, AppError> {
    let result = match filter.category.as_deref() {
        Some(category) => app_state.catalog.load_tools_in_category(category).await,
        None => app_state.catalog.load_tools().await,
    };
    Ok(Json(TableResponse::from_load(result)?))
}

/// Handler for `GET /recommendations/{user_id}`. Unknown users get an empty table.
pub async fn recommend_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<TableResponse<Tool>>, AppError> {
    info!("Received recommendation request for '{user_id}'");
    let response = TableResponse::from_load(app_state.catalog.recommend(&user_id).await)?;
    Ok(Json(response))
}
