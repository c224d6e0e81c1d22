use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use toolrec::StoreError;

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: T,
}

/// A table payload. When the database is missing the rows are empty and
/// `data_unavailable` is set, so clients can prompt for an upload instead of
/// treating the table as empty by design.
#[derive(Serialize, Deserialize)]
pub struct TableResponse<T> {
    pub rows: Vec<T>,
    pub data_unavailable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> TableResponse<T> {
    pub fn from_load(result: Result<Vec<T>, StoreError>) -> Result<Self, AppError> {
        match result {
            Ok(rows) => Ok(Self {
                rows,
                data_unavailable: false,
                message: None,
            }),
            Err(StoreError::DataUnavailable(reason)) => Ok(Self {
                rows: Vec::new(),
                data_unavailable: true,
                message: Some(reason),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ToolFilter {
    pub category: Option<String>,
}
