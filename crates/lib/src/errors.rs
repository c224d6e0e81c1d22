use thiserror::Error;

/// Errors raised by a `CatalogStore` implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An insert reused a `userID` that already exists. The store is unchanged.
    #[error("A user with id '{0}' already exists")]
    DuplicateKey(String),
    /// The backing file is missing or its tables cannot be read.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),
    #[error("Storage connection error: {0}")]
    StorageConnection(String),
    #[error("Storage operation failed: {0}")]
    StorageOperationFailed(String),
}

impl StoreError {
    /// True when the caller should render a placeholder and prompt for a bootstrap upload.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::DataUnavailable(_))
    }
}

impl From<turso::Error> for StoreError {
    fn from(err: turso::Error) -> Self {
        StoreError::StorageOperationFailed(err.to_string())
    }
}

/// Presence checks applied to a new user before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("A user id is required")]
    MissingUserId,
    #[error("At least one previous purchase is required")]
    MissingPurchases,
}

/// The error type returned by `CatalogService` operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
