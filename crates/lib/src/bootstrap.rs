//! # Database Bootstrap
//!
//! When the database file is missing, the presentation layer accepts an uploaded
//! copy and writes it verbatim to the expected path before any store operation.
//! An existing file is never overwritten.

use std::{io::ErrorKind, path::Path};
use thiserror::Error;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::info;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("A database already exists at '{0}'")]
    AlreadyPresent(String),
    #[error("The uploaded database is empty")]
    EmptyUpload,
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

pub fn database_present(path: &Path) -> bool {
    path.exists()
}

/// Writes `bytes` to `path`, creating parent directories as needed.
/// Returns the number of bytes written.
pub async fn install_database(path: &Path, bytes: &[u8]) -> Result<usize, BootstrapError> {
    if bytes.is_empty() {
        return Err(BootstrapError::EmptyUpload);
    }
    let display = path.display().to_string();
    let io_error = |source| BootstrapError::Io {
        path: display.clone(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }

    // `create_new` makes the presence check and the create a single step.
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(BootstrapError::AlreadyPresent(display.clone()));
        }
        Err(e) => return Err(io_error(e)),
    };
    file.write_all(bytes).await.map_err(io_error)?;
    file.flush().await.map_err(io_error)?;

    info!(path = %path.display(), "Installed uploaded database ({} bytes).", bytes.len());
    Ok(bytes.len())
}
