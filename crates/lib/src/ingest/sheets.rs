//! # Spreadsheet Export Readers
//!
//! Parses CSV exports of the tools and users spreadsheets. Headers are the
//! persisted column names; unknown columns (such as a dataframe index) are
//! ignored and empty cells become NULL.

use super::ImportError;
use crate::types::{ToolListing, User};
use chrono::{NaiveDate, NaiveDateTime};
use std::{io::Read, path::Path};
use tracing::{debug, info};

const DATETIME_FORMATS: [&str; 2] = ["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// The timestamp layout a dataframe export writes for date cells.
const STORED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rewrites a recognised spreadsheet date as `YYYY-MM-DD HH:MM:SS`.
/// Anything else is returned unchanged.
pub fn normalize_date(field: &str) -> String {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(field, fmt) {
            return dt.format(STORED_DATE_FORMAT).to_string();
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(field, fmt) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return dt.format(STORED_DATE_FORMAT).to_string();
            }
        }
    }
    field.to_string()
}

pub fn parse_tools_csv<R: Read>(reader: R) -> Result<Vec<ToolListing>, ImportError> {
    let mut reader = csv::Reader::from_reader(reader);
    let tools = reader
        .deserialize::<ToolListing>()
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Parsed {} tool rows.", tools.len());
    Ok(tools)
}

pub fn parse_users_csv<R: Read>(reader: R) -> Result<Vec<User>, ImportError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut users = Vec::new();
    for record in reader.deserialize::<User>() {
        let mut user = record?;
        user.last_purchase_date = user.last_purchase_date.as_deref().map(normalize_date);
        users.push(user);
    }
    debug!("Parsed {} user rows.", users.len());
    Ok(users)
}

pub fn read_tools_csv(path: &Path) -> Result<Vec<ToolListing>, ImportError> {
    info!("Reading tools export from '{}'", path.display());
    let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_tools_csv(file)
}

pub fn read_users_csv(path: &Path) -> Result<Vec<User>, ImportError> {
    info!("Reading users export from '{}'", path.display());
    let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_users_csv(file)
}
