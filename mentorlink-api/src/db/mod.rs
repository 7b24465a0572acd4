//! Per-entity database operations
//!
//! Write operations take `impl SqliteExecutor` so the service layer can
//! run them inside a single transaction when an operation fans out to
//! dependent rows.

pub mod accounts;
pub mod answers;
pub mod appointments;
pub mod comments;
pub mod degrees;
pub mod feedback_forms;
pub mod keywords;
pub mod mentors;
pub mod notifications;
pub mod pair_sessions;
pub mod questions;
pub mod students;
pub mod universities;
pub mod upvotes;

use chrono::{DateTime, Utc};
use mentorlink_common::{Error, Result};
use uuid::Uuid;

/// Parse a TEXT-stored UUID column
pub(crate) fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| Error::Internal(format!("Invalid UUID in row: {}", e)))
}

/// Parse a TEXT-stored RFC3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Invalid timestamp in row: {}", e)))
}
