//! The single timestamp grammar accepted across the crate.

use crate::message::error::TimestampError;
use chrono::{DateTime, FixedOffset};

/// Parses an RFC 3339 timestamp with a mandatory `Z` or numeric offset.
///
/// # Errors
///
/// Returns [`TimestampError`] if the value does not follow RFC 3339.
///
/// # Examples
///
/// ```
/// use sessioncheck::message::domain::parse_timestamp;
///
/// assert!(parse_timestamp("2025-03-01T10:00:00.000Z").is_ok());
/// assert!(parse_timestamp("2025-03-01T12:00:00+02:00").is_ok());
/// assert!(parse_timestamp("2025-03-01 10:00").is_err());
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    DateTime::parse_from_rfc3339(raw).map_err(|source| TimestampError::new(raw, source))
}
