// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timestamp formatting and parsing.
//!
//! All timestamps are stored as RFC 3339 strings. RFC 3339 strings with
//! a numeric UTC offset sort lexicographically in chronological order,
//! which keeps timestamp columns comparable in SQL.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::DomainError;

/// Formats a timestamp into its stored RFC 3339 form.
///
/// # Arguments
///
/// * `value` - The timestamp to format
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339
/// (e.g., a year outside the four-digit range).
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, DomainError> {
    value
        .format(&Rfc3339)
        .map_err(|e| DomainError::TimestampFormatError(e.to_string()))
}

/// Parses a stored RFC 3339 timestamp.
///
/// # Arguments
///
/// * `value` - The stored timestamp string
///
/// # Errors
///
/// Returns an error if the string is not a valid RFC 3339 timestamp.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::TimestampParseError {
        timestamp: value.to_string(),
        error: e.to_string(),
    })
}
