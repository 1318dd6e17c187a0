// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! UTC timestamp helpers
//!
//! Event records carry `created_date` values without an offset; the API
//! reports them in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{OpenseaError, OpenseaResult};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp into a UTC datetime
///
/// Accepts RFC 3339 values with an offset, naive date-times (taken as UTC)
/// with or without fractional seconds, and bare dates (midnight UTC).
///
/// ```rust
/// use opensea_client::time::str_to_datetime_utc;
///
/// let parsed = str_to_datetime_utc("2021-10-01T12:30:00.123456").unwrap();
/// assert_eq!(parsed.to_rfc3339(), "2021-10-01T12:30:00.123456+00:00");
/// ```
pub fn str_to_datetime_utc(value: &str) -> OpenseaResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| {
            OpenseaError::invalid_parameter(
                "timestamp",
                format!("`{value}` is not an ISO-8601 timestamp"),
            )
        })
}

/// Build a UTC datetime from calendar components
///
/// # Errors
///
/// Returns `OpenseaError::InvalidParameter` if any component is out of range
pub fn datetime_utc(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> OpenseaResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| {
            OpenseaError::invalid_parameter(
                "datetime",
                format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02} is not a valid date"),
            )
        })
}
