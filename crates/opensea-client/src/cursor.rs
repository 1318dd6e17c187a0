// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Pagination cursor handling for the events endpoint
//!
//! The `next` and `previous` fields are documented as opaque tokens, but the
//! API intermittently returns a whole URL instead (absolute, or relative like
//! `/api/v1/events?cursor=...&limit=300`) with the token percent-encoded in
//! its `cursor` parameter. Sending that URL back as a cursor yields a 400, so
//! every cursor goes through [`normalize_cursor`] before reuse.

use url::form_urlencoded;

const CURSOR_PARAM: &str = "cursor";

/// Reduce a cursor value as returned by the API to the bare token
///
/// Returns `None` when there is no further page.
///
/// ```rust
/// use opensea_client::cursor::normalize_cursor;
///
/// assert_eq!(normalize_cursor("LWV2ZW50X3RpbWVzdGFtcD0"), Some("LWV2ZW50X3RpbWVzdGFtcD0".to_string()));
/// assert_eq!(
///     normalize_cursor("https://api.opensea.io/api/v1/events?cursor=abc%3D%3D&limit=300"),
///     Some("abc==".to_string())
/// );
/// assert_eq!(normalize_cursor(""), None);
/// ```
pub fn normalize_cursor(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return None;
    }

    if !trimmed.contains("cursor=") {
        return Some(trimmed.to_string());
    }

    let query = trimmed
        .split_once('?')
        .map_or(trimmed, |(_, query)| query);
    let query = query.split_once('#').map_or(query, |(query, _)| query);

    // base64 cursors may carry a literal `+`; form decoding would turn it into a space
    let query = query.replace('+', "%2B");

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == CURSOR_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Normalize an optional cursor field
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.and_then(normalize_cursor)
}
