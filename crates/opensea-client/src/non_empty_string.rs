// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Non-empty string validation utilities
//!
//! [`NonEmptyString`] guarantees by construction that a configuration value or
//! path segment (API key, collection slug, token id) carries at least one
//! non-whitespace character, so the client never sends `collection//stats` or
//! an empty `X-API-KEY` header.
//!
//! ```rust
//! use opensea_client::NonEmptyString;
//!
//! let slug = NonEmptyString::new("doodles-official").expect("valid slug");
//! assert_eq!(slug.as_str(), "doodles-official");
//!
//! assert!(NonEmptyString::new("").is_err());
//! assert!(NonEmptyString::new(" \t\n ").is_err());
//! ```
//!
//! Values deserialized from configuration files go through the same check, so
//! an empty `api_key` in `opensea.json` is rejected at load time.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A non-empty string wrapper that ensures validity at construction
///
/// Uses `Box<str>` internally; the value is immutable after construction.
///
/// ```rust
/// use opensea_client::NonEmptyString;
///
/// let valid = NonEmptyString::new("hello").unwrap();
/// assert_eq!(valid.as_str(), "hello");
///
/// let invalid = NonEmptyString::new("   ");
/// assert!(invalid.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(Box<str>);

impl NonEmptyString {
    /// Create a new `NonEmptyString` from any string-like input
    ///
    /// Leading and trailing whitespace is kept; only empty and
    /// whitespace-only input is rejected.
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            Err("String cannot be empty or whitespace-only".to_string())
        } else {
            Ok(NonEmptyString(s.into_boxed_str()))
        }
    }

    /// Get a string slice of the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NonEmptyString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(de::Error::custom)
    }
}
