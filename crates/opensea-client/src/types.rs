// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Typed views over API responses
//!
//! Resource endpoints return JSON documents that are handed back to callers
//! untouched. The events endpoint is also read by the backfill helper, which
//! needs the pagination cursors and each event's timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::EventType;

use crate::{cursor, error::OpenseaResult, time::str_to_datetime_utc};

/// A single record from the events endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEvent {
    /// Event kind as reported by the API
    #[serde(default)]
    pub event_type: Option<String>,
    /// Creation timestamp (UTC, no offset)
    #[serde(default)]
    pub created_date: Option<String>,
    /// Remaining fields, kept as returned
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl AssetEvent {
    /// Parsed creation time, if present and well formed
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_date
            .as_deref()
            .and_then(|value| str_to_datetime_utc(value).ok())
    }

    /// Event kind, if it is one of the known values
    pub fn kind(&self) -> Option<EventType> {
        self.event_type.as_deref().and_then(|kind| kind.parse().ok())
    }
}

#[derive(Debug, Deserialize)]
struct EventsEnvelope {
    #[serde(default)]
    asset_events: Vec<AssetEvent>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
}

/// One page of the events endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct EventsPage {
    /// Events on this page, in the order returned (newest first)
    pub asset_events: Vec<AssetEvent>,
    /// Normalized cursor of the following (older) page
    pub next: Option<String>,
    /// Normalized cursor of the preceding (newer) page
    pub previous: Option<String>,
    /// The page as returned by the API
    pub raw: Value,
}

impl EventsPage {
    /// Build a page from the parsed response document
    ///
    /// # Errors
    ///
    /// Returns `OpenseaError::Json` if `asset_events` is not a list of objects
    pub fn from_value(raw: Value) -> OpenseaResult<Self> {
        let envelope = EventsEnvelope::deserialize(&raw)?;

        Ok(Self {
            asset_events: envelope.asset_events,
            next: cursor::normalize_optional(envelope.next.as_deref()),
            previous: cursor::normalize_optional(envelope.previous.as_deref()),
            raw,
        })
    }

    /// Whether the page carries no events
    pub fn is_empty(&self) -> bool {
        self.asset_events.is_empty()
    }

    /// Number of events on the page
    pub fn len(&self) -> usize {
        self.asset_events.len()
    }

    /// Earliest event creation time on the page
    pub fn oldest_event_time(&self) -> Option<DateTime<Utc>> {
        self.asset_events.iter().filter_map(AssetEvent::created_at).min()
    }

    /// Latest event creation time on the page
    pub fn newest_event_time(&self) -> Option<DateTime<Utc>> {
        self.asset_events.iter().filter_map(AssetEvent::created_at).max()
    }
}
