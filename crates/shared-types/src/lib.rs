// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the OpenSea client workspace
//!
//! This crate provides the marketplace vocabulary (event kinds, auction kinds,
//! ordering options) shared by the client library and the command-line tool,
//! avoiding circular dependencies.

pub mod events;
pub mod ordering;

pub use events::{AuctionType, EventType};
pub use ordering::{AssetOrderBy, OrderDirection};

/// Error returned when a vocabulary value cannot be parsed from its wire string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported {kind}: {value}. Supported values are: {supported}")]
pub struct ParseVocabularyError {
    /// Which vocabulary was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
    /// Comma separated list of accepted values
    pub supported: String,
}

impl ParseVocabularyError {
    pub(crate) fn new(kind: &'static str, value: &str, supported: &[&'static str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            supported: supported.join(", "),
        }
    }
}
