// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Asset event vocabulary
//!
//! Values accepted by the `event_type` and `auction_type` filters of the
//! events endpoint, and reported back in each event record.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ParseVocabularyError;

/// Kind of marketplace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A new auction or listing was created
    Created,
    /// A sale completed
    Successful,
    /// A listing was cancelled
    Cancelled,
    /// A bid was placed on an auction
    BidEntered,
    /// A bid was withdrawn
    BidWithdrawn,
    /// The asset changed owner outside a sale
    Transfer,
    /// An offer was made on the asset
    OfferEntered,
    /// An operator approval was granted
    Approve,
}

impl EventType {
    /// Returns the wire representation used by the API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Successful => "successful",
            Self::Cancelled => "cancelled",
            Self::BidEntered => "bid_entered",
            Self::BidWithdrawn => "bid_withdrawn",
            Self::Transfer => "transfer",
            Self::OfferEntered => "offer_entered",
            Self::Approve => "approve",
        }
    }

    /// Returns all event kinds
    pub const fn all() -> &'static [Self] {
        &[
            Self::Created,
            Self::Successful,
            Self::Cancelled,
            Self::BidEntered,
            Self::BidWithdrawn,
            Self::Transfer,
            Self::OfferEntered,
            Self::Approve,
        ]
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                let supported: Vec<_> = Self::all().iter().map(|kind| kind.as_str()).collect();
                ParseVocabularyError::new("event type", s, &supported)
            })
    }
}

/// Kind of auction a listing event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionType {
    /// Ascending price auction
    #[serde(rename = "english")]
    English,
    /// Descending price auction
    #[serde(rename = "dutch")]
    Dutch,
    /// Auction with a reserve price
    #[serde(rename = "min-price")]
    MinPrice,
}

impl AuctionType {
    /// Returns the wire representation used by the API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Dutch => "dutch",
            Self::MinPrice => "min-price",
        }
    }
}

impl fmt::Display for AuctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuctionType {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" => Ok(Self::English),
            "dutch" => Ok(Self::Dutch),
            "min-price" | "min_price" => Ok(Self::MinPrice),
            _ => Err(ParseVocabularyError::new(
                "auction type",
                s,
                &["english", "dutch", "min-price"],
            )),
        }
    }
}
