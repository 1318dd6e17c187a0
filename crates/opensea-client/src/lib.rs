// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Async client for the OpenSea NFT marketplace REST API
//!
//! This crate maps the OpenSea v1 resources onto method calls of
//! [`OpenseaClient`]: single asset, contract, collection and collection stats
//! lookups, plus the paginated asset, collection, event and bundle lists.
//!
//! # Architecture
//!
//! - **Client**: [`client::OpenseaClient`] - request construction, authentication, status mapping
//! - **Queries**: [`query`] - validated filters for the list endpoints
//! - **Backfill**: [`backfill::EventBackfill`] - cursor-driven walk over the events endpoint
//! - **Export**: [`export`] - one-shot dump of a response body to disk
//! - **Configuration**: [`config`] - layered loading with the `config` crate
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), opensea_client::OpenseaError> {
//! use std::path::Path;
//!
//! use opensea_client::{OpenseaClient, OpenseaConfig};
//!
//! let client = OpenseaClient::new(OpenseaConfig::from_env()?)?;
//! let stats = client
//!     .collection_stats("doodles-official", Some(Path::new("stats.json")))
//!     .await?;
//! println!("floor: {}", stats["stats"]["floor_price"]);
//! # Ok(())
//! # }
//! ```

pub mod backfill;
pub mod client;
pub mod config;
pub mod cursor;
pub mod error;
pub mod export;
pub mod non_empty_string;
pub mod query;
pub mod time;
pub mod types;

pub use backfill::{BackfillDirection, EventBackfill};
pub use client::OpenseaClient;
pub use config::{BackfillOptions, OpenseaConfig, TimeoutSeconds};
pub use error::{OpenseaError, OpenseaResult};
pub use non_empty_string::NonEmptyString;
pub use query::{
    AssetsQuery, BundlesQuery, CollectionsQuery, EventsQuery, ListQuery, MAX_ASSET_ITEMS,
    MAX_BUNDLE_ITEMS, MAX_COLLECTION_ITEMS, MAX_EVENT_ITEMS,
};
pub use shared_types::{AssetOrderBy, AuctionType, EventType, OrderDirection};
pub use types::{AssetEvent, EventsPage};
