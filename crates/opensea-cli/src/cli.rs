// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definitions.

use std::path::PathBuf;

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use opensea_client::{
    AssetOrderBy, AssetsQuery, AuctionType, BundlesQuery, CollectionsQuery, EventType, EventsQuery,
    OrderDirection, time::str_to_datetime_utc,
};

/// Query the OpenSea NFT marketplace API and print the JSON responses.
#[derive(Parser, Debug)]
#[command(name = "opensea")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key sent in the X-API-KEY header
    #[arg(long, env = "OPENSEA_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the API root URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands, one per API resource
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single asset
    Asset(AssetArgs),

    /// Fetch a single asset contract
    Contract(ContractArgs),

    /// Fetch a single collection
    Collection(SlugArgs),

    /// Fetch the stats of a collection
    CollectionStats(SlugArgs),

    /// List assets
    Assets(AssetsArgs),

    /// List collections
    Collections(CollectionsArgs),

    /// List events
    Events(EventsArgs),

    /// List bundles
    Bundles(BundlesArgs),

    /// Walk the events endpoint across a time window, one JSON page per line
    Backfill(BackfillArgs),
}

/// Shared argument for commands that can dump the raw response.
#[derive(Args, Debug)]
pub struct ExportArg {
    /// Write the raw response body to this file, replacing it
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AssetArgs {
    /// Contract address of the NFT
    pub contract: Address,

    /// Token id of the NFT
    pub token_id: String,

    /// Include ownership data for this account
    #[arg(long)]
    pub account: Option<Address>,

    #[command(flatten)]
    pub export: ExportArg,
}

#[derive(Args, Debug)]
pub struct ContractArgs {
    /// Contract address
    pub contract: Address,

    #[command(flatten)]
    pub export: ExportArg,
}

#[derive(Args, Debug)]
pub struct SlugArgs {
    /// Collection slug
    pub slug: String,

    #[command(flatten)]
    pub export: ExportArg,
}

#[derive(Args, Debug)]
pub struct AssetsArgs {
    /// Only assets owned by this account
    #[arg(long)]
    pub owner: Option<Address>,

    /// Only these token ids (repeatable)
    #[arg(long = "token-id")]
    pub token_ids: Vec<String>,

    /// Only assets of these contracts (repeatable)
    #[arg(long = "contract")]
    pub contracts: Vec<Address>,

    /// Only assets of this collection slug
    #[arg(long)]
    pub collection: Option<String>,

    /// Sort field (pk, sale_date, sale_count, sale_price)
    #[arg(long)]
    pub order_by: Option<AssetOrderBy>,

    /// Sort direction (asc, desc)
    #[arg(long, default_value_t = OrderDirection::Desc)]
    pub order_direction: OrderDirection,

    /// Number of results to skip
    #[arg(long)]
    pub offset: Option<u32>,

    /// Page size
    #[arg(long, default_value_t = opensea_client::MAX_ASSET_ITEMS)]
    pub limit: u32,

    #[command(flatten)]
    pub export: ExportArg,
}

impl AssetsArgs {
    /// Build the assets query
    pub fn to_query(&self) -> AssetsQuery {
        let mut query = AssetsQuery::default()
            .with_token_ids(self.token_ids.iter().cloned())
            .with_limit(self.limit);

        query = match self.contracts.as_slice() {
            [] => query,
            [single] => query.with_asset_contract_address(*single),
            many => query.with_asset_contract_addresses(many.iter().copied()),
        };
        if let Some(owner) = self.owner {
            query = query.with_owner(owner);
        }
        if let Some(collection) = &self.collection {
            query = query.with_collection(collection.clone());
        }
        if let Some(order_by) = self.order_by {
            query = query.with_order(order_by, self.order_direction);
        }
        if let Some(offset) = self.offset {
            query = query.with_offset(offset);
        }
        query
    }
}

#[derive(Args, Debug)]
pub struct CollectionsArgs {
    /// Only collections holding assets of this account
    #[arg(long)]
    pub asset_owner: Option<Address>,

    /// Number of results to skip
    #[arg(long)]
    pub offset: Option<u32>,

    /// Page size
    #[arg(long, default_value_t = opensea_client::MAX_COLLECTION_ITEMS)]
    pub limit: u32,

    #[command(flatten)]
    pub export: ExportArg,
}

impl CollectionsArgs {
    /// Build the collections query
    pub fn to_query(&self) -> CollectionsQuery {
        let mut query = CollectionsQuery::default().with_limit(self.limit);
        if let Some(owner) = self.asset_owner {
            query = query.with_asset_owner(owner);
        }
        if let Some(offset) = self.offset {
            query = query.with_offset(offset);
        }
        query
    }
}

/// Event filters shared by `events` and `backfill`
#[derive(Args, Debug)]
pub struct EventFilterArgs {
    /// Only events of this contract
    #[arg(long)]
    pub contract: Option<Address>,

    /// Only events of this collection slug
    #[arg(long)]
    pub collection: Option<String>,

    /// Only events of this token id (requires --contract)
    #[arg(long)]
    pub token_id: Option<String>,

    /// Only events involving this account
    #[arg(long)]
    pub account: Option<Address>,

    /// Only events of this type
    #[arg(long)]
    pub event_type: Option<EventType>,

    /// Only events that happened on OpenSea
    #[arg(long)]
    pub only_opensea: bool,

    /// Only auctions of this type
    #[arg(long)]
    pub auction_type: Option<AuctionType>,

    /// Page size
    #[arg(long, default_value_t = opensea_client::MAX_EVENT_ITEMS)]
    pub limit: u32,
}

impl EventFilterArgs {
    /// Build the events query without any time bound or cursor
    pub fn to_query(&self) -> EventsQuery {
        let mut query = EventsQuery::default()
            .with_only_opensea(self.only_opensea)
            .with_limit(self.limit);

        if let Some(contract) = self.contract {
            query = query.with_asset_contract_address(contract);
        }
        if let Some(collection) = &self.collection {
            query = query.with_collection_slug(collection.clone());
        }
        if let Some(token_id) = &self.token_id {
            query = query.with_token_id(token_id.clone());
        }
        if let Some(account) = self.account {
            query = query.with_account_address(account);
        }
        if let Some(event_type) = self.event_type {
            query = query.with_event_type(event_type);
        }
        if let Some(auction_type) = self.auction_type {
            query = query.with_auction_type(auction_type);
        }
        query
    }
}

#[derive(Args, Debug)]
pub struct EventsArgs {
    #[command(flatten)]
    pub filter: EventFilterArgs,

    /// Only events before this time (ISO-8601, UTC when no offset is given)
    #[arg(long, value_parser = parse_timestamp)]
    pub before: Option<DateTime<Utc>>,

    /// Only events after this time (ISO-8601, UTC when no offset is given)
    #[arg(long, value_parser = parse_timestamp)]
    pub after: Option<DateTime<Utc>>,

    /// Number of events to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Page cursor, either bare or as a full `next` URL
    #[arg(long)]
    pub cursor: Option<String>,

    #[command(flatten)]
    pub export: ExportArg,
}

impl EventsArgs {
    /// Build the events query
    pub fn to_query(&self) -> EventsQuery {
        let mut query = self.filter.to_query().with_offset(self.offset);
        if let Some(before) = self.before {
            query = query.with_occurred_before(before);
        }
        if let Some(after) = self.after {
            query = query.with_occurred_after(after);
        }
        if let Some(cursor) = &self.cursor {
            query = query.with_cursor(cursor);
        }
        query
    }
}

#[derive(Args, Debug)]
pub struct BundlesArgs {
    /// Only bundles on sale (true) or not on sale (false)
    #[arg(long)]
    pub on_sale: Option<bool>,

    /// Only bundles owned by this account
    #[arg(long)]
    pub owner: Option<Address>,

    /// Only bundles containing assets of these contracts (repeatable)
    #[arg(long = "contract")]
    pub contracts: Vec<Address>,

    /// Only bundles containing these token ids (repeatable)
    #[arg(long = "token-id")]
    pub token_ids: Vec<String>,

    /// Number of results to skip
    #[arg(long)]
    pub offset: Option<u32>,

    /// Page size
    #[arg(long, default_value_t = opensea_client::MAX_BUNDLE_ITEMS)]
    pub limit: u32,

    #[command(flatten)]
    pub export: ExportArg,
}

impl BundlesArgs {
    /// Build the bundles query
    pub fn to_query(&self) -> BundlesQuery {
        let mut query = BundlesQuery::default()
            .with_token_ids(self.token_ids.iter().cloned())
            .with_limit(self.limit);

        query = match self.contracts.as_slice() {
            [] => query,
            [single] => query.with_asset_contract_address(*single),
            many => query.with_asset_contract_addresses(many.iter().copied()),
        };
        if let Some(on_sale) = self.on_sale {
            query = query.with_on_sale(on_sale);
        }
        if let Some(owner) = self.owner {
            query = query.with_owner(owner);
        }
        if let Some(offset) = self.offset {
            query = query.with_offset(offset);
        }
        query
    }
}

#[derive(Args, Debug)]
pub struct BackfillArgs {
    /// Where the walk begins (ISO-8601)
    #[arg(long, value_parser = parse_timestamp)]
    pub start: DateTime<Utc>,

    /// Where the walk ends (ISO-8601); earlier than --start walks backward
    #[arg(long, value_parser = parse_timestamp)]
    pub until: DateTime<Utc>,

    #[command(flatten)]
    pub filter: EventFilterArgs,

    /// Pause between pages in milliseconds
    #[arg(long)]
    pub page_interval_ms: Option<u64>,

    /// Retries per page for transient failures
    #[arg(long)]
    pub max_retries: Option<u32>,
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    str_to_datetime_utc(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use opensea_client::ListQuery;

    use super::*;

    const CONTRACT: &str = "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d";

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_asset_command() {
        let cli = Cli::try_parse_from([
            "opensea",
            "--api-key",
            "secret",
            "asset",
            CONTRACT,
            "42",
            "--export",
            "asset.json",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("secret"));
        match cli.command {
            Commands::Asset(args) => {
                assert_eq!(format!("{:#x}", args.contract), CONTRACT);
                assert_eq!(args.token_id, "42");
                assert!(args.account.is_none());
                assert_eq!(args.export.export, Some(PathBuf::from("asset.json")));
            }
            other => panic!("Expected asset command, got: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_address() {
        assert!(Cli::try_parse_from(["opensea", "contract", "0x1234"]).is_err());
    }

    #[test]
    fn events_arguments_build_query() {
        let cli = Cli::try_parse_from([
            "opensea",
            "events",
            "--collection",
            "cryptopunks",
            "--event-type",
            "successful",
            "--after",
            "2021-10-01",
            "--before",
            "2021-10-02T00:00:00Z",
            "--limit",
            "20",
        ])
        .unwrap();

        let Commands::Events(args) = cli.command else {
            panic!("Expected events command");
        };
        let query = args.to_query();
        assert_eq!(query.collection_slug.as_deref(), Some("cryptopunks"));
        assert_eq!(query.event_type, Some(EventType::Successful));
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 0);
        assert!(!query.only_opensea);
        assert_eq!(
            query.occurred_after.map(|t| t.timestamp()),
            Some(1_633_046_400)
        );
        assert_eq!(
            query.occurred_before.map(|t| t.timestamp()),
            Some(1_633_132_800)
        );
    }

    #[test]
    fn events_cursor_accepts_next_url() {
        let cli = Cli::try_parse_from([
            "opensea",
            "events",
            "--cursor",
            "https://api.opensea.io/api/v1/events?cursor=abc%3D%3D&limit=300",
        ])
        .unwrap();

        let Commands::Events(args) = cli.command else {
            panic!("Expected events command");
        };
        let pairs = args.to_query().query_pairs().unwrap();
        let cursors: Vec<_> = pairs.iter().filter(|(key, _)| key == "cursor").collect();
        assert_eq!(cursors, [&("cursor".to_string(), "abc==".to_string())]);
    }

    #[test]
    fn assets_arguments_build_query() {
        let cli = Cli::try_parse_from([
            "opensea",
            "assets",
            "--contract",
            CONTRACT,
            "--token-id",
            "1",
            "--token-id",
            "2",
            "--order-by",
            "sale_price",
        ])
        .unwrap();

        let Commands::Assets(args) = cli.command else {
            panic!("Expected assets command");
        };
        let query = args.to_query();
        assert_eq!(query.token_ids, ["1", "2"]);
        assert!(query.asset_contract_address.is_some());
        assert!(query.asset_contract_addresses.is_empty());
        assert_eq!(query.order_by, Some(AssetOrderBy::SalePrice));
        assert_eq!(query.order_direction, Some(OrderDirection::Desc));
        assert_eq!(query.limit, opensea_client::MAX_ASSET_ITEMS);
    }

    #[test]
    fn backfill_requires_window() {
        assert!(Cli::try_parse_from(["opensea", "backfill", "--start", "2021-10-02"]).is_err());

        let cli = Cli::try_parse_from([
            "opensea",
            "backfill",
            "--start",
            "2021-10-02",
            "--until",
            "2021-10-01",
            "--collection",
            "cryptopunks",
            "--max-retries",
            "3",
        ])
        .unwrap();

        let Commands::Backfill(args) = cli.command else {
            panic!("Expected backfill command");
        };
        assert!(args.start > args.until);
        assert_eq!(args.max_retries, Some(3));
        assert!(args.filter.to_query().occurred_before.is_none());
    }

    #[test]
    fn rejects_bad_timestamp() {
        let result = Cli::try_parse_from([
            "opensea",
            "backfill",
            "--start",
            "yesterday",
            "--until",
            "2021-10-01",
        ]);
        assert!(result.is_err());
    }
}
