// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Query parameters for the list endpoints
//!
//! Each list endpoint has a query struct whose serde representation is the
//! wire format: absent options are skipped, lists become repeated keys, and
//! datetimes become unix seconds. [`ListQuery::query_pairs`] validates and
//! flattens a query into the pairs handed to `reqwest`.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use serde_with::{TimestampSeconds, serde_as, skip_serializing_none};
use shared_types::{AssetOrderBy, AuctionType, EventType, OrderDirection};

use crate::{
    cursor::normalize_cursor,
    error::{OpenseaError, OpenseaResult},
};

/// Maximum page size of the events endpoint
pub const MAX_EVENT_ITEMS: u32 = 300;
/// Maximum page size of the assets endpoint
pub const MAX_ASSET_ITEMS: u32 = 50;
/// Maximum page size of the collections endpoint
pub const MAX_COLLECTION_ITEMS: u32 = 300;
/// Maximum page size of the bundles endpoint
pub const MAX_BUNDLE_ITEMS: u32 = 50;

/// Ordered `(key, value)` query pairs
pub type QueryPairs = Vec<(String, String)>;

/// A query against one of the paginated list endpoints
pub trait ListQuery: Serialize {
    /// Endpoint path relative to the versioned API root
    const ENDPOINT: &'static str;
    /// Largest `limit` the endpoint accepts
    const MAX_LIMIT: u32;

    /// Requested page size
    fn limit(&self) -> u32;

    /// Endpoint-specific checks beyond the page size
    fn validate_fields(&self) -> OpenseaResult<()> {
        Ok(())
    }

    /// Check the query before anything is sent
    fn validate(&self) -> OpenseaResult<()> {
        let limit = self.limit();
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(OpenseaError::invalid_parameter(
                "limit",
                format!("must be between 1 and {}, got {limit}", Self::MAX_LIMIT),
            ));
        }
        self.validate_fields()
    }

    /// Validate and flatten into query pairs
    fn query_pairs(&self) -> OpenseaResult<QueryPairs> {
        self.validate()?;
        to_query_pairs(self)
    }
}

/// Flatten any serializable struct into query pairs
///
/// `null` values are dropped, arrays are expanded into one pair per element in
/// order, and booleans are rendered as `true`/`false`.
pub fn to_query_pairs<T: Serialize + ?Sized>(query: &T) -> OpenseaResult<QueryPairs> {
    let Value::Object(fields) = serde_json::to_value(query)? else {
        return Err(OpenseaError::invalid_parameter(
            "query",
            "must serialize to a map of parameters",
        ));
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        push_pair(&mut pairs, &key, value);
    }
    Ok(pairs)
}

fn push_pair(pairs: &mut QueryPairs, key: &str, value: Value) {
    match value {
        Value::Null => {}
        Value::String(text) => pairs.push((key.to_string(), text)),
        Value::Array(items) => {
            for item in items {
                push_pair(pairs, key, item);
            }
        }
        Value::Bool(flag) => pairs.push((key.to_string(), flag.to_string())),
        Value::Number(number) => pairs.push((key.to_string(), number.to_string())),
        object @ Value::Object(_) => pairs.push((key.to_string(), object.to_string())),
    }
}

/// Lowercase `0x` hex rendering of addresses
mod lower_hex {
    use super::{Address, Serializer};

    pub(super) fn option<S: Serializer>(
        address: &Option<Address>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match address {
            Some(address) => serializer.serialize_str(&format!("{address:#x}")),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn list<S: Serializer>(
        addresses: &[Address],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(addresses.iter().map(|address| format!("{address:#x}")))
    }
}

fn check_window(
    after: Option<DateTime<Utc>>,
    before: Option<DateTime<Utc>>,
) -> OpenseaResult<()> {
    if let (Some(after), Some(before)) = (after, before)
        && after >= before
    {
        return Err(OpenseaError::invalid_parameter(
            "occurred_after",
            format!("must be earlier than occurred_before ({after} >= {before})"),
        ));
    }
    Ok(())
}

fn check_not_blank(name: &'static str, value: Option<&str>) -> OpenseaResult<()> {
    if value.is_some_and(|value| value.trim().is_empty()) {
        return Err(OpenseaError::invalid_parameter(
            name,
            "cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Filters for the events endpoint
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventsQuery {
    /// Only events for assets of this contract
    #[serde(serialize_with = "lower_hex::option")]
    pub asset_contract_address: Option<Address>,
    /// Only events for assets of this collection
    pub collection_slug: Option<String>,
    /// Only events for this token (requires `asset_contract_address`)
    pub token_id: Option<String>,
    /// Only events involving this account
    #[serde(serialize_with = "lower_hex::option")]
    pub account_address: Option<Address>,
    /// Only events of this kind
    pub event_type: Option<EventType>,
    /// Restrict to events on the marketplace itself
    pub only_opensea: bool,
    /// Only events of this auction kind
    pub auction_type: Option<AuctionType>,
    /// Number of events to skip
    pub offset: u32,
    /// Page size
    pub limit: u32,
    /// Only events strictly before this time
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    pub occurred_before: Option<DateTime<Utc>>,
    /// Only events strictly after this time
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    pub occurred_after: Option<DateTime<Utc>>,
    /// Pagination cursor from a previous page
    pub cursor: Option<String>,
}

impl Default for EventsQuery {
    fn default() -> Self {
        Self {
            asset_contract_address: None,
            collection_slug: None,
            token_id: None,
            account_address: None,
            event_type: None,
            only_opensea: false,
            auction_type: None,
            offset: 0,
            limit: MAX_EVENT_ITEMS,
            occurred_before: None,
            occurred_after: None,
            cursor: None,
        }
    }
}

impl EventsQuery {
    /// Filter by contract
    pub fn with_asset_contract_address(mut self, address: Address) -> Self {
        self.asset_contract_address = Some(address);
        self
    }

    /// Filter by collection slug
    pub fn with_collection_slug(mut self, slug: impl Into<String>) -> Self {
        self.collection_slug = Some(slug.into());
        self
    }

    /// Filter by token id
    pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = Some(token_id.into());
        self
    }

    /// Filter by involved account
    pub fn with_account_address(mut self, address: Address) -> Self {
        self.account_address = Some(address);
        self
    }

    /// Filter by event kind
    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    /// Restrict to marketplace events
    pub fn with_only_opensea(mut self, only_opensea: bool) -> Self {
        self.only_opensea = only_opensea;
        self
    }

    /// Filter by auction kind
    pub fn with_auction_type(mut self, auction_type: AuctionType) -> Self {
        self.auction_type = Some(auction_type);
        self
    }

    /// Skip this many events
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Upper time bound (exclusive)
    pub fn with_occurred_before(mut self, before: DateTime<Utc>) -> Self {
        self.occurred_before = Some(before);
        self
    }

    /// Lower time bound (exclusive)
    pub fn with_occurred_after(mut self, after: DateTime<Utc>) -> Self {
        self.occurred_after = Some(after);
        self
    }

    /// Resume from a pagination cursor
    ///
    /// Accepts the bare token or a whole `next` URL as returned by the API;
    /// either way only the bare token is sent. An empty or `null` cursor
    /// clears it.
    pub fn with_cursor(mut self, cursor: impl AsRef<str>) -> Self {
        self.cursor = normalize_cursor(cursor.as_ref());
        self
    }
}

impl ListQuery for EventsQuery {
    const ENDPOINT: &'static str = "events";
    const MAX_LIMIT: u32 = MAX_EVENT_ITEMS;

    fn limit(&self) -> u32 {
        self.limit
    }

    fn validate_fields(&self) -> OpenseaResult<()> {
        check_not_blank("collection_slug", self.collection_slug.as_deref())?;
        check_not_blank("token_id", self.token_id.as_deref())?;
        check_not_blank("cursor", self.cursor.as_deref())?;
        check_window(self.occurred_after, self.occurred_before)
    }
}

/// Filters for the assets endpoint
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetsQuery {
    /// Only assets owned by this account
    #[serde(serialize_with = "lower_hex::option")]
    pub owner: Option<Address>,
    /// Only these token ids
    pub token_ids: Vec<String>,
    /// Only assets of this contract
    #[serde(serialize_with = "lower_hex::option")]
    pub asset_contract_address: Option<Address>,
    /// Only assets of these contracts
    #[serde(serialize_with = "lower_hex::list")]
    pub asset_contract_addresses: Vec<Address>,
    /// Sort field
    pub order_by: Option<AssetOrderBy>,
    /// Sort direction
    pub order_direction: Option<OrderDirection>,
    /// Number of assets to skip
    pub offset: Option<u32>,
    /// Page size
    pub limit: u32,
    /// Only assets of this collection slug
    pub collection: Option<String>,
}

impl Default for AssetsQuery {
    fn default() -> Self {
        Self {
            owner: None,
            token_ids: Vec::new(),
            asset_contract_address: None,
            asset_contract_addresses: Vec::new(),
            order_by: None,
            order_direction: None,
            offset: None,
            limit: MAX_ASSET_ITEMS,
            collection: None,
        }
    }
}

impl AssetsQuery {
    /// Filter by owner
    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Add token ids to the filter
    pub fn with_token_ids<I, T>(mut self, token_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.token_ids.extend(token_ids.into_iter().map(Into::into));
        self
    }

    /// Filter by a single contract
    pub fn with_asset_contract_address(mut self, address: Address) -> Self {
        self.asset_contract_address = Some(address);
        self
    }

    /// Add contracts to the filter
    pub fn with_asset_contract_addresses(
        mut self,
        addresses: impl IntoIterator<Item = Address>,
    ) -> Self {
        self.asset_contract_addresses.extend(addresses);
        self
    }

    /// Sort by the given field and direction
    pub fn with_order(mut self, order_by: AssetOrderBy, direction: OrderDirection) -> Self {
        self.order_by = Some(order_by);
        self.order_direction = Some(direction);
        self
    }

    /// Skip this many assets
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Filter by collection slug
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }
}

impl ListQuery for AssetsQuery {
    const ENDPOINT: &'static str = "assets";
    const MAX_LIMIT: u32 = MAX_ASSET_ITEMS;

    fn limit(&self) -> u32 {
        self.limit
    }

    fn validate_fields(&self) -> OpenseaResult<()> {
        check_not_blank("collection", self.collection.as_deref())?;
        if self.token_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(OpenseaError::invalid_parameter(
                "token_ids",
                "token ids cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Filters for the collections endpoint
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionsQuery {
    /// Only collections holding assets of this account
    #[serde(serialize_with = "lower_hex::option")]
    pub asset_owner: Option<Address>,
    /// Number of collections to skip
    pub offset: Option<u32>,
    /// Page size
    pub limit: u32,
}

impl Default for CollectionsQuery {
    fn default() -> Self {
        Self {
            asset_owner: None,
            offset: None,
            limit: MAX_COLLECTION_ITEMS,
        }
    }
}

impl CollectionsQuery {
    /// Filter by asset owner
    pub fn with_asset_owner(mut self, owner: Address) -> Self {
        self.asset_owner = Some(owner);
        self
    }

    /// Skip this many collections
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl ListQuery for CollectionsQuery {
    const ENDPOINT: &'static str = "collections";
    const MAX_LIMIT: u32 = MAX_COLLECTION_ITEMS;

    fn limit(&self) -> u32 {
        self.limit
    }
}

/// Filters for the bundles endpoint
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundlesQuery {
    /// Only bundles currently for sale (or not)
    pub on_sale: Option<bool>,
    /// Only bundles owned by this account
    #[serde(serialize_with = "lower_hex::option")]
    pub owner: Option<Address>,
    /// Only bundles containing assets of this contract
    #[serde(serialize_with = "lower_hex::option")]
    pub asset_contract_address: Option<Address>,
    /// Only bundles containing assets of these contracts
    #[serde(serialize_with = "lower_hex::list")]
    pub asset_contract_addresses: Vec<Address>,
    /// Only bundles containing these token ids
    pub token_ids: Vec<String>,
    /// Page size
    pub limit: u32,
    /// Number of bundles to skip
    pub offset: Option<u32>,
}

impl Default for BundlesQuery {
    fn default() -> Self {
        Self {
            on_sale: None,
            owner: None,
            asset_contract_address: None,
            asset_contract_addresses: Vec::new(),
            token_ids: Vec::new(),
            limit: MAX_BUNDLE_ITEMS,
            offset: None,
        }
    }
}

impl BundlesQuery {
    /// Filter by sale state
    pub fn with_on_sale(mut self, on_sale: bool) -> Self {
        self.on_sale = Some(on_sale);
        self
    }

    /// Filter by owner
    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Filter by a single contract
    pub fn with_asset_contract_address(mut self, address: Address) -> Self {
        self.asset_contract_address = Some(address);
        self
    }

    /// Add contracts to the filter
    pub fn with_asset_contract_addresses(
        mut self,
        addresses: impl IntoIterator<Item = Address>,
    ) -> Self {
        self.asset_contract_addresses.extend(addresses);
        self
    }

    /// Add token ids to the filter
    pub fn with_token_ids<I, T>(mut self, token_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.token_ids.extend(token_ids.into_iter().map(Into::into));
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Skip this many bundles
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl ListQuery for BundlesQuery {
    const ENDPOINT: &'static str = "bundles";
    const MAX_LIMIT: u32 = MAX_BUNDLE_ITEMS;

    fn limit(&self) -> u32 {
        self.limit
    }

    fn validate_fields(&self) -> OpenseaResult<()> {
        if self.token_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(OpenseaError::invalid_parameter(
                "token_ids",
                "token ids cannot be empty",
            ));
        }
        Ok(())
    }
}
