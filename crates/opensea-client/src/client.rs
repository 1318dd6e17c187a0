// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! OpenSea REST API client
//!
//! One method per resource. Every method sends a single GET to
//! `{base_url}/{api_version}/{endpoint}`, maps error statuses to
//! [`OpenseaError`], optionally writes the raw body to a file, and returns the
//! parsed JSON document.

use std::{path::Path, time::Duration};

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

use crate::{
    backfill::EventBackfill,
    config::{BackfillOptions, OpenseaConfig},
    error::{OpenseaError, OpenseaResult},
    export::export_file,
    non_empty_string::NonEmptyString,
    query::{AssetsQuery, BundlesQuery, CollectionsQuery, EventsQuery, ListQuery, QueryPairs},
    types::EventsPage,
};

const API_KEY_HEADER: &str = "X-API-KEY";

/// OpenSea API client
#[derive(Debug, Clone)]
pub struct OpenseaClient {
    client: Client,
    config: OpenseaConfig,
    api_url: String,
}

impl OpenseaClient {
    /// Create a new OpenSea API client
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL, version, credentials and timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be created
    pub fn new(config: OpenseaConfig) -> OpenseaResult<Self> {
        let base_url = Url::parse(config.base_url.as_str()).map_err(|e| {
            OpenseaError::Config(format!("invalid base URL `{}`: {e}", config.base_url))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(OpenseaError::Config(format!(
                "base URL must use http or https, got `{}`",
                base_url.scheme()
            )));
        }

        let api_url = format!(
            "{}/{}",
            config.base_url.as_str().trim_end_matches('/'),
            config.api_version.as_str().trim_matches('/')
        );

        let client = Client::builder()
            .timeout(config.timeout_seconds.value())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(OpenseaError::Http)?;

        Ok(Self {
            client,
            config,
            api_url,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &OpenseaConfig {
        &self.config
    }

    /// Absolute URL of an endpoint
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_url, endpoint.trim_start_matches('/'))
    }

    /// Send a GET request and return the raw body of a successful response
    ///
    /// This is the primitive every resource method is built on. Use it when
    /// the exact bytes matter more than the parsed document.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, timeouts and non-success statuses
    pub async fn request_bytes(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> OpenseaResult<Vec<u8>> {
        let url = self.endpoint_url(endpoint);

        debug!(url, ?params, "sending OpenSea API request");

        let mut request = self
            .client
            .get(&url)
            .query(params)
            .header("accept", "application/json");

        if let Some(api_key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, api_key.as_str());
        }

        let seconds = self.config.timeout_seconds.as_secs();
        let response = timeout(Duration::from_secs(seconds), request.send())
            .await
            .map_err(|_| OpenseaError::Timeout { seconds })?
            .map_err(OpenseaError::Http)?;

        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await.map_err(OpenseaError::Http)?;
            debug!(
                url,
                status = status.as_u16(),
                bytes = body.len(),
                "received OpenSea API response"
            );
            return Ok(body.to_vec());
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == StatusCode::NOT_FOUND {
            debug!(url, "OpenSea resource not found");
        } else {
            warn!(
                status = status.as_u16(),
                error = error_text,
                endpoint,
                "OpenSea API error"
            );
        }

        Err(OpenseaError::from_status(status, endpoint, error_text))
    }

    /// Send a GET request, optionally export the body, and parse it as JSON
    ///
    /// When `export` is set, the body is written to that path before parsing,
    /// replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the export cannot be written, or
    /// the body is not JSON
    pub async fn request_json(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        export: Option<&Path>,
    ) -> OpenseaResult<Value> {
        let body = self.request_bytes(endpoint, params).await?;

        if let Some(path) = export {
            export_file(path, &body).await?;
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch a list endpoint with a validated query
    ///
    /// # Errors
    ///
    /// Returns `OpenseaError::InvalidParameter` without sending anything if the
    /// query is invalid, otherwise the errors of [`Self::request_json`]
    pub async fn list<Q: ListQuery>(
        &self,
        query: &Q,
        export: Option<&Path>,
    ) -> OpenseaResult<Value> {
        let params: QueryPairs = query.query_pairs()?;
        self.request_json(Q::ENDPOINT, &params, export).await
    }

    /// Fetch a single asset
    ///
    /// # Arguments
    ///
    /// * `asset_contract_address` - Contract of the NFT
    /// * `token_id` - Token id of the NFT
    /// * `account_address` - Optional account whose ownership data is included
    /// * `export` - Optional file the raw response is written to
    pub async fn asset(
        &self,
        asset_contract_address: Address,
        token_id: &str,
        account_address: Option<Address>,
        export: Option<&Path>,
    ) -> OpenseaResult<Value> {
        let token_id = path_segment("token_id", token_id)?;
        let endpoint = format!("asset/{asset_contract_address:#x}/{token_id}");

        let params: QueryPairs = account_address
            .map(|account| vec![("account_address".to_string(), format!("{account:#x}"))])
            .unwrap_or_default();

        self.request_json(&endpoint, &params, export).await
    }

    /// Fetch a single asset contract
    pub async fn contract(
        &self,
        asset_contract_address: Address,
        export: Option<&Path>,
    ) -> OpenseaResult<Value> {
        let endpoint = format!("asset_contract/{asset_contract_address:#x}");
        self.request_json(&endpoint, &[], export).await
    }

    /// Fetch a single collection by slug
    pub async fn collection(
        &self,
        collection_slug: &str,
        export: Option<&Path>,
    ) -> OpenseaResult<Value> {
        let slug = path_segment("collection_slug", collection_slug)?;
        self.request_json(&format!("collection/{slug}"), &[], export)
            .await
    }

    /// Fetch the stats of a collection
    pub async fn collection_stats(
        &self,
        collection_slug: &str,
        export: Option<&Path>,
    ) -> OpenseaResult<Value> {
        let slug = path_segment("collection_slug", collection_slug)?;
        self.request_json(&format!("collection/{slug}/stats"), &[], export)
            .await
    }

    /// Fetch a page of assets
    pub async fn assets(&self, query: &AssetsQuery, export: Option<&Path>) -> OpenseaResult<Value> {
        self.list(query, export).await
    }

    /// Fetch a page of collections
    pub async fn collections(
        &self,
        query: &CollectionsQuery,
        export: Option<&Path>,
    ) -> OpenseaResult<Value> {
        self.list(query, export).await
    }

    /// Fetch a page of events
    pub async fn events(&self, query: &EventsQuery, export: Option<&Path>) -> OpenseaResult<Value> {
        self.list(query, export).await
    }

    /// Fetch a page of bundles
    pub async fn bundles(
        &self,
        query: &BundlesQuery,
        export: Option<&Path>,
    ) -> OpenseaResult<Value> {
        self.list(query, export).await
    }

    /// Fetch a page of events with its cursors and timestamps decoded
    pub async fn events_page(&self, query: &EventsQuery) -> OpenseaResult<EventsPage> {
        let raw = self.events(query, None).await?;
        EventsPage::from_value(raw)
    }

    /// Start an event backfill between `start` and `until`
    ///
    /// `start` later than `until` walks backward in time; `start` earlier
    /// than `until` walks the window forward. Pacing comes from the client
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns `OpenseaError::InvalidParameter` if the window is empty or the
    /// filter already sets a time bound or cursor
    pub fn events_backfill(
        &self,
        start: DateTime<Utc>,
        until: DateTime<Utc>,
        filter: EventsQuery,
    ) -> OpenseaResult<EventBackfill<'_>> {
        self.events_backfill_with(start, until, filter, self.config.backfill.clone())
    }

    /// Start an event backfill with explicit pacing options
    pub fn events_backfill_with(
        &self,
        start: DateTime<Utc>,
        until: DateTime<Utc>,
        filter: EventsQuery,
        options: BackfillOptions,
    ) -> OpenseaResult<EventBackfill<'_>> {
        EventBackfill::new(self, start, until, filter, options)
    }
}

fn path_segment(name: &'static str, value: &str) -> OpenseaResult<NonEmptyString> {
    let segment = NonEmptyString::new(value.trim())
        .map_err(|reason| OpenseaError::invalid_parameter(name, reason))?;

    if segment.as_str().contains(['/', '?', '#']) {
        return Err(OpenseaError::invalid_parameter(
            name,
            format!("`{segment}` cannot contain '/', '?' or '#'"),
        ));
    }
    Ok(segment)
}
