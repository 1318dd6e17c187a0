// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `OpenseaClient`
//!
//! These tests use wiremock to mock the OpenSea API and check request
//! construction, status mapping and response export.

use std::time::Duration;

use opensea_client::{
    AssetOrderBy, AssetsQuery, BundlesQuery, CollectionsQuery, EventType, EventsQuery,
    OpenseaClient, OpenseaConfig, OpenseaError, OrderDirection, TimeoutSeconds,
    time::datetime_utc,
};
use serde_json::json;
use tokio_test::assert_err;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

use fixtures::*;

/// Test successful single asset retrieval with authentication
#[tokio::test]
async fn asset_success() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/asset/{}/1",
            TestAddresses::contract_path()
        )))
        .and(header("X-API-KEY", TEST_API_KEY))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let asset = client
        .asset(TestAddresses::contract(), "1", None, None)
        .await
        .unwrap();

    assert_eq!(asset["name"], "Ape #1");
    assert_eq!(asset["collection"]["slug"], "boredapeyachtclub");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(query_values(&requests[0], "account_address").is_empty());
}

/// Test that the optional account is sent as lowercase hex
#[tokio::test]
async fn asset_with_account_address() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/asset/{}/1",
            TestAddresses::contract_path()
        )))
        .and(query_param("account_address", format!("0x{}", "12".repeat(20))))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    client
        .asset(
            TestAddresses::contract(),
            "1",
            Some(TestAddresses::owner()),
            None,
        )
        .await
        .unwrap();
}

/// Test contract, collection and collection stats paths
#[tokio::test]
async fn single_resource_paths() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/asset_contract/{}",
            TestAddresses::contract_path()
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"schema_name": "ERC721"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/collection/boredapeyachtclub"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"collection": {"slug": "boredapeyachtclub"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/collection/boredapeyachtclub/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection_stats_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let contract = client
        .contract(TestAddresses::contract(), None)
        .await
        .unwrap();
    assert_eq!(contract["schema_name"], "ERC721");

    let collection = client.collection("boredapeyachtclub", None).await.unwrap();
    assert_eq!(collection["collection"]["slug"], "boredapeyachtclub");

    let stats = client
        .collection_stats("boredapeyachtclub", None)
        .await
        .unwrap();
    assert_eq!(stats["stats"]["floor_price"], 88.5);
}

/// Test default paging parameters of the events endpoint
#[tokio::test]
async fn events_default_parameters() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/events"))
        .and(query_param("limit", "300"))
        .and(query_param("offset", "0"))
        .and(query_param("only_opensea", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_page(None, vec![])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let events = client.events(&EventsQuery::default(), None).await.unwrap();
    assert_eq!(events["asset_events"], json!([]));
}

/// Test event filters including the time window
#[tokio::test]
async fn events_with_filters() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/events"))
        .and(query_param("collection_slug", "cryptopunks"))
        .and(query_param("event_type", "successful"))
        .and(query_param("only_opensea", "true"))
        .and(query_param("occurred_after", "1633046400"))
        .and(query_param("occurred_before", "1633132800"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_page(
            Some("abc"),
            vec![event(1, "2021-10-01T10:00:00")],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = EventsQuery::default()
        .with_collection_slug("cryptopunks")
        .with_event_type(EventType::Successful)
        .with_only_opensea(true)
        .with_occurred_after(datetime_utc(2021, 10, 1, 0, 0).unwrap())
        .with_occurred_before(datetime_utc(2021, 10, 2, 0, 0).unwrap())
        .with_limit(20);

    let page = client.events_page(&query).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.next.as_deref(), Some("abc"));
}

/// Test that list parameters are sent as repeated keys
#[tokio::test]
async fn assets_repeated_parameters() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"assets": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = AssetsQuery::default()
        .with_asset_contract_address(TestAddresses::contract())
        .with_token_ids(["1", "2", "3"])
        .with_order(AssetOrderBy::SaleDate, OrderDirection::Desc)
        .with_offset(100);

    client.assets(&query, None).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(query_values(request, "token_ids"), ["1", "2", "3"]);
    assert_eq!(
        query_values(request, "asset_contract_address"),
        [TestAddresses::contract_path()]
    );
    assert_eq!(query_values(request, "order_by"), ["sale_date"]);
    assert_eq!(query_values(request, "order_direction"), ["desc"]);
    assert_eq!(query_values(request, "offset"), ["100"]);
    assert_eq!(query_values(request, "limit"), ["50"]);
    assert!(query_values(request, "owner").is_empty());
}

/// Test collections and bundles default limits
#[tokio::test]
async fn collections_and_bundles_defaults() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/collections"))
        .and(query_param("limit", "300"))
        .and(query_param("asset_owner", format!("0x{}", "12".repeat(20))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/bundles"))
        .and(query_param("limit", "50"))
        .and(query_param("on_sale", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bundles": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let collections = client
        .collections(
            &CollectionsQuery::default().with_asset_owner(TestAddresses::owner()),
            None,
        )
        .await
        .unwrap();
    assert_eq!(collections, json!([]));

    let query = BundlesQuery::default()
        .with_on_sale(true)
        .with_asset_contract_addresses([TestAddresses::contract(), TestAddresses::other_contract()]);
    client.bundles(&query, None).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let bundles_request = requests
        .iter()
        .find(|request| request.url.path() == "/api/v1/bundles")
        .unwrap();
    assert_eq!(
        query_values(bundles_request, "asset_contract_addresses"),
        [
            TestAddresses::contract_path().to_string(),
            format!("0x{}", "34".repeat(20))
        ]
    );
}

/// Test that no key header is sent without an API key
#[tokio::test]
async fn anonymous_requests_omit_key_header() {
    let mock_server = MockServer::start().await;
    let client = create_anonymous_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/collection/doodles-official"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    client.collection("doodles-official", None).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-api-key").is_none());
}

/// Test status code mapping
#[tokio::test]
async fn error_status_mapping() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    let cases = [
        ("bad-request", 400),
        ("unauthorized", 401),
        ("blocked", 403),
        ("missing", 404),
        ("throttled", 429),
        ("broken", 500),
        ("gateway", 504),
    ];

    for (slug, status) in cases {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/collection/{slug}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(format!("status {status}")))
            .mount(&mock_server)
            .await;
    }

    match client.collection("bad-request", None).await.unwrap_err() {
        OpenseaError::InvalidRequest { message } => assert_eq!(message, "status 400"),
        other => panic!("Expected InvalidRequest error, got: {other:?}"),
    }
    assert!(matches!(
        client.collection("unauthorized", None).await,
        Err(OpenseaError::Unauthorized)
    ));
    assert!(matches!(
        client.collection("blocked", None).await,
        Err(OpenseaError::Blocked)
    ));
    match client.collection("missing", None).await.unwrap_err() {
        OpenseaError::NotFound { endpoint } => assert_eq!(endpoint, "collection/missing"),
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
    assert!(matches!(
        client.collection("throttled", None).await,
        Err(OpenseaError::RateLimited)
    ));
    match client.collection("broken", None).await.unwrap_err() {
        OpenseaError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "status 500");
        }
        other => panic!("Expected Api error, got: {other:?}"),
    }
    assert!(matches!(
        client.collection("gateway", None).await,
        Err(OpenseaError::GatewayTimeout)
    ));
}

/// Test that a non-JSON success body surfaces as a JSON error
#[tokio::test]
async fn invalid_json_body() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/collection/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let result = client.collection("html", None).await;
    assert!(matches!(result, Err(OpenseaError::Json(_))));

    let raw = client.request_bytes("collection/html", &[]).await.unwrap();
    assert_eq!(raw, b"<html>maintenance</html>");
}

/// Test that responses are exported byte for byte
#[tokio::test]
async fn export_writes_response_body() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);
    let body = r#"{"stats": {"floor_price": 1.5}}"#;

    Mock::given(method("GET"))
        .and(path("/api/v1/collection/doodles-official/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("stats.json");
    std::fs::write(&export_path, "stale").unwrap();

    let stats = client
        .collection_stats("doodles-official", Some(&export_path))
        .await
        .unwrap();

    assert_eq!(stats["stats"]["floor_price"], 1.5);
    assert_eq!(std::fs::read_to_string(&export_path).unwrap(), body);
}

/// Test that failed requests never create an export file
#[tokio::test]
async fn export_skipped_on_error() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/v1/events"))
        .respond_with(ResponseTemplate::new(400).set_body_string("limit too large"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("events.json");

    assert_err!(client.events(&EventsQuery::default(), Some(&export_path)).await);
    assert!(!export_path.exists());
}

/// Test the client-side request timeout
#[tokio::test]
async fn request_timeout() {
    let mock_server = MockServer::start().await;
    let mut config = create_test_config(&mock_server);
    config.timeout_seconds = TimeoutSeconds::new(1).unwrap();
    let client = OpenseaClient::new(config).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/collection/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let err = client.collection("slow", None).await.unwrap_err();
    assert!(err.is_transient(), "expected a timeout, got: {err:?}");
}

/// Test that a custom API version is used in request paths
#[tokio::test]
async fn custom_api_version() {
    let mock_server = MockServer::start().await;
    let mut config: OpenseaConfig = create_test_config(&mock_server);
    config.api_version = "v2".parse().unwrap();
    let client = OpenseaClient::new(config).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v2/collection/doodles-official"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = client.collection("doodles-official", None).await.unwrap();
    assert_eq!(body["ok"], true);
}
