//! Integration tests for the HTTP client functionality.
//!
//! These tests verify client configuration, request building, and the
//! classification of live error responses served by a mock server.

use parcelbase_api::clients::{HttpClient, HttpMethod, HttpRequest};
use parcelbase_api::{ApiBaseUrl, ApiErrorKind, ApiKey, HttpError, ParcelbaseConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the given mock server.
fn create_test_config(server: &MockServer) -> ParcelbaseConfig {
    ParcelbaseConfig::builder()
        .api_key(ApiKey::new("pbk_test_token").unwrap())
        .api_base(ApiBaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// Request Construction Tests
// ============================================================================

#[test]
fn test_full_workflow_config_to_client_to_request() {
    let config = ParcelbaseConfig::builder()
        .api_key(ApiKey::new("pbk_test_token").unwrap())
        .build()
        .unwrap();

    let client = HttpClient::new(&config);

    assert_eq!(client.base_uri(), "https://api.parcelbase.com/v2");
    assert!(client.default_headers().contains_key("Authorization"));

    let request = HttpRequest::builder(HttpMethod::Get, "shipments")
        .query_param("page_size", "50")
        .build()
        .unwrap();

    assert_eq!(request.http_method, HttpMethod::Get);
    assert_eq!(request.path, "shipments");
    assert!(request.query.is_some());
}

#[test]
fn test_invalid_request_produces_correct_error() {
    // POST without body should fail
    let result = HttpRequest::builder(HttpMethod::Post, "shipments").build();

    assert!(matches!(
        result,
        Err(parcelbase_api::InvalidHttpRequestError::MissingBody { .. })
    ));

    // Empty path should fail
    let result = HttpRequest::builder(HttpMethod::Get, "").build();
    assert!(matches!(
        result,
        Err(parcelbase_api::InvalidHttpRequestError::EmptyPath)
    ));
}

// ============================================================================
// Live Request Tests (mock server)
// ============================================================================

#[tokio::test]
async fn test_get_request_sends_auth_and_parses_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/addresses/adr_1"))
        .and(header("Authorization", "Bearer pbk_test_token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "adr_1",
            "city": "San Francisco"
        })))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&create_test_config(&mock_server));
    let response = client.get("addresses/adr_1", None).await.unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(
        response.body.get("city").and_then(|v| v.as_str()),
        Some("San Francisco")
    );
}

#[tokio::test]
async fn test_query_parameters_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shipments"))
        .and(query_param("page_size", "25"))
        .and(query_param("after_id", "shp_9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shipments": [],
            "has_more": false
        })))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&create_test_config(&mock_server));
    let request = HttpRequest::builder(HttpMethod::Get, "shipments")
        .query_param("page_size", "25")
        .query_param("after_id", "shp_9")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();
    assert_eq!(response.code, 200);
}

#[tokio::test]
async fn test_not_found_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shipments/shp_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": "NOT_FOUND",
                "message": "The requested resource could not be found.",
                "errors": []
            }
        })))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&create_test_config(&mock_server));
    let error = client
        .get("shipments/shp_missing", None)
        .await
        .unwrap_err();

    match error {
        HttpError::Api(e) => {
            assert_eq!(e.kind, ApiErrorKind::NotFound);
            assert_eq!(e.http_status, 404);
            assert_eq!(e.code, "NOT_FOUND");
            assert_eq!(e.message, "The requested resource could not be found.");
        }
        other => panic!("expected classified API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_error_body_degrades_gracefully() {
    let mock_server = MockServer::start().await;

    // A proxy answering with HTML instead of the API's JSON shape
    Mock::given(method("GET"))
        .and(path("/shipments"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&create_test_config(&mock_server));
    let error = client.get("shipments", None).await.unwrap_err();

    assert_eq!(error.api_kind(), Some(ApiErrorKind::GatewayTimeout));
    match error {
        HttpError::Api(e) => {
            assert_eq!(e.message, "Bad Gateway");
            assert_eq!(e.code, parcelbase_api::clients::UNPARSEABLE_CODE);
        }
        other => panic!("expected classified API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trackers"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": "RATE_LIMITED",
                "message": "Too many requests.",
                "errors": []
            }
        })))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&create_test_config(&mock_server));
    let error = client.get("trackers", None).await.unwrap_err();

    assert_eq!(error.api_kind(), Some(ApiErrorKind::RateLimit));
}

#[tokio::test]
async fn test_connection_failure_classifies_as_connection() {
    // Nothing is listening on this port
    let config = ParcelbaseConfig::builder()
        .api_key(ApiKey::new("pbk_test_token").unwrap())
        .api_base(ApiBaseUrl::new("http://127.0.0.1:1").unwrap())
        .build()
        .unwrap();

    let client = HttpClient::new(&config);
    let error = client.get("shipments", None).await.unwrap_err();

    match error {
        HttpError::Api(e) => {
            assert_eq!(e.kind, ApiErrorKind::Connection);
            assert_eq!(e.http_status, 0);
            assert!(!e.message.is_empty());
        }
        other => panic!("expected connection error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/addresses"))
        .and(wiremock::matchers::body_json(json!({
            "address": {"street1": "417 Montgomery St"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "adr_new",
            "street1": "417 Montgomery St"
        })))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&create_test_config(&mock_server));
    let response = client
        .post(
            "addresses",
            json!({"address": {"street1": "417 Montgomery St"}}),
        )
        .await
        .unwrap();

    assert_eq!(response.code, 201);
    assert_eq!(
        response.body.get("id").and_then(|v| v.as_str()),
        Some("adr_new")
    );
}
