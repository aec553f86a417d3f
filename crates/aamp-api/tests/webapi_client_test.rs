#![allow(clippy::unwrap_used)]
// Integration tests for `WebApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aamp_api::webapi::models::{CalibrationScope, VolumeCategory};
use aamp_api::{Credentials, Error, WebApiClient};

// ── Helpers ─────────────────────────────────────────────────────────

/// base64("client:secret")
const OAUTH_BASIC: &str = "Basic Y2xpZW50OnNlY3JldA==";

async fn setup() -> (MockServer, WebApiClient) {
    let server = MockServer::start().await;
    let client = WebApiClient::with_client(
        reqwest::Client::new(),
        &server.uri(),
        Credentials::new("operator", "web-pass"),
    )
    .unwrap();
    (server, client)
}

async fn mount_token(server: &MockServer, expires_in: i64, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("Authorization", OAUTH_BASIC))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=operator"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-1",
            "token_type": "bearer",
            "expires_in": expires_in
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn bearer() -> wiremock::matchers::HeaderExactMatcher {
    header("Authorization", "Bearer tok-1")
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_token_is_reused_until_expiry() {
    let (server, client) = setup().await;
    mount_token(&server, 3600, 1).await;

    Mock::given(method("POST"))
        .and(path("/webapi/v1/testTone"))
        .and(bearer())
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    client.start_test_tone(12, 2).await.unwrap();
    client.start_test_tone(12, 2).await.unwrap();
}

#[tokio::test]
async fn test_expired_token_is_renewed() {
    let (server, client) = setup().await;
    mount_token(&server, 0, 2).await;

    Mock::given(method("POST"))
        .and(path("/webapi/v1/testTone"))
        .and(bearer())
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    client.start_test_tone(3, 1).await.unwrap();
    client.start_test_tone(3, 1).await.unwrap();
}

#[tokio::test]
async fn test_oversized_token_lifetime_is_accepted() {
    let (server, client) = setup().await;
    mount_token(&server, 100_000_000_000_000, 1).await;

    let token = client.fetch_access_token().await.unwrap();
    assert!(!token.is_expired());
    assert!(token.expires_at() > chrono::Utc::now());
}

#[tokio::test]
async fn test_token_refused_is_auth_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/webapi/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    match client.list_devices().await {
        Err(Error::Authentication { message }) => assert!(message.contains("invalid_grant")),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_bearer_is_auth_error() {
    let (server, client) = setup().await;
    mount_token(&server, 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/webapi/v1/devices"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_devices().await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

// ── Device tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices() {
    let (server, client) = setup().await;
    mount_token(&server, 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/webapi/v1/devices"))
        .and(query_param("size", "2147483647"))
        .and(bearer())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "mac": "ACCC8E112233",
                "ipAddress": "10.1.0.20",
                "productName": "AXIS C1211-E",
                "type": "C1211-E",
                "fwVersion": "11.8.3",
                "sinks": [{ "id": 41, "zones": [{ "id": 6, "name": "Warehouse" }] }]
            }
        ])))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ip_address.as_deref(), Some("10.1.0.20"));
    assert_eq!(devices[0].fw_version.as_deref(), Some("11.8.3"));
    assert_eq!(devices[0].sinks[0].zones[0].id, 6);
}

#[tokio::test]
async fn test_test_tone_body_and_failure() {
    let (server, client) = setup().await;
    mount_token(&server, 3600, 1).await;

    Mock::given(method("POST"))
        .and(path("/webapi/v1/testTone"))
        .and(body_json(json!({ "sinkId": 9, "toneLength": 4 })))
        .respond_with(ResponseTemplate::new(409).set_body_string("tone already playing"))
        .mount(&server)
        .await;

    match client.start_test_tone(9, 4).await {
        Err(Error::WebApi { status, message }) => {
            assert_eq!(status, 409);
            assert!(message.contains("already playing"));
        }
        other => panic!("expected WebApi error, got: {other:?}"),
    }
}

// ── Zone tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_assign_sink_to_zone() {
    let (server, client) = setup().await;
    mount_token(&server, 3600, 1).await;

    Mock::given(method("POST"))
        .and(path("/webapi/v1/zones/6/sinksAssignment"))
        .and(body_json(json!({ "sinkIds": [41] })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "successfulIds": [41], "failedIds": [] })),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/webapi/v1/zones/7/sinksAssignment"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "successfulIds": [], "failedIds": [41] })),
        )
        .mount(&server)
        .await;

    assert!(client.assign_sink_to_zone(6, 41).await.unwrap());
    assert!(!client.assign_sink_to_zone(7, 41).await.unwrap());
}

// ── Volume tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_volume_calibration() {
    let (server, client) = setup().await;
    mount_token(&server, 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/webapi/v1/zones/6/volumes"))
        .and(bearer())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "volumes": {
                    "MUSIC": { "defaultGainOffset": -3000 },
                    "ANNOUNCEMENT": { "defaultGainOffset": 0 },
                    "PAGING": { "defaultGainOffset": 1500 }
                }
            }
        })))
        .mount(&server)
        .await;

    let volumes = client
        .get_volume_calibration(CalibrationScope::Zones, 6)
        .await
        .unwrap();
    assert_eq!(volumes.len(), 3);
    assert_eq!(volumes["MUSIC"].default_gain_offset, Some(-3000));
    assert_eq!(volumes["PAGING"].default_gain_offset, Some(1500));
}

#[tokio::test]
async fn test_set_volume_calibration() {
    let (server, client) = setup().await;
    mount_token(&server, 3600, 1).await;

    Mock::given(method("PUT"))
        .and(path("/webapi/v1/sites/2/volumes/ANNOUNCEMENT"))
        .and(bearer())
        .and(body_json(json!({ "defaultGainOffset": -2500 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_volume_calibration(CalibrationScope::Sites, 2, VolumeCategory::Announcement, -2500)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_out_of_range_volume_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let result = client
        .set_volume_calibration(CalibrationScope::Zones, 1, VolumeCategory::Music, 100_001)
        .await;
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}
