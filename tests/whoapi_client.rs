//! WhoAPI client against a local mock server.

use std::time::Duration;

use mail_spoof::initialization::init_client;
use mail_spoof::{RegistrationChecker, RegistrationError, WhoApiClient};
use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_whoapi(domain: &str, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("domain", domain))
        .and(query_param("r", "taken"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> WhoApiClient {
    let http = init_client(Duration::from_secs(2)).unwrap();
    WhoApiClient::new(http, format!("{}/", server.uri()), "test-key")
}

#[tokio::test]
async fn test_taken_domain() {
    let server = mock_whoapi("google.com", json!({"status": "0", "taken": 1})).await;
    assert!(client_for(&server).is_registered("google.com").await.unwrap());
}

#[tokio::test]
async fn test_free_domain() {
    let server = mock_whoapi(
        "free-domain.net",
        json!({"status": 0, "taken": "0", "status_desc": "Successful"}),
    )
    .await;
    assert!(!client_for(&server)
        .is_registered("free-domain.net")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_service_error_carries_description() {
    let server = mock_whoapi(
        "acme.com",
        json!({"status": "12", "status_desc": "Daily limit reached"}),
    )
    .await;

    match client_for(&server).is_registered("acme.com").await {
        Err(RegistrationError::Service(desc)) => assert_eq!(desc, "Daily limit reached"),
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_taken_field() {
    let server = mock_whoapi("acme.com", json!({"status": "0"})).await;
    assert!(matches!(
        client_for(&server).is_registered("acme.com").await,
        Err(RegistrationError::MissingField(_))
    ));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(matches!(
        client_for(&server).is_registered("acme.com").await,
        Err(RegistrationError::Http(_))
    ));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "0", "taken": 1}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let http = init_client(Duration::from_millis(200)).unwrap();
    let client = WhoApiClient::new(http, server.uri(), "test-key");
    assert!(matches!(
        client.is_registered("acme.com").await,
        Err(RegistrationError::Http(_))
    ));
}
