//! End-to-end scenarios through the umbrella crate's public surface.

use strata_api::{Credentials, StrataRestClient};
use strata_rest::{ClientConfig, PushPayload, PushPlatform, PushTarget, PushToken};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(api: &MockServer, push: &MockServer) -> StrataRestClient {
    StrataRestClient::with_config(
        Credentials::new("e2e-key", "e2e-secret"),
        ClientConfig::builder()
            .with_api_base(api.uri())
            .with_push_base(push.uri())
            .build(),
    )
    .unwrap()
}

#[tokio::test]
async fn create_message_returns_generated_id() {
    let api = MockServer::start().await;
    let push = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_json(serde_json::json!({"message": "hi"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "message": "hi",
            "messages_id": "42"
        })))
        .mount(&api)
        .await;

    let client = client(&api, &push);
    let stored: serde_json::Value = client
        .create("messages", &serde_json::json!({"message": "hi"}))
        .await
        .unwrap();

    assert_eq!(stored["messages_id"], "42");
}

#[tokio::test]
async fn get_missing_message_fails() {
    let api = MockServer::start().await;
    let push = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/messages/42"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such record"))
        .mount(&api)
        .await;

    let client = client(&api, &push);
    let result = client.get::<serde_json::Value>("messages", "42").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn append_tags_puts_to_the_relationship_path() {
    let api = MockServer::start().await;
    let push = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/messages/42/tags"))
        .and(body_json(serde_json::json!(["x", "y"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tags": ["x", "y"]
        })))
        .expect(1)
        .mount(&api)
        .await;

    let client = client(&api, &push);
    client
        .append("messages", "42", "tags", &["x", "y"])
        .await
        .unwrap();
}

#[tokio::test]
async fn every_data_request_is_signed() {
    let api = MockServer::start().await;
    let push = MockServer::start().await;

    // The signature scheme is opaque here, but the header must be present
    // on unauthenticated data operations.
    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(wiremock::matchers::header_exists("Authorization"))
        .and(header("Accept", "application/vnd.strata+json; version=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&api)
        .await;

    let client = client(&api, &push);
    let items: Vec<serde_json::Value> = client.get_all("messages").await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn full_session_lifecycle() {
    let api = MockServer::start().await;
    let push = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listapi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": {"properties": {"username": {"identity": true}, "password": {}}}
        })))
        .expect(1)
        .mount(&api)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/login"))
        .and(query_param("username", "ada"))
        .and(query_param("password", "pw"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "strata-session=e2e; Path=/")
                .set_body_json(serde_json::json!({"username": "ada"})),
        )
        .mount(&api)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/logout"))
        .and(header("Cookie", "strata-session=e2e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&api)
        .await;

    let client = client(&api, &push);

    client
        .login(&[("username", "ada"), ("password", "pw")])
        .await
        .unwrap();
    assert!(client.is_logged_in());

    client.logout().await.unwrap();
    assert!(!client.is_logged_in());

    // Logging out twice is a no-op.
    client.logout().await.unwrap();
}

#[tokio::test]
async fn push_round_trip() {
    let api = MockServer::start().await;
    let push = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register_device_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&push)
        .await;

    Mock::given(method("POST"))
        .and(path("/notifications"))
        .and(body_json(serde_json::json!({
            "badge": 2,
            "sound": "ping.caf",
            "alert": "hi",
            "users": ["ada"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&push)
        .await;

    let client = client(&api, &push);
    client
        .register_push("ada", &PushToken::new(PushPlatform::Android, "reg-1"))
        .await
        .unwrap();
    client
        .push(
            &PushPayload::new()
                .with_badge(2)
                .with_sound("ping.caf")
                .with_alert("hi"),
            &PushTarget::Users(vec!["ada".into()]),
        )
        .await
        .unwrap();
}
