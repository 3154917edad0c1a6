//! Integration tests for the LINE client (wiremock-based)

use serde_json::Value;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use application::ports::{MessengerPort, OutboundMessage, QuickAction};
use integration_line::{LineClient, LineClientConfig, LineError};

fn client_for(server: &MockServer) -> LineClient {
    LineClient::new(LineClientConfig {
        channel_access_token: "test_token".to_string(),
        channel_secret: "test_secret".to_string(),
        base_url: server.uri(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_push_message_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/bot/message/push"))
        .and(header("authorization", "Bearer test_token"))
        .and(body_partial_json(serde_json::json!({
            "to": "U123",
            "messages": [{ "type": "text", "text": "こんにちは" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .push_message("U123", &OutboundMessage::text("こんにちは"))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_reply_message_carries_quick_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .and(body_partial_json(serde_json::json!({
            "replyToken": "reply-token-1",
            "messages": [{
                "type": "text",
                "text": "経路情報を送信してください。",
                "quickReply": {
                    "items": [{
                        "type": "action",
                        "action": {
                            "type": "uri",
                            "label": "検索画面を開く",
                            "uri": "https://example.com/search"
                        }
                    }]
                }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let message = OutboundMessage::text("経路情報を送信してください。").with_quick_action(
        QuickAction::open_url("検索画面を開く", "https://example.com/search"),
    );
    let result = client.reply_message("reply-token-1", &message).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_push_message_surfaces_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/bot/message/push"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{ "message": "Invalid channel access token" }"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .push_message("U123", &OutboundMessage::text("x"))
        .await;

    let Err(LineError::Api { status, message }) = result else {
        unreachable!("expected an API error");
    };
    assert_eq!(status, 401);
    assert_eq!(message, "Invalid channel access token");
}

#[tokio::test]
async fn test_messenger_port_maps_errors_to_delivery() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/bot/message/push"))
        .respond_with(ResponseTemplate::new(500).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = MessengerPort::push(&client, "U123", &OutboundMessage::text("x")).await;
    assert!(matches!(
        result,
        Err(application::ApplicationError::Delivery(_))
    ));
}

#[tokio::test]
async fn test_plain_message_omits_quick_reply_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/bot/message/push"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .push_message("U123", &OutboundMessage::text("plain"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["messages"][0].get("quickReply").is_none());
}
