//! LINE webhook handling
//!
//! Receives and validates webhook requests from the LINE platform. LINE
//! signs the raw request body with HMAC-SHA256 over the channel secret
//! and sends the base64 digest in the `x-line-signature` header.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// HTTP header carrying the webhook signature
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// A LINE webhook request body
#[derive(Debug, Deserialize)]
pub struct WebhookRequestBody {
    /// Bot user id the events were sent to
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// A single webhook event
///
/// Only the fields the notification flow needs are modeled; unknown
/// event kinds deserialize with empty defaults and are prompted rather
/// than rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Event kind, `"message"` for inbound messages
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// One-shot token for replying to this event
    #[serde(default)]
    pub reply_token: String,
    #[serde(default)]
    pub source: EventSource,
    #[serde(default)]
    pub message: Option<EventMessage>,
}

/// The sender of a webhook event
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// The message carried by a message event
#[derive(Debug, Default, Deserialize)]
pub struct EventMessage {
    /// Message kind, `"text"` for text messages
    #[serde(rename = "type", default)]
    pub message_type: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl WebhookEvent {
    /// The text body of this event when it is a text message
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        if self.event_type != "message" {
            return None;
        }
        self.message
            .as_ref()
            .filter(|message| message.message_type == "text")
            .and_then(|message| message.text.as_deref())
    }
}

/// Verify a webhook signature against the raw request body
#[must_use]
pub fn verify_signature(payload: &[u8], signature: &str, channel_secret: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        warn!("Failed to create HMAC");
        return false;
    };

    mac.update(payload);

    let Ok(expected) = STANDARD.decode(signature) else {
        warn!("Failed to decode signature base64");
        return false;
    };

    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &[u8], secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload);
        STANDARD.encode(mac.finalize().into_bytes())
    }

    #[test]
    fn verifies_matching_signature() {
        let payload = br#"{"destination":"U123","events":[]}"#;
        let signature = sign(payload, "secret");
        assert!(verify_signature(payload, &signature, "secret"));
    }

    #[test]
    fn rejects_wrong_secret() {
        let payload = b"body";
        let signature = sign(payload, "secret");
        assert!(!verify_signature(payload, &signature, "other"));
    }

    #[test]
    fn rejects_tampered_payload() {
        let signature = sign(b"original", "secret");
        assert!(!verify_signature(b"tampered", &signature, "secret"));
    }

    #[test]
    fn rejects_garbage_signature() {
        assert!(!verify_signature(b"body", "not base64 at all", "secret"));
    }

    #[test]
    fn parses_text_message_event() {
        let json = r#"{
            "destination": "U000",
            "events": [{
                "type": "message",
                "replyToken": "reply-token-1",
                "source": { "type": "user", "userId": "U123" },
                "message": { "type": "text", "id": "m1", "text": "hello" }
            }]
        }"#;

        let body: WebhookRequestBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.events.len(), 1);

        let event = &body.events[0];
        assert_eq!(event.reply_token, "reply-token-1");
        assert_eq!(event.source.user_id.as_deref(), Some("U123"));
        assert_eq!(event.text_content(), Some("hello"));
    }

    #[test]
    fn non_text_message_has_no_text_content() {
        let json = r#"{
            "events": [{
                "type": "message",
                "replyToken": "r1",
                "message": { "type": "sticker", "id": "m2" }
            }]
        }"#;

        let body: WebhookRequestBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.events[0].text_content(), None);
    }

    #[test]
    fn non_message_event_has_no_text_content() {
        let json = r#"{
            "events": [{ "type": "follow", "replyToken": "r2" }]
        }"#;

        let body: WebhookRequestBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.events[0].event_type, "follow");
        assert_eq!(body.events[0].text_content(), None);
    }

    #[test]
    fn tolerates_unknown_event_shape() {
        let body: WebhookRequestBody = serde_json::from_str(r#"{ "events": [{}] }"#).unwrap();
        assert!(body.events[0].event_type.is_empty());
        assert!(body.events[0].source.user_id.is_none());
    }
}
