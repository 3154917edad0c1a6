//! LINE client for sending messages
//!
//! Uses the LINE Messaging API to push and reply with text messages.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use application::ApplicationError;
use application::ports::{MessengerPort, OutboundMessage};

/// LINE Messaging API errors
#[derive(Debug, Error)]
pub enum LineError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Invalid signature")]
    InvalidSignature,
}

/// LINE client configuration
#[derive(Debug, Clone)]
pub struct LineClientConfig {
    /// Channel access token for the Messaging API
    pub channel_access_token: String,
    /// Channel secret for webhook signature verification
    pub channel_secret: String,
    /// API base URL (default: <https://api.line.me>)
    pub base_url: String,
}

impl Default for LineClientConfig {
    fn default() -> Self {
        Self {
            channel_access_token: String::new(),
            channel_secret: String::new(),
            base_url: "https://api.line.me".to_string(),
        }
    }
}

/// LINE client for the Messaging API
#[derive(Debug, Clone)]
pub struct LineClient {
    client: Client,
    config: LineClientConfig,
}

/// Push message request body
#[derive(Debug, Serialize)]
struct PushRequest {
    to: String,
    messages: Vec<TextMessage>,
}

/// Reply message request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest {
    reply_token: String,
    messages: Vec<TextMessage>,
}

/// A text message in LINE wire format
#[derive(Debug, Serialize)]
struct TextMessage {
    #[serde(rename = "type")]
    msg_type: &'static str,
    text: String,
    #[serde(rename = "quickReply", skip_serializing_if = "Option::is_none")]
    quick_reply: Option<QuickReply>,
}

#[derive(Debug, Serialize)]
struct QuickReply {
    items: Vec<QuickReplyItem>,
}

#[derive(Debug, Serialize)]
struct QuickReplyItem {
    #[serde(rename = "type")]
    item_type: &'static str,
    action: UriAction,
}

#[derive(Debug, Serialize)]
struct UriAction {
    #[serde(rename = "type")]
    action_type: &'static str,
    label: String,
    uri: String,
}

/// API error response body
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: String,
}

impl TextMessage {
    fn from_outbound(message: &OutboundMessage) -> Self {
        let quick_reply = if message.quick_actions.is_empty() {
            None
        } else {
            Some(QuickReply {
                items: message
                    .quick_actions
                    .iter()
                    .map(|action| QuickReplyItem {
                        item_type: "action",
                        action: UriAction {
                            action_type: "uri",
                            label: action.label.clone(),
                            uri: action.uri.clone(),
                        },
                    })
                    .collect(),
            })
        };

        Self {
            msg_type: "text",
            text: message.text.clone(),
            quick_reply,
        }
    }
}

impl LineClient {
    /// Create a new LINE client
    ///
    /// # Errors
    ///
    /// Returns an error if the channel access token or secret is missing.
    pub fn new(config: LineClientConfig) -> Result<Self, LineError> {
        if config.channel_access_token.is_empty() {
            return Err(LineError::Configuration(
                "channel_access_token is required".to_string(),
            ));
        }
        if config.channel_secret.is_empty() {
            return Err(LineError::Configuration(
                "channel_secret is required".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    /// Push a text message to a user
    #[instrument(skip(self, message), fields(to = %to))]
    pub async fn push_message(
        &self,
        to: &str,
        message: &OutboundMessage,
    ) -> Result<(), LineError> {
        let request = PushRequest {
            to: to.to_string(),
            messages: vec![TextMessage::from_outbound(message)],
        };

        debug!(message_len = message.text.len(), "Pushing LINE message");

        self.post_json("/v2/bot/message/push", &request).await
    }

    /// Reply to an inbound event using its reply token
    #[instrument(skip(self, message, reply_token))]
    pub async fn reply_message(
        &self,
        reply_token: &str,
        message: &OutboundMessage,
    ) -> Result<(), LineError> {
        let request = ReplyRequest {
            reply_token: reply_token.to_string(),
            messages: vec![TextMessage::from_outbound(message)],
        };

        debug!(message_len = message.text.len(), "Replying to LINE event");

        self.post_json("/v2/bot/message/reply", &request).await
    }

    /// Verify a webhook signature (wrapper around `webhook::verify_signature`)
    ///
    /// # Errors
    ///
    /// Returns [`LineError::InvalidSignature`] when the signature does not
    /// match the request body.
    pub fn verify_signature(&self, payload: &[u8], signature: &str) -> Result<(), LineError> {
        if crate::webhook::verify_signature(payload, signature, &self.config.channel_secret) {
            Ok(())
        } else {
            Err(LineError::InvalidSignature)
        }
    }

    async fn post_json<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        request: &T,
    ) -> Result<(), LineError> {
        let response = self
            .client
            .post(format!("{}{endpoint}", self.config.base_url))
            .bearer_auth(&self.config.channel_access_token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let error: ApiErrorResponse = response.json().await.unwrap_or_else(|_| ApiErrorResponse {
            message: "unknown error".to_string(),
        });
        Err(LineError::Api {
            status: status.as_u16(),
            message: error.message,
        })
    }
}

#[async_trait]
impl MessengerPort for LineClient {
    async fn push(
        &self,
        recipient: &str,
        message: &OutboundMessage,
    ) -> Result<(), ApplicationError> {
        self.push_message(recipient, message)
            .await
            .map_err(|e| ApplicationError::Delivery(e.to_string()))
    }

    async fn reply(
        &self,
        reply_token: &str,
        message: &OutboundMessage,
    ) -> Result<(), ApplicationError> {
        self.reply_message(reply_token, message)
            .await
            .map_err(|e| ApplicationError::Delivery(e.to_string()))
    }
}
