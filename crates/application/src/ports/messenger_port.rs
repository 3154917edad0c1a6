//! Messenger port - interface for the outbound messaging platform

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A quick-action menu entry attached to an outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    /// Button label shown to the user
    pub label: String,
    /// URI opened when the action is tapped
    pub uri: String,
}

impl QuickAction {
    /// A quick action that opens a URL
    #[must_use]
    pub fn open_url(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            uri: uri.into(),
        }
    }
}

/// A platform-independent outbound text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Message body
    pub text: String,
    /// Attached quick-action menu, possibly empty
    #[serde(default)]
    pub quick_actions: Vec<QuickAction>,
}

impl OutboundMessage {
    /// Create a plain text message
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quick_actions: Vec::new(),
        }
    }

    /// Attach a quick action to the message
    #[must_use]
    pub fn with_quick_action(mut self, action: QuickAction) -> Self {
        self.quick_actions.push(action);
        self
    }
}

/// Port for messaging platform operations
///
/// Neither operation is retried by callers inside this layer; a delivery
/// failure is surfaced as [`ApplicationError::Delivery`] and handled at
/// the notification boundary.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessengerPort: Send + Sync {
    /// Push a message to a recipient by platform user id
    async fn push(
        &self,
        recipient: &str,
        message: &OutboundMessage,
    ) -> Result<(), ApplicationError>;

    /// Reply to an inbound event using its reply token
    async fn reply(
        &self,
        reply_token: &str,
        message: &OutboundMessage,
    ) -> Result<(), ApplicationError>;
}
