//! Notification service
//!
//! The inbound message boundary: text that parses as a serialized route is
//! forwarded to the configured recipient and confirmed to the sender;
//! anything else is answered with a generic prompt. Delivery failures are
//! caught here and replaced with an apology reply - never retried.

use std::sync::Arc;

use domain::RouteResult;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{MessengerPort, OutboundMessage, QuickAction};
use crate::services::MessageFormatter;

/// Prompt sent for inbound content that is not a route payload
const PROMPT_TEXT: &str = "経路情報を送信してください。";
/// Apology sent when either outbound delivery fails
const APOLOGY_TEXT: &str = "送信に失敗しました。";
/// Label of the quick action linking back to the search screen
const SEARCH_ACTION_LABEL: &str = "検索画面を開く";

/// Configuration for the notification boundary
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Platform user id the forwarded message is pushed to
    pub recipient_id: String,
    /// Display name of the recipient
    pub recipient_name: String,
    /// Display name of the sender
    pub sender_name: String,
    /// URL of the web search screen offered as a quick action
    pub web_ui_url: String,
}

/// What the boundary did with one inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// Route forwarded and confirmed
    Forwarded,
    /// Content was not a route; prompt sent
    Prompted,
    /// A delivery failed; apology sent instead
    DeliveryFailed,
}

/// Handles inbound notification events against a messenger platform
pub struct NotificationService {
    messenger: Arc<dyn MessengerPort>,
    formatter: MessageFormatter,
    config: NotificationConfig,
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NotificationService {
    /// Create a notification service over the given messenger
    #[must_use]
    pub fn new(messenger: Arc<dyn MessengerPort>, config: NotificationConfig) -> Self {
        let formatter = MessageFormatter::new(&config.recipient_name, &config.sender_name);
        Self {
            messenger,
            formatter,
            config,
        }
    }

    /// Handle one inbound text event
    ///
    /// # Errors
    ///
    /// Only propagates a failure of the fallback replies themselves;
    /// route delivery failures are handled internally.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn handle_text(
        &self,
        reply_token: &str,
        text: &str,
    ) -> Result<NotificationOutcome, ApplicationError> {
        let route = match RouteResult::parse(text) {
            Ok(route) => route,
            Err(e) => {
                debug!(error = %e, "Inbound text is not a route payload");
                self.reply_with_menu(reply_token, PROMPT_TEXT).await?;
                return Ok(NotificationOutcome::Prompted);
            },
        };

        let forwarded = self.with_menu(self.formatter.format_forwarded(&route));
        if let Err(e) = self.messenger.push(&self.config.recipient_id, &forwarded).await {
            warn!(error = %e, "Pushing the forwarded message failed");
            self.reply_with_menu(reply_token, APOLOGY_TEXT).await?;
            return Ok(NotificationOutcome::DeliveryFailed);
        }

        let confirmation = self.with_menu(self.formatter.format_confirmation(&route));
        if let Err(e) = self.messenger.reply(reply_token, &confirmation).await {
            warn!(error = %e, "Replying with the confirmation failed");
            self.reply_with_menu(reply_token, APOLOGY_TEXT).await?;
            return Ok(NotificationOutcome::DeliveryFailed);
        }

        info!(route_id = %route.id, "Route forwarded");
        Ok(NotificationOutcome::Forwarded)
    }

    /// Handle an inbound event that carries no text (stickers, images, ...)
    #[instrument(skip(self))]
    pub async fn handle_non_text(
        &self,
        reply_token: &str,
    ) -> Result<NotificationOutcome, ApplicationError> {
        self.reply_with_menu(reply_token, PROMPT_TEXT).await?;
        Ok(NotificationOutcome::Prompted)
    }

    async fn reply_with_menu(
        &self,
        reply_token: &str,
        text: &str,
    ) -> Result<(), ApplicationError> {
        self.messenger
            .reply(reply_token, &self.with_menu(text.to_string()))
            .await
    }

    /// Every produced message carries the one-item search-screen menu
    fn with_menu(&self, text: String) -> OutboundMessage {
        OutboundMessage::text(text).with_quick_action(QuickAction::open_url(
            SEARCH_ACTION_LABEL,
            &self.config.web_ui_url,
        ))
    }
}
