//! LINE Messaging API integration
//!
//! Handles LINE webhook signature verification and outbound message
//! delivery (push and reply) for EkiNote. [`LineClient`] implements the
//! application's `MessengerPort` so it can be plugged into the
//! notification service directly.

pub mod client;
pub mod webhook;

pub use client::{LineClient, LineClientConfig, LineError};
pub use webhook::{WebhookEvent, WebhookRequestBody, verify_signature};
