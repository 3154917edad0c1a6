//! Application layer for EkiNote
//!
//! Orchestrates the normalization engine behind two boundaries: the route
//! search path (provider → normalized routes) and the notification path
//! (inbound route payload → forwarded and confirmation messages). Ports
//! define the interfaces that the integration crates implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
