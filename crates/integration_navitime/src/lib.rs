//! NAVITIME transit provider integration for EkiNote
//!
//! Provides station search, nearby-station lookup, and multi-leg route
//! search via the NAVITIME endpoints on RapidAPI (`transport_node`,
//! `transport_node/around`, `route_transit`).
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern of the other integration
//! crates. [`NavitimeClient`] defines the provider interface, implemented
//! by [`RapidApiNavitimeClient`], which also implements the application's
//! `TransitPort` so it can be plugged into the services directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_navitime::{NavitimeConfig, RapidApiNavitimeClient};
//!
//! let config = NavitimeConfig {
//!     rapid_api_key: "...".to_string(),
//!     ..NavitimeConfig::default()
//! };
//! let client = RapidApiNavitimeClient::new(&config)?;
//!
//! let stations = client.search_station("大船").await?;
//! ```

mod client;
mod config;
mod error;

pub use client::{NavitimeClient, RapidApiNavitimeClient, RouteSearchParams, TransportNode};
pub use config::NavitimeConfig;
pub use error::NavitimeError;
