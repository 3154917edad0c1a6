//! Application ports
//!
//! Interfaces the integration crates implement: the transit provider and
//! the messaging platform.

mod messenger_port;
mod transit_port;

#[cfg(test)]
pub use messenger_port::MockMessengerPort;
pub use messenger_port::{MessengerPort, OutboundMessage, QuickAction};
#[cfg(test)]
pub use transit_port::MockTransitPort;
pub use transit_port::{NearbyStation, ResolvedStation, RouteQuery, StationCoord, TransitPort};
