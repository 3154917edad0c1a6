//! Application services

mod message_formatter;
mod notification_service;
mod route_search_service;
mod station_service;

pub use message_formatter::{DELAY_MARKER, MessageFormatter};
pub use notification_service::{NotificationConfig, NotificationOutcome, NotificationService};
pub use route_search_service::{MAX_VIA_STATIONS, RouteSearchService};
pub use station_service::StationService;
