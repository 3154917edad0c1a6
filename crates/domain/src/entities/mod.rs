//! Domain entities

mod route;
pub(crate) mod segment;

pub use route::{LineRecord, RouteResult, TransferRecord};
pub use segment::{Coordinate, JourneyItem, JourneySummary, MoveSegment, PointSegment, Segment};
