//! Domain layer for EkiNote
//!
//! Contains the itinerary normalization engine: clock-time arithmetic,
//! the journey segment model, the segment scanner, and route assembly.
//! This layer performs no I/O and has no async dependencies.

pub mod entities;
pub mod errors;
pub mod route;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use route::{ScanOutput, assemble, destination_station, origin_station, scan};
pub use value_objects::ClockTime;
