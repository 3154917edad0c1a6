//! Itinerary normalization
//!
//! Walks a provider journey's segment sequence and produces the normalized
//! route model: [`scan`] derives transfer and line records, [`assemble`]
//! combines them with the journey summary into a [`crate::RouteResult`].

mod assembler;
mod scanner;

pub use assembler::assemble;
pub use scanner::{ScanOutput, destination_station, origin_station, scan};
