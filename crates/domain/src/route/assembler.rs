//! Route assembler
//!
//! Combines the scanner's derived sequences with the journey summary
//! metadata into one normalized [`RouteResult`]. Assembly never fails:
//! absent summary fields degrade to empty strings and zero values.

use crate::entities::{JourneyItem, RouteResult};
use crate::route::scanner::{destination_station, origin_station, scan};

/// Assemble a normalized route from one provider journey candidate
///
/// `via_stations` is echoed through unchanged; the realtime delay flag is
/// left unset and populated later by the delay collaborator.
#[must_use]
pub fn assemble(item: &JourneyItem, via_stations: &[String]) -> RouteResult {
    let origin = origin_station(&item.segments).to_string();
    let destination = destination_station(&item.segments).to_string();
    let output = scan(&item.segments);
    let summary = &item.summary;

    RouteResult {
        id: format!("transit-{}", summary.sequence_number),
        origin_station: origin,
        destination_station: destination,
        via_stations: via_stations.to_vec(),
        departure_clock_time: summary.departure_time.clone(),
        arrival_clock_time: summary.arrival_time.clone(),
        duration_text: duration_text(summary.total_minutes),
        transfer_count: summary.transfer_count,
        total_fare: summary.fare_by_unit.unwrap_or(0),
        has_delay: None,
        lines: output.lines,
        transfers: output.transfers,
    }
}

/// Format total minutes as `X時間Y分`
fn duration_text(total_minutes: u32) -> String {
    format!("{}時間{}分", total_minutes / 60, total_minutes % 60)
}
