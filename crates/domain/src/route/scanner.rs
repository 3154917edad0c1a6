//! Segment scanner
//!
//! Two independent index-based passes over the same segment sequence:
//! the transfer pass pairs each intermediate station point with the
//! arrival time of its preceding move and the departure time of its
//! following move; the line pass collects every ridden (non-walk) move.
//! Both passes tolerate empty or malformed sequences.

use crate::entities::segment::{SENTINEL_GOAL, SENTINEL_START};
use crate::entities::{LineRecord, Segment, TransferRecord};
use crate::value_objects::ClockTime;

/// Derived sequences produced by [`scan`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    /// One record per intermediate station, origin excluded
    pub transfers: Vec<TransferRecord>,
    /// One record per non-walk move, in traversal order
    pub lines: Vec<LineRecord>,
}

/// Name of the first non-sentinel station point, empty when none exists
#[must_use]
pub fn origin_station(segments: &[Segment]) -> &str {
    segments.iter().find_map(station_name).unwrap_or("")
}

/// Name of the last non-sentinel station point, empty when none exists
#[must_use]
pub fn destination_station(segments: &[Segment]) -> &str {
    segments.iter().rev().find_map(station_name).unwrap_or("")
}

/// Walk the segment sequence and extract transfer and line records
#[must_use]
pub fn scan(segments: &[Segment]) -> ScanOutput {
    let origin = origin_station(segments);

    let mut transfers = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        let Some(name) = station_name(segment) else {
            continue;
        };
        if is_origin_station(name, origin) {
            continue;
        }

        let arrival = i
            .checked_sub(1)
            .and_then(|j| segments.get(j))
            .and_then(move_arrival_time);
        let departure = segments.get(i + 1).and_then(move_departure_time);

        transfers.push(TransferRecord {
            sequence_index: transfers.len() as u32,
            station_name: name.to_string(),
            arrival_clock_time: arrival.cloned().unwrap_or_default(),
            departure_clock_time: departure.cloned().unwrap_or_default(),
        });
    }

    let mut lines = Vec::new();
    for segment in segments {
        let Segment::Move(leg) = segment else {
            continue;
        };
        if leg.is_walk() {
            continue;
        }
        lines.push(LineRecord {
            sequence_index: lines.len() as u32,
            line_name: leg.line_name.clone().unwrap_or_default(),
            boarding_platform: None,
            alighting_platform: None,
        });
    }

    ScanOutput { transfers, lines }
}

/// Station name of a non-sentinel point segment
///
/// Unnamed points count as stations with an empty name, matching how the
/// provider occasionally omits the field.
fn station_name(segment: &Segment) -> Option<&str> {
    let Segment::Point(point) = segment else {
        return None;
    };
    match point.name.as_deref() {
        Some(SENTINEL_START | SENTINEL_GOAL) => None,
        Some(name) => Some(name),
        None => Some(""),
    }
}

/// The origin station is never a transfer; every point matching the
/// computed origin name is skipped so it cannot be double-counted.
fn is_origin_station(name: &str, origin: &str) -> bool {
    name == origin
}

fn move_arrival_time(segment: &Segment) -> Option<&ClockTime> {
    let Segment::Move(leg) = segment else {
        return None;
    };
    leg.arrival_time.as_ref().filter(|t| !t.is_empty())
}

fn move_departure_time(segment: &Segment) -> Option<&ClockTime> {
    let Segment::Move(leg) = segment else {
        return None;
    };
    leg.departure_time.as_ref().filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> Segment {
        Segment::travel("walk", None, None, None)
    }

    #[test]
    fn test_scan_empty_sequence() {
        let output = scan(&[]);
        assert!(output.transfers.is_empty());
        assert!(output.lines.is_empty());
    }

    #[test]
    fn test_scan_sentinels_only() {
        let segments = vec![Segment::point("start"), walk(), Segment::point("goal")];
        let output = scan(&segments);
        assert!(output.transfers.is_empty());
        assert!(output.lines.is_empty());
        assert_eq!(origin_station(&segments), "");
        assert_eq!(destination_station(&segments), "");
    }

    #[test]
    fn test_scan_single_ride_excludes_origin() {
        let segments = vec![
            Segment::point("start"),
            walk(),
            Segment::point("A"),
            Segment::travel("local_train", Some("Line1"), Some("08:00"), Some("08:20")),
            Segment::point("B"),
            walk(),
            Segment::point("goal"),
        ];

        let output = scan(&segments);

        assert_eq!(output.lines.len(), 1);
        assert_eq!(output.lines[0].line_name, "Line1");
        assert_eq!(output.lines[0].boarding_platform, None);

        // "A" equals the computed origin and is excluded
        assert_eq!(output.transfers.len(), 1);
        assert_eq!(output.transfers[0].station_name, "B");
        assert_eq!(output.transfers[0].arrival_clock_time.as_str(), "08:20");
        assert!(output.transfers[0].departure_clock_time.is_empty());
    }

    #[test]
    fn test_scan_transfer_timing_from_neighbours() {
        let segments = vec![
            Segment::point("start"),
            walk(),
            Segment::point("大船"),
            Segment::travel("local_train", Some("東海道本線"), Some("08:00"), Some("08:20")),
            Segment::point("横浜"),
            Segment::travel("local_train", Some("京浜東北線"), Some("08:26"), Some("08:50")),
            Segment::point("東京"),
            walk(),
            Segment::point("goal"),
        ];

        let output = scan(&segments);

        assert_eq!(output.lines.len(), 2);
        assert_eq!(output.transfers.len(), 2);

        let yokohama = &output.transfers[0];
        assert_eq!(yokohama.sequence_index, 0);
        assert_eq!(yokohama.station_name, "横浜");
        assert_eq!(yokohama.arrival_clock_time.as_str(), "08:20");
        assert_eq!(yokohama.departure_clock_time.as_str(), "08:26");

        let tokyo = &output.transfers[1];
        assert_eq!(tokyo.sequence_index, 1);
        assert_eq!(tokyo.station_name, "東京");
        assert_eq!(tokyo.arrival_clock_time.as_str(), "08:50");
        assert!(tokyo.departure_clock_time.is_empty());
    }

    #[test]
    fn test_scan_point_at_sequence_boundary() {
        // a station point with no neighbouring moves at all
        let segments = vec![Segment::point("A"), Segment::point("B")];
        let output = scan(&segments);
        assert_eq!(output.transfers.len(), 1);
        assert_eq!(output.transfers[0].station_name, "B");
        assert!(output.transfers[0].arrival_clock_time.is_empty());
        assert!(output.transfers[0].departure_clock_time.is_empty());
    }

    #[test]
    fn test_scan_walk_moves_carry_no_line() {
        let segments = vec![
            Segment::point("A"),
            walk(),
            Segment::travel("local_train", None, None, None),
            Segment::point("B"),
        ];
        let output = scan(&segments);
        assert_eq!(output.lines.len(), 1);
        assert_eq!(output.lines[0].line_name, "");
    }

    #[test]
    fn test_scan_move_without_mode_counts_as_ride() {
        let segments = vec![Segment::Move(crate::MoveSegment::default())];
        let output = scan(&segments);
        assert_eq!(output.lines.len(), 1);
    }

    #[test]
    fn test_scan_empty_arrival_time_treated_as_absent() {
        let segments = vec![
            Segment::point("A"),
            Segment::travel("local_train", Some("Line1"), Some(""), Some("")),
            Segment::point("B"),
            Segment::travel("local_train", Some("Line2"), Some("09:00"), None),
            Segment::point("C"),
        ];
        let output = scan(&segments);
        assert_eq!(output.transfers.len(), 2);
        assert!(output.transfers[0].arrival_clock_time.is_empty());
        assert_eq!(output.transfers[0].departure_clock_time.as_str(), "09:00");
    }

    #[test]
    fn test_origin_and_destination_helpers() {
        let segments = vec![
            Segment::point("start"),
            Segment::point("A"),
            Segment::point("B"),
            Segment::point("goal"),
        ];
        assert_eq!(origin_station(&segments), "A");
        assert_eq!(destination_station(&segments), "B");
    }

    #[test]
    fn test_origin_revisit_is_skipped_everywhere() {
        // a loop that passes the origin station again mid-journey
        let segments = vec![
            Segment::point("A"),
            Segment::travel("local_train", Some("L1"), Some("08:00"), Some("08:10")),
            Segment::point("B"),
            Segment::travel("local_train", Some("L2"), Some("08:15"), Some("08:25")),
            Segment::point("A"),
            Segment::travel("local_train", Some("L3"), Some("08:30"), Some("08:40")),
            Segment::point("C"),
        ];
        let output = scan(&segments);
        let names: Vec<&str> = output
            .transfers
            .iter()
            .map(|t| t.station_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C"]);
    }
}
