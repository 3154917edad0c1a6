//! Journey segment model
//!
//! A provider journey is an ordered sequence of segments alternating (not
//! strictly) between points and moves. Adjacency is meaningful: a point's
//! surrounding moves determine its arrival and departure times.

use serde::{Deserialize, Serialize};

use crate::value_objects::ClockTime;

/// Sentinel point name marking the overall journey origin
pub(crate) const SENTINEL_START: &str = "start";
/// Sentinel point name marking the overall journey destination
pub(crate) const SENTINEL_GOAL: &str = "goal";

/// One atomic unit of a journey description
///
/// Tagged union over point and move variants, mirroring the provider wire
/// format (`"type": "point" | "move"`). Fields that the provider may omit
/// are per-variant options rather than one flat optional-heavy record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// A station or boundary marker
    Point(PointSegment),
    /// A travel leg between two points
    Move(MoveSegment),
}

/// A station or boundary marker within the segment sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSegment {
    /// Station name; `"start"` and `"goal"` are boundary sentinels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Station coordinate when supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coordinate>,
}

/// A travel leg between two adjacent points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveSegment {
    /// Travel mode token; `"walk"` distinguishes walking from riding
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Name of the line ridden, absent for walking legs
    #[serde(rename = "line_name", skip_serializing_if = "Option::is_none")]
    pub line_name: Option<String>,
    /// Departure clock time at the leg's first point
    #[serde(rename = "from_time", skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<ClockTime>,
    /// Arrival clock time at the leg's last point
    #[serde(rename = "to_time", skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<ClockTime>,
}

impl Segment {
    /// Build a point segment
    #[must_use]
    pub fn point(name: impl Into<String>) -> Self {
        Self::Point(PointSegment {
            name: Some(name.into()),
            coord: None,
        })
    }

    /// Build a move segment
    #[must_use]
    pub fn travel(
        mode: impl Into<String>,
        line_name: Option<&str>,
        departure_time: Option<&str>,
        arrival_time: Option<&str>,
    ) -> Self {
        Self::Move(MoveSegment {
            mode: Some(mode.into()),
            line_name: line_name.map(ToString::to_string),
            departure_time: departure_time.map(ClockTime::from),
            arrival_time: arrival_time.map(ClockTime::from),
        })
    }
}

impl MoveSegment {
    /// Whether this leg is a walking transfer rather than a ride
    ///
    /// An absent mode counts as a ride; only an explicit `"walk"` token
    /// marks a walking leg.
    #[must_use]
    pub fn is_walk(&self) -> bool {
        self.mode.as_deref() == Some("walk")
    }
}

/// A WGS84 coordinate as supplied by the provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// One journey candidate from the transit-search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyItem {
    /// Ordered segment sequence
    pub segments: Vec<Segment>,
    /// Pre-aggregated timing/fare block
    pub summary: JourneySummary,
}

/// Journey-level summary metadata, distinct from the segment list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneySummary {
    /// Overall origin name as reported by the provider
    #[serde(default)]
    pub origin_name: String,
    /// Overall destination name as reported by the provider
    #[serde(default)]
    pub destination_name: String,
    /// Overall departure clock time
    #[serde(default)]
    pub departure_time: ClockTime,
    /// Overall arrival clock time
    #[serde(default)]
    pub arrival_time: ClockTime,
    /// Total travel time in minutes
    #[serde(default)]
    pub total_minutes: u32,
    /// Number of transfers
    #[serde(default)]
    pub transfer_count: u32,
    /// Fare in the provider's base unit, absent when unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fare_by_unit: Option<u32>,
    /// Provider-assigned sequence number for this journey candidate
    #[serde(default)]
    pub sequence_number: String,
}
