//! Normalized route model
//!
//! Output of the normalization engine: a UI- and messaging-ready route
//! with station sequence, per-transfer timing, and the line sequence.
//! Serialized with camelCase keys so a route forwarded as JSON round-trips
//! through the inbound notification path unchanged.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::ClockTime;

/// One intermediate station the rider passes through or changes at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    /// Zero-based position among emitted transfer records
    pub sequence_index: u32,
    /// Station name, empty when the provider omitted it
    #[serde(default)]
    pub station_name: String,
    /// Arrival time from the preceding move, empty when absent
    #[serde(default)]
    pub arrival_clock_time: ClockTime,
    /// Departure time from the following move, empty when absent
    #[serde(default)]
    pub departure_clock_time: ClockTime,
}

/// One ridden line in traversal order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    /// Zero-based position among emitted line records
    pub sequence_index: u32,
    /// Line name, empty when the provider omitted it
    #[serde(default)]
    pub line_name: String,
    /// Boarding platform; reserved, the current provider supplies none
    pub boarding_platform: Option<String>,
    /// Alighting platform; reserved, the current provider supplies none
    pub alighting_platform: Option<String>,
}

/// A normalized multi-leg route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    /// Stable identifier derived from the provider sequence number
    pub id: String,
    /// First non-sentinel station of the journey
    #[serde(default)]
    pub origin_station: String,
    /// Last non-sentinel station of the journey
    #[serde(default)]
    pub destination_station: String,
    /// Requested via stations, echoed through unchanged
    #[serde(default)]
    pub via_stations: Vec<String>,
    /// Overall departure clock time
    #[serde(default)]
    pub departure_clock_time: ClockTime,
    /// Overall arrival clock time
    #[serde(default)]
    pub arrival_clock_time: ClockTime,
    /// Localized total duration, e.g. `1時間24分`
    #[serde(default)]
    pub duration_text: String,
    /// Number of transfers reported by the provider
    #[serde(default)]
    pub transfer_count: u32,
    /// Total fare, zero when the provider omitted it
    #[serde(default)]
    pub total_fare: u32,
    /// Realtime delay flag, populated by an outside collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_delay: Option<bool>,
    /// One record per non-walk move, in traversal order
    #[serde(default)]
    pub lines: Vec<LineRecord>,
    /// Intermediate stations, origin excluded
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
}

impl RouteResult {
    /// Parse inbound text as a serialized route
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnparseableRoute`] when the text is not valid
    /// JSON or does not match the route shape. Callers at the message
    /// boundary treat this as "answer with a prompt", never as a failure.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        serde_json::from_str(text).map_err(|e| DomainError::UnparseableRoute(e.to_string()))
    }
}
