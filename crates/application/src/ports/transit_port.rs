//! Transit provider port
//!
//! Defines the interface for station lookup and journey search. The
//! NAVITIME integration crate implements this port.

use async_trait::async_trait;
use domain::JourneyItem;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A WGS84 coordinate pair used for provider queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationCoord {
    pub latitude: f64,
    pub longitude: f64,
}

impl StationCoord {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A station name resolved to its canonical form and coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStation {
    /// Canonical station name as known to the provider
    pub name: String,
    /// Station coordinate
    pub coord: StationCoord,
}

/// A station near a queried coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyStation {
    /// Station name
    pub name: String,
    /// Walking time from the queried coordinate in minutes
    pub walk_minutes: u32,
}

/// Parameters for a journey search
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    /// Origin coordinate
    pub from: StationCoord,
    /// Destination coordinate
    pub to: StationCoord,
    /// Departure time in `YYYY-MM-DDTHH:MM:SS` local form
    pub start_time: String,
    /// Via stations, at most three
    pub via: Vec<String>,
}

/// Port for transit provider operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitPort: Send + Sync {
    /// Resolve a station name to its canonical form and coordinate
    ///
    /// Returns `Ok(None)` when the provider knows no such station.
    async fn resolve_station(
        &self,
        name: &str,
    ) -> Result<Option<ResolvedStation>, ApplicationError>;

    /// Find stations near a coordinate, ordered by walking time
    async fn find_nearby_stations(
        &self,
        coord: &StationCoord,
        max_results: u8,
    ) -> Result<Vec<NearbyStation>, ApplicationError>;

    /// Search multi-leg journeys between two coordinates
    async fn search_routes(&self, query: &RouteQuery)
    -> Result<Vec<JourneyItem>, ApplicationError>;

    /// Check if the provider is reachable
    async fn is_available(&self) -> bool;
}
