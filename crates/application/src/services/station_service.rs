//! Station service
//!
//! Nearby-station lookup for the "find a station around me" screen. The
//! provider's around-search returns colloquial names, so each hit is
//! sanitized through the station-name search before it is shown.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{NearbyStation, StationCoord, TransitPort};

/// How many nearby stations to request from the provider
const NEARBY_LIMIT: u8 = 4;

/// Finds and sanitizes stations near a coordinate
pub struct StationService {
    transit: Arc<dyn TransitPort>,
}

impl std::fmt::Debug for StationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationService").finish_non_exhaustive()
    }
}

impl StationService {
    /// Create a station service over the given provider
    #[must_use]
    pub fn new(transit: Arc<dyn TransitPort>) -> Self {
        Self { transit }
    }

    /// Stations near a coordinate, excluding already-known names
    ///
    /// # Errors
    ///
    /// Propagates provider errors from the around-search; a failed
    /// sanitization of a single name keeps the original name.
    #[instrument(skip(self))]
    pub async fn nearby(
        &self,
        coord: &StationCoord,
        exclude: &[String],
    ) -> Result<Vec<NearbyStation>, ApplicationError> {
        let stations = self.transit.find_nearby_stations(coord, NEARBY_LIMIT).await?;
        debug!(count = stations.len(), "Nearby stations received");

        let mut results = Vec::with_capacity(stations.len());
        for mut station in stations {
            if exclude.contains(&station.name) {
                continue;
            }
            station.name = self.sanitize_name(&station.name).await;
            results.push(station);
        }
        Ok(results)
    }

    /// Canonical provider spelling of a station name, or the name itself
    /// when the provider does not know it
    pub async fn sanitize_name(&self, name: &str) -> String {
        match self.transit.resolve_station(name).await {
            Ok(Some(station)) => station.name,
            Ok(None) | Err(_) => name.to_string(),
        }
    }
}
