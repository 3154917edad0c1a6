//! Route search service
//!
//! Orchestrates the transit provider passthrough: station names are
//! resolved to coordinates, the provider searches journey candidates, and
//! each candidate is assembled into a normalized route.

use std::sync::Arc;

use domain::{RouteResult, assemble};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{RouteQuery, StationCoord, TransitPort};

/// Upper bound on requested via stations
pub const MAX_VIA_STATIONS: usize = 3;

/// Searches and normalizes multi-leg routes via the transit provider
pub struct RouteSearchService {
    transit: Arc<dyn TransitPort>,
}

impl std::fmt::Debug for RouteSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteSearchService").finish_non_exhaustive()
    }
}

impl RouteSearchService {
    /// Create a search service over the given provider
    #[must_use]
    pub fn new(transit: Arc<dyn TransitPort>) -> Self {
        Self { transit }
    }

    /// Search routes between two named stations
    ///
    /// `start_time` is passed through to the provider in local
    /// `YYYY-MM-DDTHH:MM:SS` form; `via` stations are echoed into each
    /// result unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidRequest`] for more than
    /// [`MAX_VIA_STATIONS`] via stations, and propagates provider errors.
    #[instrument(skip(self), fields(from = %from, to = %to))]
    pub async fn search(
        &self,
        from: &str,
        to: &str,
        start_time: &str,
        via: &[String],
    ) -> Result<Vec<RouteResult>, ApplicationError> {
        if via.len() > MAX_VIA_STATIONS {
            return Err(ApplicationError::InvalidRequest(format!(
                "At most {MAX_VIA_STATIONS} via stations are supported, got {}",
                via.len()
            )));
        }

        let from_coord = self.station_coord(from).await?;
        let to_coord = self.station_coord(to).await?;

        let query = RouteQuery {
            from: from_coord,
            to: to_coord,
            start_time: start_time.to_string(),
            via: via.to_vec(),
        };
        let items = self.transit.search_routes(&query).await?;
        debug!(count = items.len(), "Journey candidates received");

        Ok(items.iter().map(|item| assemble(item, via)).collect())
    }

    /// Resolve a station name, degrading to the null island coordinate
    /// when the provider does not know the name
    async fn station_coord(&self, name: &str) -> Result<StationCoord, ApplicationError> {
        match self.transit.resolve_station(name).await? {
            Some(station) => Ok(station.coord),
            None => {
                warn!(station = %name, "Station name did not resolve");
                Ok(StationCoord::new(0.0, 0.0))
            },
        }
    }
}
