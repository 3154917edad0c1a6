//! NAVITIME transit client via RapidAPI
//!
//! Provides station-name search, nearby-station lookup, and transit route
//! search using the NAVITIME `transport_node`, `transport_node/around`,
//! and `route_transit` endpoints hosted on RapidAPI.

use std::collections::HashMap;
use std::time::Duration;

use application::ApplicationError;
use application::ports::{
    NearbyStation, ResolvedStation, RouteQuery, StationCoord, TransitPort,
};
use async_trait::async_trait;
use domain::{
    ClockTime, Coordinate, JourneyItem, JourneySummary, MoveSegment, PointSegment, Segment,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::NavitimeConfig;
use crate::error::NavitimeError;

/// Express services excluded from route search so results stay within
/// ordinary commuter fares
const UNUSED_MODES: [&str; 6] = [
    "domestic_flight",
    "superexpress_train",
    "sleeper_ultraexpress",
    "ultraexpress_train",
    "express_train",
    "semiexpress_train",
];

/// A station returned by the transport-node endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct TransportNode {
    /// Canonical station name
    pub name: String,
    /// Walking time from the queried coordinate in minutes, `0` for
    /// name searches
    pub walk_minutes: u32,
    /// Station latitude when supplied
    pub latitude: Option<f64>,
    /// Station longitude when supplied
    pub longitude: Option<f64>,
}

/// Parameters for a `route_transit` search
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSearchParams {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
    /// Departure time in `YYYY-MM-DDTHH:MM:SS` local form
    pub start_time: String,
    /// Via station names, comma-joined on the wire
    pub via: Vec<String>,
}

/// Trait for NAVITIME transit clients
#[async_trait]
pub trait NavitimeClient: Send + Sync {
    /// Search for a station by name, returning the best match
    async fn search_station(&self, word: &str) -> Result<Option<TransportNode>, NavitimeError>;

    /// Find stations near a coordinate, ordered by walking time
    async fn nearby_stations(
        &self,
        latitude: f64,
        longitude: f64,
        max_results: u8,
    ) -> Result<Vec<TransportNode>, NavitimeError>;

    /// Search transit routes between two coordinates
    async fn search_routes(
        &self,
        params: &RouteSearchParams,
    ) -> Result<Vec<JourneyItem>, NavitimeError>;

    /// Check if the provider is reachable
    async fn is_healthy(&self) -> bool;
}

/// NAVITIME client using the RapidAPI hosted endpoints
#[derive(Debug)]
pub struct RapidApiNavitimeClient {
    client: Client,
    config: NavitimeConfig,
    transport_host: String,
    route_host: String,
}

impl RapidApiNavitimeClient {
    /// Create a new NAVITIME client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized or a
    /// base URL has no parseable host.
    pub fn new(config: &NavitimeConfig) -> Result<Self, NavitimeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("EkiNote/1.0")
            .build()
            .map_err(|e| NavitimeError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            transport_host: host_of(&config.transport_base_url)?,
            route_host: host_of(&config.route_base_url)?,
        })
    }

    /// Perform a GET against a RapidAPI endpoint and return the body text
    async fn get_body(
        &self,
        url: &str,
        host: &str,
        params: &[(&str, String)],
    ) -> Result<String, NavitimeError> {
        let response = self
            .client
            .get(url)
            .header("x-rapidapi-key", &self.config.rapid_api_key)
            .header("x-rapidapi-host", host)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NavitimeError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    NavitimeError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NavitimeError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| NavitimeError::ParseError(e.to_string()))
    }

    /// Parse a transport-node JSON response into typed stations
    fn parse_nodes_response(body: &str) -> Result<Vec<TransportNode>, NavitimeError> {
        let raw: RawEnvelope<RawNode> =
            serde_json::from_str(body).map_err(|e| NavitimeError::ParseError(e.to_string()))?;

        Ok(unwrap_items(raw)?
            .into_iter()
            .map(Self::convert_node)
            .collect())
    }

    fn convert_node(raw: RawNode) -> TransportNode {
        let (latitude, longitude) = raw
            .coord
            .map_or((None, None), |c| (Some(c.lat), Some(c.lon)));

        TransportNode {
            name: raw.name.unwrap_or_default(),
            walk_minutes: raw.time.map_or(0, |t| t.minutes()),
            latitude,
            longitude,
        }
    }

    /// Parse a `route_transit` JSON response into journey items
    fn parse_routes_response(body: &str) -> Result<Vec<JourneyItem>, NavitimeError> {
        let raw: RawEnvelope<RawRouteItem> =
            serde_json::from_str(body).map_err(|e| NavitimeError::ParseError(e.to_string()))?;

        Ok(unwrap_items(raw)?
            .into_iter()
            .map(Self::convert_route_item)
            .collect())
    }

    fn convert_route_item(raw: RawRouteItem) -> JourneyItem {
        let segments = raw
            .sections
            .into_iter()
            .filter_map(Self::convert_section)
            .collect();

        JourneyItem {
            segments,
            summary: Self::convert_summary(raw.summary),
        }
    }

    /// Convert a raw section to a segment, skipping unknown section kinds
    fn convert_section(raw: RawSection) -> Option<Segment> {
        match raw.kind.as_str() {
            "point" => Some(Segment::Point(PointSegment {
                name: raw.name,
                coord: raw.coord.map(|c| Coordinate { lat: c.lat, lon: c.lon }),
            })),
            "move" => Some(Segment::Move(MoveSegment {
                mode: raw.mode,
                line_name: raw.line_name,
                departure_time: raw.from_time.as_deref().map(clock_token),
                arrival_time: raw.to_time.as_deref().map(clock_token),
            })),
            _ => None,
        }
    }

    fn convert_summary(raw: RawSummary) -> JourneySummary {
        let travel = raw.travel.unwrap_or_default();
        JourneySummary {
            origin_name: raw.start.map(|e| e.name).unwrap_or_default(),
            destination_name: raw.goal.map(|e| e.name).unwrap_or_default(),
            departure_time: travel.from_time.as_deref().map(clock_token).unwrap_or_default(),
            arrival_time: travel.to_time.as_deref().map(clock_token).unwrap_or_default(),
            total_minutes: travel.time,
            transfer_count: travel.transit_count,
            fare_by_unit: travel.fare.and_then(|f| f.get("unit_0").copied()),
            sequence_number: raw.no,
        }
    }
}

#[async_trait]
impl NavitimeClient for RapidApiNavitimeClient {
    #[instrument(skip(self))]
    async fn search_station(&self, word: &str) -> Result<Option<TransportNode>, NavitimeError> {
        let url = format!("{}/transport_node", self.config.transport_base_url);
        let params = [
            ("word", word.to_string()),
            ("datum", "wgs84".to_string()),
            ("coord_unit", "degree".to_string()),
            ("offset", "0".to_string()),
            ("limit", "1".to_string()),
        ];

        debug!(?url, word, "Searching station by name");

        let body = self.get_body(&url, &self.transport_host, &params).await?;
        let nodes = Self::parse_nodes_response(&body)?;
        Ok(nodes.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn nearby_stations(
        &self,
        latitude: f64,
        longitude: f64,
        max_results: u8,
    ) -> Result<Vec<TransportNode>, NavitimeError> {
        let url = format!("{}/transport_node/around", self.config.transport_base_url);
        let params = [
            ("coord", format!("{latitude},{longitude}")),
            ("datum", "wgs84".to_string()),
            ("coord_unit", "degree".to_string()),
            ("limit", max_results.to_string()),
            ("term", "60".to_string()),
            ("walk_speed", "6".to_string()),
        ];

        debug!(?url, "Searching nearby stations");

        let body = self.get_body(&url, &self.transport_host, &params).await?;
        Self::parse_nodes_response(&body)
    }

    #[instrument(skip(self), fields(
        from = %format!("{},{}", params.from_lat, params.from_lon),
        to = %format!("{},{}", params.to_lat, params.to_lon),
    ))]
    async fn search_routes(
        &self,
        params: &RouteSearchParams,
    ) -> Result<Vec<JourneyItem>, NavitimeError> {
        let url = format!("{}/route_transit", self.config.route_base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("start", format!("{},{}", params.from_lat, params.from_lon)),
            ("goal", format!("{},{}", params.to_lat, params.to_lon)),
            ("datum", "wgs84".to_string()),
            ("coord_unit", "degree".to_string()),
            ("term", self.config.search_term_minutes.to_string()),
            ("start_time", params.start_time.clone()),
            ("shape", "false".to_string()),
            ("walk_speed", self.config.walk_speed.to_string()),
            ("unuse", UNUSED_MODES.join(".")),
        ];
        if !params.via.is_empty() {
            query.push(("via", params.via.join(",")));
        }

        debug!(?url, "Searching transit routes");

        let body = self.get_body(&url, &self.route_host, &query).await?;
        let items = Self::parse_routes_response(&body)?;

        if items.is_empty() {
            warn!("No routes found");
        }

        debug!(count = items.len(), "Routes found");
        Ok(items)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!(
            "{}/transport_node?word=%E6%9D%B1%E4%BA%AC&limit=1",
            self.config.transport_base_url
        );
        self.client
            .get(&url)
            .header("x-rapidapi-key", &self.config.rapid_api_key)
            .header("x-rapidapi-host", &self.transport_host)
            .send()
            .await
            .is_ok()
    }
}

#[async_trait]
impl TransitPort for RapidApiNavitimeClient {
    async fn resolve_station(
        &self,
        name: &str,
    ) -> Result<Option<ResolvedStation>, ApplicationError> {
        let node = self
            .search_station(name)
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))?;

        Ok(node.map(|node| ResolvedStation {
            name: node.name,
            coord: StationCoord::new(
                node.latitude.unwrap_or_default(),
                node.longitude.unwrap_or_default(),
            ),
        }))
    }

    async fn find_nearby_stations(
        &self,
        coord: &StationCoord,
        max_results: u8,
    ) -> Result<Vec<NearbyStation>, ApplicationError> {
        let nodes = self
            .nearby_stations(coord.latitude, coord.longitude, max_results)
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))?;

        Ok(nodes
            .into_iter()
            .map(|node| NearbyStation {
                name: node.name,
                walk_minutes: node.walk_minutes,
            })
            .collect())
    }

    async fn search_routes(
        &self,
        query: &RouteQuery,
    ) -> Result<Vec<JourneyItem>, ApplicationError> {
        let params = RouteSearchParams {
            from_lat: query.from.latitude,
            from_lon: query.from.longitude,
            to_lat: query.to.latitude,
            to_lon: query.to.longitude,
            start_time: query.start_time.clone(),
            via: query.via.clone(),
        };

        NavitimeClient::search_routes(self, &params)
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))
    }

    async fn is_available(&self) -> bool {
        self.is_healthy().await
    }
}

/// Extract the host name of a base URL for the `x-rapidapi-host` header
fn host_of(base_url: &str) -> Result<String, NavitimeError> {
    let parsed = Url::parse(base_url)
        .map_err(|e| NavitimeError::ConfigurationError(format!("invalid base URL: {e}")))?;
    parsed
        .host_str()
        .map(ToString::to_string)
        .ok_or_else(|| NavitimeError::ConfigurationError("base URL has no host".to_string()))
}

/// Reduce an ISO local timestamp such as `2024-05-01T08:05:00` to an
/// `HH:MM` clock token; a bare clock token passes through
fn clock_token(timestamp: &str) -> ClockTime {
    let time_part = timestamp.split('T').nth(1).unwrap_or(timestamp);
    let token = time_part
        .split(':')
        .take(2)
        .collect::<Vec<_>>()
        .join(":");
    ClockTime::new(token)
}

/// Unwrap the items array of a provider envelope, surfacing in-body errors
fn unwrap_items<T>(raw: RawEnvelope<T>) -> Result<Vec<T>, NavitimeError> {
    let failed = raw.status_code.is_some_and(|code| code != 200);
    match raw.items {
        Some(items) if !failed => Ok(items),
        _ => Err(NavitimeError::Provider {
            code: raw.status_code,
            message: raw
                .message
                .or(raw.msg)
                .unwrap_or_else(|| "no items in response".to_string()),
        }),
    }
}

// --- Raw API response types for deserialization ---

/// Common provider envelope: errors travel inside a 200 body
#[derive(Debug, Deserialize)]
struct RawEnvelope<T> {
    status_code: Option<u16>,
    message: Option<String>,
    msg: Option<String>,
    items: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    name: Option<String>,
    time: Option<RawMinutes>,
    coord: Option<RawCoord>,
}

/// Walking time arrives as a number or a numeric string depending on
/// the endpoint
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMinutes {
    Number(u32),
    Text(String),
}

impl RawMinutes {
    fn minutes(&self) -> u32 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.parse().unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct RawRouteItem {
    #[serde(default)]
    sections: Vec<RawSection>,
    summary: RawSummary,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    #[serde(rename = "type")]
    kind: String,
    name: Option<String>,
    coord: Option<RawCoord>,
    #[serde(rename = "move")]
    mode: Option<String>,
    line_name: Option<String>,
    from_time: Option<String>,
    to_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    #[serde(default)]
    no: String,
    start: Option<RawEndpointNode>,
    goal: Option<RawEndpointNode>,
    #[serde(rename = "move")]
    travel: Option<RawSummaryMove>,
}

#[derive(Debug, Deserialize)]
struct RawEndpointNode {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawSummaryMove {
    from_time: Option<String>,
    to_time: Option<String>,
    #[serde(default)]
    time: u32,
    #[serde(default)]
    transit_count: u32,
    fare: Option<HashMap<String, u32>>,
}
