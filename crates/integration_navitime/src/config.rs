//! NAVITIME provider configuration

use serde::{Deserialize, Serialize};

/// Configuration for the NAVITIME RapidAPI endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavitimeConfig {
    /// Base URL for the transport endpoints (station search, around search)
    #[serde(default = "default_transport_base_url")]
    pub transport_base_url: String,

    /// Base URL for the total-navi route search endpoint
    #[serde(default = "default_route_base_url")]
    pub route_base_url: String,

    /// RapidAPI subscription key
    #[serde(default)]
    pub rapid_api_key: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Walking speed in km/h used for route search
    #[serde(default = "default_walk_speed")]
    pub walk_speed: u8,

    /// Search window in minutes for route search
    #[serde(default = "default_search_term_minutes")]
    pub search_term_minutes: u32,
}

fn default_transport_base_url() -> String {
    "https://navitime-transport.p.rapidapi.com".to_string()
}

fn default_route_base_url() -> String {
    "https://navitime-route-totalnavi.p.rapidapi.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_walk_speed() -> u8 {
    5
}

const fn default_search_term_minutes() -> u32 {
    1440
}

impl Default for NavitimeConfig {
    fn default() -> Self {
        Self {
            transport_base_url: default_transport_base_url(),
            route_base_url: default_route_base_url(),
            rapid_api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            walk_speed: default_walk_speed(),
            search_term_minutes: default_search_term_minutes(),
        }
    }
}

impl NavitimeConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            transport_base_url: base_url.clone(),
            route_base_url: base_url,
            rapid_api_key: "test-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.rapid_api_key.is_empty() {
            return Err("rapid_api_key must not be empty".to_string());
        }
        if self.transport_base_url.is_empty() || self.route_base_url.is_empty() {
            return Err("base URLs must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.walk_speed == 0 {
            return Err("walk_speed must be greater than 0".to_string());
        }
        Ok(())
    }
}
