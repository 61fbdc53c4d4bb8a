//! Nominatim search client.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Coordinate, json_f64};

use super::{GeocodeError, Geocoder};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying user agent.
const DEFAULT_USER_AGENT: &str = "route_planner_valencia";

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

impl GeocoderConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// One search hit. Nominatim returns coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub lat: serde_json::Value,
    pub lon: serde_json::Value,
    pub display_name: Option<String>,
}

impl NominatimPlace {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(json_f64(&self.lat)?, json_f64(&self.lon)?).ok()
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search for `address`, returning the best match if any.
    pub async fn search(&self, address: &str) -> Result<Option<NominatimPlace>, GeocodeError> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json(e.to_string()))?;

        let place = places.into_iter().next();
        debug!(address, found = place.is_some(), "geocoded address");
        Ok(place)
    }
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        Ok(self.search(address).await?.and_then(|p| p.coordinate()))
    }
}
