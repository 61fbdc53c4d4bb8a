//! ORS HTTP client.
//!
//! Provides an async directions request against the OpenRouteService v2 API.
//! Handles authentication, rate limiting, and conversion to domain types.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{LonLat, Profile, RouteLeg};
use crate::planner::{DirectionsError, DirectionsProvider};

use super::convert::convert_route;
use super::error::OrsError;
use super::types::{DirectionsRequest, FeatureCollection};

/// Default base URL for the ORS API.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Concurrent requests against the public API. Its free plan allows 40
/// directions requests per minute.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// A self-hosted instance has no quota; the limit only caps load on it.
const SELF_HOSTED_MAX_CONCURRENT: usize = 16;

/// Configuration for the ORS client.
///
/// Two deployments are supported: the public API at
/// `api.openrouteservice.org`, which requires a key, and a self-hosted
/// `openrouteservice` container, which serves the same `/v2/directions`
/// routes without authentication.
#[derive(Debug, Clone)]
pub struct OrsConfig {
    /// Sent as the bare `Authorization` header; `None` for self-hosted
    pub api_key: Option<String>,
    /// Base URL for the API (defaults to the public ORS service)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OrsConfig {
    /// Config for the public API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Config for an unauthenticated self-hosted instance, e.g.
    /// `http://localhost:8080/ors`.
    pub fn self_hosted(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
            max_concurrent: SELF_HOSTED_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Point a keyed config at another host (a proxy or a keyed mirror).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ORS directions client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl OrsClient {
    /// Create a new ORS client with the given configuration.
    pub fn new(config: OrsConfig) -> Result<Self, OrsError> {
        let mut headers = HeaderMap::new();

        // ORS takes the bare key, no "Bearer" prefix
        if let Some(key) = &config.api_key {
            let api_key = HeaderValue::from_str(key).map_err(|_| OrsError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(AUTHORIZATION, api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    fn directions_url(&self, profile: Profile) -> String {
        format!("{}/v2/directions/{}/geojson", self.base_url, profile.as_str())
    }

    /// Request a route through `coordinates` (lon, lat order) for `profile`.
    pub async fn directions(
        &self,
        coordinates: &[LonLat],
        profile: Profile,
    ) -> Result<RouteLeg, OrsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| OrsError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        debug!(%profile, points = coordinates.len(), "requesting directions");

        let response = self
            .http
            .post(self.directions_url(profile))
            .json(&DirectionsRequest::new(coordinates))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(OrsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OrsError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(OrsError::NoRoute);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let routes: FeatureCollection = serde_json::from_str(&body).map_err(|e| OrsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        convert_route(&routes, profile)
    }
}

impl DirectionsProvider for OrsClient {
    async fn get_route(
        &self,
        coordinates: &[LonLat],
        profile: Profile,
    ) -> Result<RouteLeg, DirectionsError> {
        Ok(self.directions(coordinates, profile).await?)
    }
}
