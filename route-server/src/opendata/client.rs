//! Open-data HTTP client.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::debug;

use super::error::OpenDataError;
use super::types::{Record, RecordsResponse};

/// Default records search endpoint of the Valencia portal.
const DEFAULT_BASE_URL: &str = "https://valencia.opendatasoft.com/api/records/1.0/search/";

/// The facility datasets the planner consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Parkings,
    BikeStations,
    Traffic,
    BusStops,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Parkings,
        Dataset::BikeStations,
        Dataset::Traffic,
        Dataset::BusStops,
    ];

    /// Portal dataset identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Dataset::Parkings => "parkings",
            Dataset::BikeStations => "valenbisi-disponibilitat-valenbisi-dsiponibilidad",
            Dataset::Traffic => "estat-transit-temps-real-estado-trafico-tiempo-real",
            Dataset::BusStops => "emt",
        }
    }

    /// Rows requested per fetch.
    pub fn default_rows(&self) -> u32 {
        match self {
            Dataset::BusStops => 5000,
            _ => 1000,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Configuration for the open-data client.
#[derive(Debug, Clone)]
pub struct OpenDataConfig {
    /// Records search endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// How long a fetched snapshot stays fresh
    pub ttl: Duration,
}

impl Default for OpenDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 5,
            ttl: Duration::from_secs(600),
        }
    }
}

impl OpenDataConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set snapshot freshness.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Trait for fetching raw dataset records.
///
/// This abstraction allows the dataset store to be tested without network
/// access.
pub trait RecordSource {
    fn fetch(
        &self,
        dataset: Dataset,
    ) -> impl Future<Output = Result<Vec<Record>, OpenDataError>> + Send;
}

/// Opendatasoft records API client.
#[derive(Debug, Clone)]
pub struct OpenDataClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenDataClient {
    pub fn new(config: &OpenDataConfig) -> Result<Self, OpenDataError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch every record of `dataset` (up to its row limit).
    pub async fn records(&self, dataset: Dataset) -> Result<Vec<Record>, OpenDataError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("dataset", dataset.id().to_string()),
                ("rows", dataset.default_rows().to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenDataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: RecordsResponse =
            serde_json::from_str(&body).map_err(|e| OpenDataError::Json {
                message: e.to_string(),
            })?;

        debug!(%dataset, records = parsed.records.len(), "fetched dataset");
        Ok(parsed.records)
    }
}

impl RecordSource for OpenDataClient {
    async fn fetch(&self, dataset: Dataset) -> Result<Vec<Record>, OpenDataError> {
        self.records(dataset).await
    }
}
