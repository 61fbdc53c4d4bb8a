//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CachedDirections, PlanCache};
use crate::config::ServerConfig;
use crate::domain::{LonLat, Profile, RouteLeg};
use crate::geocode::{CachedGeocoder, NominatimClient};
use crate::opendata::{DatasetStore, OpenDataClient};
use crate::ors::{MockDirections, OrsClient};
use crate::planner::{DirectionsError, DirectionsProvider, PlannerConfig};

/// The directions backend chosen at startup.
pub enum Directions {
    Ors(OrsClient),
    /// Straight-line legs, used when no API key is configured
    Offline(MockDirections),
}

impl DirectionsProvider for Directions {
    async fn get_route(
        &self,
        coordinates: &[LonLat],
        profile: Profile,
    ) -> Result<RouteLeg, DirectionsError> {
        match self {
            Directions::Ors(client) => client.get_route(coordinates, profile).await,
            Directions::Offline(mock) => mock.get_route(coordinates, profile).await,
        }
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Memoised directions provider
    pub directions: Arc<CachedDirections<Directions>>,

    /// Memoised address geocoder
    pub geocoder: Arc<CachedGeocoder<NominatimClient>>,

    /// Facility dataset snapshots
    pub datasets: Arc<DatasetStore<OpenDataClient>>,

    /// Recently completed plans, by request inputs
    pub plans: Arc<PlanCache>,

    /// Route composition configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        directions: Directions,
        geocoder: NominatimClient,
        opendata: OpenDataClient,
        config: &ServerConfig,
    ) -> Self {
        let cache = &config.cache;
        Self {
            directions: Arc::new(CachedDirections::new(directions, cache)),
            geocoder: Arc::new(CachedGeocoder::new(
                geocoder,
                cache.geocode_ttl,
                cache.max_capacity,
            )),
            datasets: Arc::new(DatasetStore::new(opendata, config.opendata.ttl)),
            plans: Arc::new(PlanCache::new(cache)),
            config: Arc::new(config.planner.clone()),
        }
    }
}
