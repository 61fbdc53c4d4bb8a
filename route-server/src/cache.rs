//! Caching layer for directions and composed plans.
//!
//! Directions are memoised per profile and rounded waypoint list, so that
//! recomposing a plan with unchanged inputs does not hit the provider
//! again. Rounding to 5 decimals (about a metre) bounds key cardinality
//! without merging genuinely different requests.
//!
//! Completed plan outcomes are cached separately, keyed by the raw request
//! inputs, so that a client resubmitting the same form is served from
//! memory.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{LonLat, Profile, RouteLeg, RoutePlan, TransportMode};
use crate::planner::{DirectionsError, DirectionsProvider, PlanFailure};

/// Configuration for the caches.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached directions.
    pub directions_ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,

    /// Decimal places waypoints are rounded to when building keys.
    pub coordinate_decimals: usize,

    /// TTL for cached plan outcomes.
    pub plan_ttl: Duration,

    /// TTL for geocoded addresses.
    pub geocode_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directions_ttl: Duration::from_secs(3600),
            max_capacity: 1000,
            coordinate_decimals: 5,
            plan_ttl: Duration::from_secs(60),
            geocode_ttl: Duration::from_secs(24 * 3600),
        }
    }
}

/// Build the directions cache key: `"{profile}_{lon,lat;...}"`.
pub fn route_key(profile: Profile, coordinates: &[LonLat], decimals: usize) -> String {
    let points: Vec<String> = coordinates
        .iter()
        .map(|c| format!("{:.*},{:.*}", decimals, c.lon, decimals, c.lat))
        .collect();
    format!("{}_{}", profile.as_str(), points.join(";"))
}

/// Directions provider with memoisation.
///
/// Wraps any `DirectionsProvider`. Only successful legs are cached; a
/// failure is returned as-is and retried on the next request.
pub struct CachedDirections<P> {
    inner: P,
    cache: MokaCache<String, Arc<RouteLeg>>,
    decimals: usize,
}

impl<P: DirectionsProvider> CachedDirections<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.directions_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            cache,
            decimals: config.coordinate_decimals,
        }
    }

    /// Access the underlying provider for requests that bypass the cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P> DirectionsProvider for CachedDirections<P>
where
    P: DirectionsProvider + Sync,
{
    async fn get_route(
        &self,
        coordinates: &[LonLat],
        profile: Profile,
    ) -> Result<RouteLeg, DirectionsError> {
        let key = route_key(profile, coordinates, self.decimals);

        // Try cache first
        if let Some(cached) = self.cache.get(&key).await {
            trace!(%key, "directions cache hit");
            return Ok(cached.as_ref().clone());
        }

        let leg = self.inner.get_route(coordinates, profile).await?;
        self.cache.insert(key, Arc::new(leg.clone())).await;

        Ok(leg)
    }
}

/// Inputs that identify a plan request.
///
/// Addresses are kept as the user typed them (trimmed), so a cached
/// outcome is reused only for an identical submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanKey {
    pub mode: TransportMode,
    pub start: String,
    pub end: String,
}

impl PlanKey {
    pub fn new(mode: TransportMode, start: impl AsRef<str>, end: impl AsRef<str>) -> Self {
        Self {
            mode,
            start: start.as_ref().trim().to_string(),
            end: end.as_ref().trim().to_string(),
        }
    }
}

/// A completed composition: a plan or the reason there is none.
pub type PlanOutcome = Result<RoutePlan, PlanFailure>;

/// Cache of completed plan outcomes keyed by request inputs.
///
/// Provider failures are not stored, so a transient outage does not stick
/// for the lifetime of an entry.
pub struct PlanCache {
    outcomes: MokaCache<PlanKey, Arc<PlanOutcome>>,
}

impl PlanCache {
    pub fn new(config: &CacheConfig) -> Self {
        let outcomes = MokaCache::builder()
            .time_to_live(config.plan_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { outcomes }
    }

    pub async fn get(&self, key: &PlanKey) -> Option<Arc<PlanOutcome>> {
        self.outcomes.get(key).await
    }

    /// Store an outcome, returning it shared. Provider failures are passed
    /// through without being stored.
    pub async fn insert(&self, key: PlanKey, outcome: PlanOutcome) -> Arc<PlanOutcome> {
        let outcome = Arc::new(outcome);
        let cacheable = match outcome.as_ref() {
            Ok(_) => true,
            Err(failure) => failure.is_no_solution(),
        };
        if cacheable {
            self.outcomes.insert(key, outcome.clone()).await;
        }
        outcome
    }
}
