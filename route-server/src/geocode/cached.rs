//! Memoising geocoder wrapper.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::Coordinate;

use super::{GeocodeError, Geocoder};

/// Geocoder with a per-address cache.
///
/// Misses are cached as well as hits; errors are not.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: MokaCache<String, Option<Coordinate>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G, ttl: Duration, max_capacity: u64) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();
        Self { inner, cache }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: Geocoder + Sync> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let key = address.trim().to_string();

        if let Some(cached) = self.cache.get(&key).await {
            trace!(address = %key, "geocode cache hit");
            return Ok(cached);
        }

        let found = self.inner.geocode(&key).await?;
        self.cache.insert(key, found).await;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Knows one address; counts lookups.
    #[derive(Default)]
    struct OneAddress {
        lookups: AtomicUsize,
    }

    impl Geocoder for OneAddress {
        async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok((address == "Plaza del Ayuntamiento").then(|| Coordinate::new(39.4697, -0.3763).unwrap()))
        }
    }

    #[tokio::test]
    async fn hits_and_misses_are_cached() {
        let geocoder = CachedGeocoder::new(OneAddress::default(), Duration::from_secs(60), 100);

        assert!(geocoder.geocode("Plaza del Ayuntamiento").await.unwrap().is_some());
        assert!(geocoder.geocode(" Plaza del Ayuntamiento ").await.unwrap().is_some());
        assert!(geocoder.geocode("Atlantis").await.unwrap().is_none());
        assert!(geocoder.geocode("Atlantis").await.unwrap().is_none());

        assert_eq!(geocoder.inner().lookups.load(Ordering::SeqCst), 2);
    }
}
