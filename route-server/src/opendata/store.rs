//! Dataset snapshots with a freshness window.
//!
//! All four datasets are fetched concurrently and converted into one
//! [`Datasets`] snapshot. The snapshot is shared by every request until it
//! expires. A snapshot with a dataset that failed to load is served once
//! but not cached, so the next request retries.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, info, warn};

use crate::domain::Datasets;

use super::client::{Dataset, RecordSource};
use super::convert::{
    convert_bike_station, convert_bus_stop, convert_parking, convert_traffic_segment,
};
use super::types::Record;

/// Caching facility dataset provider.
pub struct DatasetStore<S> {
    source: S,
    snapshot: MokaCache<(), Arc<Datasets>>,
}

impl<S: RecordSource + Sync> DatasetStore<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        let snapshot = MokaCache::builder()
            .time_to_live(ttl)
            .max_capacity(1)
            .build();

        Self { source, snapshot }
    }

    /// The current snapshot, fetching if it is missing or stale.
    pub async fn snapshot(&self) -> Arc<Datasets> {
        if let Some(cached) = self.snapshot.get(&()).await {
            return cached;
        }

        let (parkings, bikes, traffic, buses) = futures::join!(
            self.load(Dataset::Parkings),
            self.load(Dataset::BikeStations),
            self.load(Dataset::Traffic),
            self.load(Dataset::BusStops),
        );
        let complete = parkings.is_some() && bikes.is_some() && traffic.is_some() && buses.is_some();

        let datasets = Datasets {
            parkings: convert_all(parkings, convert_parking),
            bike_stations: convert_all(bikes, convert_bike_station),
            traffic: convert_all(traffic, convert_traffic_segment),
            bus_stops: convert_all(buses, convert_bus_stop),
        };
        info!(
            parkings = datasets.parkings.len(),
            bike_stations = datasets.bike_stations.len(),
            traffic = datasets.traffic.len(),
            bus_stops = datasets.bus_stops.len(),
            complete,
            "loaded dataset snapshot"
        );

        let datasets = Arc::new(datasets);
        if complete {
            self.snapshot.insert((), datasets.clone()).await;
        }
        datasets
    }

    /// Drop the cached snapshot.
    pub fn invalidate(&self) {
        self.snapshot.invalidate_all();
    }

    async fn load(&self, dataset: Dataset) -> Option<Vec<Record>> {
        match self.source.fetch(dataset).await {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(%dataset, error = %e, "dataset fetch failed, treating as empty");
                None
            }
        }
    }
}

fn convert_all<T>(records: Option<Vec<Record>>, convert: fn(&Record) -> T) -> Vec<T> {
    let records = records.unwrap_or_default();
    let converted: Vec<T> = records.iter().map(convert).collect();
    debug!(records = converted.len(), "converted records");
    converted
}
