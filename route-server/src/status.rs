//! Network status summary.
//!
//! A read-only digest of the current dataset snapshot: how many records of
//! each kind there are, which bus stops are out of service, which bike
//! stations are empty and how busy the roads are.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{BusStop, Datasets};

/// Bike availability band, as drawn on the status map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// No bikes.
    Empty,
    /// One or two bikes.
    Low,
    Available,
}

impl Availability {
    pub fn for_bikes(bikes: u32) -> Self {
        match bikes {
            0 => Availability::Empty,
            1..=2 => Availability::Low,
            _ => Availability::Available,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetCounts {
    pub parkings: usize,
    pub bike_stations: usize,
    pub bus_stops: usize,
    pub traffic_segments: usize,
    /// Records without a usable position, across all datasets.
    pub unlocated: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuppressedStop {
    pub id: String,
    pub name: String,
    pub lines: Vec<String>,
}

impl SuppressedStop {
    fn from_stop(stop: &BusStop) -> Self {
        Self {
            id: stop.id.clone(),
            name: stop.name.clone(),
            lines: stop.lines.iter().cloned().collect(),
        }
    }
}

/// Bike station counts per availability band.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BikeSummary {
    pub empty: usize,
    pub low: usize,
    pub available: usize,
    /// Addresses of stations with no bikes.
    pub empty_stations: Vec<String>,
}

/// Road segment counts per published congestion state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrafficSummary {
    pub fluid: usize,
    pub dense: usize,
    pub congested: usize,
    pub unknown: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStatus {
    pub generated_at: DateTime<Utc>,
    pub counts: DatasetCounts,
    pub suppressed_stops: Vec<SuppressedStop>,
    pub bikes: BikeSummary,
    pub traffic: TrafficSummary,
    /// Sum of published capacities; garages without one are skipped.
    pub parking_capacity: u64,
}

impl NetworkStatus {
    pub fn summarize(datasets: &Datasets, generated_at: DateTime<Utc>) -> Self {
        let unlocated = datasets.parkings.iter().filter(|r| r.coordinate.is_none()).count()
            + datasets.bike_stations.iter().filter(|r| r.coordinate.is_none()).count()
            + datasets.bus_stops.iter().filter(|r| r.coordinate.is_none()).count()
            + datasets.traffic.iter().filter(|r| r.coordinate.is_none()).count();

        let counts = DatasetCounts {
            parkings: datasets.parkings.len(),
            bike_stations: datasets.bike_stations.len(),
            bus_stops: datasets.bus_stops.len(),
            traffic_segments: datasets.traffic.len(),
            unlocated,
        };

        let suppressed_stops = datasets
            .bus_stops
            .iter()
            .filter(|s| s.suppressed)
            .map(SuppressedStop::from_stop)
            .collect();

        let mut bikes = BikeSummary::default();
        for station in &datasets.bike_stations {
            match Availability::for_bikes(station.available_bikes) {
                Availability::Empty => {
                    bikes.empty += 1;
                    bikes.empty_stations.push(station.address.clone());
                }
                Availability::Low => bikes.low += 1,
                Availability::Available => bikes.available += 1,
            }
        }

        let mut traffic = TrafficSummary::default();
        for segment in &datasets.traffic {
            match segment.state {
                Some(0) => traffic.fluid += 1,
                Some(1) => traffic.dense += 1,
                Some(_) => traffic.congested += 1,
                None => traffic.unknown += 1,
            }
        }

        let parking_capacity = datasets
            .parkings
            .iter()
            .filter_map(|p| p.capacity)
            .map(u64::from)
            .sum();

        Self {
            generated_at,
            counts,
            suppressed_stops,
            bikes,
            traffic,
            parking_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::{BikeStation, Coordinate, ParkingGarage, TrafficSegment};

    fn at() -> Option<Coordinate> {
        Some(Coordinate::new(39.47, -0.37).unwrap())
    }

    fn bike(address: &str, bikes: u32) -> BikeStation {
        BikeStation {
            coordinate: at(),
            address: address.into(),
            available_bikes: bikes,
            free_slots: 10,
        }
    }

    fn datasets() -> Datasets {
        Datasets {
            parkings: vec![
                ParkingGarage {
                    coordinate: at(),
                    name: "A".into(),
                    capacity: Some(300),
                },
                ParkingGarage {
                    coordinate: None,
                    name: "B".into(),
                    capacity: None,
                },
                ParkingGarage {
                    coordinate: at(),
                    name: "C".into(),
                    capacity: Some(150),
                },
            ],
            bike_stations: vec![bike("Xàtiva", 0), bike("Colón", 2), bike("Russafa", 9)],
            bus_stops: vec![
                BusStop {
                    coordinate: at(),
                    id: "101".into(),
                    name: "Porta de la Mar".into(),
                    lines: BusStop::parse_lines("4, 6"),
                    suppressed: true,
                },
                BusStop {
                    coordinate: at(),
                    id: "102".into(),
                    name: "Colón".into(),
                    lines: BusStop::parse_lines("C2"),
                    suppressed: false,
                },
            ],
            traffic: [Some(0), Some(1), Some(3), None]
                .into_iter()
                .map(|state| TrafficSegment {
                    coordinate: at(),
                    path: Vec::new(),
                    intensity: None,
                    state,
                })
                .collect(),
        }
    }

    #[test]
    fn availability_bands() {
        assert_eq!(Availability::for_bikes(0), Availability::Empty);
        assert_eq!(Availability::for_bikes(2), Availability::Low);
        assert_eq!(Availability::for_bikes(3), Availability::Available);
    }

    #[test]
    fn summarizes_snapshot() {
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let status = NetworkStatus::summarize(&datasets(), when);

        assert_eq!(status.generated_at, when);
        assert_eq!(status.counts.parkings, 3);
        assert_eq!(status.counts.unlocated, 1);
        assert_eq!(status.parking_capacity, 450);

        assert_eq!(status.suppressed_stops.len(), 1);
        assert_eq!(status.suppressed_stops[0].id, "101");
        assert_eq!(status.suppressed_stops[0].lines, vec!["4", "6"]);

        assert_eq!(status.bikes.empty, 1);
        assert_eq!(status.bikes.low, 1);
        assert_eq!(status.bikes.available, 1);
        assert_eq!(status.bikes.empty_stations, vec!["Xàtiva"]);

        assert_eq!(
            status.traffic,
            TrafficSummary {
                fluid: 1,
                dense: 1,
                congested: 1,
                unknown: 1
            }
        );
    }

    #[test]
    fn empty_snapshot() {
        let status = NetworkStatus::summarize(&Datasets::default(), Utc::now());
        assert_eq!(status.counts, DatasetCounts::default());
        assert_eq!(status.parking_capacity, 0);
        assert!(status.suppressed_stops.is_empty());
    }
}
