//! Facility records: parking garages, bike-share stations, bus stops and
//! traffic segments.
//!
//! Records are validated per category when they are ingested. A record
//! whose position could not be read keeps `coordinate: None`; it is still
//! available for status reporting but is invisible to spatial queries.

use std::collections::BTreeSet;

use serde::Serialize;

use super::Coordinate;

/// Anything that can be located for a proximity query.
pub trait Located {
    /// The record's position, or `None` if it is missing or malformed.
    fn coordinate(&self) -> Option<Coordinate>;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Option<Coordinate> {
        Some(*self)
    }
}

/// A public parking garage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingGarage {
    pub coordinate: Option<Coordinate>,
    pub name: String,
    /// Total number of spaces, if published.
    pub capacity: Option<u32>,
}

/// A bike-share (Valenbisi) station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BikeStation {
    pub coordinate: Option<Coordinate>,
    pub address: String,
    pub available_bikes: u32,
    pub free_slots: u32,
}

/// A city bus (EMT) stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusStop {
    pub coordinate: Option<Coordinate>,
    pub id: String,
    pub name: String,
    /// Line identifiers served by this stop. Ordered so that any selection
    /// over them is deterministic.
    pub lines: BTreeSet<String>,
    /// Out of service ("suprimida").
    pub suppressed: bool,
}

impl BusStop {
    /// Parse a comma-delimited line list.
    ///
    /// Entries are trimmed and blanks dropped, so an empty or malformed list
    /// yields an empty set rather than a set containing `""`.
    ///
    /// ```
    /// use route_server::domain::BusStop;
    ///
    /// let lines = BusStop::parse_lines("C2, 19 ,,35");
    /// assert_eq!(lines.len(), 3);
    /// assert!(lines.contains("C2"));
    /// assert!(BusStop::parse_lines("").is_empty());
    /// ```
    pub fn parse_lines(raw: &str) -> BTreeSet<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A stretch of road with a measured traffic intensity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficSegment {
    /// Representative point of the segment, used for proximity tests.
    pub coordinate: Option<Coordinate>,
    /// The segment polyline.
    pub path: Vec<Coordinate>,
    /// Vehicles per hour, if measured.
    pub intensity: Option<f64>,
    /// Congestion state as published (0 = fluid, 1 = dense, 2+ = congested).
    pub state: Option<u8>,
}

impl Located for ParkingGarage {
    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

impl Located for BikeStation {
    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

impl Located for BusStop {
    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

impl Located for TrafficSegment {
    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

/// A facility used by a plan, tagged by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum FacilityRecord {
    Parking(ParkingGarage),
    BikeStation(BikeStation),
    BusStop(BusStop),
}

impl Located for FacilityRecord {
    fn coordinate(&self) -> Option<Coordinate> {
        match self {
            FacilityRecord::Parking(p) => p.coordinate,
            FacilityRecord::BikeStation(b) => b.coordinate,
            FacilityRecord::BusStop(s) => s.coordinate,
        }
    }
}

/// A snapshot of every facility dataset, supplied per request.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub parkings: Vec<ParkingGarage>,
    pub bike_stations: Vec<BikeStation>,
    pub bus_stops: Vec<BusStop>,
    pub traffic: Vec<TrafficSegment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lines_trims_and_dedups() {
        let lines = BusStop::parse_lines(" 19, C2,19 ");
        assert_eq!(lines.into_iter().collect::<Vec<_>>(), vec!["19", "C2"]);
    }

    #[test]
    fn parse_lines_blank_is_empty() {
        assert!(BusStop::parse_lines("").is_empty());
        assert!(BusStop::parse_lines(" , ,").is_empty());
    }

    #[test]
    fn facility_record_exposes_coordinate() {
        let c = Coordinate::new(39.47, -0.37).unwrap();
        let rec = FacilityRecord::Parking(ParkingGarage {
            coordinate: Some(c),
            name: "Centro".into(),
            capacity: Some(300),
        });
        assert_eq!(rec.coordinate(), Some(c));

        let rec = FacilityRecord::BikeStation(BikeStation {
            coordinate: None,
            address: "Plaza".into(),
            available_bikes: 0,
            free_slots: 10,
        });
        assert_eq!(rec.coordinate(), None);
    }

    #[test]
    fn facility_record_serializes_with_category() {
        let rec = FacilityRecord::Parking(ParkingGarage {
            coordinate: None,
            name: "Centro".into(),
            capacity: None,
        });
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["category"], "parking");
        assert_eq!(json["name"], "Centro");
    }
}
