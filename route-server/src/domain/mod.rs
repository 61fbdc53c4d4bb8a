//! Domain types for the multi-modal route planner.
//!
//! This module contains the validated value types that the planner works
//! with. Raw open-data records are converted into these types at ingestion,
//! so code that receives them can trust their validity.

mod coordinate;
mod error;
mod facility;
mod leg;
mod mode;
mod plan;

pub use coordinate::{Coordinate, InvalidCoordinate, LonLat};
pub(crate) use coordinate::json_f64;
pub use error::DomainError;
pub use facility::{
    BikeStation, BusStop, Datasets, FacilityRecord, Located, ParkingGarage, TrafficSegment,
};
pub use leg::{LegMode, RouteLeg};
pub use mode::{ParkingPreference, Profile, TransportMode};
pub use plan::{Marker, MarkerRole, RoutePlan};
