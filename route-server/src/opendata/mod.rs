//! Valencia open-data client.
//!
//! Fetches the four facility datasets (parkings, Valenbisi stations, live
//! traffic, EMT bus stops) from the city's Opendatasoft portal and turns
//! them into validated domain records.
//!
//! The portal is best-effort: a dataset that cannot be fetched is treated
//! as empty, and individual malformed records are kept with no coordinate
//! rather than rejected.

mod client;
mod convert;
mod error;
mod store;
mod types;

pub use client::{Dataset, OpenDataClient, OpenDataConfig, RecordSource};
pub use convert::{
    convert_bike_station, convert_bus_stop, convert_parking, convert_traffic_segment,
    record_coordinate,
};
pub use error::OpenDataError;
pub use store::DatasetStore;
pub use types::{Record, RecordGeometry, RecordsResponse};
