//! OpenRouteService directions client.
//!
//! This module provides an HTTP client for the OpenRouteService v2
//! directions API, which turns an ordered list of points into a routed
//! path with a duration and distance.
//!
//! Key characteristics of ORS:
//! - Coordinates are sent and returned **longitude first**
//! - The `geojson` response format returns a `FeatureCollection`; only the
//!   first feature is used
//! - The free tier is rate limited, so requests are bounded by a semaphore

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{OrsClient, OrsConfig};
pub use convert::convert_route;
pub use error::OrsError;
pub use mock::MockDirections;
pub use types::{DirectionsRequest, Feature, FeatureCollection, Geometry, Properties, Summary};
