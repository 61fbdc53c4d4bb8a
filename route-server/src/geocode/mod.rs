//! Address geocoding.
//!
//! Free-text addresses are resolved through Nominatim. Results (including
//! "not found") are memoised per address.

mod cached;
mod nominatim;

use std::future::Future;

use crate::domain::Coordinate;

pub use cached::CachedGeocoder;
pub use nominatim::{GeocoderConfig, NominatimClient, NominatimPlace};

/// Errors from a geocoding service.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {0}")]
    Json(String),
}

/// Trait for resolving an address to a coordinate.
///
/// `Ok(None)` means the service answered but found nothing.
pub trait Geocoder {
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, GeocodeError>> + Send;
}
