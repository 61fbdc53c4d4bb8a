//! ORS API request and response DTOs.
//!
//! These map directly to the v2 directions `geojson` format. Everything the
//! service may omit is optional; conversion decides what is required.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::LonLat;

/// Body of a directions request.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequest<'a> {
    /// Waypoints in travel order, each `[lon, lat]`.
    pub coordinates: &'a [LonLat],
    /// Turn-by-turn steps; only geometry and summary are read.
    pub instructions: bool,
}

impl<'a> DirectionsRequest<'a> {
    pub fn new(coordinates: &'a [LonLat]) -> Self {
        Self {
            coordinates,
            instructions: false,
        }
    }
}

/// Top-level directions response.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One routed alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Option<Properties>,
}

/// Route geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// Should be "LineString".
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Positions, `[lon, lat]` or `[lon, lat, elevation]`.
    #[serde(default)]
    pub coordinates: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Properties {
    pub summary: Option<Summary>,
}

/// Totals for the whole route.
///
/// ORS drops both fields when start and end coincide.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Summary {
    /// Seconds.
    pub duration: Option<f64>,
    /// Metres.
    pub distance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_lon_first() {
        let coords = [LonLat {
            lon: -0.3763,
            lat: 39.4743,
        }];
        let body = serde_json::to_string(&DirectionsRequest::new(&coords)).unwrap();
        assert_eq!(
            body,
            r#"{"coordinates":[[-0.3763,39.4743]],"instructions":false}"#
        );
    }

    #[test]
    fn parses_sparse_response() {
        let json = r#"{"type":"FeatureCollection","features":[{"geometry":{"type":"LineString","coordinates":[[-0.37,39.47]]},"properties":{"summary":{}}}]}"#;
        let fc: FeatureCollection = serde_json::from_str(json).unwrap();
        let summary = fc.features[0]
            .properties
            .as_ref()
            .and_then(|p| p.summary.clone())
            .unwrap();
        assert_eq!(summary.duration, None);
        assert_eq!(fc.features[0].geometry.as_ref().unwrap().coordinates.len(), 1);
    }
}
