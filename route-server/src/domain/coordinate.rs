//! Coordinate types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lon}): {reason}")]
pub struct InvalidCoordinate {
    lat: f64,
    lon: f64,
    reason: &'static str,
}

/// A WGS84 position in degrees, latitude first.
///
/// Any `Coordinate` value is finite and within range by construction, so
/// distance computations never see NaN or out-of-range input.
///
/// # Examples
///
/// ```
/// use route_server::domain::Coordinate;
///
/// let town_hall = Coordinate::new(39.4699, -0.3763).unwrap();
/// assert_eq!(town_hall.lat(), 39.4699);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Returns the longitude-first pair expected by the directions provider.
    pub fn to_lon_lat(self) -> LonLat {
        LonLat {
            lon: self.lon,
            lat: self.lat,
        }
    }

    /// Parse an open-data `geo_point_2d` value.
    ///
    /// Accepts a `[lat, lon]` array (numbers or numeric strings) or a
    /// `"lat, lon"` string. Anything else, including a pair that fails
    /// range validation, yields `None`.
    pub fn from_geo_point(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => {
                let [lat, lon] = items.as_slice() else {
                    return None;
                };
                Self::new(json_f64(lat)?, json_f64(lon)?).ok()
            }
            Value::String(s) => {
                let (lat, lon) = s.split_once(',')?;
                let lat = lat.trim().parse().ok()?;
                let lon = lon.trim().parse().ok()?;
                Self::new(lat, lon).ok()
            }
            _ => None,
        }
    }

    /// Parse a GeoJSON position (`[lon, lat]`, extra elements ignored).
    pub fn from_geojson_position(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        if items.len() < 2 {
            return None;
        }
        Self::new(json_f64(&items[1])?, json_f64(&items[0])?).ok()
    }

    /// Midpoint of two coordinates (plain average, fine at city scale).
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            lat: (self.lat + other.lat) / 2.0,
            lon: (self.lon + other.lon) / 2.0,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            lat: f64,
            lon: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Coordinate::new(raw.lat, raw.lon).map_err(serde::de::Error::custom)
    }
}

/// A longitude-first position, the axis order used by the directions
/// provider. Serializes as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl Serialize for LonLat {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lon, self.lat].serialize(serializer)
    }
}

/// Read a number from JSON, accepting numeric strings.
pub(crate) fn json_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Parsing arbitrary JSON arrays never panics
        #[test]
        fn geo_point_never_panics(items in prop::collection::vec(any::<f64>(), 0..4)) {
            let value = serde_json::json!(items);
            let _ = Coordinate::from_geo_point(&value);
        }

        /// Parsing arbitrary strings never panics
        #[test]
        fn geo_point_string_never_panics(s in ".{0,40}") {
            let _ = Coordinate::from_geo_point(&Value::String(s));
        }

        /// Anything in range parses from its "lat, lon" text form
        #[test]
        fn in_range_string_parses(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let value = Value::String(format!("{lat}, {lon}"));
            let c = Coordinate::from_geo_point(&value).unwrap();
            prop_assert_eq!(c.lat(), lat);
            prop_assert_eq!(c.lon(), lon);
        }
    }
}
