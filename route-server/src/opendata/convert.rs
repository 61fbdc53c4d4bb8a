//! Conversion from open-data records to domain records.
//!
//! Conversions never fail. Anything unreadable becomes `None`, zero or
//! empty, and the record is kept so it still shows up in status counts.

use serde_json::Value;
use tracing::debug;

use crate::domain::{
    BikeStation, BusStop, Coordinate, ParkingGarage, TrafficSegment, json_f64,
};

use super::types::Record;

/// Read a record's position.
///
/// Prefers the `geo_point_2d` field (`[lat, lon]` or `"lat, lon"`), then
/// falls back to the portal's point geometry (`[lon, lat]`).
pub fn record_coordinate(record: &Record) -> Option<Coordinate> {
    let from_field = record.field("geo_point_2d").and_then(Coordinate::from_geo_point);
    let coordinate = from_field.or_else(|| {
        record
            .geometry
            .as_ref()
            .and_then(|g| Coordinate::from_geojson_position(&g.coordinates))
    });

    if coordinate.is_none() {
        debug!(recordid = ?record.recordid, "record has no usable coordinate");
    }
    coordinate
}

fn count(value: Option<&Value>) -> Option<u32> {
    let n = json_f64(value?)?;
    (n >= 0.0 && n <= u32::MAX as f64).then_some(n as u32)
}

fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "si" | "sí")
        }
        _ => false,
    }
}

pub fn convert_parking(record: &Record) -> ParkingGarage {
    ParkingGarage {
        coordinate: record_coordinate(record),
        name: record.text("nombre").unwrap_or_default(),
        capacity: count(record.field("plazastota")),
    }
}

/// Non-numeric availability counts read as zero.
pub fn convert_bike_station(record: &Record) -> BikeStation {
    BikeStation {
        coordinate: record_coordinate(record),
        address: record.text("address").unwrap_or_default(),
        available_bikes: count(record.field("available")).unwrap_or(0),
        free_slots: count(record.field("free")).unwrap_or(0),
    }
}

pub fn convert_bus_stop(record: &Record) -> BusStop {
    let lines = record
        .text("lineas")
        .map(|raw| BusStop::parse_lines(&raw))
        .unwrap_or_default();

    BusStop {
        coordinate: record_coordinate(record),
        id: record.text("id_parada").unwrap_or_default(),
        name: record.text("denominacion").unwrap_or_default(),
        lines,
        suppressed: flag(record.field("suprimida")),
    }
}

/// The segment's point is its `geo_point_2d`; failing that, the middle of
/// its shape.
pub fn convert_traffic_segment(record: &Record) -> TrafficSegment {
    // Some exports carry the shape as an embedded JSON string
    let shape = match record.field("geo_shape") {
        Some(Value::String(raw)) => serde_json::from_str(raw).ok(),
        other => other.cloned(),
    };
    let path: Vec<Coordinate> = shape
        .as_ref()
        .and_then(|shape: &Value| shape.get("coordinates"))
        .and_then(Value::as_array)
        .map(|positions| {
            positions
                .iter()
                .filter_map(Coordinate::from_geojson_position)
                .collect()
        })
        .unwrap_or_default();

    let coordinate = record_coordinate(record).or_else(|| match (path.first(), path.last()) {
        (Some(a), Some(b)) => Some(a.midpoint(b)),
        _ => None,
    });

    let state = record
        .field("estado")
        .and_then(json_f64)
        .filter(|s| (0.0..=u8::MAX as f64).contains(s))
        .map(|s| s as u8);

    TrafficSegment {
        coordinate,
        path,
        intensity: record.field("intensidad").and_then(json_f64),
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> Record {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn coordinate_from_array_field() {
        let rec = record(r#"{"fields":{"geo_point_2d":[39.474, -0.376]}}"#);
        let c = record_coordinate(&rec).unwrap();
        assert_eq!((c.lat(), c.lon()), (39.474, -0.376));
    }

    #[test]
    fn coordinate_from_string_field() {
        let rec = record(r#"{"fields":{"geo_point_2d":"39.474, -0.376"}}"#);
        let c = record_coordinate(&rec).unwrap();
        assert_eq!((c.lat(), c.lon()), (39.474, -0.376));
    }

    #[test]
    fn coordinate_falls_back_to_geometry() {
        let rec = record(r#"{"fields":{},"geometry":{"coordinates":[-0.376, 39.474]}}"#);
        let c = record_coordinate(&rec).unwrap();
        assert_eq!((c.lat(), c.lon()), (39.474, -0.376));
    }

    #[test]
    fn malformed_coordinate_is_none() {
        let rec = record(r#"{"fields":{"geo_point_2d":"nowhere"}}"#);
        assert!(record_coordinate(&rec).is_none());

        let rec = record(r#"{"fields":{"geo_point_2d":[139.0, -0.376]}}"#);
        assert!(record_coordinate(&rec).is_none());
    }

    #[test]
    fn parking_fields() {
        let rec = record(
            r#"{"fields":{"nombre":"Plaza de la Reina","plazastota":"412","geo_point_2d":[39.475,-0.375]}}"#,
        );
        let p = convert_parking(&rec);
        assert_eq!(p.name, "Plaza de la Reina");
        assert_eq!(p.capacity, Some(412));
        assert!(p.coordinate.is_some());
    }

    #[test]
    fn bike_counts_default_to_zero() {
        let rec = record(r#"{"fields":{"address":"Xàtiva","available":"n/a","free":7}}"#);
        let b = convert_bike_station(&rec);
        assert_eq!(b.address, "Xàtiva");
        assert_eq!(b.available_bikes, 0);
        assert_eq!(b.free_slots, 7);
        assert!(b.coordinate.is_none());
    }

    #[test]
    fn bus_stop_fields() {
        let rec = record(
            r#"{"fields":{"id_parada":1234,"denominacion":"Colón","lineas":"C2, 19,,35","suprimida":1}}"#,
        );
        let s = convert_bus_stop(&rec);
        assert_eq!(s.id, "1234");
        assert_eq!(s.name, "Colón");
        assert_eq!(s.lines.len(), 3);
        assert!(s.lines.contains("C2"));
        assert!(s.suppressed);
    }

    #[test]
    fn bus_stop_missing_lines_is_empty() {
        let s = convert_bus_stop(&record(r#"{"fields":{"id_parada":"9","suprimida":"0"}}"#));
        assert!(s.lines.is_empty());
        assert!(!s.suppressed);
    }

    #[test]
    fn traffic_segment_fields() {
        let rec = record(
            r#"{"fields":{
                "geo_shape":{"type":"LineString","coordinates":[[-0.380,39.470],[-0.378,39.472]]},
                "intensidad":"640",
                "estado":2
            }}"#,
        );
        let t = convert_traffic_segment(&rec);
        assert_eq!(t.path.len(), 2);
        assert_eq!(t.intensity, Some(640.0));
        assert_eq!(t.state, Some(2));

        // No geo_point_2d: centre of the shape
        let c = t.coordinate.unwrap();
        assert!((c.lat() - 39.471).abs() < 1e-9);
        assert!((c.lon() - -0.379).abs() < 1e-9);
    }

    #[test]
    fn traffic_shape_as_string() {
        let rec = record(
            r#"{"fields":{"geo_shape":"{\"type\":\"LineString\",\"coordinates\":[[-0.38,39.47],[-0.37,39.47]]}"}}"#,
        );
        assert_eq!(convert_traffic_segment(&rec).path.len(), 2);
    }

    #[test]
    fn traffic_segment_without_intensity() {
        let t = convert_traffic_segment(&record(
            r#"{"fields":{"geo_point_2d":[39.47,-0.37],"intensidad":"sin datos"}}"#,
        ));
        assert!(t.coordinate.is_some());
        assert_eq!(t.intensity, None);
        assert!(t.path.is_empty());
    }
}
