//! Conversion from ORS DTOs to domain types.

use crate::domain::{Coordinate, LegMode, Profile, RouteLeg};

use super::error::OrsError;
use super::types::FeatureCollection;

/// Convert a directions response into a leg.
///
/// Only the first feature is used. Positions that are not valid coordinates
/// are dropped. A response without a feature or a geometry is `NoRoute`;
/// a missing summary total is treated as zero, which ORS sends when the
/// endpoints coincide.
pub fn convert_route(response: &FeatureCollection, profile: Profile) -> Result<RouteLeg, OrsError> {
    let feature = response.features.first().ok_or(OrsError::NoRoute)?;
    let geometry = feature.geometry.as_ref().ok_or(OrsError::NoRoute)?;

    let path: Vec<Coordinate> = geometry
        .coordinates
        .iter()
        .filter_map(Coordinate::from_geojson_position)
        .collect();
    if path.is_empty() {
        return Err(OrsError::NoRoute);
    }

    let summary = feature
        .properties
        .as_ref()
        .and_then(|p| p.summary.clone())
        .unwrap_or_default();

    Ok(RouteLeg::new(
        path,
        summary.duration.unwrap_or(0.0).max(0.0),
        summary.distance.unwrap_or(0.0).max(0.0),
        LegMode::for_profile(profile),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> FeatureCollection {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn converts_first_feature() {
        let fc = parse(
            r#"{"features":[
                {"geometry":{"coordinates":[[-0.3763,39.4743],[-0.3700,39.4700,12.0]]},
                 "properties":{"summary":{"duration":612.4,"distance":2840.1}}},
                {"geometry":{"coordinates":[[0.0,0.0]]},"properties":{}}
            ]}"#,
        );

        let leg = convert_route(&fc, Profile::CyclingRegular).unwrap();

        assert_eq!(leg.path.len(), 2);
        assert_eq!(leg.path[0].lat(), 39.4743);
        assert_eq!(leg.path[0].lon(), -0.3763);
        assert_eq!(leg.duration_secs, 612.4);
        assert_eq!(leg.distance_m, 2840.1);
        assert_eq!(leg.mode, LegMode::Cycle);
    }

    #[test]
    fn empty_collection_is_no_route() {
        let fc = parse(r#"{"features":[]}"#);
        assert!(matches!(
            convert_route(&fc, Profile::FootWalking),
            Err(OrsError::NoRoute)
        ));
    }

    #[test]
    fn missing_geometry_is_no_route() {
        let fc = parse(r#"{"features":[{"properties":{"summary":{"duration":5}}}]}"#);
        assert!(matches!(
            convert_route(&fc, Profile::FootWalking),
            Err(OrsError::NoRoute)
        ));
    }

    #[test]
    fn missing_summary_is_zero() {
        let fc = parse(r#"{"features":[{"geometry":{"coordinates":[[-0.37,39.47]]}}]}"#);
        let leg = convert_route(&fc, Profile::DrivingCar).unwrap();
        assert_eq!(leg.duration_secs, 0.0);
        assert_eq!(leg.distance_m, 0.0);
    }

    #[test]
    fn invalid_positions_dropped() {
        let fc = parse(
            r#"{"features":[{"geometry":{"coordinates":[[-0.37,39.47],["x",1],[200,95]]}}]}"#,
        );
        let leg = convert_route(&fc, Profile::FootWalking).unwrap();
        assert_eq!(leg.path.len(), 1);
    }
}
