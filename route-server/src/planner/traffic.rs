//! Traffic delay estimate for driving legs.
//!
//! This is a coarse proximity heuristic, not an overlay on a road graph:
//! every traffic measurement close to the driven path contributes its
//! intensity, and the average intensity is turned into a fixed delay.

use tracing::trace;

use crate::domain::{Coordinate, TrafficSegment};
use crate::spatial::geodesic_distance;

use super::config::PlannerConfig;

/// Estimate the extra seconds a drive along `path` will take.
///
/// The path is sampled every `traffic_sample_stride` points. A measurement
/// with both a coordinate and an intensity matches if any sampled point lies
/// within `traffic_radius_m` of it. The result is
/// `mean(matched intensities) / 100 * penalty_secs_per_100`, or 0 when
/// nothing matches. Never negative.
pub fn traffic_penalty_secs(
    path: &[Coordinate],
    traffic: &[TrafficSegment],
    config: &PlannerConfig,
) -> f64 {
    let stride = config.traffic_sample_stride.max(1);
    let samples: Vec<&Coordinate> = path.iter().step_by(stride).collect();
    if samples.is_empty() {
        return 0.0;
    }

    let matched: Vec<f64> = traffic
        .iter()
        .filter_map(|segment| {
            let at = segment.coordinate?;
            let intensity = segment.intensity?;
            samples
                .iter()
                .any(|p| geodesic_distance(p, &at) < config.traffic_radius_m)
                .then_some(intensity)
        })
        .collect();

    if matched.is_empty() {
        return 0.0;
    }

    let mean = matched.iter().sum::<f64>() / matched.len() as f64;
    trace!(matched = matched.len(), mean, "traffic measurements near path");

    (mean / 100.0 * config.penalty_secs_per_100).max(0.0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn path() -> Vec<Coordinate> {
        (0..30)
            .map(|i| Coordinate::new(39.47 + i as f64 * 0.0001, -0.37).unwrap())
            .collect()
    }

    fn near(intensity: f64) -> TrafficSegment {
        TrafficSegment {
            coordinate: Some(Coordinate::new(39.47, -0.37).unwrap()),
            path: Vec::new(),
            intensity: Some(intensity),
            state: None,
        }
    }

    proptest! {
        /// Penalty is non-decreasing in the average nearby intensity
        #[test]
        fn monotone_in_intensity(a in 0.0f64..5000.0, b in 0.0f64..5000.0) {
            let config = PlannerConfig::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = traffic_penalty_secs(&path(), &[near(lo)], &config);
            let p_hi = traffic_penalty_secs(&path(), &[near(hi)], &config);
            prop_assert!(p_lo <= p_hi);
            prop_assert!(p_lo >= 0.0);
        }
    }
}
