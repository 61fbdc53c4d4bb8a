//! Offline directions for development without an API key.

use tracing::trace;

use crate::domain::{Coordinate, LegMode, LonLat, Profile, RouteLeg};
use crate::planner::{DirectionsError, DirectionsProvider};
use crate::spatial::geodesic_distance;

/// Directions provider that joins the waypoints with straight lines.
///
/// Durations assume a constant nominal speed per profile. Good enough to
/// exercise the whole server locally; not a substitute for real routing.
#[derive(Debug, Clone, Default)]
pub struct MockDirections;

impl MockDirections {
    pub fn new() -> Self {
        Self
    }

    /// Nominal speed in metres per second.
    pub fn speed_mps(profile: Profile) -> f64 {
        match profile {
            Profile::FootWalking => 1.39,
            Profile::CyclingRegular => 4.17,
            Profile::DrivingCar => 8.33,
        }
    }
}

impl DirectionsProvider for MockDirections {
    async fn get_route(
        &self,
        coordinates: &[LonLat],
        profile: Profile,
    ) -> Result<RouteLeg, DirectionsError> {
        let path = coordinates
            .iter()
            .map(|ll| Coordinate::new(ll.lat, ll.lon))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DirectionsError::Unavailable(e.to_string()))?;
        if path.len() < 2 {
            return Err(DirectionsError::NoRoute);
        }

        let distance_m: f64 = path
            .windows(2)
            .map(|w| geodesic_distance(&w[0], &w[1]))
            .sum();
        let duration_secs = distance_m / Self::speed_mps(profile);
        trace!(%profile, distance_m, duration_secs, "straight-line leg");

        Ok(RouteLeg::new(
            path,
            duration_secs,
            distance_m,
            LegMode::for_profile(profile),
        ))
    }
}
