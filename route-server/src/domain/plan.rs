//! Composed route plans.

use serde::Serialize;

use super::{Coordinate, DomainError, FacilityRecord, ParkingPreference, RouteLeg, TransportMode};

/// What a map marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerRole {
    Start,
    End,
    Parking,
    BikePickup,
    BikeDropoff,
    BusBoard,
    BusAlight,
}

impl MarkerRole {
    /// Display colour for map rendering.
    pub fn color(&self) -> &'static str {
        match self {
            MarkerRole::Start => "green",
            MarkerRole::End => "red",
            MarkerRole::Parking => "blue",
            MarkerRole::BikePickup => "orange",
            MarkerRole::BikeDropoff => "purple",
            MarkerRole::BusBoard | MarkerRole::BusAlight => "lightblue",
        }
    }
}

/// A point of interest shown alongside the plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub role: MarkerRole,
    pub coordinate: Coordinate,
    pub label: String,
    /// The facility behind this marker, if any.
    pub facility: Option<FacilityRecord>,
}

impl Marker {
    /// A marker for a bare position (start or end).
    pub fn at(role: MarkerRole, coordinate: Coordinate, label: impl Into<String>) -> Self {
        Self {
            role,
            coordinate,
            label: label.into(),
            facility: None,
        }
    }

    /// A marker for a facility used by the plan.
    pub fn facility(
        role: MarkerRole,
        coordinate: Coordinate,
        label: impl Into<String>,
        facility: FacilityRecord,
    ) -> Self {
        Self {
            role,
            coordinate,
            label: label.into(),
            facility: Some(facility),
        }
    }
}

/// The result of composing a route for one request.
///
/// A plan owns its legs and markers. The total duration is always derived
/// from the legs plus any traffic penalty and fixed waiting time, so it
/// cannot drift from its parts.
///
/// # Invariants
///
/// - At least one leg
/// - Penalty and waiting time are non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    mode: TransportMode,
    legs: Vec<RouteLeg>,
    markers: Vec<Marker>,
    traffic_penalty_secs: Option<f64>,
    wait_secs: f64,
    line: Option<String>,
}

impl RoutePlan {
    /// Constructs a plan from its legs and markers.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty.
    pub fn new(
        mode: TransportMode,
        legs: Vec<RouteLeg>,
        markers: Vec<Marker>,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyPlan);
        }
        Ok(Self {
            mode,
            legs,
            markers,
            traffic_penalty_secs: None,
            wait_secs: 0.0,
            line: None,
        })
    }

    /// Attach a traffic penalty (negative values are clamped to zero).
    pub fn with_traffic_penalty(mut self, secs: f64) -> Self {
        self.traffic_penalty_secs = Some(secs.max(0.0));
        self
    }

    /// Add a fixed waiting time, e.g. the average wait for a bus.
    pub fn with_wait(mut self, secs: f64) -> Self {
        self.wait_secs = secs.max(0.0);
        self
    }

    /// Record the transit line used.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    /// The traffic penalty component, if one was computed.
    pub fn traffic_penalty_secs(&self) -> Option<f64> {
        self.traffic_penalty_secs
    }

    /// Fixed waiting time included in the total.
    pub fn wait_secs(&self) -> f64 {
        self.wait_secs
    }

    /// Sum of leg durations, excluding penalty and waiting.
    pub fn travel_secs(&self) -> f64 {
        self.legs.iter().map(|l| l.duration_secs).sum()
    }

    /// Total estimated duration in seconds.
    pub fn total_secs(&self) -> f64 {
        self.travel_secs() + self.traffic_penalty_secs.unwrap_or(0.0) + self.wait_secs
    }

    /// Total distance over all legs, in metres.
    pub fn total_distance_m(&self) -> f64 {
        self.legs.iter().map(|l| l.distance_m).sum()
    }

    /// The user-facing summary line.
    pub fn notice(&self) -> String {
        let mins = self.total_secs() / 60.0;
        let penalty_mins = self.traffic_penalty_secs.unwrap_or(0.0) / 60.0;
        match self.mode {
            TransportMode::Walking => format!("Estimated walking time: {mins:.1} min"),
            TransportMode::Car(ParkingPreference::StreetParking) => {
                format!("Est. driving time: {mins:.1} min  (traffic +{penalty_mins:.1})")
            }
            TransportMode::Car(ParkingPreference::ParkingGarage) => {
                format!("Est. total time: {mins:.1} min  (traffic +{penalty_mins:.1})")
            }
            TransportMode::Valenbisi => format!("Estimated total time: {mins:.1} min"),
            TransportMode::Bus => format!(
                "Estimated time with line {}: {mins:.1} min",
                self.line.as_deref().unwrap_or("?")
            ),
        }
    }
}
