//! Route legs.

use serde::Serialize;

use super::{Coordinate, Profile};

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegMode {
    Walk,
    Drive,
    Cycle,
    Bus,
}

impl LegMode {
    /// The mode a provider leg has for a given profile.
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::FootWalking => LegMode::Walk,
            Profile::DrivingCar => LegMode::Drive,
            Profile::CyclingRegular => LegMode::Cycle,
        }
    }

    /// Display colour for map rendering.
    pub fn color(&self) -> &'static str {
        match self {
            LegMode::Walk => "green",
            LegMode::Drive => "blue",
            LegMode::Cycle => "orange",
            LegMode::Bus => "red",
        }
    }

    /// Default display label.
    pub fn label(&self) -> &'static str {
        match self {
            LegMode::Walk => "Walk",
            LegMode::Drive => "Drive",
            LegMode::Cycle => "Cycle",
            LegMode::Bus => "Bus",
        }
    }
}

/// One continuous single-mode segment of a journey.
///
/// Legs are produced by the directions provider; the planner only decides
/// which coordinate pairs to request and relabels legs for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    /// Path geometry, in travel order.
    pub path: Vec<Coordinate>,
    /// Travel time in seconds.
    pub duration_secs: f64,
    /// Travel distance in metres.
    pub distance_m: f64,
    pub mode: LegMode,
    pub label: String,
}

impl RouteLeg {
    /// Creates a leg with the default label for its mode.
    pub fn new(path: Vec<Coordinate>, duration_secs: f64, distance_m: f64, mode: LegMode) -> Self {
        Self {
            path,
            duration_secs,
            distance_m,
            mode,
            label: mode.label().to_string(),
        }
    }

    /// Re-tag this leg, e.g. a driving-profile leg standing in for a bus ride.
    pub fn relabel(mut self, mode: LegMode, label: impl Into<String>) -> Self {
        self.mode = mode;
        self.label = label.into();
        self
    }

    /// Display colour for this leg.
    pub fn color(&self) -> &'static str {
        self.mode.color()
    }
}
