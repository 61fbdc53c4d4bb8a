//! Tunable constants for route composition.

use crate::spatial::DEFAULT_K;

/// Configuration parameters for route composition.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// How many stops near each endpoint are considered for a bus pairing.
    pub bus_candidates: usize,

    /// A traffic measurement counts if it lies strictly closer than this
    /// to a sampled path point (metres).
    pub traffic_radius_m: f64,

    /// Only every n-th path point is tested against traffic measurements.
    pub traffic_sample_stride: usize,

    /// Seconds of delay per 100 vehicles/hour of average nearby intensity.
    pub penalty_secs_per_100: f64,

    /// Average wait at the bus stop, added to every bus plan (seconds).
    pub bus_wait_secs: f64,
}

impl PlannerConfig {
    /// Set the number of bus stop candidates per endpoint.
    pub fn with_bus_candidates(mut self, k: usize) -> Self {
        self.bus_candidates = k;
        self
    }

    /// Set the traffic matching radius.
    pub fn with_traffic_radius(mut self, metres: f64) -> Self {
        self.traffic_radius_m = metres;
        self
    }

    /// Set the path sampling stride (clamped to at least 1).
    pub fn with_traffic_sample_stride(mut self, stride: usize) -> Self {
        self.traffic_sample_stride = stride.max(1);
        self
    }

    /// Set the average bus wait.
    pub fn with_bus_wait(mut self, secs: f64) -> Self {
        self.bus_wait_secs = secs;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            bus_candidates: DEFAULT_K,
            traffic_radius_m: 50.0,
            traffic_sample_stride: 5,
            penalty_secs_per_100: 60.0,
            bus_wait_secs: 7.0 * 60.0,
        }
    }
}
