//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    FacilityRecord, LegMode, Marker, MarkerRole, ParkingPreference, RouteLeg, RoutePlan,
    TransportMode,
};
use crate::planner::PlanFailure;

/// Travel mode as submitted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeInput {
    Walking,
    Car,
    Valenbisi,
    Bus,
}

/// A start or end point: free text to geocode, or explicit coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlaceInput {
    Address { address: String },
    Coordinates { lat: f64, lon: f64 },
}

impl PlaceInput {
    /// Text identifying this input for the plan cache.
    ///
    /// Coordinates keep full precision: a cached plan's markers carry the
    /// exact input point, so only an identical point may reuse it.
    pub fn signature(&self) -> String {
        match self {
            PlaceInput::Address { address } => format!("address:{}", address.trim()),
            PlaceInput::Coordinates { lat, lon } => format!("at:{lat},{lon}"),
        }
    }
}

/// Request to plan a route.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRouteRequest {
    pub mode: ModeInput,

    /// Only meaningful for `car`; defaults to the garage option
    pub parking: Option<ParkingPreference>,

    pub start: PlaceInput,
    pub end: PlaceInput,
}

impl PlanRouteRequest {
    pub fn transport_mode(&self) -> TransportMode {
        match self.mode {
            ModeInput::Walking => TransportMode::Walking,
            ModeInput::Car => TransportMode::Car(self.parking.unwrap_or_default()),
            ModeInput::Valenbisi => TransportMode::Valenbisi,
            ModeInput::Bus => TransportMode::Bus,
        }
    }
}

/// A leg in a planned route.
#[derive(Debug, Clone, Serialize)]
pub struct LegResult {
    pub mode: LegMode,
    pub label: String,
    /// Stroke colour for map display
    pub color: &'static str,
    pub duration_secs: f64,
    pub distance_m: f64,
    /// Polyline as `[lat, lon]` pairs
    pub path: Vec<[f64; 2]>,
}

impl LegResult {
    pub fn from_leg(leg: &RouteLeg) -> Self {
        Self {
            mode: leg.mode,
            label: leg.label.clone(),
            color: leg.color(),
            duration_secs: leg.duration_secs,
            distance_m: leg.distance_m,
            path: leg.path.iter().map(|c| [c.lat(), c.lon()]).collect(),
        }
    }
}

/// A map marker.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerResult {
    pub role: MarkerRole,
    /// Tooltip text
    pub label: String,
    pub color: &'static str,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<FacilityRecord>,
}

impl MarkerResult {
    pub fn from_marker(marker: &Marker) -> Self {
        Self {
            role: marker.role,
            label: marker.label.clone(),
            color: marker.role.color(),
            lat: marker.coordinate.lat(),
            lon: marker.coordinate.lon(),
            facility: marker.facility.clone(),
        }
    }
}

/// A successfully planned route.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedRoute {
    /// Summary line for display
    pub notice: String,
    pub mode: String,
    pub total_secs: f64,
    pub total_distance_m: f64,
    /// Present for car modes only
    pub traffic_penalty_secs: Option<f64>,
    pub wait_secs: f64,
    /// Bus line used, for bus plans
    pub line: Option<String>,
    pub legs: Vec<LegResult>,
    pub markers: Vec<MarkerResult>,
}

impl PlannedRoute {
    pub fn from_plan(plan: &RoutePlan) -> Self {
        Self {
            notice: plan.notice(),
            mode: plan.mode().to_string(),
            total_secs: plan.total_secs(),
            total_distance_m: plan.total_distance_m(),
            traffic_penalty_secs: plan.traffic_penalty_secs(),
            wait_secs: plan.wait_secs(),
            line: plan.line().map(str::to_string),
            legs: plan.legs().iter().map(LegResult::from_leg).collect(),
            markers: plan.markers().iter().map(MarkerResult::from_marker).collect(),
        }
    }
}

/// Why a plan could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The data offers no solution for this mode
    NoSolution,
    /// A collaborator service failed
    Provider,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedRoute {
    pub kind: FailureKind,
    pub reason: String,
}

impl FailedRoute {
    pub fn from_failure(failure: &PlanFailure) -> Self {
        let kind = if failure.is_no_solution() {
            FailureKind::NoSolution
        } else {
            FailureKind::Provider
        };
        Self {
            kind,
            reason: failure.to_string(),
        }
    }
}

/// Response to a plan request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanRouteResponse {
    Planned(PlannedRoute),
    Failed(FailedRoute),
}

impl PlanRouteResponse {
    pub fn from_outcome(outcome: &Result<RoutePlan, PlanFailure>) -> Self {
        match outcome {
            Ok(plan) => PlanRouteResponse::Planned(PlannedRoute::from_plan(plan)),
            Err(failure) => PlanRouteResponse::Failed(FailedRoute::from_failure(failure)),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Profile};

    #[test]
    fn parses_address_and_coordinate_places() {
        let req: PlanRouteRequest = serde_json::from_str(
            r#"{"mode":"car","parking":"street",
                "start":{"address":"Plaza del Ayuntamiento"},
                "end":{"lat":39.4561,"lon":-0.3573}}"#,
        )
        .unwrap();

        assert_eq!(
            req.transport_mode(),
            TransportMode::Car(ParkingPreference::StreetParking)
        );
        assert_eq!(
            req.start,
            PlaceInput::Address {
                address: "Plaza del Ayuntamiento".into()
            }
        );
        assert_eq!(req.end.signature(), "at:39.4561,-0.3573");
    }

    #[test]
    fn signatures_distinguish_nearby_points_and_kinds() {
        let a = PlaceInput::Coordinates {
            lat: 39.456_10,
            lon: -0.357_30,
        };
        let b = PlaceInput::Coordinates {
            lat: 39.456_101,
            lon: -0.357_30,
        };
        assert_ne!(a.signature(), b.signature());

        let text = PlaceInput::Address {
            address: " 39.4561,-0.3573 ".into(),
        };
        assert_ne!(text.signature(), a.signature());
        assert_eq!(text.signature(), "address:39.4561,-0.3573");
    }

    #[test]
    fn car_defaults_to_garage() {
        let req: PlanRouteRequest = serde_json::from_str(
            r#"{"mode":"car","start":{"address":"a"},"end":{"address":"b"}}"#,
        )
        .unwrap();
        assert_eq!(
            req.transport_mode(),
            TransportMode::Car(ParkingPreference::ParkingGarage)
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        let res: Result<PlanRouteRequest, _> = serde_json::from_str(
            r#"{"mode":"tram","start":{"address":"a"},"end":{"address":"b"}}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn failure_response_shape() {
        let outcome = Err(PlanFailure::NoConnectingLine);
        let json = serde_json::to_value(PlanRouteResponse::from_outcome(&outcome)).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "no_solution");
        assert_eq!(json["reason"], "no connecting line");

        let outcome = Err(PlanFailure::LegUnavailable {
            profile: Profile::FootWalking,
            message: "timeout".into(),
        });
        let json = serde_json::to_value(PlanRouteResponse::from_outcome(&outcome)).unwrap();
        assert_eq!(json["kind"], "provider");
    }

    #[test]
    fn planned_response_shape() {
        let path = vec![
            Coordinate::new(39.4743, -0.3763).unwrap(),
            Coordinate::new(39.4561, -0.3573).unwrap(),
        ];
        let leg = RouteLeg::new(path, 900.0, 2600.0, LegMode::Walk);
        let plan = RoutePlan::new(TransportMode::Walking, vec![leg], Vec::new()).unwrap();

        let json = serde_json::to_value(PlanRouteResponse::from_outcome(&Ok(plan))).unwrap();
        assert_eq!(json["status"], "planned");
        assert_eq!(json["total_secs"], 900.0);
        assert_eq!(json["notice"], "Estimated walking time: 15.0 min");
        assert_eq!(json["legs"][0]["mode"], "walk");
        assert_eq!(json["legs"][0]["path"][0][0], 39.4743);
        assert!(json["traffic_penalty_secs"].is_null());
    }
}
