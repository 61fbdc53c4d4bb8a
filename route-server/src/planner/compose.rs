//! Route composition.
//!
//! Given a transport mode and two endpoints, decides which facilities to
//! use, which legs to request from the directions provider and in what
//! order, and aggregates the result into a [`RoutePlan`].
//!
//! Every mode runs in a single pass. If any leg cannot be obtained the whole
//! plan fails: a partial plan with a dangling leg would mislead the user.

use std::future::Future;

use tracing::{debug, info};

use crate::domain::{
    Coordinate, Datasets, DomainError, FacilityRecord, LegMode, LonLat, Marker, MarkerRole, ParkingPreference,
    Profile, RouteLeg, RoutePlan, TransportMode,
};
use crate::spatial::nearest;

use super::bus::select_bus_pairing;
use super::config::PlannerConfig;
use super::traffic::traffic_penalty_secs;

/// Error from the directions provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectionsError {
    /// The provider could not be reached or returned an error
    #[error("directions provider unavailable: {0}")]
    Unavailable(String),

    /// The provider found no path between the points
    #[error("no route found")]
    NoRoute,
}

/// Trait for obtaining a routed leg between points.
///
/// Coordinates are passed longitude first, as the provider expects them.
/// This abstraction allows the composer to be tested with canned legs.
pub trait DirectionsProvider {
    fn get_route(
        &self,
        coordinates: &[LonLat],
        profile: Profile,
    ) -> impl Future<Output = Result<RouteLeg, DirectionsError>> + Send;
}

/// Why no plan could be produced.
///
/// The first three variants are legitimate "no solution" outcomes; the last
/// is a provider failure. Neither is fatal: the caller reports it and waits
/// for new input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanFailure {
    #[error("no parking near destination")]
    NoParkingNearDestination,

    #[error("no station near start/end")]
    NoStationNearStartOrEnd,

    #[error("no connecting line")]
    NoConnectingLine,

    /// A leg could not be obtained from the directions provider
    #[error("route leg unavailable ({profile}): {message}")]
    LegUnavailable { profile: Profile, message: String },

    /// The composed legs did not form a valid plan
    #[error(transparent)]
    InvalidPlan(#[from] DomainError),
}

impl PlanFailure {
    /// True for outcomes where the data simply offers no solution.
    pub fn is_no_solution(&self) -> bool {
        !matches!(
            self,
            PlanFailure::LegUnavailable { .. } | PlanFailure::InvalidPlan(_)
        )
    }
}

/// Route composer.
pub struct Composer<'a, P: DirectionsProvider> {
    provider: &'a P,
    config: &'a PlannerConfig,
}

impl<'a, P: DirectionsProvider> Composer<'a, P> {
    /// Create a new composer.
    pub fn new(provider: &'a P, config: &'a PlannerConfig) -> Self {
        Self { provider, config }
    }

    /// Compose a plan for `mode` between `start` and `end`.
    pub async fn compose(
        &self,
        mode: TransportMode,
        start: Coordinate,
        end: Coordinate,
        datasets: &Datasets,
    ) -> Result<RoutePlan, PlanFailure> {
        debug!(%mode, %start, %end, "composing route");

        let plan = match mode {
            TransportMode::Walking => self.walking(start, end).await,
            TransportMode::Car(ParkingPreference::StreetParking) => {
                self.street_parking(start, end, datasets).await
            }
            TransportMode::Car(ParkingPreference::ParkingGarage) => {
                self.parking_garage(start, end, datasets).await
            }
            TransportMode::Valenbisi => self.valenbisi(start, end, datasets).await,
            TransportMode::Bus => self.bus(start, end, datasets).await,
        };

        match &plan {
            Ok(plan) => info!(
                %mode,
                legs = plan.legs().len(),
                total_secs = plan.total_secs(),
                penalty_secs = plan.traffic_penalty_secs().unwrap_or(0.0),
                "route composed"
            ),
            Err(failure) => info!(%mode, %failure, "route composition failed"),
        }

        plan
    }

    /// Walk from start to end.
    async fn walking(&self, start: Coordinate, end: Coordinate) -> Result<RoutePlan, PlanFailure> {
        let walk = self.leg(start, end, Profile::FootWalking).await?;
        Ok(RoutePlan::new(
            TransportMode::Walking,
            vec![walk],
            endpoints(start, end),
        )?)
    }

    /// Drive from start to end and park on the street.
    async fn street_parking(
        &self,
        start: Coordinate,
        end: Coordinate,
        datasets: &Datasets,
    ) -> Result<RoutePlan, PlanFailure> {
        let drive = self.leg(start, end, Profile::DrivingCar).await?;
        let penalty = traffic_penalty_secs(&drive.path, &datasets.traffic, self.config);

        let plan = RoutePlan::new(
            TransportMode::Car(ParkingPreference::StreetParking),
            vec![drive],
            endpoints(start, end),
        )?;
        Ok(plan.with_traffic_penalty(penalty))
    }

    /// Drive to the garage nearest the destination, then walk.
    async fn parking_garage(
        &self,
        start: Coordinate,
        end: Coordinate,
        datasets: &Datasets,
    ) -> Result<RoutePlan, PlanFailure> {
        let garage = nearest(&datasets.parkings, &end)
            .ok_or(PlanFailure::NoParkingNearDestination)?;
        let garage_at = garage
            .coordinate
            .ok_or(PlanFailure::NoParkingNearDestination)?;
        debug!(garage = %garage.name, "nearest parking garage");

        let drive = self.leg(start, garage_at, Profile::DrivingCar).await?;
        let walk = self.leg(garage_at, end, Profile::FootWalking).await?;
        let penalty = traffic_penalty_secs(&drive.path, &datasets.traffic, self.config);

        let mut markers = endpoints(start, end);
        markers.push(Marker::facility(
            MarkerRole::Parking,
            garage_at,
            "Nearest Parking Garage",
            FacilityRecord::Parking(garage.clone()),
        ));

        let plan = RoutePlan::new(
            TransportMode::Car(ParkingPreference::ParkingGarage),
            vec![drive, walk],
            markers,
        )?;
        Ok(plan.with_traffic_penalty(penalty))
    }

    /// Walk to a bike station, ride to the station nearest the destination,
    /// then walk.
    async fn valenbisi(
        &self,
        start: Coordinate,
        end: Coordinate,
        datasets: &Datasets,
    ) -> Result<RoutePlan, PlanFailure> {
        let pickup = nearest(&datasets.bike_stations, &start);
        let dropoff = nearest(&datasets.bike_stations, &end);
        let (Some(pickup), Some(dropoff)) = (pickup, dropoff) else {
            return Err(PlanFailure::NoStationNearStartOrEnd);
        };
        let (Some(pickup_at), Some(dropoff_at)) = (pickup.coordinate, dropoff.coordinate) else {
            return Err(PlanFailure::NoStationNearStartOrEnd);
        };
        debug!(pickup = %pickup.address, dropoff = %dropoff.address, "bike stations");

        let walk_in = self.leg(start, pickup_at, Profile::FootWalking).await?;
        let ride = self.leg(pickup_at, dropoff_at, Profile::CyclingRegular).await?;
        let walk_out = self.leg(dropoff_at, end, Profile::FootWalking).await?;

        let mut markers = endpoints(start, end);
        markers.push(Marker::facility(
            MarkerRole::BikePickup,
            pickup_at,
            "Bike pickup",
            FacilityRecord::BikeStation(pickup.clone()),
        ));
        markers.push(Marker::facility(
            MarkerRole::BikeDropoff,
            dropoff_at,
            "Bike drop-off",
            FacilityRecord::BikeStation(dropoff.clone()),
        ));

        Ok(RoutePlan::new(
            TransportMode::Valenbisi,
            vec![walk_in, ride, walk_out],
            markers,
        )?)
    }

    /// Walk to a stop, ride a shared line, then walk.
    ///
    /// There is no transit profile, so the bus leg's geometry and duration
    /// come from the driving profile between the two stops.
    async fn bus(
        &self,
        start: Coordinate,
        end: Coordinate,
        datasets: &Datasets,
    ) -> Result<RoutePlan, PlanFailure> {
        let pairing = select_bus_pairing(&start, &end, &datasets.bus_stops, self.config.bus_candidates)
            .ok_or(PlanFailure::NoConnectingLine)?;
        let (Some(board_at), Some(alight_at)) =
            (pairing.board.coordinate, pairing.alight.coordinate)
        else {
            return Err(PlanFailure::NoConnectingLine);
        };
        let line = pairing.line;

        let walk_in = self.leg(start, board_at, Profile::FootWalking).await?;
        let ride = self
            .leg(board_at, alight_at, Profile::DrivingCar)
            .await?
            .relabel(LegMode::Bus, format!("Line {line}"));
        let walk_out = self.leg(alight_at, end, Profile::FootWalking).await?;

        let mut markers = endpoints(start, end);
        markers.push(Marker::facility(
            MarkerRole::BusBoard,
            board_at,
            format!("Start stop · L{line}"),
            FacilityRecord::BusStop(pairing.board.clone()),
        ));
        markers.push(Marker::facility(
            MarkerRole::BusAlight,
            alight_at,
            format!("End stop · L{line}"),
            FacilityRecord::BusStop(pairing.alight.clone()),
        ));

        let plan = RoutePlan::new(TransportMode::Bus, vec![walk_in, ride, walk_out], markers)?;
        Ok(plan.with_wait(self.config.bus_wait_secs).with_line(line))
    }

    /// Request one leg, converting provider errors into a plan failure.
    async fn leg(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: Profile,
    ) -> Result<RouteLeg, PlanFailure> {
        self.provider
            .get_route(&[from.to_lon_lat(), to.to_lon_lat()], profile)
            .await
            .map_err(|e| PlanFailure::LegUnavailable {
                profile,
                message: e.to_string(),
            })
    }
}

/// Compose a plan in one call.
pub async fn compose_route<P: DirectionsProvider>(
    provider: &P,
    config: &PlannerConfig,
    mode: TransportMode,
    start: Coordinate,
    end: Coordinate,
    datasets: &Datasets,
) -> Result<RoutePlan, PlanFailure> {
    Composer::new(provider, config)
        .compose(mode, start, end, datasets)
        .await
}

fn endpoints(start: Coordinate, end: Coordinate) -> Vec<Marker> {
    vec![
        Marker::at(MarkerRole::Start, start, "Start"),
        Marker::at(MarkerRole::End, end, "End"),
    ]
}
