//! Transport modes and routing profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the driver leaves the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParkingPreference {
    /// Drive to the garage nearest the destination, then walk.
    #[default]
    #[serde(alias = "garage")]
    ParkingGarage,
    /// Drive all the way and park on the street.
    #[serde(alias = "street")]
    StreetParking,
}

/// The mode of travel the user has chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Walking,
    Car(ParkingPreference),
    /// Valencia's bike-share scheme.
    Valenbisi,
    Bus,
}

impl TransportMode {
    /// Short lowercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Walking => "walking",
            TransportMode::Car(_) => "car",
            TransportMode::Valenbisi => "valenbisi",
            TransportMode::Bus => "bus",
        }
    }

    /// The parking preference, for car mode.
    pub fn parking(&self) -> Option<ParkingPreference> {
        match self {
            TransportMode::Car(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Car(ParkingPreference::ParkingGarage) => f.write_str("car (garage)"),
            TransportMode::Car(ParkingPreference::StreetParking) => f.write_str("car (street)"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// A routing profile understood by the directions provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    FootWalking,
    DrivingCar,
    CyclingRegular,
}

impl Profile {
    /// The provider's profile token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::FootWalking => "foot-walking",
            Profile::DrivingCar => "driving-car",
            Profile::CyclingRegular => "cycling-regular",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_tokens() {
        assert_eq!(Profile::FootWalking.as_str(), "foot-walking");
        assert_eq!(Profile::DrivingCar.as_str(), "driving-car");
        assert_eq!(Profile::CyclingRegular.as_str(), "cycling-regular");
    }

    #[test]
    fn parking_preference_accepts_short_names() {
        let p: ParkingPreference = serde_json::from_str("\"street\"").unwrap();
        assert_eq!(p, ParkingPreference::StreetParking);
        let p: ParkingPreference = serde_json::from_str("\"parking_garage\"").unwrap();
        assert_eq!(p, ParkingPreference::ParkingGarage);
    }

    #[test]
    fn mode_display() {
        assert_eq!(TransportMode::Bus.to_string(), "bus");
        assert_eq!(
            TransportMode::Car(ParkingPreference::StreetParking).to_string(),
            "car (street)"
        );
        assert_eq!(
            TransportMode::Car(ParkingPreference::ParkingGarage).parking(),
            Some(ParkingPreference::ParkingGarage)
        );
        assert_eq!(TransportMode::Walking.parking(), None);
    }
}
