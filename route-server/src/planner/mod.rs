//! Multi-modal route composition.
//!
//! This module answers: "Given where I am, where I'm going and how I want to
//! travel, which stops or stations should I use and how long will it take?"
//!
//! Facility selection is done here from dataset snapshots; path geometry is
//! always delegated to a [`DirectionsProvider`].

mod bus;
mod compose;
mod config;
mod traffic;


pub use bus::{BusPairing, common_lines, select_bus_pairing};
pub use compose::{Composer, DirectionsError, DirectionsProvider, PlanFailure, compose_route};
pub use config::PlannerConfig;
pub use traffic::traffic_penalty_secs;
