//! Web layer for the route planner.
//!
//! Provides HTTP endpoints for planning routes and inspecting the state of
//! the city's transport network.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router, plan_route};
pub use state::{AppState, Directions};
