//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::cache::{PlanCache, PlanKey, PlanOutcome};
use crate::domain::Coordinate;
use crate::geocode::Geocoder;
use crate::opendata::{DatasetStore, RecordSource};
use crate::planner::{DirectionsProvider, PlannerConfig, compose_route};
use crate::status::NetworkStatus;

use super::dto::*;
use super::state::AppState;

/// Shown when an address cannot be resolved.
const GEOCODE_MISS: &str = "Unable to geocode one of the addresses.";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route/plan", post(plan_route_handler))
        .route("/status", get(network_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan a route.
///
/// A plan that cannot be produced is still a 200 response with
/// `"status": "failed"`; only malformed input and unresolvable places are
/// HTTP errors.
async fn plan_route_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanRouteResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let outcome = plan_route(
        state.directions.as_ref(),
        state.geocoder.as_ref(),
        state.datasets.as_ref(),
        &state.plans,
        &state.config,
        &req,
    )
    .await?;

    Ok(Json(PlanRouteResponse::from_outcome(&outcome)))
}

/// Resolve the request's places and compose a plan, reusing a recent
/// outcome for identical inputs.
pub async fn plan_route<D, G, S>(
    directions: &D,
    geocoder: &G,
    datasets: &DatasetStore<S>,
    plans: &PlanCache,
    config: &PlannerConfig,
    req: &PlanRouteRequest,
) -> Result<Arc<PlanOutcome>, AppError>
where
    D: DirectionsProvider + Sync,
    G: Geocoder + Sync,
    S: RecordSource + Sync,
{
    let mode = req.transport_mode();
    let key = PlanKey::new(mode, req.start.signature(), req.end.signature());

    if let Some(cached) = plans.get(&key).await {
        debug!(%mode, "plan cache hit");
        return Ok(cached);
    }

    let start = resolve(geocoder, &req.start).await?;
    let end = resolve(geocoder, &req.end).await?;

    let snapshot = datasets.snapshot().await;
    let outcome = compose_route(directions, config, mode, start, end, &snapshot).await;

    Ok(plans.insert(key, outcome).await)
}

async fn resolve<G: Geocoder>(geocoder: &G, place: &PlaceInput) -> Result<Coordinate, AppError> {
    match place {
        PlaceInput::Coordinates { lat, lon } => {
            Coordinate::new(*lat, *lon).map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })
        }
        PlaceInput::Address { address } => {
            if address.trim().is_empty() {
                return Err(AppError::BadRequest {
                    message: "Address must not be empty".to_string(),
                });
            }
            match geocoder.geocode(address).await {
                Ok(Some(found)) => Ok(found),
                Ok(None) => Err(AppError::Unprocessable {
                    message: GEOCODE_MISS.to_string(),
                }),
                Err(e) => Err(AppError::Internal {
                    message: format!("Geocoding failed: {e}"),
                }),
            }
        }
    }
}

/// Summary of the current facility datasets.
async fn network_status(State(state): State<AppState>) -> Json<NetworkStatus> {
    let snapshot = state.datasets.snapshot().await;
    Json(NetworkStatus::summarize(&snapshot, Utc::now()))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    /// Well-formed input that cannot be acted on
    Unprocessable { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
