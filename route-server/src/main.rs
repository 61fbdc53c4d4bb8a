use route_server::config::ServerConfig;
use route_server::geocode::NominatimClient;
use route_server::opendata::OpenDataClient;
use route_server::ors::{MockDirections, OrsClient};
use route_server::web::{AppState, Directions, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    let directions = match &config.ors {
        Some(ors) => Directions::Ors(
            OrsClient::new(ors.clone()).expect("Failed to create directions client"),
        ),
        None => {
            warn!("neither ORS_API_KEY nor ORS_BASE_URL set, using straight-line directions");
            Directions::Offline(MockDirections::new())
        }
    };

    let geocoder = NominatimClient::new(&config.geocoder).expect("Failed to create geocoder");
    let opendata = OpenDataClient::new(&config.opendata).expect("Failed to create open-data client");

    let state = AppState::new(directions, geocoder, opendata, &config);

    // Warm the dataset snapshot so the first plan request is not slow
    let warm = state.datasets.snapshot().await;
    info!(
        parkings = warm.parkings.len(),
        bike_stations = warm.bike_stations.len(),
        bus_stops = warm.bus_stops.len(),
        "datasets loaded"
    );

    let app = create_router(state);

    info!(addr = %config.addr, "Valencia route planner listening");
    info!("  GET  /health      - Health check");
    info!("  POST /route/plan  - Plan a route");
    info!("  GET  /status      - Network status");

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
