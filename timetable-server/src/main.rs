use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use timetable_server::config::ServerConfig;
use timetable_server::store::TimetableStore;
use timetable_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Load timetables (fail fast if unavailable)
    let store = TimetableStore::load(&config.data_path).expect("Failed to load timetables");

    let state = AppState::new(store, config.session());
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(addr = %config.bind_addr, "timetable server listening");
    tracing::info!("  GET /health                      - Health check");
    tracing::info!("  GET /api/lines                   - List lines");
    tracing::info!("  GET /api/lines/:id               - Line details");
    tracing::info!("  GET /api/lines/:id/schedule      - Classified schedule");
    tracing::info!("  GET /api/lines/:id/live          - Live view (WebSocket)");

    axum::serve(listener, app).await.expect("Server error");
}
