use routefinder_server::AppConfig;
use routefinder_server::catalog::DatasetCatalog;
use routefinder_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("routefinder_server=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Fail fast: the page is useless without datasets to pick from
    let catalog = DatasetCatalog::load(&config.catalog_path)
        .await
        .expect("Failed to load dataset catalog");

    let state = AppState::from_config(&config, catalog).expect("Failed to create routing client");
    let app = create_router(state, &config.static_dir);

    let addr = config.addr;
    info!("Route finder listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /                     - Map page");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/datasets         - Dataset catalog");
    info!("  POST /api/datasets/select  - Load a dataset");
    info!("  POST /api/click            - Nearest points, travel times and routes");
    info!("  GET  /api/view             - Current map state");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
