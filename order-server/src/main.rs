use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use order_server::cache::CachedGeocoder;
use order_server::config::AppConfig;
use order_server::geocode::{NominatimClient, hong_kong_aliases};
use order_server::otp::OtpClient;
use order_server::planner::Optimizer;
use order_server::rail::RailRouter;
use order_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    let geocoder = CachedGeocoder::new(NominatimClient::new(config.geocode.clone())?, &config.cache);
    let planner = OtpClient::new(config.otp.clone())?;

    if config.rail.feed.is_none() {
        warn!("RAIL_FEED not set; rail candidates are disabled");
    }
    let rail = Arc::new(RailRouter::new(config.rail.clone()));

    // Load in the background; early requests share the same load.
    let preload = Arc::clone(&rail);
    tokio::spawn(async move { preload.preload().await });

    let optimizer = Optimizer::new(
        geocoder,
        planner,
        rail,
        hong_kong_aliases(),
        config.optimizer.clone(),
    );
    let app = create_router(AppState::new(optimizer));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, otp = %config.otp.base_url, "order server listening");
    info!("  GET  /              - Web interface");
    info!("  GET  /health        - Health check");
    info!("  POST /api/optimize  - Optimize visiting order");

    axum::serve(listener, app).await?;
    Ok(())
}
