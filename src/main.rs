use anyhow::Result;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use folio::api;
use folio::config::Config;
use folio::storage;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    if config.session.uses_dev_secret() {
        warn!("SECRET_KEY is not set, using the insecure development secret");
    }

    // Initialize storage
    info!("Initializing database...");
    let storage = storage::connect(&config.database).await?;
    info!("Database initialized successfully");

    if let Some(ref static_dir) = config.site.static_dir {
        info!("🎨 Serving site from directory: {}", static_dir);
    } else {
        info!("🎨 Serving embedded site");
    }

    let app = api::create_router(storage, &config);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Server listening on http://{}", addr);
    info!("📊 Admin dashboard at http://{}/admin", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
