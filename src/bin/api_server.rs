use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vincenty_geodesy::{api::create_router, ServerConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vincenty_geodesy=info,tower_http=info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> vincenty_geodesy::Result<()> {
    let config = ServerConfig::load()?;
    let engine = Arc::new(config.engine.build_engine()?);

    info!(
        ellipsoid = ?engine.ellipsoid(),
        iteration_cap = ?engine.iteration_cap(),
        "geodesy engine ready"
    );

    let app = create_router(engine, config.body_limit_bytes);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!("Listening on http://{}", config.bind_address);
    info!("  GET  /api/inverse?from_lat=<lat>&from_lon=<lon>&to_lat=<lat>&to_lon=<lon>");
    info!("  GET  /api/direct?lat=<lat>&lon=<lon>&bearing=<deg>&distance=<m>");
    info!("  POST /api/batch (multipart/form-data: csv file)");

    axum::serve(listener, app).await?;
    Ok(())
}
