use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use product_core::{Product, RestClient};
use product_gateway::{logging, router, Config};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;
    logging::init(config.log_format);

    let client = RestClient::<Product>::with_timeout(&config.upstream_url, config.upstream_timeout)
        .context("building downstream client")?;
    let app = router(Arc::new(client));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(addr = %listener.local_addr()?, upstream = %config.upstream_url, "product gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("product gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}
