use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use kbase_server::{App, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve()?;
    kbase_observability::init(&config.observability);

    let app = Arc::new(App::build(config)?);
    let bind_addr = app.config().server.bind_addr.clone();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %listener.local_addr()?, "listening");

    let warmup = app.spawn_warmup();
    app.serve(listener, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        info!("ctrl-c received, shutting down");
    })
    .await;

    if !warmup.is_finished() {
        warn!("knowledge load still running at shutdown");
    }
    Ok(())
}
