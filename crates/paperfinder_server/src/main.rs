#![forbid(unsafe_code)]

mod routes;
mod state;
mod static_files;

use log::info;
use paperfinder_core::{init_logging, AppConfig};
use state::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    if let Err(err) = init_logging("paperfinder_server", &config.log_level, &config.log_dir) {
        eprintln!("paperfinder_server file logging disabled: {err}");
    }

    let addr = config.http_bind;
    let app_dir = config.app_dir.clone();
    let app = routes::router(Arc::new(AppState::new(config)));

    info!(
        "event=server_start module=server status=ok bind={} app_dir={}",
        addr,
        app_dir.display()
    );
    println!(
        "paperfinder_server listening on http://{addr} (app_dir={})",
        app_dir.display()
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        eprintln!("paperfinder_server failed to listen for shutdown signal: {err}");
    }
}
