//! proflog admin daemon.
//!
//! - Loads the admin config (path from argv[1], default `proflog.yaml`)
//! - Serves the process registry, including the socket's own request metrics
//! - SIGHUP re-reads the config and rebinds when the admin section changed
//! - Ctrl-C / SIGTERM unbinds and exits

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use proflog_admin::{config, AdminSocket, AppState};
use proflog_core::MetricRegistry;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg_path = std::env::args().nth(1).unwrap_or_else(|| "proflog.yaml".to_string());
    let cfg = config::load_from_file(&cfg_path).expect("config load failed");

    let registry = Arc::new(MetricRegistry::new());
    let state = AppState::new(Arc::clone(&registry)).expect("app state init failed");
    registry
        .add(state.metrics().set())
        .expect("admin metrics registration failed");

    let socket = AdminSocket::new(state);
    // Bind failures are logged inside and leave the socket disabled.
    let _ = socket.apply_changes(&cfg.admin).await;

    tracing::info!(config = %cfg_path, "proflog-admin running");
    run_until_shutdown(&socket, &cfg_path).await;

    socket.shutdown().await;
}

async fn run_until_shutdown(socket: &AdminSocket, cfg_path: &str) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };
    tokio::pin!(ctrl_c);

    let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .expect("failed to install SIGTERM handler");
    let mut hangup = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())
        .expect("failed to install SIGHUP handler");

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = terminate.recv() => break,
            _ = hangup.recv() => match config::load_from_file(cfg_path) {
                Ok(cfg) => {
                    let _ = socket.apply_changes(&cfg.admin).await;
                }
                Err(e) => tracing::error!(error = %e, "config reload failed; keeping current socket"),
            },
        }
    }
    tracing::info!("signal received, shutting down");
}
