use axum::Server;
use clap::Parser;
use course_backend::{
    AppState, build_app,
    config::{Config, StorageBackend},
    error::{AppError, AppResult},
    init_tracing, store,
};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "course_backend", about = "Course and student roster API")]
struct Args {
    /// Storage backend, overrides STORAGE_BACKEND
    #[arg(long, value_enum)]
    storage: Option<StorageBackend>,

    /// Bind host, overrides SERVER_HOST
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides SERVER_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Args::parse()).await {
        eprintln!("course_backend: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> AppResult<()> {
    let config = Config::from_env_with(|config| {
        if let Some(storage) = args.storage {
            config.storage_backend = storage;
        }
        if let Some(host) = args.host {
            config.server_host = host;
        }
        if let Some(port) = args.port {
            config.server_port = port;
        }
    })?;
    init_tracing(&config);

    let addr: SocketAddr = config
        .server_address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

    let store = store::from_config(&config)?;
    let cap = config.enrollment_cap();
    let app = build_app(AppState::new(store, config));

    tracing::info!(%addr, max_students_per_course = cap.max_students, policy = ?cap.policy, "Server running");
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await
}

// A signal listener that fails to install must not stop the server.
async fn wait_for_signal(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_failed_signal_listener_keeps_serving() {
        let failed = std::future::ready(Err(std::io::Error::other("no signal handler")));
        let waited = tokio::time::timeout(Duration::from_millis(50), wait_for_signal(failed)).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_signal_triggers_shutdown() {
        let received = std::future::ready(Ok(()));
        let waited = tokio::time::timeout(Duration::from_millis(50), wait_for_signal(received)).await;
        assert!(waited.is_ok());
    }
}
