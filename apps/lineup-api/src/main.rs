//! Lineup API Binary
//!
//! Starts the roster and lineup HTTP service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin lineup-api
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHEETS_SPREADSHEET_ID`: Spreadsheet holding the roster, settings and orders sheets
//! - `SHEETS_ACCESS_TOKEN`: OAuth bearer token for the Sheets API
//!
//! ## Optional
//! - `SHEETS_API_BASE_URL`: Sheets API base URL (default: <https://sheets.googleapis.com>)
//! - `SHEETS_TIMEOUT_SECS`: Upstream request timeout (default: 30)
//! - `LINEUP_ROSTER_SHEET`, `LINEUP_SETTINGS_SHEET`, `LINEUP_ORDERS_SHEET`: Sheet titles
//! - `HTTP_PORT`: Listen port (default: 8080)
//! - `OTEL_ENABLED`: Export spans over OTLP (default: false)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use lineup_api::infrastructure::metrics::init_metrics;
use lineup_api::infrastructure::telemetry;
use lineup_api::{
    AppState, Clock, ServiceConfig, SheetOrderRepository, SheetRosterRepository,
    SheetSecretRepository, SheetsRangeStore, SystemClock, create_router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("failed to install rustls crypto provider"))?;

    load_dotenv();

    let _telemetry_guard = telemetry::init().context("failed to initialize telemetry")?;

    tracing::info!("Starting Lineup API");

    init_metrics().context("failed to install Prometheus recorder")?;

    let config = ServiceConfig::from_env()?;
    log_config(&config);

    let store = Arc::new(
        SheetsRangeStore::new(&config.sheets_config()).context("invalid Sheets configuration")?,
    );
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let state = AppState::new(
        Arc::new(SheetOrderRepository::new(
            Arc::clone(&store),
            clock,
            config.layout.orders.clone(),
        )),
        Arc::new(SheetRosterRepository::new(
            Arc::clone(&store),
            config.layout.roster.clone(),
        )),
        Arc::new(SheetSecretRepository::new(
            Arc::clone(&store),
            config.layout.settings.clone(),
        )),
        env!("CARGO_PKG_VERSION"),
    );
    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to port {}", config.server.http_port))?;

    let shutdown_token = CancellationToken::new();
    tokio::spawn(await_shutdown(shutdown_token.clone()));

    tracing::info!(addr = %addr, "Lineup API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_token.cancelled_owned())
        .await
        .context("HTTP server error")?;

    tracing::info!("Lineup API stopped");
    Ok(())
}

/// Load .env from the current directory or the nearest ancestor that has one.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &ServiceConfig) {
    tracing::info!(
        spreadsheet_id = %config.spreadsheet_id,
        http_port = config.server.http_port,
        roster_sheet = %config.layout.roster,
        settings_sheet = %config.layout.settings,
        orders_sheet = %config.layout.orders,
        "Configuration loaded"
    );
    tracing::debug!(
        api_base_url = %config.api_base_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        "Sheets endpoint"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
#[allow(clippy::expect_used)]
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();
}
