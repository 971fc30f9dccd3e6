//! Valkyrie: a probe simulation server.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration, spawns the startup simulation in the background, sets up the
//! Axum router and serves HTTP until a shutdown signal arrives.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use valkyrie::config::{AppConfig, DEFAULT_LOG_FILTER, STARTUP_COUNT_ENV};
use valkyrie::http::start_server;
use valkyrie::probe::ProbeState;
use valkyrie::routes::create_router;
use valkyrie::startup::{StartupHandle, StartupStrategy, StartupTask};
use valkyrie::state::AppState;
use valkyrie::templates::init_templates;

/// Valkyrie: simulates Kubernetes liveness, readiness and startup probes
#[derive(Parser, Debug)]
#[command(name = "valkyrie", version, about)]
struct Args {
    /// Startup size: primes to find, or seconds to sleep in sleep mode
    #[arg(long, env = STARTUP_COUNT_ENV)]
    startup_count: u64,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "valkyrie=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Missing or malformed startup count exits here, before anything is served
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        startup_count = args.startup_count,
        mode = ?config.startup.mode,
        marker = %config.startup.marker_path.display(),
        "Loaded configuration"
    );

    let probes = Arc::new(ProbeState::new());

    // Start the simulated startup without waiting for it
    let startup = StartupTask::new(
        StartupStrategy::from_mode(config.startup.mode, args.startup_count),
        config.startup.marker_path.clone(),
        Arc::clone(&probes),
    )
    .spawn();
    tokio::spawn(supervise_startup(startup));

    let tera = init_templates()?;
    tracing::info!("Initialized templates");

    let state = AppState::new(probes, tera);
    let app = create_router(state);

    start_server(app, &config.http).await?;

    Ok(())
}

/// Terminate the process if startup cannot signal completion.
async fn supervise_startup(startup: StartupHandle) {
    if let Err(e) = startup.wait().await {
        tracing::error!(error = %e, "Startup failed, exiting");
        std::process::exit(1);
    }
}
