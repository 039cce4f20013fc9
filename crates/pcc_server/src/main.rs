//! Production Control Center - backend API server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pcc_core::config::ConfigManager;
use pcc_core::logging::{bootstrap_dispatch, init_tracing};
use pcc_core::ControlCenter;
use pcc_server::{router, AppState};

#[derive(Debug, Parser)]
#[command(name = "pcc-server", version, about = "Production Control Center backend API")]
struct Cli {
    /// Path to settings.toml (created with defaults if missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Override `server.port`
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(ConfigManager::default_path);
    let mut config = ConfigManager::new(&config_path);
    // The file subscriber needs the logs folder from the config, so config
    // loading logs to stderr only
    tracing::dispatcher::with_default(&bootstrap_dispatch(), || -> anyhow::Result<()> {
        config
            .load_or_create()
            .with_context(|| format!("loading config from {}", config_path.display()))?;
        config
            .ensure_dirs_exist()
            .context("creating logs and output folders")
    })?;

    let settings = config.settings().clone();
    let log_dir = settings.logging.file_output.then(|| config.logs_folder());
    let _guard = init_tracing(settings.logging.level, log_dir.as_deref());

    tracing::info!("Config: {}", config.path().display());
    tracing::info!("Topic Queue: {}", config.topic_queue_path().display());
    tracing::info!("Logs Directory: {}", config.logs_folder().display());
    tracing::info!("Output Directory: {}", config.output_folder().display());

    let center = Arc::new(ControlCenter::from_config(&config));
    let log = center.log();
    log.info("Backend API starting...");
    log.info(format!(
        "Topic queue file: {}",
        center.topics().path().display()
    ));

    // Probe the queue once so a bad file shows up on the dashboard right away
    match center.topics().load() {
        Ok(doc) => {
            log.success(format!("Found {} topics in queue", doc.len()));
        }
        Err(_) => {
            log.error("Warning: Could not load topic queue on startup");
        }
    }

    let state = AppState {
        center: Arc::clone(&center),
        default_tail: settings.logging.default_tail,
        dashboard: config.dashboard_path(),
        cors: settings.server.cors,
    };
    let app = router(state);

    let host = cli.host.unwrap_or(settings.server.host);
    let port = cli.port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("Starting server on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
