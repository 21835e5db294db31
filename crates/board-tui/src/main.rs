mod action;
mod app;
mod app_state;
mod cli;
mod component;
mod components;
mod theme;
mod widgets;

use std::time::Duration;

use clap::Parser;

use board_core::config::Config;

/// Shortest clock period accepted from config or the command line.
const MIN_TICK_MS: u64 = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // ── Load config ──────────────────────────────────────────────────────────
    // Logging is not up yet; a broken config is reported once it is.
    let (config, config_err) = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(c) => (c, None),
            Err(e) => (Config::default(), Some(e)),
        },
        None => match Config::load() {
            Ok(c) => (c, None),
            Err(e) => (Config::default(), Some(e)),
        },
    };

    // ── Logging ──────────────────────────────────────────────────────────────
    let log_path = config.paths.log_file.clone();
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("depboard log: {}", log_path.display());

    tracing::info!("depboard starting…");
    if let Some(e) = config_err {
        tracing::warn!("config unusable, running with defaults: {:#}", e);
        eprintln!("depboard: config unusable, running with defaults: {:#}", e);
    }

    let tick_ms = cli
        .tick_ms
        .unwrap_or(config.board.tick_interval_ms)
        .max(MIN_TICK_MS);
    let initial_file = cli.file.or(config.board.initial_file);

    // ── Board event channel (compositor → observers) ─────────────────────────
    let (event_tx, _event_rx) = board_core::event::channel();

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        app::AppOptions {
            title: config.board.title,
            notice: config.board.notice,
            tick_interval: Duration::from_millis(tick_ms),
            schedule_dir: config.paths.schedule_dir,
            log_path,
            initial_file,
        },
        event_tx,
    );
    app.run().await?;

    Ok(())
}
