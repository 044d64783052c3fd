mod app;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io,
    sync::Mutex,
};

use railres_core::{
    config::{self, AppConfig},
    Timetable,
};
use tracing::{info, warn};
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config)?;
    let config_path = config::ensure_default_config()?;
    info!(config = %config_path.display(), "Starting railres");

    let timetable = match config.timetable.as_ref() {
        Some(path) => Timetable::load(path)?.unwrap_or_else(|| {
            warn!(path = %path.display(), "Timetable missing; using sample timetable");
            Timetable::sample()
        }),
        None => Timetable::sample(),
    };
    let system = timetable.build()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = app::Menu::new(system, stdin.lock(), stdout.lock());
    menu.run()
}

fn init_logging(config: &AppConfig) -> Result<()> {
    fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create log directory {}", config.log_dir.display()))?;
    let log_path = config.log_dir.join("railres.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    // Stdout belongs to the menu; only errors reach the terminal.
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .with_filter(LevelFilter::ERROR);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
