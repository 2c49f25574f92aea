//! `heroes-tui`: terminal front-end for the hero collection.
//!
//! Built on [ratatui](https://ratatui.rs) over `heroes-core` presenters.
//! Two tabbed screens, Dashboard and Heroes, plus a Detail screen reached
//! by opening a hero. The message log is shown under every screen.
//!
//! Logs are written to a file (default `/tmp/heroes-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod effect;
mod event;
mod navigator;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use heroes_core::{HeroService, MessageLog, ServiceConfig};

use crate::app::App;

/// Terminal front-end for browsing and editing heroes.
#[derive(Parser, Debug)]
#[command(name = "heroes-tui", version, about)]
struct Cli {
    /// Hero service base URL (e.g., http://localhost:3000)
    #[arg(short = 'u', long, env = "HEROES_URL")]
    url: Option<String>,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    /// Config file path (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/heroes-tui.log)
    #[arg(long, default_value = "/tmp/heroes-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// terminal is in raw mode. The returned guard must be held for the
/// lifetime of the application so logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "heroes_tui={log_level},heroes_core={log_level},heroes_api={log_level},heroes::messages={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("heroes-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the service config. Priority: CLI flags > env > config file > defaults.
fn build_service_config(cli: &Cli) -> Result<ServiceConfig> {
    let mut cfg = match &cli.config {
        Some(path) => heroes_config::load_config_from(path)
            .wrap_err_with(|| format!("loading {}", path.display()))?,
        None => heroes_config::load_config_or_default(),
    };

    if let Some(url) = &cli.url {
        cfg.url.clone_from(url);
    }
    if let Some(timeout) = cli.timeout {
        cfg.timeout = Some(timeout);
    }

    Ok(heroes_config::to_service_config(&cfg)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks(&cli.log_file)?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = build_service_config(&cli)?;
    info!(url = %config.url, collection = %config.collection_path, "starting heroes-tui");

    let messages = MessageLog::new();
    let service = HeroService::new(&config, messages.clone())?;

    let mut app = App::new(service, messages, config.search_debounce);
    app.run().await?;

    Ok(())
}
