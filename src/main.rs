mod animation;
mod app;
mod cache;
mod config;
mod coordinator;
mod error;
mod event;
mod gateway;
mod merge;
mod ui;

use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::app::{App, Settings};
use crate::cache::Cache;
use crate::config::{CliArgs, Config};
use crate::coordinator::Coordinator;
use crate::error::AirlinkError;
use crate::event::EventHandler;
use crate::gateway::Nmcli;
use crate::ui::theme::Theme;

const DEBUG_ENV: &str = "AIRLINK_DEBUG";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    // Initialize color-eyre with custom panic hook that restores terminal
    install_panic_hook();

    let config = config::load(&cli)?;
    let _log_guard = init_logging();
    info!("airlink {} starting", env!("CARGO_PKG_VERSION"));

    let nmcli = Nmcli::new(config.general.nmcli_path.clone());
    match nmcli.version().await {
        Ok(version) => info!("Using nmcli {version}"),
        Err(e) => {
            eprintln!("{}", AirlinkError::GatewayUnavailable(e.to_string()));
            eprintln!("Is NetworkManager installed? Try: nmcli --version");
            std::process::exit(1);
        }
    }

    let cache = if config.general.cache_enabled {
        Cache::default_path().map(Cache::new)
    } else {
        None
    };
    let cached = match &cache {
        Some(cache) => cache.load().await,
        None => None,
    };

    let theme = Theme::from_config(&config);
    let mut app =
        App::new(Settings::from(&config), config.general.show_hidden).with_cached(cached);

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| AirlinkError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut event_handler = EventHandler::new(config.tick_rate());
    let coordinator = Coordinator::new(Arc::new(nmcli), event_handler.sender(), cache);
    coordinator.dispatch(app.startup());

    let outcome = run(&mut terminal, &mut app, &theme, &mut event_handler, &coordinator).await;
    event_handler.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("airlink exiting");
    outcome
}

// ── Main event loop ───────────────────────────────────────────────────
async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    theme: &Theme,
    events: &mut EventHandler,
    coordinator: &Coordinator,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, theme))?;

        let Some(event) = events.next().await else {
            warn!("Event queue closed");
            return Ok(());
        };
        coordinator.dispatch(app.handle_event(event));

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(panic_info);
    }));
    color_eyre::install().ok();
}

/// Log to `<data dir>/airlink/airlink-debug.log` when AIRLINK_DEBUG is set;
/// otherwise logging is off (stdout belongs to the TUI).
fn init_logging() -> Option<WorkerGuard> {
    use tracing_subscriber::EnvFilter;

    let enabled = std::env::var(DEBUG_ENV).is_ok_and(|v| !v.is_empty() && v != "0");
    let log_dir = Config::log_dir();
    if enabled && std::fs::create_dir_all(&log_dir).is_ok() {
        let appender = tracing_appender::rolling::never(&log_dir, "airlink-debug.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init();
        None
    }
}
