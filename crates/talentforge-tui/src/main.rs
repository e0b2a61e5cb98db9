mod app;
mod clipboard;
mod geolocation;
mod handler;
mod keymap;
mod runtime;
mod tui;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use talentforge_core::config::app_dir;
use talentforge_core::{
    Config, Dashboard, DashboardOptions, Geolocator, NewsClient, PreferenceStore, ThemeMode,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::clipboard::TerminalClipboard;
use crate::geolocation::ConfiguredGeolocator;
use crate::runtime::Runtime;
use crate::tui::{EventHandler, TerminalSession};

/// Log to a file; the terminal belongs to the UI.
fn init_logging() -> Result<WorkerGuard> {
    let dir = app_dir()?;
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, "talentforge.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Keep the guard alive so buffered lines are flushed on exit
    let _guard = match init_logging() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("talentforge: logging disabled: {err:#}");
            None
        }
    };

    let config = Config::load_or_default();
    let preferences = match PreferenceStore::open_default() {
        Ok(store) => Some(store),
        Err(err) => {
            tracing::warn!("preferences unavailable: {err:#}");
            None
        }
    };
    let theme = preferences
        .as_ref()
        .map(PreferenceStore::read)
        .unwrap_or(ThemeMode::Dark);

    let geolocator = Arc::new(ConfiguredGeolocator::new(config.location.clone()));
    let dashboard = Dashboard::new(DashboardOptions::from_config(
        &config,
        theme,
        geolocator.is_supported(),
    ));
    let mut app = App::new(dashboard);

    let mut session = TerminalSession::enter()?;
    let mut events = EventHandler::new();

    let runtime = Runtime::new(
        events.sender(),
        NewsClient::from_config(&config),
        Arc::new(TerminalClipboard),
        geolocator,
        preferences,
    );

    let result = run(session.terminal(), &mut app, &mut events, &runtime).await;

    runtime.shutdown().await;
    session.restore()?;
    tracing::info!("exiting");
    result
}

async fn run(
    terminal: &mut tui::Tui,
    app: &mut App,
    events: &mut EventHandler,
    runtime: &Runtime,
) -> Result<()> {
    runtime.execute(app.dashboard.startup());

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        let Some(event) = events.next().await else {
            break;
        };
        let effects = handler::handle_event(app, event);
        runtime.execute(effects);
    }

    Ok(())
}
