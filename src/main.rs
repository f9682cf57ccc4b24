//! Dish Form - terminal form for adding dishes
//!
//! A Ratatui-based TUI that validates a dish (pizza, soup or sandwich)
//! and submits it to the dishes API.

mod app;
mod config;
mod gateway;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::App;
use config::FormConfig;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gateway::HttpDishGateway;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log to a file; the terminal belongs to the UI
fn log_writer() -> BoxMakeWriter {
    let Some(path) = FormConfig::log_path() else {
        return BoxMakeWriter::new(io::sink);
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return BoxMakeWriter::new(io::sink);
        }
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(io::sink),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dish_form=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    let config = FormConfig::load()?;
    let gateway = HttpDishGateway::new(config.endpoint(), config.request_timeout())
        .context("Failed to create dish gateway")?;
    tracing::info!(endpoint = %gateway.endpoint(), "starting dish form");
    let endpoint = gateway.endpoint().to_string();
    let mut app = App::new(Arc::new(gateway), endpoint, config.notification_timeout());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("event loop failed: {err:?}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        let term_size = terminal.size()?;
        app.terminal_size = Some((term_size.height, term_size.width));

        // Expire toasts and pick up finished submissions
        app.tick();

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while toasts count down or a request is pending
        let poll_duration = if app.needs_fast_redraw() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(_width, _height) => {
                    // Layout is recomputed from the new size on the next draw
                }
                _ => {}
            }
        }

        // Let the spawned submission make progress between frames
        tokio::task::yield_now().await;

        if app.should_quit() {
            return Ok(());
        }
    }
}
