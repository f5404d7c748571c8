pub mod app;
pub mod circuit;
pub mod config;
pub mod drag;
pub mod gate;
pub mod grid;
pub mod palette;
pub mod render;
pub mod send;
pub mod validate;

use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use app::{App, Focus};
use config::Config;
use drag::DragEvent;
use send::HttpSender;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(&config)?;

    let sender = HttpSender::new(&config.backend).context("building HTTP client")?;
    if config.ping {
        match sender.ping() {
            Ok(true) => info!("backend answered pong"),
            Ok(false) => eprintln!("warning: backend at {} is up but puzzled", config.backend),
            Err(e) => eprintln!("warning: backend at {} unreachable: {e}", config.backend),
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.steps, Box::new(sender));
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result.map_err(Into::into)
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), io::Error> {
    loop {
        terminal.draw(|f| render::render(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                // Clear status message on any key
                app.status_msg.clear();

                let code = key.code;
                let mods = key.modifiers;

                // Global: Ctrl+C always quits
                if code == KeyCode::Char('c') && mods.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                match app.focus {
                    Focus::Grid => {
                        if handle_grid_keys(app, code) {
                            return Ok(());
                        }
                    }
                    Focus::Palette => {
                        if handle_palette_keys(app, code) {
                            return Ok(());
                        }
                    }
                }
            }
            Event::Mouse(mouse) => {
                if let Some(DragEvent::Dropped { source, target }) = app.drag.on_mouse(mouse) {
                    app.status_msg.clear();
                    app.handle_drop(&source, target.as_deref());
                }
            }
            _ => {}
        }
    }
}

// ── Focus::Grid ────────────────────────────────────────────────────────────────

fn handle_grid_keys(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.focus = Focus::Palette,
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Left | KeyCode::Char('h') => app.cursor_left(),
        KeyCode::Right | KeyCode::Char('l') => app.cursor_right(),
        KeyCode::Enter => {
            let symbol = app.selected_palette_symbol();
            app.place_at(app.cursor_qubit, app.cursor_step, symbol);
        }
        KeyCode::Char('x') | KeyCode::Backspace | KeyCode::Delete => {
            app.clear_at(app.cursor_qubit, app.cursor_step);
        }
        KeyCode::Char('a') => app.append_step(),
        KeyCode::Char('s') => app.send_circuit(),
        _ => {}
    }
    false
}

// ── Focus::Palette ─────────────────────────────────────────────────────────────

fn handle_palette_keys(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab | KeyCode::Esc => app.focus = Focus::Grid,
        KeyCode::Left | KeyCode::Char('h') => app.palette_left(),
        KeyCode::Right | KeyCode::Char('l') => app.palette_right(),
        KeyCode::Enter => {
            let symbol = app.selected_palette_symbol();
            app.place_at(app.cursor_qubit, app.cursor_step, symbol);
            app.focus = Focus::Grid;
        }
        _ => {}
    }
    false
}
