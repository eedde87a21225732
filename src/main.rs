// nobelmap - terminal atlas of Nobel Prize laureates
//
// Fetches laureate sets per prize category from the backing API and
// renders them as an interactive world map: grouped work-location
// markers, birthplaces and shared-prize connections for the selected
// laureate.

mod api;
mod app;
mod geo;
mod present;
mod scene;
mod theme;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use app::{config, event::handle_key_event, AppState};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

fn main() -> Result<()> {
    // Base URL of the laureate API, overridable as the first argument.
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_BASE_URL.to_string());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, base_url);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    base_url: String,
) -> Result<()> {
    let mut app = AppState::new(base_url);
    // Load the combined view right away; a failure surfaces as a notice
    // and the user picks a category to retry.
    app.request_current();

    loop {
        app.on_tick();
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !app.running {
            return Ok(());
        }

        if event::poll(Duration::from_millis(config::POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                handle_key_event(&mut app, key.code);
            }
        }
    }
}
