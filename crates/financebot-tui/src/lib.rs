//! `financebot-tui`: terminal host for the chat widget
//!
//! This crate draws the floating launcher and chat panel over a plain
//! home screen, feeds key presses into a [`financebot_engine::Session`],
//! and delivers due replies on every tick and after every handled event.

mod app;
mod chat;
mod event;
#[cfg(test)]
pub mod test_utils;
mod text;
mod ui;

pub use app::App;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use financebot_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use financebot_engine::ChatConfig;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use thiserror::Error;
use tracing::info;

/// Errors from the terminal host.
#[derive(Debug, Error)]
pub enum TuiError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the chat widget in the terminal until the user quits.
pub async fn run_tui(config: ChatConfig) -> Result<(), TuiError> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(config.tick_rate());
    let mut app = App::new(config);
    info!("Terminal host started");

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;
    info!(
        messages = app.session.messages().len(),
        "Terminal host stopped"
    );
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), TuiError> {
    loop {
        terminal.draw(|frame| app.render(frame.area(), frame.buffer_mut()))?;

        match events.next().await {
            Some(Event::Key(key)) => {
                let action = key_to_action(key, app.session.panel_open());
                app.handle_action(action);
            }
            Some(Event::Paste(text)) => app.paste(&text),
            Some(Event::Tick) => app.tick(),
            // Terminal will handle resize automatically
            Some(Event::Resize(_, _)) => app.deliver_due(),
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
