//! TUI (Terminal User Interface) module for Folio.
//!
//! Full-screen shell with a scrollback transcript, a one-line prompt, a status
//! bar, and a modal file pager for `cat`.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

use app::App;
use folio_core::{Completion, Dispatcher, Session};
use tokio::sync::mpsc;

/// Run the TUI application.
pub async fn run(
    session: Session,
    dispatcher: Dispatcher,
    completions: mpsc::UnboundedReceiver<Completion>,
) -> anyhow::Result<()> {
    // Setup terminal
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture,
        crossterm::event::EnableBracketedPaste
    )?;

    let backend = ratatui::backend::CrosstermBackend::new(std::io::stdout());
    let mut terminal = ratatui::Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(session, dispatcher, completions);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}
