//! Terminal event handling using crossterm EventStream.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use folio_core::ScrollKind;
use futures::StreamExt;

/// High-level actions the TUI can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    RecallPrevious,
    RecallNext,
    Scroll(ScrollKind),
    /// Close the pager.
    Dismiss,
}

/// Reads terminal events asynchronously using crossterm's EventStream.
pub struct EventHandler {
    stream: EventStream,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            stream: EventStream::new(),
        }
    }

    /// Read the next terminal event. Returns None if the stream ends.
    pub async fn next(&mut self) -> Option<Event> {
        self.stream.next().await.and_then(|r| r.ok())
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys that work in every mode.
pub fn map_global_key(event: &KeyEvent) -> Option<Action> {
    match (event.modifiers, event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        _ => None,
    }
}

/// Keys at the shell prompt. Returns None if the event belongs to the input
/// widget.
pub fn map_shell_key(event: &KeyEvent) -> Option<Action> {
    match (event.modifiers, event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => Some(Action::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('l')) => Some(Action::Scroll(ScrollKind::Bottom)),
        (KeyModifiers::CONTROL, KeyCode::Char('p')) | (_, KeyCode::Up) => {
            Some(Action::RecallPrevious)
        }
        (KeyModifiers::CONTROL, KeyCode::Char('n')) | (_, KeyCode::Down) => {
            Some(Action::RecallNext)
        }
        (_, KeyCode::PageUp) => Some(Action::Scroll(ScrollKind::HalfPageUp)),
        (_, KeyCode::PageDown) => Some(Action::Scroll(ScrollKind::HalfPageDown)),
        _ => None,
    }
}

/// Keys while the file pager is open. Anything unmapped is swallowed.
pub fn map_pager_key(event: &KeyEvent) -> Option<Action> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Dismiss),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Scroll(ScrollKind::LineUp)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Enter => {
            Some(Action::Scroll(ScrollKind::LineDown))
        }
        KeyCode::Char('u') if ctrl => Some(Action::Scroll(ScrollKind::HalfPageUp)),
        KeyCode::Char('d') if ctrl => Some(Action::Scroll(ScrollKind::HalfPageDown)),
        KeyCode::Char('u') => Some(Action::Scroll(ScrollKind::HalfPageUp)),
        KeyCode::Char('d') => Some(Action::Scroll(ScrollKind::HalfPageDown)),
        KeyCode::PageUp | KeyCode::Char('b') => Some(Action::Scroll(ScrollKind::PageUp)),
        KeyCode::PageDown | KeyCode::Char('f') | KeyCode::Char(' ') => {
            Some(Action::Scroll(ScrollKind::PageDown))
        }
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Scroll(ScrollKind::Top)),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Scroll(ScrollKind::Bottom)),
        _ => None,
    }
}
