//! Main TUI application: state, event loop, and top-level draw function.

use crate::tui::event::{Action, EventHandler, map_global_key, map_pager_key, map_shell_key};
use crate::tui::theme::Theme;
use crate::tui::widgets::input_area::{InputAction, InputWidget};
use crate::tui::widgets::pager_view::render_pager;
use crate::tui::widgets::status_bar::{InputMode, StatusInfo, render_status_bar};
use crate::tui::widgets::transcript_view::render_transcript;
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use folio_core::{Completion, Dispatcher, Effect, Input, ScrollKind, Session};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;
use tracing::debug;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

/// The main TUI application state.
pub struct App {
    pub session: Session,
    pub input: InputWidget,
    pub theme: Theme,
    pub should_quit: bool,

    dispatcher: Dispatcher,
    completions: mpsc::UnboundedReceiver<Completion>,
}

impl App {
    pub fn new(
        session: Session,
        dispatcher: Dispatcher,
        completions: mpsc::UnboundedReceiver<Completion>,
    ) -> Self {
        let theme = Theme::from_name(&session.config().ui.theme);
        let input = InputWidget::new(&theme);
        Self {
            session,
            input,
            theme,
            should_quit: false,
            dispatcher,
            completions,
        }
    }

    /// Run the main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_handler = EventHandler::new();

        loop {
            let size = terminal.size()?;
            self.resize(size.width, size.height);
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                // Terminal events
                event = event_handler.next() => {
                    match event {
                        Some(event) => self.handle_terminal_event(event),
                        None => self.should_quit = true,
                    }
                }
                // Collaborator results
                completion = self.completions.recv() => {
                    if let Some(completion) = completion {
                        self.session.apply(completion);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Tell the session how big its body area is for a terminal of this size.
    /// The transcript loses one column to its scrollbar; the input and status
    /// rows are not part of the body.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.session
            .resize(width.saturating_sub(1), height.saturating_sub(2));
    }

    fn mode(&self) -> InputMode {
        if self.session.is_paging() {
            InputMode::Pager
        } else {
            InputMode::Shell
        }
    }

    /// Draw the full UI.
    pub fn draw(&self, frame: &mut Frame) {
        let [body_area, input_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        match self.session.pager() {
            Some(pager) => render_pager(frame, body_area, pager, &self.theme),
            None => {
                render_transcript(frame, body_area, self.session.transcript(), &self.theme);
                self.input
                    .render(frame, input_area, &self.session.prompt(), &self.theme);
            }
        }

        let cwd = self.session.cwd().to_string();
        let info = StatusInfo {
            mode: self.mode(),
            cwd: &cwd,
            pending: self.session.transcript().has_pending(),
        };
        render_status_bar(frame, status_area, info, &self.theme);
    }

    /// Handle a terminal event (keyboard, mouse, resize).
    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            Event::Paste(_) if !self.session.is_paging() => {
                self.input.handle_event(&event);
            }
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    /// Handle a key event.
    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if let Some(action) = map_global_key(&key) {
            self.execute_action(action);
            return;
        }

        // The pager owns every key while it is open.
        if self.session.is_paging() {
            if let Some(action) = map_pager_key(&key) {
                self.execute_action(action);
            }
            return;
        }

        if let Some(action) = map_shell_key(&key) {
            self.execute_action(action);
            return;
        }

        match self.input.handle_event(&Event::Key(key)) {
            InputAction::Submit(line) => self.dispatch(Input::Submit(line)),
            InputAction::Complete(text) => self.dispatch(Input::Complete(text)),
            InputAction::Consumed => {}
        }
    }

    /// Handle mouse events.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let kind = match mouse.kind {
            MouseEventKind::ScrollUp => ScrollKind::LineUp,
            MouseEventKind::ScrollDown => ScrollKind::LineDown,
            _ => return,
        };
        for _ in 0..WHEEL_LINES {
            self.dispatch(Input::Scroll(kind));
        }
    }

    /// Execute a high-level action.
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::RecallPrevious => self.dispatch(Input::RecallPrevious),
            Action::RecallNext => self.dispatch(Input::RecallNext),
            Action::Scroll(kind) => self.dispatch(Input::Scroll(kind)),
            Action::Dismiss => self.dispatch(Input::Dismiss),
        }
    }

    /// Feed one input to the session and carry out the effect it asks for.
    fn dispatch(&mut self, input: Input) {
        match self.session.handle(input) {
            Effect::None => {}
            Effect::ReplaceInput(text) => self.input.set_text(&text),
            Effect::Spawn(job) => {
                debug!(
                    job = %job.id,
                    service = job.request.service_name(),
                    "Spawning collaborator call"
                );
                self.dispatcher.spawn(job);
            }
            Effect::Exit => self.should_quit = true,
        }
    }
}
