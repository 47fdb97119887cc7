//! Prompt line widget wrapping tui-textarea for single-line editing.

use crate::tui::theme::Theme;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use tui_textarea::TextArea;
use unicode_width::UnicodeWidthStr;

/// Input widget wrapping tui-textarea.
pub struct InputWidget {
    textarea: TextArea<'static>,
}

/// Result of processing an input event.
#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Enter pressed; carries the line exactly as typed (possibly empty).
    Submit(String),
    /// Tab pressed; carries the current text.
    Complete(String),
    /// Input was consumed by the textarea (no special action).
    Consumed,
}

impl InputWidget {
    pub fn new(theme: &Theme) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_style(Style::default().fg(theme.fg).bg(theme.bg));
        Self { textarea }
    }

    /// Get the current input text.
    pub fn text(&self) -> String {
        self.textarea.lines().join("")
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(|l| l.is_empty())
    }

    pub fn clear(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }

    /// Replace the input text and put the cursor at its end.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.textarea.insert_str(text);
    }

    /// Process a crossterm event. Returns the resulting action.
    pub fn handle_event(&mut self, event: &Event) -> InputAction {
        match event {
            Event::Key(KeyEvent {
                code: KeyCode::Enter,
                ..
            }) => {
                let text = self.text();
                self.clear();
                InputAction::Submit(text)
            }
            Event::Key(KeyEvent {
                code: KeyCode::Tab, ..
            }) => InputAction::Complete(self.text()),
            Event::Paste(text) => {
                // Keep the prompt single-line.
                let flat: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                self.textarea.insert_str(flat);
                InputAction::Consumed
            }
            _ => {
                self.textarea.input(event.clone());
                InputAction::Consumed
            }
        }
    }

    /// Render `prompt` followed by the editable text on one row.
    pub fn render(&self, frame: &mut Frame, area: Rect, prompt: &str, theme: &Theme) {
        let prompt_width = u16::try_from(prompt.width())
            .unwrap_or(u16::MAX)
            .min(area.width.saturating_sub(1));
        let [prompt_area, text_area] =
            Layout::horizontal([Constraint::Length(prompt_width), Constraint::Min(1)])
                .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(prompt.to_string(), theme.prompt_style()))
                .style(theme.base_style()),
            prompt_area,
        );
        frame.render_widget(&self.textarea, text_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(widget: &mut InputWidget, s: &str) {
        for c in s.chars() {
            widget.handle_event(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut widget = InputWidget::new(&Theme::dark());
        type_str(&mut widget, "cd Projects");
        assert_eq!(widget.text(), "cd Projects");
        assert_eq!(
            widget.handle_event(&key(KeyCode::Enter)),
            InputAction::Submit("cd Projects".into())
        );
        assert!(widget.is_empty());
    }

    #[test]
    fn test_empty_submit_is_still_a_submission() {
        let mut widget = InputWidget::new(&Theme::dark());
        assert_eq!(
            widget.handle_event(&key(KeyCode::Enter)),
            InputAction::Submit(String::new())
        );
    }

    #[test]
    fn test_whitespace_is_kept() {
        let mut widget = InputWidget::new(&Theme::dark());
        type_str(&mut widget, "echo  a ");
        assert_eq!(
            widget.handle_event(&key(KeyCode::Enter)),
            InputAction::Submit("echo  a ".into())
        );
    }

    #[test]
    fn test_tab_requests_completion_without_editing() {
        let mut widget = InputWidget::new(&Theme::dark());
        type_str(&mut widget, "he");
        assert_eq!(
            widget.handle_event(&key(KeyCode::Tab)),
            InputAction::Complete("he".into())
        );
        assert_eq!(widget.text(), "he");
    }

    #[test]
    fn test_set_text_replaces() {
        let mut widget = InputWidget::new(&Theme::dark());
        type_str(&mut widget, "abc");
        widget.set_text("help");
        assert_eq!(widget.text(), "help");
        widget.set_text("");
        assert!(widget.is_empty());
    }

    #[test]
    fn test_paste_is_flattened() {
        let mut widget = InputWidget::new(&Theme::dark());
        widget.handle_event(&Event::Paste("echo a\nb".into()));
        assert_eq!(widget.text(), "echo ab");
    }

    #[test]
    fn test_backspace_edits() {
        let mut widget = InputWidget::new(&Theme::dark());
        type_str(&mut widget, "lss");
        widget.handle_event(&key(KeyCode::Backspace));
        assert_eq!(widget.text(), "ls");
    }

    #[test]
    fn test_render_with_prompt_wider_than_area() {
        let backend = ratatui::backend::TestBackend::new(8, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let widget = InputWidget::new(&theme);
        let prompt = format!("guest@folio:~/{}$ ", "deep/".repeat(20));
        terminal
            .draw(|frame| widget.render(frame, frame.area(), &prompt, &theme))
            .unwrap();
        let first: String = terminal.backend().buffer()[(0, 0)].symbol().to_string();
        assert_eq!(first, "g");
    }

    #[test]
    fn test_render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(40, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let mut widget = InputWidget::new(&theme);
        type_str(&mut widget, "pwd");
        terminal
            .draw(|frame| widget.render(frame, frame.area(), "guest@folio:~$ ", &theme))
            .unwrap();
    }
}
