//! Status bar widget showing keybinding hints and current mode.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Which surface currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Shell,
    Pager,
}

impl InputMode {
    /// Short display label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Shell => "SHELL",
            Self::Pager => "PAGER",
        }
    }

    fn hints(&self) -> &'static str {
        match self {
            Self::Shell => "[Enter] Run │ [Tab] Complete │ [↑↓] History │ [PgUp/PgDn] Scroll │ [Ctrl+C] Quit",
            Self::Pager => "[j/k] Line │ [u/d] Half page │ [b/f] Page │ [g/G] Top/Bottom │ [q] Close",
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What the status bar shows besides the mode.
#[derive(Debug, Clone, Copy)]
pub struct StatusInfo<'a> {
    pub mode: InputMode,
    /// Display form of the working directory, e.g. `~/Projects`.
    pub cwd: &'a str,
    /// A collaborator call is still in flight.
    pub pending: bool,
}

/// Render the status bar.
pub fn render_status_bar(frame: &mut Frame, area: Rect, info: StatusInfo<'_>, theme: &Theme) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", info.mode.label()),
            theme
                .status_bar_style()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", info.cwd), theme.status_bar_style()),
    ];
    if info.pending {
        spans.push(Span::styled(
            "⏳ working ",
            theme
                .status_bar_style()
                .fg(theme.pending_fg)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    spans.push(Span::styled("│ ", theme.status_bar_style()));
    spans.push(Span::styled(info.mode.hints(), theme.status_bar_style()));

    let bar = Paragraph::new(Line::from(spans)).style(theme.status_bar_style());
    frame.render_widget(bar, area);
}
