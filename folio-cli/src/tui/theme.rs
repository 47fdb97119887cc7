//! Theme system for the Folio TUI.
//!
//! Provides dark and light color palettes, selected by `ui.theme`.

use folio_core::LineKind;
use ratatui::style::{Color, Modifier, Style};

/// Complete color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,

    // Transcript colors
    pub prompt_fg: Color,
    pub banner_fg: Color,
    pub greeting_fg: Color,
    pub output_fg: Color,
    pub pending_fg: Color,
    pub error_fg: Color,

    // UI chrome
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub border_color: Color,
}

impl Theme {
    /// Create the default dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            bg: Color::Rgb(30, 30, 46),
            fg: Color::Rgb(205, 214, 244),
            accent: Color::Rgb(78, 205, 126),

            prompt_fg: Color::Rgb(78, 205, 126),
            banner_fg: Color::Rgb(245, 194, 231),
            greeting_fg: Color::Rgb(166, 173, 200),
            output_fg: Color::Rgb(205, 214, 244),
            pending_fg: Color::Rgb(127, 132, 156),
            error_fg: Color::Rgb(243, 139, 168),

            status_bar_bg: Color::Rgb(24, 24, 37),
            status_bar_fg: Color::Rgb(166, 173, 200),
            border_color: Color::Rgb(69, 71, 90),
        }
    }

    /// Create the light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            bg: Color::Rgb(239, 241, 245),
            fg: Color::Rgb(76, 79, 105),
            accent: Color::Rgb(30, 102, 245),

            prompt_fg: Color::Rgb(64, 160, 43),
            banner_fg: Color::Rgb(234, 118, 203),
            greeting_fg: Color::Rgb(92, 95, 119),
            output_fg: Color::Rgb(76, 79, 105),
            pending_fg: Color::Rgb(140, 143, 161),
            error_fg: Color::Rgb(210, 15, 57),

            status_bar_bg: Color::Rgb(220, 224, 232),
            status_bar_fg: Color::Rgb(92, 95, 119),
            border_color: Color::Rgb(172, 176, 190),
        }
    }

    /// Load a theme by name from config. Falls back to dark.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    // -- Convenience style constructors --

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.status_bar_fg)
            .bg(self.status_bar_bg)
    }

    pub fn prompt_style(&self) -> Style {
        Style::default()
            .fg(self.prompt_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error_fg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border_color)
    }

    /// Style for one transcript line.
    pub fn line_style(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::Banner => Style::default()
                .fg(self.banner_fg)
                .add_modifier(Modifier::BOLD),
            LineKind::Greeting => Style::default().fg(self.greeting_fg),
            LineKind::Prompt => self.prompt_style(),
            LineKind::Output => Style::default().fg(self.output_fg),
            LineKind::Pending => Style::default()
                .fg(self.pending_fg)
                .add_modifier(Modifier::ITALIC),
            LineKind::Error => self.error_style(),
        }
    }
}
