//! Full-screen file viewer for the `cat` pager.
//!
//! Layout: one header row with the file name, the visible slice of the file,
//! then a footer row with the scroll percentage.

use crate::tui::theme::Theme;
use folio_core::Pager;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

/// Render the pager over `area`. `area` includes header and footer rows.
pub fn render_pager(frame: &mut Frame, area: Rect, pager: &Pager, theme: &Theme) {
    frame.render_widget(Clear, area);

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);
    let height = usize::from(body_area.height).max(1);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " File Viewer: ",
            theme.status_bar_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(pager.title().to_string(), theme.status_bar_style()),
    ]))
    .style(theme.status_bar_style());
    frame.render_widget(header, header_area);

    let lines: Vec<Line> = pager
        .visible(height)
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), theme.base_style())))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(theme.base_style()), body_area);

    let total = pager.lines().len();
    if total > height {
        let scrollbar =
            Scrollbar::new(ScrollbarOrientation::VerticalRight).style(theme.border_style());
        let mut state = ScrollbarState::new(total.saturating_sub(height)).position(pager.scroll());
        frame.render_stateful_widget(scrollbar, body_area, &mut state);
    }

    let footer = Paragraph::new(Span::styled(
        format!(" {}", pager.footer(height)),
        theme.status_bar_style(),
    ))
    .style(theme.status_bar_style());
    frame.render_widget(footer, footer_area);
}
