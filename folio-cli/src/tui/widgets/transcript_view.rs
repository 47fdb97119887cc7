//! Transcript widget: banner, greeting and command blocks, scrolled from the
//! bottom.

use crate::tui::theme::Theme;
use folio_core::Transcript;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

/// Render the visible slice of the transcript into `area`.
pub fn render_transcript(frame: &mut Frame, area: Rect, transcript: &Transcript, theme: &Theme) {
    // Leave a column for the scrollbar.
    let text_width = area.width.saturating_sub(1).max(1);
    let lines: Vec<Line> = transcript
        .render(text_width, area.height)
        .into_iter()
        .map(|line| Line::from(Span::styled(line.text, theme.line_style(line.kind))))
        .collect();

    let text_area = Rect::new(area.x, area.y, text_width.min(area.width), area.height);
    frame.render_widget(
        Paragraph::new(lines).style(theme.base_style()),
        text_area,
    );

    let max = transcript.max_scroll(text_width, area.height);
    if max > 0 && area.width > 1 {
        let position = max.saturating_sub(transcript.scroll_offset());
        let mut state = ScrollbarState::new(max).position(position);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .style(theme.border_style());
        frame.render_stateful_widget(scrollbar, area, &mut state);
    }
}
