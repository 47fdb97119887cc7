//! Modal file pager.
//!
//! A [`Pager`] holds an immutable snapshot of one file's text and its own
//! scroll position. The session owns at most one; dropping it returns the
//! shell to normal mode.

/// Snapshot of a file being viewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    title: String,
    lines: Vec<String>,
    scroll: usize,
}

impl Pager {
    /// Capture `bytes` for viewing. Invalid UTF-8 is replaced, not rejected.
    pub fn new(title: impl Into<String>, bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        // An empty file still shows one (empty) row.
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            title: title.into(),
            lines,
            scroll: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn max_scroll(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(height)
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize, height: usize) {
        self.scroll = self
            .scroll
            .saturating_add(amount)
            .min(self.max_scroll(height));
    }

    pub fn half_page_up(&mut self, height: usize) {
        self.scroll_up((height / 2).max(1));
    }

    pub fn half_page_down(&mut self, height: usize) {
        self.scroll_down((height / 2).max(1), height);
    }

    pub fn page_up(&mut self, height: usize) {
        self.scroll_up(height.max(1));
    }

    pub fn page_down(&mut self, height: usize) {
        self.scroll_down(height.max(1), height);
    }

    pub fn top(&mut self) {
        self.scroll = 0;
    }

    pub fn bottom(&mut self, height: usize) {
        self.scroll = self.max_scroll(height);
    }

    /// Lines visible in a viewport `height` rows tall.
    pub fn visible(&self, height: usize) -> &[String] {
        let start = self.scroll.min(self.lines.len());
        let end = start.saturating_add(height).min(self.lines.len());
        &self.lines[start..end]
    }

    /// How far through the file the viewport is, 0 to 100. A file that fits
    /// entirely reads as 100.
    pub fn percent(&self, height: usize) -> u16 {
        let max = self.max_scroll(height);
        if max == 0 {
            return 100;
        }
        let pct = self.scroll.min(max) * 100 / max;
        pct as u16
    }

    /// Footer text, e.g. `notes.txt  42%  (q/esc to exit)`.
    pub fn footer(&self, height: usize) -> String {
        format!(
            "{}  {:>3}%  (q/esc to exit)",
            self.title,
            self.percent(height)
        )
    }
}
