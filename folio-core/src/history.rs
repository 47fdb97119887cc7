//! Command history with an independent recall cursor.

/// Append-only log of submitted lines.
///
/// The cursor is an offset from the newest entry (`Some(0)` is the newest)
/// or `None` when the user is not browsing. Recall only moves the cursor;
/// entries are never reordered or dropped.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submitted line and stop browsing.
    pub fn record(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = None;
    }

    /// Step toward older entries.
    ///
    /// From "not browsing" this selects the newest entry. At the oldest entry
    /// the cursor stays put and the oldest line is returned again.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => 0,
            Some(offset) => (offset + 1).min(self.entries.len() - 1),
        };
        self.cursor = Some(next);
        self.current()
    }

    /// Step toward newer entries.
    ///
    /// At the newest entry this leaves browsing and yields an empty line.
    /// When not browsing there is nothing to recall.
    pub fn recall_next(&mut self) -> Option<&str> {
        match self.cursor {
            None => None,
            Some(0) => {
                self.cursor = None;
                Some("")
            }
            Some(offset) => {
                self.cursor = Some(offset - 1);
                self.current()
            }
        }
    }

    /// Line under the cursor, if browsing.
    pub fn current(&self) -> Option<&str> {
        let offset = self.cursor?;
        let index = self.entries.len().checked_sub(1 + offset)?;
        self.entries.get(index).map(String::as_str)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
