//! Scrollback transcript: the ordered record of command output blocks and a
//! bounded viewport over it.

use crate::services::JobId;
use unicode_width::UnicodeWidthStr;

/// One executed command's contribution to the scrollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Prompt line the command was entered at, including the command itself.
    pub prompt: String,
    pub text: String,
    pub is_error: bool,
    pending: Option<JobId>,
    streamed: bool,
}

impl Block {
    pub fn output(prompt: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            text: text.into(),
            is_error: false,
            pending: None,
            streamed: false,
        }
    }

    pub fn error(prompt: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::output(prompt, text)
        }
    }

    /// A block waiting on a collaborator; `placeholder` is shown until the
    /// first chunk or the final result arrives.
    pub fn pending(prompt: impl Into<String>, placeholder: impl Into<String>, job: JobId) -> Self {
        Self {
            pending: Some(job),
            ..Self::output(prompt, placeholder)
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Style class of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Banner,
    Greeting,
    Prompt,
    Output,
    Error,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub text: String,
    pub kind: LineKind,
}

impl RenderedLine {
    fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Transcript of blocks plus the scroll position of its viewport.
///
/// `scroll_offset` counts lines up from the bottom, so 0 means "pinned to the
/// newest output". While unpinned, growth of a pending block below the view is
/// added to the offset so the visible lines stay put.
#[derive(Debug, Clone)]
pub struct Transcript {
    banner: Option<String>,
    greeting: Option<String>,
    blocks: Vec<Block>,
    scroll_offset: usize,
    auto_scroll: bool,
    /// Width the viewport wraps at.
    width: u16,
}

impl Transcript {
    pub fn new(banner: Option<String>, greeting: Option<String>) -> Self {
        Self {
            banner,
            greeting: greeting.filter(|g| !g.is_empty()),
            blocks: Vec::new(),
            scroll_offset: 0,
            auto_scroll: true,
            width: 80,
        }
    }

    /// Set the width blocks are wrapped at when keeping a scrolled view still.
    pub fn set_width(&mut self, width: u16) {
        self.width = width.max(1);
    }

    /// Append a block and jump to the newest output.
    pub fn append(&mut self, block: Block) {
        self.blocks.push(block);
        self.scroll_to_bottom();
    }

    /// Extend a pending block with a streamed chunk. The first chunk replaces
    /// the placeholder. Returns false if no block is waiting on `job`.
    pub fn append_chunk(&mut self, job: JobId, chunk: &str) -> bool {
        self.update_pending(job, |block| {
            if !block.streamed {
                block.text.clear();
                block.streamed = true;
            }
            block.text.push_str(chunk);
        })
    }

    /// Settle a pending block with its final text. Returns false if the block
    /// is gone (cleared) or already settled.
    pub fn resolve(&mut self, job: JobId, result: Result<String, String>) -> bool {
        self.update_pending(job, |block| {
            match result {
                Ok(text) => block.text = text,
                Err(message) => {
                    block.text = message;
                    block.is_error = true;
                }
            }
            block.pending = None;
        })
    }

    /// Apply `update` to the block waiting on `job`, keeping an unpinned
    /// viewport on the same lines.
    fn update_pending(&mut self, job: JobId, update: impl FnOnce(&mut Block)) -> bool {
        let Some(index) = self.blocks.iter().position(|b| b.pending == Some(job)) else {
            return false;
        };
        let width = usize::from(self.width);
        let before = block_height(&self.blocks[index], width);
        update(&mut self.blocks[index]);
        let after = block_height(&self.blocks[index], width);

        if self.auto_scroll {
            self.scroll_offset = 0;
            return true;
        }
        // Lines below the block do not move; only a view whose bottom edge
        // sits at or above the block's end has to follow the change.
        let below: usize = self.blocks[index + 1..]
            .iter()
            .map(|b| block_height(b, width))
            .sum();
        if self.scroll_offset >= below {
            self.scroll_offset = if after >= before {
                self.scroll_offset.saturating_add(after - before)
            } else {
                self.scroll_offset.saturating_sub(before - after).max(below)
            };
        }
        true
    }

    /// Drop every block and the greeting. The banner stays.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.greeting = None;
        self.scroll_to_bottom();
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.blocks.iter().any(Block::is_pending)
    }

    /// Every line of the transcript, soft-wrapped to `width` columns.
    pub fn lines(&self, width: u16) -> Vec<RenderedLine> {
        let width = usize::from(width.max(1));
        let mut out = Vec::new();

        if let Some(banner) = &self.banner {
            push_wrapped(&mut out, banner, width, LineKind::Banner);
        }
        if let Some(greeting) = &self.greeting {
            push_wrapped(&mut out, greeting, width, LineKind::Greeting);
            out.push(RenderedLine::new("", LineKind::Greeting));
        }

        for block in &self.blocks {
            push_block(&mut out, block, width);
        }
        out
    }

    /// Lines visible in a `width` x `height` viewport at the current scroll
    /// position. Pure: the same state and size always give the same lines.
    pub fn render(&self, width: u16, height: u16) -> Vec<RenderedLine> {
        let lines = self.lines(width);
        let height = usize::from(height);
        let bottom_start = lines.len().saturating_sub(height);
        let start = bottom_start.saturating_sub(self.scroll_offset);
        lines.into_iter().skip(start).take(height).collect()
    }

    /// Largest useful scroll offset for a viewport of this size.
    pub fn max_scroll(&self, width: u16, height: u16) -> usize {
        self.lines(width).len().saturating_sub(usize::from(height))
    }

    pub fn scroll_up(&mut self, amount: usize, max: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max);
        self.auto_scroll = self.scroll_offset == 0;
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
        if self.scroll_offset == 0 {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_top(&mut self, max: usize) {
        self.scroll_offset = max;
        self.auto_scroll = max == 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_auto_scroll(&self) -> bool {
        self.auto_scroll
    }
}

fn push_block(out: &mut Vec<RenderedLine>, block: &Block, width: usize) {
    push_wrapped(out, &block.prompt, width, LineKind::Prompt);
    if block.text.is_empty() {
        return;
    }
    let kind = if block.is_error {
        LineKind::Error
    } else if block.is_pending() && !block.streamed {
        LineKind::Pending
    } else {
        LineKind::Output
    };
    push_wrapped(out, &block.text, width, kind);
}

/// Rendered line count of one block at `width`.
fn block_height(block: &Block, width: usize) -> usize {
    let mut lines = Vec::new();
    push_block(&mut lines, block, width);
    lines.len()
}

fn push_wrapped(out: &mut Vec<RenderedLine>, text: &str, width: usize, kind: LineKind) {
    for raw in text.split('\n') {
        if raw.width() <= width {
            out.push(RenderedLine::new(raw, kind));
            continue;
        }
        for piece in textwrap::wrap(raw, width) {
            out.push(RenderedLine::new(piece.into_owned(), kind));
        }
    }
}
